use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour un avocat
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LawyerId(String);

impl LawyerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LawyerId {
    fn default() -> Self {
        Self::random()
    }
}

/// Identifiant d'un enregistrement (créneau ou exception)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Jour de la semaine, 0 = lundi … 6 = dimanche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub fn new(n: u8) -> Result<Self, String> {
        if n > 6 {
            return Err(format!("day_of_week must be in 0..=6, got {n}"));
        }
        Ok(Self(n))
    }
    pub fn index(self) -> u8 {
        self.0
    }
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::from(date.weekday())
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        Self(w.num_days_from_monday() as u8)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = String;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(d: DayOfWeek) -> Self {
        d.0
    }
}

/// Heure murale à la minute près, ordonnée comme les chaînes `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        // secondes ignorées
        Self(t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(t))
    }
}

impl FromStr for TimeOfDay {
    type Err = chrono::ParseError;

    /// Accepte `HH:MM` et `HH:MM:SS` (format renvoyé par le backend).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map(Self::from)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Créneau de disponibilité récurrent (hebdomadaire), intervalle `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySlot {
    pub id: RecordId,
    pub day_of_week: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl WeeklySlot {
    /// Crée un créneau en validant que `end > start`.
    pub fn new(day_of_week: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> Result<Self, String> {
        if end <= start {
            return Err("end must be strictly after start".to_string());
        }
        Ok(Self {
            id: RecordId::random(),
            day_of_week,
            start,
            end,
        })
    }
}

/// Exception ponctuelle sur une date (blocage total ou plage horaire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub start: Option<TimeOfDay>,
    #[serde(default)]
    pub end: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DateOverride {
    pub fn all_day(date: NaiveDate, description: Option<String>) -> Self {
        Self {
            id: RecordId::random(),
            date,
            is_all_day: true,
            start: None,
            end: None,
            description,
        }
    }

    /// Crée une exception horaire en validant que `end > start`.
    pub fn timed(
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
        description: Option<String>,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("override end must be after start".to_string());
        }
        Ok(Self {
            id: RecordId::random(),
            date,
            is_all_day: false,
            start: Some(start),
            end: Some(end),
            description,
        })
    }

    /// Bornes horaires, absentes pour une exception « toute la journée ».
    pub fn bounds(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        if self.is_all_day {
            return None;
        }
        self.start.zip(self.end)
    }
}

/// Instantané des disponibilités d'un avocat
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Availability {
    pub lawyer: LawyerId,
    #[serde(default)]
    pub weekly: Vec<WeeklySlot>,
    #[serde(default)]
    pub overrides: Vec<DateOverride>,
}

impl Availability {
    pub fn new(lawyer: LawyerId) -> Self {
        Self {
            lawyer,
            weekly: Vec::new(),
            overrides: Vec::new(),
        }
    }

    pub fn weekly_on(&self, day: DayOfWeek) -> impl Iterator<Item = &WeeklySlot> {
        self.weekly.iter().filter(move |s| s.day_of_week == day)
    }

    pub fn overrides_on(&self, date: NaiveDate) -> impl Iterator<Item = &DateOverride> {
        self.overrides.iter().filter(move |o| o.date == date)
    }

    /// Tri d'affichage : (jour, début) ; exceptions par (date, début), journées entières d'abord.
    pub fn sort(&mut self) {
        self.weekly.sort_by_key(|s| (s.day_of_week, s.start));
        self.overrides.sort_by_key(|o| (o.date, o.start));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_parses_backend_format() {
        let a: TimeOfDay = "09:30".parse().unwrap();
        let b: TimeOfDay = "09:30:00".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "09:30");
        assert!("25:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn time_of_day_orders_like_strings() {
        let early: TimeOfDay = "08:59".parse().unwrap();
        let late: TimeOfDay = "10:00".parse().unwrap();
        assert!(early < late);
    }

    #[test]
    fn day_of_week_bounds() {
        assert!(DayOfWeek::new(6).is_ok());
        assert!(DayOfWeek::new(7).is_err());
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(DayOfWeek::of(monday).index(), 0);
    }

    #[test]
    fn override_invariants() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let nine = TimeOfDay::from_hm(9, 0).unwrap();
        assert!(DateOverride::timed(date, nine, nine, None).is_err());
        let all = DateOverride::all_day(date, Some("congé".into()));
        assert_eq!(all.bounds(), None);
    }

    #[test]
    fn availability_json_shape() {
        let mut a = Availability::new(LawyerId::new("l-1"));
        let slot = WeeklySlot::new(
            DayOfWeek::new(1).unwrap(),
            "09:00".parse().unwrap(),
            "12:00".parse().unwrap(),
        )
        .unwrap();
        a.weekly.push(slot);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["weekly"][0]["day_of_week"], 1);
        assert_eq!(json["weekly"][0]["start"], "09:00");
        let back: Availability = serde_json::from_value(json).unwrap();
        assert_eq!(back.weekly, a.weekly);
    }
}
