use crate::model::{Availability, DayOfWeek};
use crate::validator::util;
use chrono::{Days, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

/// Options de projection des créneaux réservables
#[derive(Debug, Clone, Copy)]
pub struct SlotOptions {
    pub horizon_days: u32,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self { horizon_days: 7 }
    }
}

/// Créneau concret proposé aux clients, `[start, end)` en heure locale de l'avocat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookableSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Projette les créneaux hebdomadaires sur `horizon_days` jours à partir de `now`.
///
/// Une date couverte par une exception « toute la journée » ne produit rien ;
/// un créneau déjà commencé ou chevauché par une exception horaire est écarté.
/// Un créneau stocké avec `start >= end` (fichier édité à la main) est ignoré.
pub fn bookable_slots(
    availability: &Availability,
    now: NaiveDateTime,
    opts: SlotOptions,
) -> Vec<BookableSlot> {
    let today = now.date();
    let mut out = Vec::new();

    for offset in 0..opts.horizon_days {
        let Some(date) = today.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        let overrides: Vec<_> = availability.overrides_on(date).collect();
        if overrides.iter().any(|o| o.is_all_day) {
            debug!(%date, "date blocked all day");
            continue;
        }

        for slot in availability.weekly_on(DayOfWeek::of(date)) {
            if slot.start >= slot.end {
                warn!(
                    id = slot.id.as_str(),
                    start = %slot.start,
                    end = %slot.end,
                    "malformed weekly slot skipped"
                );
                continue;
            }
            let start = date.and_time(slot.start.as_naive());
            let end = date.and_time(slot.end.as_naive());
            if start <= now {
                continue;
            }
            let blocked = overrides.iter().filter_map(|o| o.bounds()).any(|(o_start, o_end)| {
                util::overlaps(
                    start,
                    end,
                    date.and_time(o_start.as_naive()),
                    date.and_time(o_end.as_naive()),
                )
            });
            if !blocked {
                out.push(BookableSlot { start, end });
            }
        }
    }

    out.sort_by_key(|s| s.start);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateOverride, LawyerId, TimeOfDay, WeeklySlot};
    use chrono::NaiveDate;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    // 2024-06-03 est un lundi
    fn sample() -> Availability {
        let mut a = Availability::new(LawyerId::new("l-1"));
        for day in 0..5 {
            let dow = DayOfWeek::new(day).unwrap();
            a.weekly.push(WeeklySlot::new(dow, t("09:00"), t("10:00")).unwrap());
            a.weekly.push(WeeklySlot::new(dow, t("14:00"), t("15:00")).unwrap());
        }
        a
    }

    #[test]
    fn projects_one_week_of_weekdays() {
        let now = date(2).and_hms_opt(20, 0, 0).unwrap(); // dimanche soir
        let slots = bookable_slots(&sample(), now, SlotOptions::default());
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].start, date(3).and_hms_opt(9, 0, 0).unwrap());
        assert!(slots.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn skips_started_slots() {
        let now = date(3).and_hms_opt(9, 0, 0).unwrap();
        let slots = bookable_slots(&sample(), now, SlotOptions { horizon_days: 1 });
        assert_eq!(
            slots,
            vec![BookableSlot {
                start: date(3).and_hms_opt(14, 0, 0).unwrap(),
                end: date(3).and_hms_opt(15, 0, 0).unwrap(),
            }]
        );
    }

    #[test]
    fn overrides_remove_slots() {
        let mut a = sample();
        a.overrides.push(DateOverride::all_day(date(4), None));
        a.overrides
            .push(DateOverride::timed(date(5), t("09:30"), t("11:00"), None).unwrap());
        // adjacent : ne bloque pas
        a.overrides
            .push(DateOverride::timed(date(6), t("15:00"), t("16:00"), None).unwrap());

        let now = date(3).and_hms_opt(0, 0, 0).unwrap();
        let slots = bookable_slots(&a, now, SlotOptions { horizon_days: 4 });
        let starts: Vec<String> = slots
            .iter()
            .map(|s| s.start.format("%d %H:%M").to_string())
            .collect();
        assert_eq!(starts, vec!["03 09:00", "03 14:00", "05 14:00", "06 09:00", "06 14:00"]);
    }

    #[test]
    fn inverted_stored_slot_is_skipped() {
        let mut a = Availability::new(LawyerId::new("l-1"));
        let mut inverted =
            WeeklySlot::new(DayOfWeek::new(0).unwrap(), t("09:00"), t("12:00")).unwrap();
        inverted.start = t("12:00");
        inverted.end = t("09:00");
        a.weekly.push(inverted);
        a.weekly
            .push(WeeklySlot::new(DayOfWeek::new(0).unwrap(), t("14:00"), t("15:00")).unwrap());

        let now = date(3).and_hms_opt(0, 0, 0).unwrap();
        let slots = bookable_slots(&a, now, SlotOptions { horizon_days: 1 });
        assert_eq!(slots.len(), 1);
        assert!(slots.iter().all(|s| s.start < s.end));
    }

    #[test]
    fn zero_horizon_is_empty() {
        let now = date(3).and_hms_opt(0, 0, 0).unwrap();
        assert!(bookable_slots(&sample(), now, SlotOptions { horizon_days: 0 }).is_empty());
    }
}
