use crate::model::{DayOfWeek, RecordId, TimeOfDay, WeeklySlot};
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Créneau hebdomadaire proposé (pas encore enregistré).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCandidate {
    pub day_of_week: DayOfWeek,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl From<&WeeklySlot> for WeeklyCandidate {
    fn from(slot: &WeeklySlot) -> Self {
        Self {
            day_of_week: slot.day_of_week,
            start: slot.start,
            end: slot.end,
        }
    }
}

/// Résultat de la détection de conflit sur les exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResult {
    Clear,
    AllDay,
    Overlap,
}

impl ConflictResult {
    pub fn is_conflict(self) -> bool {
        self != ConflictResult::Clear
    }
}

/// Nature d'un conflit effectivement trouvé sur une date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideClash {
    AllDay,
    Overlap,
}

impl From<OverrideClash> for ConflictResult {
    fn from(clash: OverrideClash) -> Self {
        match clash {
            OverrideClash::AllDay => ConflictResult::AllDay,
            OverrideClash::Overlap => ConflictResult::Overlap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Start => "start",
            Field::End => "end",
            Field::Date => "date",
        })
    }
}

/// Formulaire d'origine d'une saisie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Weekly,
    Override,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Form::Weekly => "weekly slot",
            Form::Override => "override",
        })
    }
}

/// Issues de validation : toujours retournées, jamais paniquées.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing {field} for {form}")]
    MissingField { field: Field, form: Form },
    #[error("invalid time range: start {start} must be before end {end}")]
    InvertedRange { start: TimeOfDay, end: TimeOfDay },
    #[error("date {date} is before today ({today})")]
    PastDate { date: NaiveDate, today: NaiveDate },
    #[error("overlaps weekly slot {existing} on day {day}")]
    WeeklyOverlap { day: DayOfWeek, existing: String },
    #[error("all-day conflict with override {existing} on {date}")]
    OverrideAllDayConflict { date: NaiveDate, existing: String },
    #[error("overlaps override {existing} on {date}")]
    OverrideOverlap { date: NaiveDate, existing: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    WeeklyOverlap,
    OverrideAllDay,
    OverrideOverlap,
    Malformed,
}

/// Conflit trouvé entre deux enregistrements déjà stockés.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub first: RecordId,
    pub second: Option<RecordId>,
}

#[derive(Error, Debug)]
pub enum BookError {
    #[error("unknown record: {0}")]
    UnknownRecord(String),
}
