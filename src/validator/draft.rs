use super::{Field, Form, ValidationError, WeeklyCandidate};
use crate::model::{DateOverride, DayOfWeek, TimeOfDay};
use chrono::NaiveDate;

/// Saisie brute d'un créneau hebdomadaire (formulaire).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyDraft {
    pub day_of_week: DayOfWeek,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl WeeklyDraft {
    pub fn validate(&self) -> Result<WeeklyCandidate, ValidationError> {
        let (start, end) = require_range(Form::Weekly, self.start, self.end)?;
        Ok(WeeklyCandidate {
            day_of_week: self.day_of_week,
            start,
            end,
        })
    }
}

/// Saisie brute d'une exception datée (formulaire).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverrideDraft {
    pub date: Option<NaiveDate>,
    pub is_all_day: bool,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub description: Option<String>,
}

impl OverrideDraft {
    /// Vérifie la date (présente, pas avant `today`) puis les bornes si l'exception est horaire.
    ///
    /// Les heures saisies sur une exception « toute la journée » sont ignorées.
    pub fn validate(&self, today: NaiveDate) -> Result<DateOverride, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingField {
            field: Field::Date,
            form: Form::Override,
        })?;
        if date < today {
            return Err(ValidationError::PastDate { date, today });
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_owned);

        if self.is_all_day {
            return Ok(DateOverride::all_day(date, description));
        }

        let (start, end) = require_range(Form::Override, self.start, self.end)?;
        DateOverride::timed(date, start, end, description)
            .map_err(|_| ValidationError::InvertedRange { start, end })
    }
}

fn require_range(
    form: Form,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
) -> Result<(TimeOfDay, TimeOfDay), ValidationError> {
    let missing = |field| ValidationError::MissingField { field, form };
    let start = start.ok_or_else(|| missing(Field::Start))?;
    let end = end.ok_or_else(|| missing(Field::End))?;
    if start >= end {
        return Err(ValidationError::InvertedRange { start, end });
    }
    Ok((start, end))
}
