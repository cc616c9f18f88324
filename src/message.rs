use crate::validator::{Field, Form, ValidationError};

/// Permet de customiser le message montré à l'utilisateur (texte, i18n, etc.).
pub trait MessageRenderer {
    fn render(&self, error: &ValidationError) -> String;
}

/// Messages texte par défaut, ceux du tableau de bord avocat.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMessages;

impl MessageRenderer for TextMessages {
    fn render(&self, error: &ValidationError) -> String {
        match error {
            ValidationError::MissingField {
                field: Field::Date, ..
            } => "Please select a date for the override.".to_string(),
            ValidationError::MissingField {
                form: Form::Override,
                ..
            } => "Please provide start and end times for the override, or mark as all day."
                .to_string(),
            ValidationError::MissingField {
                form: Form::Weekly, ..
            } => "Please select both start and end times.".to_string(),
            ValidationError::InvertedRange { start, end } => {
                format!("Start time must be before end time ({start} - {end}).")
            }
            ValidationError::PastDate { date, today } => {
                format!("The date {date} is in the past (today is {today}).")
            }
            ValidationError::WeeklyOverlap { .. } => {
                "This time slot overlaps with an existing availability.".to_string()
            }
            ValidationError::OverrideAllDayConflict { date, .. } => format!(
                "An all-day override already exists for {date}, or you are trying to add an all-day override for a date that already has overrides."
            ),
            ValidationError::OverrideOverlap { date, .. } => {
                format!("This override overlaps with an existing override on {date}.")
            }
        }
    }
}
