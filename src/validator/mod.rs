mod audit;
mod draft;
mod overrides;
mod types;
pub(crate) mod util;
mod weekly;

pub use draft::{OverrideDraft, WeeklyDraft};
pub use overrides::{find_override_conflict, has_override_conflict};
pub use types::{
    BookError, Conflict, ConflictKind, ConflictResult, Field, Form, OverrideClash, ValidationError,
    WeeklyCandidate,
};
pub use weekly::{find_weekly_overlap, has_weekly_overlap};

use crate::model::{Availability, LawyerId, RecordId, WeeklySlot};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Carnet de disponibilités : encapsule l'instantané d'un avocat et
/// valide chaque ajout (préconditions puis conflits) avant insertion.
#[derive(Debug, Default)]
pub struct AvailabilityBook {
    availability: Availability,
}

impl AvailabilityBook {
    pub fn new(lawyer: LawyerId) -> Self {
        Self {
            availability: Availability::new(lawyer),
        }
    }

    pub fn from_snapshot(availability: Availability) -> Self {
        Self { availability }
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Ajoute un créneau hebdomadaire s'il est valide et ne chevauche rien le même jour.
    pub fn propose_weekly(&mut self, draft: &WeeklyDraft) -> Result<RecordId, ValidationError> {
        let candidate = draft
            .validate()
            .inspect_err(|e| warn!(error = %e, "weekly slot rejected"))?;

        if let Some(existing) = find_weekly_overlap(&self.availability.weekly, &candidate) {
            warn!(
                day = candidate.day_of_week.index(),
                existing = existing.id.as_str(),
                "weekly slot overlaps"
            );
            return Err(ValidationError::WeeklyOverlap {
                day: candidate.day_of_week,
                existing: existing.id.as_str().to_owned(),
            });
        }

        let slot = WeeklySlot::new(candidate.day_of_week, candidate.start, candidate.end)
            .map_err(|_| ValidationError::InvertedRange {
                start: candidate.start,
                end: candidate.end,
            })?;
        let id = slot.id.clone();
        info!(
            id = id.as_str(),
            day = slot.day_of_week.index(),
            start = %slot.start,
            end = %slot.end,
            "weekly slot added"
        );
        self.availability.weekly.push(slot);
        self.availability.sort();
        Ok(id)
    }

    /// Ajoute une exception datée ; `today` est fourni par l'appelant.
    pub fn propose_override(
        &mut self,
        draft: &OverrideDraft,
        today: NaiveDate,
    ) -> Result<RecordId, ValidationError> {
        let candidate = draft
            .validate(today)
            .inspect_err(|e| warn!(error = %e, "override rejected"))?;

        if let Some((existing, clash)) =
            find_override_conflict(&self.availability.overrides, &candidate)
        {
            let existing = existing.id.as_str().to_owned();
            warn!(
                date = %candidate.date,
                existing = existing.as_str(),
                ?clash,
                "override conflicts"
            );
            return Err(match clash {
                OverrideClash::Overlap => ValidationError::OverrideOverlap {
                    date: candidate.date,
                    existing,
                },
                OverrideClash::AllDay => ValidationError::OverrideAllDayConflict {
                    date: candidate.date,
                    existing,
                },
            });
        }

        let id = candidate.id.clone();
        info!(
            id = id.as_str(),
            date = %candidate.date,
            all_day = candidate.is_all_day,
            "override added"
        );
        self.availability.overrides.push(candidate);
        self.availability.sort();
        Ok(id)
    }

    pub fn remove_weekly(&mut self, id: &RecordId) -> Result<(), BookError> {
        let pos = self
            .availability
            .weekly
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| BookError::UnknownRecord(id.as_str().to_string()))?;
        self.availability.weekly.remove(pos);
        info!(id = id.as_str(), "weekly slot removed");
        Ok(())
    }

    pub fn remove_override(&mut self, id: &RecordId) -> Result<(), BookError> {
        let pos = self
            .availability
            .overrides
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| BookError::UnknownRecord(id.as_str().to_string()))?;
        self.availability.overrides.remove(pos);
        info!(id = id.as_str(), "override removed");
        Ok(())
    }

    /// Re-vérifie l'instantané courant (enregistrements mal formés, paires en conflit).
    pub fn audit(&self) -> Vec<Conflict> {
        let conflicts = audit::detect_conflicts(&self.availability);
        debug!(count = conflicts.len(), "audit done");
        conflicts
    }
}
