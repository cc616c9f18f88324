use super::{util, WeeklyCandidate};
use crate::model::WeeklySlot;

/// Premier créneau du même jour qui chevauche le candidat.
pub fn find_weekly_overlap<'a>(
    existing: &'a [WeeklySlot],
    candidate: &WeeklyCandidate,
) -> Option<&'a WeeklySlot> {
    existing
        .iter()
        .filter(|slot| slot.day_of_week == candidate.day_of_week)
        .find(|slot| util::overlaps(candidate.start, candidate.end, slot.start, slot.end))
}

/// Vrai si le candidat chevauche un créneau hebdomadaire existant du même jour.
///
/// Les cas d'inclusion (candidat dans l'existant, existant dans le candidat)
/// sont couverts par le test semi-ouvert dès que `start < end`.
pub fn has_weekly_overlap(existing: &[WeeklySlot], candidate: &WeeklyCandidate) -> bool {
    find_weekly_overlap(existing, candidate).is_some()
}
