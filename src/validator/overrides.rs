use super::{util, ConflictResult, OverrideClash};
use crate::model::DateOverride;

/// Première exception de la même date en conflit avec le candidat, avec la nature du conflit.
pub fn find_override_conflict<'a>(
    existing: &'a [DateOverride],
    candidate: &DateOverride,
) -> Option<(&'a DateOverride, OverrideClash)> {
    let same_date = existing.iter().filter(|o| o.date == candidate.date);

    if candidate.is_all_day {
        // toute exception sur la date bloque une journée entière
        return same_date.map(|o| (o, OverrideClash::AllDay)).next();
    }

    let bounds = candidate.bounds();
    for o in same_date {
        if o.is_all_day {
            return Some((o, OverrideClash::AllDay));
        }
        if let (Some((start, end)), Some((o_start, o_end))) = (bounds, o.bounds()) {
            if util::overlaps(start, end, o_start, o_end) {
                return Some((o, OverrideClash::Overlap));
            }
        }
    }
    None
}

/// Classe le conflit éventuel entre une exception proposée et celles déjà posées.
///
/// Une exception horaire sans bornes ne peut chevaucher rien : les bornes sont
/// vérifiées en amont par [`OverrideDraft::validate`](super::OverrideDraft::validate).
pub fn has_override_conflict(existing: &[DateOverride], candidate: &DateOverride) -> ConflictResult {
    find_override_conflict(existing, candidate)
        .map(|(_, clash)| ConflictResult::from(clash))
        .unwrap_or(ConflictResult::Clear)
}
