use super::{overrides, weekly, Conflict, ConflictKind, OverrideClash, WeeklyCandidate};
use crate::model::{Availability, DateOverride};

/// Détecte les conflits entre enregistrements déjà stockés (instantané chargé d'un fichier).
pub(super) fn detect_conflicts(availability: &Availability) -> Vec<Conflict> {
    let mut out = Vec::new();

    for (idx, slot) in availability.weekly.iter().enumerate() {
        if slot.start >= slot.end {
            out.push(Conflict {
                kind: ConflictKind::Malformed,
                first: slot.id.clone(),
                second: None,
            });
            continue;
        }
        let rest = &availability.weekly[idx + 1..];
        let candidate = WeeklyCandidate::from(slot);
        // toutes les paires, pas seulement la première
        for other in rest.iter().filter(|o| o.start < o.end) {
            if weekly::has_weekly_overlap(std::slice::from_ref(other), &candidate) {
                out.push(Conflict {
                    kind: ConflictKind::WeeklyOverlap,
                    first: slot.id.clone(),
                    second: Some(other.id.clone()),
                });
            }
        }
    }

    for (idx, ov) in availability.overrides.iter().enumerate() {
        if is_malformed(ov) {
            out.push(Conflict {
                kind: ConflictKind::Malformed,
                first: ov.id.clone(),
                second: None,
            });
            continue;
        }
        let rest = &availability.overrides[idx + 1..];
        for other in rest.iter().filter(|o| !is_malformed(o)) {
            let kind = match overrides::find_override_conflict(std::slice::from_ref(other), ov) {
                None => continue,
                Some((_, OverrideClash::AllDay)) => ConflictKind::OverrideAllDay,
                Some((_, OverrideClash::Overlap)) => ConflictKind::OverrideOverlap,
            };
            out.push(Conflict {
                kind,
                first: ov.id.clone(),
                second: Some(other.id.clone()),
            });
        }
    }

    out
}

fn is_malformed(ov: &DateOverride) -> bool {
    if ov.is_all_day {
        return ov.start.is_some() || ov.end.is_some();
    }
    match ov.bounds() {
        Some((start, end)) => start >= end,
        None => true,
    }
}
