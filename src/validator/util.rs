/// Chevauchement d'intervalles semi-ouverts `[a_start, a_end)` et `[b_start, b_end)`.
pub(crate) fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
mod tests {
    use super::overlaps;

    #[test]
    fn adjacency_is_not_overlap() {
        assert!(!overlaps(9, 10, 10, 11));
        assert!(!overlaps(10, 11, 9, 10));
    }

    #[test]
    fn containment_is_overlap() {
        assert!(overlaps(9, 12, 10, 11));
        assert!(overlaps(10, 11, 9, 12));
        assert!(overlaps(9, 10, 9, 10));
    }
}
