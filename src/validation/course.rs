/// Collapse repeated student ids, keeping the first occurrence of each.
pub fn dedup_students(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// A partial update without a name keeps the stored one.
pub fn effective_name<'a>(requested: Option<&'a str>, stored: &'a str) -> &'a str {
    requested.unwrap_or(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(dedup_students(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_students(&[]).is_empty());
    }

    #[test]
    fn test_effective_name() {
        assert_eq!(effective_name(Some("new"), "old"), "new");
        assert_eq!(effective_name(None, "old"), "old");
    }
}
