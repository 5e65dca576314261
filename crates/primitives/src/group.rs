//! Grouping primitives over a flat, ordered panel.

use std::{collections::HashMap, ops::Range};

/// Partition an ordered key sequence into maximal runs of equal keys.
///
/// Returns half-open row ranges in input order. Empty input yields no runs.
#[must_use]
pub fn entity_runs<K: PartialEq>(keys: &[K]) -> Vec<Range<usize>> {
    let mut start = 0;
    keys.chunk_by(|a, b| a == b)
        .map(|run| {
            let range = start..start + run.len();
            start = range.end;
            range
        })
        .collect()
}

/// Row indices of a panel grouped by date, one group per distinct date key.
///
/// Groups are ordered by first appearance and rows within a group keep panel
/// order, so iteration is deterministic for a given panel.
#[derive(Debug, Clone, Default)]
pub struct CrossSections {
    keys: Vec<String>,
    rows: Vec<Vec<usize>>,
}

impl CrossSections {
    /// Group rows by key. Rows with a missing key belong to no group.
    #[must_use]
    pub fn from_keys<S: AsRef<str>>(keys: &[Option<S>]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut sections = Self::default();

        for (row, key) in keys.iter().enumerate() {
            let Some(key) = key.as_ref().map(AsRef::as_ref) else { continue };
            let slot = *index.entry(key).or_insert_with(|| {
                sections.keys.push(key.to_string());
                sections.rows.push(Vec::new());
                sections.rows.len() - 1
            });
            sections.rows[slot].push(row);
        }

        sections
    }

    /// Number of distinct dates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over `(date key, row indices)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.keys.iter().map(String::as_str).zip(self.rows.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["a"], vec![0..1])]
    #[case(vec!["a", "a", "b", "b", "b", "c"], vec![0..2, 2..5, 5..6])]
    #[case(vec!["a", "b", "a"], vec![0..1, 1..2, 2..3])]
    fn runs_split_on_key_change(#[case] keys: Vec<&str>, #[case] expected: Vec<Range<usize>>) {
        assert_eq!(entity_runs(&keys), expected);
    }

    #[test]
    fn cross_sections_group_by_first_appearance() {
        let keys = [Some("d2"), Some("d1"), None, Some("d2"), Some("d1")];
        let sections = CrossSections::from_keys(&keys);

        assert_eq!(sections.len(), 2);
        let groups: Vec<(&str, &[usize])> = sections.iter().collect();
        assert_eq!(groups[0], ("d2", &[0, 3][..]));
        assert_eq!(groups[1], ("d1", &[1, 4][..]));
    }
}
