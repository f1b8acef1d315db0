use crate::{ErrorCount, Typo};
use std::collections::HashMap;

/// Occurrence counts keyed by typo. Holds no entry with a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTable {
    counts: HashMap<Typo, usize>,
}

impl ErrorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `typo`.
    pub fn record(&mut self, typo: Typo) {
        self.add(typo, 1);
    }

    pub fn add(&mut self, typo: Typo, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(typo).or_insert(0) += count;
    }

    /// Fold another table into this one, summing counts per typo.
    pub fn merge(&mut self, other: ErrorTable) {
        for (typo, count) in other.counts {
            self.add(typo, count);
        }
    }

    pub fn count(&self, typo: &Typo) -> usize {
        self.counts.get(typo).copied().unwrap_or(0)
    }

    /// Number of distinct typos.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all occurrences.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Typo, usize)> {
        self.counts.iter().map(|(typo, &count)| (typo, count))
    }

    /// Drop every typo seen fewer than `threshold` times.
    pub fn retain_min_count(&mut self, threshold: usize) {
        self.counts.retain(|_, count| *count >= threshold);
    }

    /// Report records, most frequent first. Equal counts are ordered by
    /// `wrong`, then `correct`.
    pub fn into_sorted(self) -> Vec<ErrorCount> {
        let mut records: Vec<ErrorCount> = self
            .counts
            .into_iter()
            .map(|(typo, count)| ErrorCount::new(typo, count))
            .collect();
        records.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.typo.cmp(&b.typo)));
        records
    }
}

impl FromIterator<ErrorCount> for ErrorTable {
    fn from_iter<I: IntoIterator<Item = ErrorCount>>(iter: I) -> Self {
        let mut table = ErrorTable::new();
        table.extend(iter);
        table
    }
}

impl Extend<ErrorCount> for ErrorTable {
    fn extend<I: IntoIterator<Item = ErrorCount>>(&mut self, iter: I) {
        for record in iter {
            self.add(record.typo, record.count);
        }
    }
}

/// Collapse records that may repeat the same typo into one record per typo
/// with the summed count, sorted most frequent first.
pub fn update_counts<I>(records: I) -> Vec<ErrorCount>
where
    I: IntoIterator<Item = ErrorCount>,
{
    records.into_iter().collect::<ErrorTable>().into_sorted()
}
