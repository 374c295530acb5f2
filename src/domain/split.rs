// ============================================================
// Layer 3 — Label Groups and Split Result
// ============================================================
// LabelGroups buckets corpus entries by label. Labels iterate
// in order of first occurrence in the corpus; every entry
// lands in exactly one group, so the groups partition the
// corpus completely.
//
// Split is the pair of output sequences. Train and test are
// disjoint: each label's shuffled group is sliced into two
// non-overlapping ranges, and anything past both ranges is
// dropped.
//
// PartitionStats is what a run reports: corpus size, label
// count and per-label sizes before and after slicing. It is
// serialisable so it can go into the run manifest.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entry::Entry;

/// Entries grouped by label, in first-seen label order.
#[derive(Debug, Clone, Default)]
pub struct LabelGroups {
    groups: Vec<(String, Vec<Entry>)>,
    index: HashMap<String, usize>,
}

impl LabelGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its label's group, creating the group on first sight.
    pub fn insert(&mut self, label: String, entry: Entry) {
        match self.index.get(&label) {
            Some(&i) => self.groups[i].1.push(entry),
            None => {
                self.index.insert(label.clone(), self.groups.len());
                self.groups.push((label, vec![entry]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Total entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|(_, g)| g.len()).sum()
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&[Entry]> {
        self.index.get(label).map(|&i| self.groups[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entry])> {
        self.groups.iter().map(|(l, g)| (l.as_str(), g.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Entry>)> {
        self.groups.iter_mut().map(|(l, g)| (l.as_str(), g))
    }
}

/// How many documents go to each side, per label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCounts {
    /// Entries per label allocated to training
    pub train: usize,

    /// Entries per label allocated to testing; None means
    /// "everything left after training"
    pub test: Option<usize>,
}

impl SplitCounts {
    pub fn new(train: usize, test: Option<usize>) -> Self {
        Self { train, test }
    }

    /// Index ranges [0, train_end) and [train_end, test_end) for a group of `len`.
    /// Short groups are clamped rather than rejected.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let train_end = self.train.min(len);
        let test_end = match self.test {
            Some(n) => train_end.saturating_add(n).min(len),
            None => len,
        };
        (train_end, test_end)
    }
}

/// Per-label outcome of a partition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStats {
    pub label: String,
    /// Group size before slicing
    pub available: usize,
    pub train: usize,
    pub test: usize,
    /// Entries beyond both slices
    pub dropped: usize,
}

/// Summary reported after partitioning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub total_entries: usize,
    pub labels: Vec<LabelStats>,
}

impl PartitionStats {
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn train_total(&self) -> usize {
        self.labels.iter().map(|l| l.train).sum()
    }

    pub fn test_total(&self) -> usize {
        self.labels.iter().map(|l| l.test).sum()
    }

    pub fn dropped_total(&self) -> usize {
        self.labels.iter().map(|l| l.dropped).sum()
    }
}

/// The two output sequences of a partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<Entry>,
    pub test: Vec<Entry>,
}

impl Split {
    /// Output lines for the training file, as read from the corpus
    pub fn train_lines(&self) -> impl Iterator<Item = &[u8]> {
        self.train.iter().map(|e| e.raw.as_slice())
    }

    pub fn test_lines(&self) -> impl Iterator<Item = &[u8]> {
        self.test.iter().map(|e| e.raw.as_slice())
    }
}
