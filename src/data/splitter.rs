// ============================================================
// Layer 4 — Stratified Train/Test Splitter
// ============================================================
// Turns a labelled corpus into two label-balanced sets:
//
//   corpus ─► group by label ─► shuffle each group
//          ─► slice [0, train) to train
//                   [train, train + test) to test
//          ─► concatenate groups in first-seen order
//
// A line repeated in the corpus is one document: only its
// first occurrence is kept, so a document can never land in
// both train and test.
//
// Per-label rules:
//   - A group shorter than the train count goes entirely to
//     training and contributes nothing to test. No error.
//   - With no test count, test takes everything after train.
//   - Entries past both slices are dropped from the output.
//
// Every group gets its own Fisher-Yates shuffle from the
// caller's RNG, so a seeded StdRng makes the result
// reproducible.
//
// Reference: rand crate documentation (SliceRandom)
//            Rust Book §8 (Vectors)

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::domain::entry::{Corpus, Entry};
use crate::domain::error::PartitionError;
use crate::domain::split::{LabelGroups, LabelStats, PartitionStats, Split, SplitCounts};
use crate::domain::traits::LabelExtractor;

/// Corpus entries with repeated lines removed, first occurrence wins.
pub fn distinct_entries(corpus: &Corpus) -> Vec<&Entry> {
    let mut seen: HashSet<&Entry> = HashSet::with_capacity(corpus.len());
    let distinct: Vec<&Entry> = corpus.entries.iter().filter(|e| seen.insert(*e)).collect();

    let repeated = corpus.len() - distinct.len();
    if repeated > 0 {
        tracing::warn!(
            "Ignoring {} repeated line(s) in '{}'",
            repeated,
            corpus.source.display()
        );
    }
    distinct
}

/// Label every distinct entry and bucket it. Fails on the first
/// entry whose label cannot be resolved.
pub fn group_by_label<E>(corpus: &Corpus, extractor: &E) -> Result<LabelGroups, PartitionError>
where
    E: LabelExtractor + ?Sized,
{
    let mut groups = LabelGroups::new();
    for entry in distinct_entries(corpus) {
        let label = extractor.label_of(entry)?;
        groups.insert(label, entry.clone());
    }

    tracing::info!(
        "Found {} labels across {} entries",
        groups.len(),
        groups.entry_count()
    );
    for (label, group) in groups.iter() {
        tracing::debug!("Label '{}': {} entries", label, group.len());
    }
    Ok(groups)
}

/// Shuffle and slice every group. Consumes the groups.
pub fn split_groups<R>(mut groups: LabelGroups, counts: SplitCounts, rng: &mut R) -> (Split, PartitionStats)
where
    R: Rng + ?Sized,
{
    let mut split = Split::default();
    let mut stats = PartitionStats {
        total_entries: groups.entry_count(),
        labels: Vec::with_capacity(groups.len()),
    };

    for (label, group) in groups.iter_mut() {
        group.shuffle(rng);

        let available = group.len();
        let (train_end, test_end) = counts.bounds(available);

        split.train.extend_from_slice(&group[..train_end]);
        split.test.extend_from_slice(&group[train_end..test_end]);

        if train_end < counts.train {
            tracing::debug!(
                "Label '{}' has only {} entries (wanted {} for training)",
                label,
                available,
                counts.train
            );
        }

        stats.labels.push(LabelStats {
            label: label.to_string(),
            available,
            train: train_end,
            test: test_end - train_end,
            dropped: available - test_end,
        });
    }

    (split, stats)
}

/// Full pipeline for an in-memory corpus: label, group, shuffle, slice.
pub fn partition<E, R>(
    corpus: &Corpus,
    extractor: &E,
    counts: SplitCounts,
    rng: &mut R,
) -> Result<(Split, PartitionStats), PartitionError>
where
    E: LabelExtractor + ?Sized,
    R: Rng + ?Sized,
{
    if corpus.is_empty() {
        return Err(PartitionError::EmptyCorpus {
            path: corpus.source.clone(),
        });
    }

    let groups = group_by_label(corpus, extractor)?;
    let (split, stats) = split_groups(groups, counts, rng);

    tracing::info!(
        "Split: {} train, {} test, {} dropped",
        stats.train_total(),
        stats.test_total(),
        stats.dropped_total()
    );
    Ok((split, stats))
}

/// Unlabelled split: shuffle the whole corpus, first half to
/// train, second half to test. Odd corpora give test the extra
/// entry.
pub fn split_halves<R>(corpus: &Corpus, rng: &mut R) -> Result<Split, PartitionError>
where
    R: Rng + ?Sized,
{
    if corpus.is_empty() {
        return Err(PartitionError::EmptyCorpus {
            path: corpus.source.clone(),
        });
    }

    let mut entries: Vec<Entry> = distinct_entries(corpus).into_iter().cloned().collect();
    entries.shuffle(rng);

    // split_off(n) leaves [0, n) in place and returns [n, len)
    let test = entries.split_off(entries.len() / 2);

    tracing::debug!("Even split: {} train, {} test", entries.len(), test.len());
    Ok(Split {
        train: entries,
        test,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::labels::LabelScheme;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus(lines: &[&str]) -> Corpus {
        Corpus::from_lines("full-corpus.txt", lines.iter().copied())
    }

    fn labels_of(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| LabelScheme::Parent.label_of(e).unwrap())
            .collect()
    }

    fn count(labels: &[String], label: &str) -> usize {
        labels.iter().filter(|l| *l == label).count()
    }

    #[test]
    fn test_insufficient_remainder_is_tolerated() {
        let c = corpus(&["a/doc1", "a/doc2", "a/doc3", "b/doc1", "b/doc2"]);
        let mut rng = StdRng::seed_from_u64(7);

        let (split, stats) =
            partition(&c, &LabelScheme::Parent, SplitCounts::new(2, Some(1)), &mut rng).unwrap();

        let train = labels_of(&split.train);
        let test = labels_of(&split.test);
        assert_eq!(count(&train, "a"), 2);
        assert_eq!(count(&train, "b"), 2);
        assert_eq!(count(&test, "a"), 1);
        assert_eq!(count(&test, "b"), 0);

        assert_eq!(stats.total_entries, 5);
        assert_eq!(stats.label_count(), 2);
        assert_eq!(stats.labels[0].available, 3);
        assert_eq!(stats.labels[1].available, 2);
        assert_eq!(stats.dropped_total(), 0);
    }

    #[test]
    fn test_short_group_goes_entirely_to_train() {
        let c = corpus(&["a/1", "b/1", "b/2", "b/3", "b/4", "b/5"]);
        let mut rng = StdRng::seed_from_u64(1);

        let (split, stats) =
            partition(&c, &LabelScheme::Parent, SplitCounts::new(3, Some(1)), &mut rng).unwrap();

        assert_eq!(count(&labels_of(&split.train), "a"), 1);
        assert_eq!(count(&labels_of(&split.test), "a"), 0);
        // b: 3 train, 1 test, 1 dropped
        assert_eq!(stats.labels[1].dropped, 1);
        assert_eq!(split.train.len() + split.test.len(), 5);
    }

    #[test]
    fn test_remainder_takes_everything_after_train() {
        let c = corpus(&["a/1", "a/2", "a/3", "a/4", "b/1", "b/2"]);
        let mut rng = StdRng::seed_from_u64(3);

        let (split, stats) =
            partition(&c, &LabelScheme::Parent, SplitCounts::new(1, None), &mut rng).unwrap();

        assert_eq!(split.train.len(), 2);
        assert_eq!(split.test.len(), 4);
        assert_eq!(stats.dropped_total(), 0);
    }

    #[test]
    fn test_groups_stay_contiguous_in_first_seen_order() {
        let c = corpus(&["b/1", "a/1", "b/2", "a/2"]);
        let mut rng = StdRng::seed_from_u64(11);

        let (split, _) =
            partition(&c, &LabelScheme::Parent, SplitCounts::new(2, Some(0)), &mut rng).unwrap();

        assert_eq!(labels_of(&split.train), vec!["b", "b", "a", "a"]);
        assert!(split.test.is_empty());
    }

    #[test]
    fn test_malformed_entry_fails_whole_partition() {
        let c = corpus(&["a/doc1", "standalone.txt"]);
        let mut rng = StdRng::seed_from_u64(0);

        let err = partition(&c, &LabelScheme::Parent, SplitCounts::new(1, None), &mut rng)
            .unwrap_err();
        match err {
            PartitionError::MalformedEntry { entry, line_no, .. } => {
                assert_eq!(entry, "standalone.txt");
                assert_eq!(line_no, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let c = corpus(&[]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = partition(&c, &LabelScheme::Parent, SplitCounts::new(1, None), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PartitionError::EmptyCorpus { .. }));
    }

    #[test]
    fn test_same_seed_same_output() {
        let lines: Vec<String> = (0..40).map(|i| format!("{}/doc{i}", i % 3)).collect();
        let c = Corpus::from_lines("x", &lines);
        let counts = SplitCounts::new(5, Some(4));

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            partition(&c, &LabelScheme::Parent, counts, &mut rng).unwrap().0
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_different_seeds_reorder_a_group() {
        let lines: Vec<String> = (0..50).map(|i| format!("a/doc{i}")).collect();
        let c = Corpus::from_lines("x", &lines);
        let counts = SplitCounts::new(50, Some(0));

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            partition(&c, &LabelScheme::Parent, counts, &mut rng).unwrap().0.train
        };
        // 50! orderings: a collision here would mean the shuffle is broken
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn test_split_halves_sizes() {
        let c = corpus(&["1", "2", "3", "4", "5"]);
        let mut rng = StdRng::seed_from_u64(9);
        let split = split_halves(&c, &mut rng).unwrap();
        assert_eq!(split.train.len(), 2);
        assert_eq!(split.test.len(), 3);

        let all: HashSet<&[u8]> = split.train_lines().chain(split.test_lines()).collect();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_repeated_line_never_lands_in_both_sets() {
        let c = corpus(&["a/doc1", "a/doc1", "a/doc2"]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (split, stats) =
                partition(&c, &LabelScheme::Parent, SplitCounts::new(1, None), &mut rng).unwrap();

            assert_eq!(stats.total_entries, 2);
            assert_eq!(split.train.len() + split.test.len(), 2);
            assert!(split.test.iter().all(|e| !split.train.contains(e)));
        }
    }

    #[test]
    fn test_split_halves_drops_repeated_lines() {
        let c = corpus(&["x", "x", "y", "z"]);
        let mut rng = StdRng::seed_from_u64(4);
        let split = split_halves(&c, &mut rng).unwrap();

        assert_eq!(split.train.len() + split.test.len(), 3);
        assert!(split.test.iter().all(|e| !split.train.contains(e)));
    }

    #[test]
    fn test_split_halves_rejects_empty() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(split_halves(&corpus(&[]), &mut rng).is_err());
    }

    // ─── Property Tests ───────────────────────────────────────────────────────

    /// Corpus of `label/docN` lines; each line is unique.
    fn arb_corpus() -> impl Strategy<Value = Corpus> {
        proptest::collection::vec(0u8..5, 1..80).prop_map(|labels| {
            let lines: Vec<String> = labels
                .iter()
                .enumerate()
                .map(|(i, l)| format!("label{l}/doc{i}"))
                .collect();
            Corpus::from_lines("prop", &lines)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: outputs never exceed the corpus and never overlap
        #[test]
        fn prop_train_test_disjoint_and_bounded(
            c in arb_corpus(),
            train in 0usize..20,
            test in proptest::option::of(0usize..20),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (split, stats) =
                partition(&c, &LabelScheme::Parent, SplitCounts::new(train, test), &mut rng).unwrap();

            prop_assert!(split.train.len() + split.test.len() <= c.len());
            prop_assert_eq!(
                split.train.len() + split.test.len() + stats.dropped_total(),
                c.len()
            );

            let train_set: HashSet<&Entry> = split.train.iter().collect();
            prop_assert!(split.test.iter().all(|e| !train_set.contains(e)));
        }

        /// Property: per-label counts respect the requested allocation
        #[test]
        fn prop_per_label_counts_respected(
            c in arb_corpus(),
            train in 0usize..20,
            test in proptest::option::of(0usize..20),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (split, stats) =
                partition(&c, &LabelScheme::Parent, SplitCounts::new(train, test), &mut rng).unwrap();

            let train_labels = labels_of(&split.train);
            let test_labels = labels_of(&split.test);
            for s in &stats.labels {
                prop_assert!(count(&train_labels, &s.label) <= train);
                prop_assert_eq!(count(&train_labels, &s.label), s.available.min(train));
                match test {
                    Some(n) => prop_assert!(count(&test_labels, &s.label) <= n),
                    None => prop_assert_eq!(
                        count(&test_labels, &s.label),
                        s.available.saturating_sub(train)
                    ),
                }
            }
        }
    }
}
