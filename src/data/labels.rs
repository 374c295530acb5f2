// ============================================================
// Layer 4 — Label Schemes
// ============================================================
// Three ways to derive a label from a corpus line:
//
//   Parent      `news/sports/doc1.txt` → "sports"
//               The segment just before the file name. A line
//               with no `/`, an empty parent segment or an
//               empty file name (`x/y/`) is malformed.
//
//   Candidates  `ceeaus-japanese-12.txt` with labels
//               {japanese, chinese} → "japanese"
//               Substring containment against a fixed set.
//               Exactly one candidate must match.
//
//   Prefix      `japanese ceeaus-12.txt` → "japanese"
//               The first whitespace-delimited token, as in
//               `label<space>document` list files.
//
// Resolution is total and functional: every entry maps to one
// label or the whole run fails before anything is written.

use serde::{Deserialize, Serialize};

use crate::domain::entry::Entry;
use crate::domain::error::PartitionError;
use crate::domain::traits::LabelExtractor;

/// How to derive an entry's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", content = "labels", rename_all = "lowercase")]
pub enum LabelScheme {
    Parent,
    Candidates(Vec<String>),
    Prefix,
}

impl LabelScheme {
    /// Build a candidate scheme, dropping blank and repeated labels.
    pub fn candidates<I, S>(labels: I) -> Result<Self, PartitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if !label.is_empty() && !set.contains(&label) {
                set.push(label);
            }
        }
        if set.is_empty() {
            return Err(PartitionError::InvalidLabelSet);
        }
        Ok(Self::Candidates(set))
    }
}

impl LabelExtractor for LabelScheme {
    fn label_of(&self, entry: &Entry) -> Result<String, PartitionError> {
        match self {
            LabelScheme::Parent => parent_segment(entry),
            LabelScheme::Candidates(labels) => match_candidate(entry, labels),
            LabelScheme::Prefix => leading_token(entry),
        }
    }
}

fn malformed(entry: &Entry, reason: &'static str) -> PartitionError {
    PartitionError::MalformedEntry {
        entry: entry.text.clone(),
        line_no: entry.line_no,
        reason,
    }
}

fn parent_segment(entry: &Entry) -> Result<String, PartitionError> {
    let text = entry.text.trim();
    let (dir, file) = text
        .rsplit_once('/')
        .ok_or_else(|| malformed(entry, "no path separator"))?;
    if file.is_empty() {
        return Err(malformed(entry, "empty file name"));
    }

    // rsplit always yields at least one item
    let parent = dir.rsplit('/').next().unwrap_or_default();
    if parent.is_empty() {
        return Err(malformed(entry, "empty parent segment"));
    }
    Ok(parent.to_string())
}

fn match_candidate(entry: &Entry, labels: &[String]) -> Result<String, PartitionError> {
    let matches: Vec<&String> = labels
        .iter()
        .filter(|l| entry.text.contains(l.as_str()))
        .collect();

    if let [only] = matches.as_slice() {
        return Ok((*only).clone());
    }
    Err(PartitionError::LabelResolution {
        entry: entry.text.clone(),
        line_no: entry.line_no,
        matches: matches.into_iter().cloned().collect(),
    })
}

fn leading_token(entry: &Entry) -> Result<String, PartitionError> {
    let text = entry.text.trim();
    match text.split_once(char::is_whitespace) {
        Some((label, rest)) if !rest.trim().is_empty() => Ok(label.to_string()),
        _ => Err(malformed(entry, "no whitespace-separated label")),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn e(text: &str) -> Entry {
        Entry::new(text, 1)
    }

    #[test]
    fn test_parent_takes_segment_before_filename() {
        let scheme = LabelScheme::Parent;
        assert_eq!(scheme.label_of(&e("a/doc1")).unwrap(), "a");
        assert_eq!(scheme.label_of(&e("corpus/sports/doc1.txt")).unwrap(), "sports");
    }

    #[test]
    fn test_parent_rejects_bare_filename() {
        let err = LabelScheme::Parent.label_of(&e("standalone.txt")).unwrap_err();
        assert!(matches!(err, PartitionError::MalformedEntry { .. }));

        let err = LabelScheme::Parent.label_of(&e("/rooted.txt")).unwrap_err();
        assert!(matches!(err, PartitionError::MalformedEntry { .. }));
    }

    #[test]
    fn test_parent_rejects_trailing_slash() {
        match LabelScheme::Parent.label_of(&e("x/y/")).unwrap_err() {
            PartitionError::MalformedEntry { reason, .. } => assert_eq!(reason, "empty file name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_candidates_require_exactly_one_match() {
        let scheme = LabelScheme::candidates(["japanese", "chinese"]).unwrap();
        assert_eq!(scheme.label_of(&e("ceeaus-japanese-12.txt")).unwrap(), "japanese");

        match scheme.label_of(&e("ceeaus-korean-3.txt")).unwrap_err() {
            PartitionError::LabelResolution { matches, .. } => assert!(matches.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }

        match scheme.label_of(&e("japanese-chinese.txt")).unwrap_err() {
            PartitionError::LabelResolution { matches, .. } => assert_eq!(matches.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_candidates_need_a_label() {
        let err = LabelScheme::candidates(["", "  "]).unwrap_err();
        assert!(matches!(err, PartitionError::InvalidLabelSet));

        let dedup = LabelScheme::candidates(["a", "a", " b "]).unwrap();
        assert_eq!(dedup, LabelScheme::Candidates(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_prefix_takes_first_token() {
        let scheme = LabelScheme::Prefix;
        assert_eq!(scheme.label_of(&e("chinese\tdocs/12.txt")).unwrap(), "chinese");
        assert_eq!(scheme.label_of(&e("japanese docs/7.txt")).unwrap(), "japanese");

        let err = scheme.label_of(&e("lonely")).unwrap_err();
        assert!(matches!(err, PartitionError::MalformedEntry { .. }));
    }
}
