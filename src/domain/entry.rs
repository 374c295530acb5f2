// ============================================================
// Layer 3 — Entry and Corpus Domain Types
// ============================================================
// An Entry is one line of a corpus list file: an opaque
// document reference such as `sports/doc17.txt` or
// `sports doc17.txt`. The raw bytes are kept exactly as read
// so the train/test files reproduce them byte for byte, even
// for lists that are not valid UTF-8. Labels are read off a
// lossy UTF-8 view of the same line.
//
// Two entries are the same document when their raw bytes are
// equal; the line number is only for error messages.
//
// A Corpus is the ordered sequence of entries read from one
// file. Read order carries no meaning; the partitioner
// shuffles within each label anyway.
//
// Reference: Rust Book §5 (Structs and Methods)

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// One document reference from the corpus list.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The line exactly as it appeared in the corpus file
    pub raw: Vec<u8>,

    /// UTF-8 view of `raw` used for labelling and messages
    pub text: String,

    /// 1-based line number, kept for error messages
    pub line_no: usize,
}

impl Entry {
    pub fn from_bytes(raw: &[u8], line_no: usize) -> Self {
        Self {
            raw: raw.to_vec(),
            text: String::from_utf8_lossy(raw).into_owned(),
            line_no,
        }
    }

    #[cfg(test)]
    pub fn new(text: &str, line_no: usize) -> Self {
        Self::from_bytes(text.as_bytes(), line_no)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

/// All entries loaded from a single corpus file.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Where the entries were read from
    pub source: PathBuf,

    /// Non-empty lines in file order
    pub entries: Vec<Entry>,
}

impl Corpus {
    pub fn new(source: impl Into<PathBuf>, entries: Vec<Entry>) -> Self {
        Self {
            source: source.into(),
            entries,
        }
    }

    /// Split raw file contents on `\n` (dropping a trailing `\r`),
    /// skipping blank lines. Line numbers count every input line,
    /// blank or not.
    pub fn from_bytes(source: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        let entries = bytes
            .split(|&b| b == b'\n')
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .enumerate()
            .filter(|(_, l)| !l.iter().all(u8::is_ascii_whitespace))
            .map(|(i, l)| Entry::from_bytes(l, i + 1))
            .collect();
        Self::new(source, entries)
    }

    /// In-memory variant of `from_bytes` for tests.
    #[cfg(test)]
    pub fn from_lines<I, S>(source: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<u8> = lines
            .into_iter()
            .flat_map(|l| {
                let mut line = l.as_ref().as_bytes().to_vec();
                line.push(b'\n');
                line
            })
            .collect();
        Self::from_bytes(source, &joined)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory containing the corpus file, `.` for a bare filename.
    pub fn directory(&self) -> &Path {
        match self.source.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_skips_blank_lines() {
        let corpus = Corpus::from_lines("list.txt", ["a/1", "", "  ", "b/2"]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.entries[0], Entry::new("a/1", 1));
        assert_eq!(corpus.entries[1], Entry::new("b/2", 4));
        assert_eq!(corpus.entries[1].line_no, 4);
    }

    #[test]
    fn test_from_bytes_keeps_invalid_utf8_verbatim() {
        let corpus = Corpus::from_bytes("list.txt", b"a/caf\xe9.txt\r\n\nb/ok.txt");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.entries[0].raw, b"a/caf\xe9.txt".to_vec());
        assert!(corpus.entries[0].text.starts_with("a/caf"));
        assert_eq!(corpus.entries[1].line_no, 3);
    }

    #[test]
    fn test_entries_compare_by_content_not_line() {
        assert_eq!(Entry::new("a/doc1", 1), Entry::new("a/doc1", 7));
        assert_ne!(Entry::new("a/doc1", 1), Entry::new("a/doc2", 1));
    }

    #[test]
    fn test_directory_of_bare_filename_is_cwd() {
        let corpus = Corpus::from_lines("list.txt", ["a/1"]);
        assert_eq!(corpus.directory(), Path::new("."));

        let nested = Corpus::from_lines("data/ceeaus/list.txt", ["a/1"]);
        assert_eq!(nested.directory(), Path::new("data/ceeaus"));
    }
}
