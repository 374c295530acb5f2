// ============================================================
// Layer 4 — Split Writer
// ============================================================
// Writes a Split as two line-delimited files, one entry per
// line, byte for byte as it appeared in the corpus:
//
//   <out_dir>/train.txt            (no prefix)
//   <out_dir>/test.txt
//   <out_dir>/<prefix>-train.txt   (with prefix)
//   <out_dir>/<prefix>-test.txt
//
// Train is written first, then test. The pair is not atomic:
// if test fails, train.txt stays on disk and the error names
// the file that failed. Concurrent runs aimed at the same
// directory race, last writer wins.
//
// Reference: Rust Book §12 (Writing to Files)

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::error::PartitionError;
use crate::domain::split::Split;

/// Where a split's two files end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub train: PathBuf,
    pub test: PathBuf,
}

impl SplitPaths {
    pub fn new(out_dir: &Path, prefix: Option<&str>) -> Self {
        let name = |side: &str| match prefix {
            Some(p) => format!("{p}-{side}.txt"),
            None => format!("{side}.txt"),
        };
        Self {
            train: out_dir.join(name("train")),
            test: out_dir.join(name("test")),
        }
    }
}

/// Write both halves of `split`, train first.
pub fn write_split(split: &Split, paths: &SplitPaths) -> Result<(), PartitionError> {
    if let Some(dir) = paths.train.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| PartitionError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    write_lines(&paths.train, split.train_lines())?;
    write_lines(&paths.test, split.test_lines())?;

    tracing::info!(
        "Wrote {} train entries to '{}' and {} test entries to '{}'",
        split.train.len(),
        paths.train.display(),
        split.test.len(),
        paths.test.display()
    );
    Ok(())
}

fn write_lines<'a>(path: &Path, lines: impl Iterator<Item = &'a [u8]>) -> Result<(), PartitionError> {
    let io_err = |source| PartitionError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for line in lines {
        out.write_all(line).map_err(io_err)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}
