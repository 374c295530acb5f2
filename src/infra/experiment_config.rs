// ============================================================
// Layer 5 — Experiment Configs and Grids
// ============================================================
// An ExperimentConfig is an immutable, ordered list of
// key/value pairs handed to an external learning tool as a
// file, one pair per line:
//
//   prefix = ceeaus
//   method = ngram
//   n = 2
//
// An ExperimentGrid describes many configs at once as a JSON
// file: shared `base` pairs plus `axes` whose values are
// combined as a cartesian product.
//
//   {
//     "base": { "prefix": "ceeaus", "method": "ngram" },
//     "axes": [
//       { "key": "n",         "values": ["1", "2", "3"] },
//       { "key": "tokenizer", "values": ["word", "tree"] }
//     ]
//   }
//
// Every combination is built from scratch out of `base`, so no
// value set by one experiment leaks into the next.
//
// Reference: serde_json crate documentation
//            Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// One experiment's configuration. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    name: String,
    pairs: Vec<(String, String)>,
}

impl ExperimentConfig {
    /// Build a config; later pairs override earlier ones with the same key
    /// but keep the earlier key's position.
    pub fn new<I, K, V>(name: impl Into<String>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merged: Vec<(String, String)> = Vec::new();
        for (k, v) in pairs {
            let (k, v) = (k.into(), v.into());
            validate_pair(&k, &v)?;
            match merged.iter_mut().find(|(existing, _)| *existing == k) {
                Some(slot) => slot.1 = v,
                None => merged.push((k, v)),
            }
        }
        Ok(Self {
            name: name.into(),
            pairs: merged,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// The on-disk form: `key = value`, one per line.
    pub fn render(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k} = {v}\n"))
            .collect()
    }

    /// Write to `<dir>/<name>.config` and return the path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create config directory '{}'", dir.display()))?;
        let path = dir.join(format!("{}.config", self.name));
        fs::write(&path, self.render())
            .with_context(|| format!("Cannot write config '{}'", path.display()))?;
        tracing::debug!("Wrote config '{}'", path.display());
        Ok(path)
    }
}

fn validate_pair(key: &str, value: &str) -> Result<()> {
    if key.is_empty() || key.contains(char::is_whitespace) || key.contains('=') {
        bail!("Invalid config key '{key}': must be non-empty with no whitespace or '='");
    }
    if value.contains(['\n', '\r']) {
        bail!("Invalid value for config key '{key}': values must fit on one line");
    }
    Ok(())
}

/// One dimension of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridAxis {
    pub key: String,
    pub values: Vec<String>,
}

/// A combinatorial set of experiments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentGrid {
    #[serde(default)]
    pub base: BTreeMap<String, String>,
    #[serde(default)]
    pub axes: Vec<GridAxis>,
}

impl ExperimentGrid {
    /// Read a grid from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read grid file '{}'", path.display()))?;
        let grid: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid grid file '{}'", path.display()))?;
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> Result<()> {
        for (i, axis) in self.axes.iter().enumerate() {
            if axis.values.is_empty() {
                bail!("Grid axis '{}' has no values", axis.key);
            }
            if self.axes[..i].iter().any(|a| a.key == axis.key) {
                bail!("Grid axis '{}' appears more than once", axis.key);
            }
        }
        Ok(())
    }

    fn combination_count(&self) -> usize {
        self.axes.iter().map(|a| a.values.len()).product()
    }

    /// Enumerate every combination, first axis varying slowest.
    /// A grid with no axes yields a single config named `base`.
    /// Fails if two combinations map to the same file name.
    pub fn expand(&self) -> Result<Vec<ExperimentConfig>> {
        self.validate()?;

        let mut configs: Vec<ExperimentConfig> = Vec::with_capacity(self.combination_count());
        let mut choice = vec![0usize; self.axes.len()];

        loop {
            let picked: Vec<(&str, &str)> = self
                .axes
                .iter()
                .zip(&choice)
                .map(|(axis, &i)| (axis.key.as_str(), axis.values[i].as_str()))
                .collect();

            let name = if picked.is_empty() {
                "base".to_string()
            } else {
                picked
                    .iter()
                    .map(|(k, v)| format!("{}-{}", slug(k), slug(v)))
                    .collect::<Vec<_>>()
                    .join("_")
            };

            let pairs = self
                .base
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .chain(picked.iter().copied());
            if configs.iter().any(|c| c.name == name) {
                bail!(
                    "Grid values produce the config name '{name}' more than once; \
                     make axis values differ in letters, digits or '.'"
                );
            }
            configs.push(ExperimentConfig::new(name, pairs)?);

            // Odometer increment, last axis fastest
            let mut axis = self.axes.len();
            loop {
                if axis == 0 {
                    return Ok(configs);
                }
                axis -= 1;
                choice[axis] += 1;
                if choice[axis] < self.axes[axis].values.len() {
                    break;
                }
                choice[axis] = 0;
            }
        }
    }
}

/// File-name-safe form of a key or value.
fn slug(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '-' })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn grid() -> ExperimentGrid {
        serde_json::from_str(
            r#"{
                "base": { "prefix": "ceeaus", "method": "ngram" },
                "axes": [
                    { "key": "method", "values": ["ngram", "tree"] },
                    { "key": "n", "values": ["1", "2", "3"] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_expand_is_cartesian_product() {
        let configs = grid().expand().unwrap();
        assert_eq!(configs.len(), 6);
        assert_eq!(configs[0].name(), "method-ngram_n-1");
        assert_eq!(configs[1].name(), "method-ngram_n-2");
        assert_eq!(configs[3].name(), "method-tree_n-1");
        assert_eq!(configs[5].get("method"), Some("tree"));
        assert_eq!(configs[5].get("n"), Some("3"));
    }

    #[test]
    fn test_each_config_starts_from_base() {
        let configs = grid().expand().unwrap();
        // Axis overrides base without leaking into later combinations
        for c in &configs {
            assert_eq!(c.get("prefix"), Some("ceeaus"));
            assert_eq!(c.pairs().len(), 3);
        }
        assert_eq!(configs[0].get("method"), Some("ngram"));
        assert_eq!(configs[3].get("method"), Some("tree"));
    }

    #[test]
    fn test_no_axes_gives_single_base_config() {
        let g = ExperimentGrid {
            base: BTreeMap::from([("k".to_string(), "v".to_string())]),
            axes: vec![],
        };
        let configs = g.expand().unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name(), "base");
    }

    #[test]
    fn test_empty_axis_is_rejected() {
        let g = ExperimentGrid {
            base: BTreeMap::new(),
            axes: vec![GridAxis {
                key: "n".into(),
                values: vec![],
            }],
        };
        assert!(g.expand().is_err());
    }

    #[test]
    fn test_render_and_write() {
        let dir = TempDir::new().unwrap();
        let c = ExperimentConfig::new("run", [("prefix", "ceeaus"), ("n", "2")]).unwrap();
        assert_eq!(c.render(), "prefix = ceeaus\nn = 2\n");

        let path = c.write_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "run.config");
        assert_eq!(fs::read_to_string(path).unwrap(), "prefix = ceeaus\nn = 2\n");
    }

    #[test]
    fn test_rejects_multiline_values_and_bad_keys() {
        assert!(ExperimentConfig::new("x", [("k", "a\nb")]).is_err());
        assert!(ExperimentConfig::new("x", [("bad key", "v")]).is_err());
        assert!(ExperimentConfig::new("x", [("", "v")]).is_err());
    }

    #[test]
    fn test_colliding_names_are_rejected() {
        let g = ExperimentGrid {
            base: BTreeMap::new(),
            axes: vec![GridAxis {
                key: "tok".into(),
                values: vec!["a b".into(), "a/b".into()],
            }],
        };
        let err = g.expand().unwrap_err();
        assert!(err.to_string().contains("'tok-a-b'"));
    }

    #[test]
    fn test_slug_keeps_names_file_safe() {
        assert_eq!(slug("a/b c"), "a-b-c");
        assert_eq!(slug("0.5"), "0.5");
    }
}
