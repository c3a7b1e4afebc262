//! Config chain loader: discovery and permissive parsing of a single
//! `tsconfig.json` / `jsconfig.json`.
//!
//! Only the fields alias resolution needs are kept. Malformed `paths` or
//! `baseUrl` values are dropped (with a warning) instead of failing the file,
//! so the chain can still supply them from a parent config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{trace, warn};

use crate::normalize_path;

/// File names searched in every directory, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tsconfig.json", "jsconfig.json"];

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    extends: Option<Value>,
    #[serde(default)]
    compiler_options: Option<CompilerOptionsFile>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompilerOptionsFile {
    #[serde(default)]
    base_url: Option<Value>,
    #[serde(default)]
    paths: Option<Value>,
}

/// The alias-relevant fields of one config file, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    /// Path of the file these fields were read from.
    pub path: PathBuf,
    /// `compilerOptions.baseUrl`, relative to [`RawConfig::dir`].
    pub base_url: Option<String>,
    /// `compilerOptions.paths` in declaration order, present only when every
    /// value is a non-empty array of strings.
    pub paths: Option<Vec<(String, Vec<String>)>>,
    pub extends: Option<String>,
}

impl RawConfig {
    /// Directory containing the config file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Find the nearest config file, starting at `start_dir` and walking up to
/// the filesystem root. Within one directory `tsconfig.json` wins over
/// `jsconfig.json`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                trace!(config = %candidate.display(), "found config");
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse config text as JSON5 (comments, trailing commas, unquoted keys).
/// Empty or whitespace-only text is an empty config.
pub fn parse_config(source: &str, path: &Path) -> Result<RawConfig> {
    let file: ConfigFile = if source.trim().is_empty() {
        ConfigFile::default()
    } else {
        json5::from_str(source).context("failed to parse config JSON5")?
    };

    let mut config = RawConfig {
        path: path.to_path_buf(),
        ..RawConfig::default()
    };

    config.extends = match file.extends {
        None | Some(Value::Null) => None,
        Some(Value::String(extends)) => Some(extends),
        Some(other) => {
            warn!(config = %path.display(), extends = %other, "ignoring non-string extends");
            None
        }
    };

    if let Some(options) = file.compiler_options {
        config.base_url = match options.base_url {
            None | Some(Value::Null) => None,
            Some(Value::String(base_url)) => Some(base_url),
            Some(other) => {
                warn!(config = %path.display(), base_url = %other, "ignoring non-string baseUrl");
                None
            }
        };
        config.paths = match options.paths {
            None | Some(Value::Null) => None,
            Some(value) => {
                let paths = validate_paths(&value);
                if paths.is_none() {
                    warn!(config = %path.display(), "ignoring malformed compilerOptions.paths");
                }
                paths
            }
        };
    }

    Ok(config)
}

/// Read and parse the config file at `path`.
pub fn load_config_file(path: &Path) -> Result<RawConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source, path)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// `paths` must be an object whose values are all non-empty arrays of
/// strings.
fn validate_paths(value: &Value) -> Option<Vec<(String, Vec<String>)>> {
    let table = value.as_object()?;
    let mut paths = Vec::with_capacity(table.len());
    for (pattern, targets) in table {
        let targets = targets.as_array()?;
        if targets.is_empty() {
            return None;
        }
        let targets = targets
            .iter()
            .map(|target| target.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        paths.push((pattern.clone(), targets));
    }
    Some(paths)
}

/// Resolve an `extends` value relative to the directory of the config that
/// declares it.
///
/// Relative and absolute values are tried as written, then with `.json`
/// appended, then as a directory containing `tsconfig.json`. Bare package
/// names are looked up the same way under `node_modules` of every ancestor
/// directory.
pub fn resolve_extends_path(config_dir: &Path, extends: &str) -> Option<PathBuf> {
    let is_path = extends.starts_with("./")
        || extends.starts_with("../")
        || extends == "."
        || extends == ".."
        || Path::new(extends).is_absolute();

    if is_path {
        return file_candidates(&normalize_path(&config_dir.join(extends)))
            .into_iter()
            .find(|candidate| candidate.is_file());
    }

    config_dir
        .ancestors()
        .map(|dir| dir.join("node_modules").join(extends))
        .flat_map(|base| file_candidates(&base))
        .find(|candidate| candidate.is_file())
}

fn file_candidates(base: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![base.to_path_buf()];
    if base.extension().is_none_or(|ext| ext != "json") {
        let mut with_json = base.as_os_str().to_os_string();
        with_json.push(".json");
        candidates.push(PathBuf::from(with_json));
    }
    candidates.push(base.join("tsconfig.json"));
    candidates
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
