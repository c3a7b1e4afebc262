//! Module alias resolution through `baseUrl` and `paths`.
//!
//! The effective configuration is assembled by walking the `extends` chain
//! from the nearest config file until both `baseUrl` and `paths` are known,
//! the chain ends, or [`MAX_EXTENDS_DEPTH`] hops were taken.

use std::path::{Path, PathBuf};

use cssm_common::limits::MAX_EXTENDS_DEPTH;
use tracing::{debug, trace, warn};

use crate::config::{RawConfig, find_config, load_config_file, resolve_extends_path};
use crate::normalize_path;

/// One `paths` entry: a pattern with at most one `*` and its targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    pub pattern: String,
    prefix: String,
    suffix: String,
    pub targets: Vec<String>,
}

impl PathMapping {
    pub fn new(pattern: &str, targets: Vec<String>) -> Self {
        let pattern = normalize_path_pattern(pattern);
        let (prefix, suffix) = split_path_pattern(&pattern);
        PathMapping {
            pattern,
            prefix,
            suffix,
            targets: targets
                .iter()
                .map(|target| normalize_path_pattern(target))
                .collect(),
        }
    }

    /// Return the text captured by `*` when `specifier` matches. A pattern
    /// without `*` must match exactly and captures nothing.
    pub fn match_specifier<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        if !self.pattern.contains('*') {
            return (self.pattern == specifier).then_some("");
        }

        let rest = specifier.strip_prefix(self.prefix.as_str())?;
        let captured = rest.strip_suffix(self.suffix.as_str())?;
        if captured.is_empty() {
            return None;
        }
        Some(captured)
    }
}

fn normalize_path_pattern(value: &str) -> String {
    value.trim().replace('\\', "/")
}

fn split_path_pattern(pattern: &str) -> (String, String) {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => (prefix.to_string(), suffix.to_string()),
        None => (pattern.to_string(), String::new()),
    }
}

fn substitute_path_target(target: &str, wildcard: &str) -> String {
    target.replacen('*', wildcard, 1)
}

/// The effective alias configuration for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConfig {
    /// Absolute `baseUrl`, from the nearest config in the chain declaring one.
    pub base_url: Option<PathBuf>,
    /// `paths` of the nearest config in the chain declaring valid ones.
    pub path_mappings: Vec<PathMapping>,
    /// Directory of the config that supplied `baseUrl` (the discovered
    /// config's directory when none did).
    pub origin_dir: PathBuf,
    /// Directory of the config that supplied `paths` (the discovered
    /// config's directory when none did).
    pub paths_origin_dir: PathBuf,
}

impl AliasConfig {
    /// Resolve a non-relative specifier to an existing file.
    ///
    /// Patterns are tried in declaration order; the targets of a matching
    /// pattern are tried in order and the first existing candidate wins. When
    /// no pattern produced a file, the specifier is tried against `baseUrl`.
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        let target_base = self.base_url.as_deref().unwrap_or(&self.paths_origin_dir);

        for mapping in &self.path_mappings {
            let Some(wildcard) = mapping.match_specifier(specifier) else {
                continue;
            };
            for target in &mapping.targets {
                let candidate =
                    normalize_path(&target_base.join(substitute_path_target(target, wildcard)));
                trace!(
                    pattern = %mapping.pattern,
                    candidate = %candidate.display(),
                    "probing path mapping target"
                );
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }

        let base_url = self.base_url.as_ref()?;
        let candidate = normalize_path(&base_url.join(specifier));
        trace!(candidate = %candidate.display(), "probing baseUrl fallback");
        candidate.is_file().then_some(candidate)
    }
}

/// Assemble the alias configuration that applies to files in `location_dir`.
///
/// Returns `None` when no config file is found, a config in the chain cannot
/// be read or parsed, an `extends` target does not exist, or the chain is
/// longer than [`MAX_EXTENDS_DEPTH`] hops (which also covers cycles).
pub fn load_alias_config(location_dir: &Path) -> Option<AliasConfig> {
    let config_path = find_config(location_dir)?;
    let mut current = match load_config_file(&config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err:#}");
            return None;
        }
    };
    let discovered_dir = current.dir().to_path_buf();

    let mut base_url: Option<(PathBuf, PathBuf)> = None;
    let mut paths: Option<(Vec<PathMapping>, PathBuf)> = None;
    let mut hops = 0usize;

    loop {
        let dir = current.dir().to_path_buf();
        if base_url.is_none() {
            if let Some(raw) = current.base_url.take() {
                base_url = Some((normalize_path(&dir.join(raw)), dir.clone()));
            }
        }
        if paths.is_none() {
            if let Some(raw) = current.paths.take() {
                paths = Some((build_path_mappings(raw), dir.clone()));
            }
        }
        if base_url.is_some() && paths.is_some() {
            break;
        }

        let Some(extends) = current.extends.take() else {
            break;
        };
        hops += 1;
        if hops > MAX_EXTENDS_DEPTH {
            warn!(
                config = %config_path.display(),
                limit = MAX_EXTENDS_DEPTH,
                "extends chain too deep, giving up"
            );
            return None;
        }
        current = match next_in_chain(&dir, &extends) {
            Some(config) => config,
            None => return None,
        };
    }

    let (base_url, origin_dir) = match base_url {
        Some((base_url, origin)) => (Some(base_url), origin),
        None => (None, discovered_dir.clone()),
    };
    let (path_mappings, paths_origin_dir) = paths.unwrap_or((Vec::new(), discovered_dir));

    debug!(
        config = %config_path.display(),
        base_url = ?base_url,
        mappings = path_mappings.len(),
        hops,
        "assembled alias config"
    );
    Some(AliasConfig {
        base_url,
        path_mappings,
        origin_dir,
        paths_origin_dir,
    })
}

fn next_in_chain(dir: &Path, extends: &str) -> Option<RawConfig> {
    let Some(path) = resolve_extends_path(dir, extends) else {
        warn!(from = %dir.display(), extends, "extends target not found");
        return None;
    };
    trace!(config = %path.display(), "following extends");
    match load_config_file(&path) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!("{err:#}");
            None
        }
    }
}

fn build_path_mappings(paths: Vec<(String, Vec<String>)>) -> Vec<PathMapping> {
    paths
        .into_iter()
        .map(|(pattern, targets)| PathMapping::new(&pattern, targets))
        .collect()
}

/// Resolve a non-relative `specifier` imported from a file in
/// `location_dir` to an existing file on disk.
pub fn resolve_aliased_import(location_dir: &Path, specifier: &str) -> Option<PathBuf> {
    let config = load_alias_config(location_dir)?;
    let resolved = config.resolve(specifier);
    debug!(specifier, resolved = ?resolved, "resolved aliased import");
    resolved
}

#[cfg(test)]
#[path = "../tests/alias_tests.rs"]
mod alias_tests;
