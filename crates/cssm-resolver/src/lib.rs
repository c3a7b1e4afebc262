//! Stylesheet import resolution for the cssm crates.
//!
//! - `import_path` - find the specifier bound to an identifier
//! - `config` - locate and parse `tsconfig.json` / `jsconfig.json`
//! - `alias` - follow the `extends` chain and apply `baseUrl` / `paths`
//!
//! [`resolve_import`] composes them: relative specifiers are joined onto the
//! importing directory, everything else goes through alias resolution.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

pub mod alias;
pub use alias::{AliasConfig, PathMapping, load_alias_config, resolve_aliased_import};

pub mod config;
pub use config::{RawConfig, find_config, load_config_file, resolve_extends_path};

pub mod import_path;
pub use import_path::{any_import_regex, find_raw_specifier, import_regex, is_relative_specifier};

/// Resolve the stylesheet `identifier` is imported from in `file_text`,
/// where the importing file lives in `dir`.
///
/// Relative specifiers are not checked for existence; aliased ones resolve
/// only to files that exist.
pub fn resolve_import(file_text: &str, identifier: &str, dir: &Path) -> Option<PathBuf> {
    let specifier = find_raw_specifier(file_text, identifier)?;
    if is_relative_specifier(&specifier) {
        return Some(normalize_path(&dir.join(&specifier)));
    }
    let resolved = resolve_aliased_import(dir, &specifier);
    if resolved.is_none() {
        debug!(specifier = %specifier, dir = %dir.display(), "import not resolved");
    }
    resolved
}

/// Lexically normalize `path`: drop `.` components and fold `..` into the
/// preceding component. No filesystem access.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}
