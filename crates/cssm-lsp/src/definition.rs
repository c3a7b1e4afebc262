//! Go-to-definition and hover for `styles.className` references.

use std::path::{Path, PathBuf};

use cssm_common::{Location, Position, Range, detect_eol};
use cssm_index::{CamelCaseOption, ClassnameIndex, build_index, get_transformer};
use cssm_resolver::{
    any_import_regex, is_relative_specifier, normalize_path, resolve_aliased_import,
    resolve_import,
};
use tracing::debug;

use crate::hover::{HoverInfo, stringify_classname};
use crate::settings::ProviderSettings;
use crate::words::{get_words, is_import_line_match};

/// Definition and hover provider.
#[derive(Debug, Clone, Default)]
pub struct DefinitionProvider {
    settings: ProviderSettings,
}

impl DefinitionProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        DefinitionProvider { settings }
    }

    pub fn update_settings(&mut self, settings: ProviderSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> ProviderSettings {
        self.settings
    }

    /// Location of the definition of the reference at `position`.
    ///
    /// On an import line (caret on the identifier or the path) this is the
    /// start of the imported stylesheet. Otherwise it is the position of the
    /// referenced class in the stylesheet its object was imported from.
    pub fn provide_definition(
        &self,
        text: &str,
        file_path: &Path,
        position: Position,
    ) -> Option<Location> {
        let line = text.split(detect_eol(text)).nth(position.line as usize)?;
        let dir = file_path.parent().unwrap_or_else(|| Path::new(""));

        if let Some(caps) = any_import_regex().captures(line) {
            let identifier = &caps[1];
            let specifier = &caps[2];
            if is_import_line_match(line, identifier, specifier, position.character) {
                let target = import_target(dir, specifier);
                let start = Position::new(0, 0);
                return Some(Location::new(
                    target.display().to_string(),
                    Range::new(start, start),
                ));
            }
        }

        let (object, field) = get_words(line, position)?;
        let import_path = resolve_import(text, &object, dir)?;
        let target = get_position(&import_path, &field, self.settings.camel_case)?;
        Some(Location::new(
            import_path.display().to_string(),
            Range::new(target, target),
        ))
    }

    /// The rule defining the class under the caret, rendered as CSS.
    pub fn provide_hover(
        &self,
        text: &str,
        file_path: &Path,
        position: Position,
    ) -> Option<HoverInfo> {
        let eol = detect_eol(text);
        let line = text.split(eol).nth(position.line as usize)?;
        let dir = file_path.parent().unwrap_or_else(|| Path::new(""));

        let (object, field) = get_words(line, position)?;
        let import_path = resolve_import(text, &object, dir)?;
        let index = index_or_log(&import_path, self.settings.camel_case)?;
        let entry = index.get(&format!(".{field}"))?;

        Some(HoverInfo::css(stringify_classname(
            &field,
            &entry.declarations,
            &entry.comments,
            eol,
        )))
    }
}

/// Position of `.class_name` in the stylesheet at `path`, as an editor
/// position: 0-based line, and the column as stored in the index.
pub fn get_position(path: &Path, class_name: &str, camel_case: CamelCaseOption) -> Option<Position> {
    let index = index_or_log(path, camel_case)?;
    let entry = index.get(&format!(".{class_name}"))?;
    Some(Position::new(
        entry.position.line.saturating_sub(1),
        entry.position.column,
    ))
}

fn index_or_log(path: &Path, camel_case: CamelCaseOption) -> Option<ClassnameIndex> {
    match build_index(path, get_transformer(camel_case)) {
        Ok(index) => Some(index),
        Err(err) => {
            debug!("{err:#}");
            None
        }
    }
}

fn import_target(dir: &Path, specifier: &str) -> PathBuf {
    if !is_relative_specifier(specifier) {
        if let Some(resolved) = resolve_aliased_import(dir, specifier) {
            return resolved;
        }
    }
    normalize_path(&dir.join(specifier))
}
