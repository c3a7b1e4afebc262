//! Class name completion after `styles.`.

use std::path::Path;

use cssm_common::{Position, Range, detect_eol};
use cssm_index::{all_class_names, get_transformer};
use cssm_resolver::resolve_import;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::settings::ProviderSettings;
use crate::words::trailing_member_expression;

/// Kind of a completion item. Class names are offered as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionItemKind {
    Text,
}

impl Serialize for CompletionItemKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // LSP `CompletionItemKind` numbering.
        match self {
            CompletionItemKind::Text => serializer.serialize_u8(1),
        }
    }
}

/// Replaces the text in `replace` (or inserts over `insert`) with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertReplaceEdit {
    pub new_text: String,
    pub insert: Range,
    pub replace: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    /// 1-based index in the result list.
    pub data: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_edit: Option<InsertReplaceEdit>,
}

/// Completion provider for `styles.` member access.
#[derive(Debug, Clone, Default)]
pub struct CompletionProvider {
    settings: ProviderSettings,
}

impl CompletionProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        CompletionProvider { settings }
    }

    pub fn update_settings(&mut self, settings: ProviderSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> ProviderSettings {
        self.settings
    }

    /// Completion items at `position` in the document `text` stored at
    /// `file_path`.
    ///
    /// Returns `None` when `position` is past the last line, and an empty
    /// list when the caret is not right after `identifier.` or the import
    /// cannot be resolved.
    pub fn provide_completion_items(
        &self,
        text: &str,
        file_path: &Path,
        position: Position,
    ) -> Option<Vec<CompletionItem>> {
        let line = text.split(detect_eol(text)).nth(position.line as usize)?;

        if !is_trigger(line, position) {
            return Some(Vec::new());
        }

        let words = trailing_member_expression(line, position);
        if !words.contains('.') {
            return Some(Vec::new());
        }
        let mut parts = words.split('.');
        let object = parts.next().unwrap_or_default();
        let field = parts.next().unwrap_or_default();

        let dir = file_path.parent().unwrap_or_else(|| Path::new(""));
        let Some(import_path) = resolve_import(text, object, dir) else {
            return Some(Vec::new());
        };

        let transform = get_transformer(self.settings.camel_case);
        let names = all_class_names(&import_path, field, transform).unwrap_or_else(|err| {
            debug!("no completions from {}: {err:#}", import_path.display());
            Vec::new()
        });

        let edit_range = Range::new(
            Position::new(position.line, position.character.saturating_sub(1)),
            position,
        );
        let items = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                // Names with dashes are not valid identifiers, so the `.` is
                // replaced along with the typed text.
                let text_edit = name.contains('-').then(|| InsertReplaceEdit {
                    new_text: name.clone(),
                    insert: edit_range,
                    replace: edit_range,
                });
                CompletionItem {
                    label: name,
                    kind: CompletionItemKind::Text,
                    data: i as u32 + 1,
                    text_edit,
                }
            })
            .collect();
        Some(items)
    }
}

/// The character before the caret, or the one before that, is a `.`.
fn is_trigger(line: &str, position: Position) -> bool {
    let units: Vec<u16> = line.encode_utf16().collect();
    let dot = u16::from(b'.');
    let Some(i) = (position.character as usize).checked_sub(1) else {
        return false;
    };
    units.get(i) == Some(&dot) || (i >= 1 && units.get(i - 1) == Some(&dot))
}
