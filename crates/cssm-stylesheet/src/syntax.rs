use std::path::Path;

/// Stylesheet dialect, resolved once from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StylesheetSyntax {
    /// Plain CSS (also the fallback for unknown extensions, e.g. `.styl`).
    #[default]
    Css,
    Less,
    Scss,
    /// Indented SASS syntax.
    Sass,
}

impl StylesheetSyntax {
    /// Pick the dialect for an extension (with or without the leading dot).
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        if extension.eq_ignore_ascii_case("less") {
            StylesheetSyntax::Less
        } else if extension.eq_ignore_ascii_case("scss") {
            StylesheetSyntax::Scss
        } else if extension.eq_ignore_ascii_case("sass") {
            StylesheetSyntax::Sass
        } else {
            StylesheetSyntax::Css
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Whether `//` starts a comment that runs to the end of the line.
    pub fn allows_line_comments(self) -> bool {
        matches!(
            self,
            StylesheetSyntax::Less | StylesheetSyntax::Scss | StylesheetSyntax::Sass
        )
    }
}
