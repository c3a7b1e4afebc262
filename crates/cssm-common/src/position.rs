//! Position and location types.
//!
//! Stylesheet nodes carry parser-native 1-based positions
//! ([`SourcePosition`]), while editor requests and responses use 0-based
//! positions ([`Position`]). Conversion between the two is done explicitly by
//! the consumer adapters, never implicitly.

/// A parser-native position in a stylesheet (1-based line and column).
///
/// Columns are counted in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SourcePosition {
    /// 1-based line number
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl SourcePosition {
    pub fn new(line: u32, column: u32) -> Self {
        SourcePosition { line, column }
    }
}

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units for LSP compatibility)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// A location in a source file (file path + range).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    #[serde(rename = "uri")]
    pub file_path: String,
    pub range: Range,
}

impl Location {
    pub fn new(file_path: String, range: Range) -> Self {
        Location { file_path, range }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_serializes_path_as_uri() {
        let location = Location::new(
            "/p/a.css".to_string(),
            Range::new(Position::new(0, 0), Position::new(0, 0)),
        );
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["uri"], "/p/a.css");
        assert_eq!(json["range"]["start"]["character"], 0);
    }
}
