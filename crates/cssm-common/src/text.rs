//! Text measurement helpers shared by the parser, the indexer and the
//! consumer adapters.

/// Detect the line ending used by `text`.
///
/// The first line break found decides: `\r\n`, a lone `\r`, or `\n`.
/// Text without any line break reports `\n`.
pub fn detect_eol(text: &str) -> &'static str {
    let bytes = text.as_bytes();
    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'\r' => {
                return if bytes.get(i + 1) == Some(&b'\n') {
                    "\r\n"
                } else {
                    "\r"
                };
            }
            b'\n' => return "\n",
            _ => {}
        }
    }
    "\n"
}

/// Length of `text` in UTF-16 code units, the unit editor columns use.
#[inline]
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|ch| ch.len_utf16() as u32).sum()
}

/// Byte offset in `text` of the UTF-16 column `character`, clamped to the
/// end of the text. A column inside a surrogate pair snaps to the start of
/// that character.
pub fn utf16_to_byte_offset(text: &str, character: u32) -> usize {
    let mut units = 0u32;
    for (offset, ch) in text.char_indices() {
        let next = units + ch.len_utf16() as u32;
        if next > character {
            return offset;
        }
        units = next;
    }
    text.len()
}
