//! Classname transformer: identity, full camel-case, or dash-only
//! camel-case, applied to every indexed key and every looked-up name.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

/// A pure string transformation applied to class names.
pub type StringTransformer = Box<dyn Fn(&str) -> String + Send + Sync>;

/// The `camelCase` editor setting.
///
/// Accepts `false`, `true` or `"dashes"` (booleans may also be written as
/// strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CamelCaseOption {
    #[default]
    Disabled,
    Full,
    Dashes,
}

impl CamelCaseOption {
    /// Apply this option to a single name.
    pub fn apply(self, name: &str) -> String {
        match self {
            CamelCaseOption::Disabled => name.to_string(),
            CamelCaseOption::Full => camel_case(name),
            CamelCaseOption::Dashes => dashes(name),
        }
    }
}

impl<'de> Deserialize<'de> for CamelCaseOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BoolOrString {
            Bool(bool),
            String(String),
        }

        match BoolOrString::deserialize(deserializer)? {
            BoolOrString::Bool(true) => Ok(CamelCaseOption::Full),
            BoolOrString::Bool(false) => Ok(CamelCaseOption::Disabled),
            BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
                "dashes" => Ok(CamelCaseOption::Dashes),
                "true" => Ok(CamelCaseOption::Full),
                "false" => Ok(CamelCaseOption::Disabled),
                _ => Err(Error::custom(format!(
                    "invalid camelCase value: '{s}'. Expected true, false or 'dashes'"
                ))),
            },
        }
    }
}

impl Serialize for CamelCaseOption {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CamelCaseOption::Disabled => serializer.serialize_bool(false),
            CamelCaseOption::Full => serializer.serialize_bool(true),
            CamelCaseOption::Dashes => serializer.serialize_str("dashes"),
        }
    }
}

/// Build the transformer for a setting.
pub fn get_transformer(option: CamelCaseOption) -> StringTransformer {
    match option {
        CamelCaseOption::Disabled => Box::new(|name: &str| name.to_string()),
        CamelCaseOption::Full => Box::new(camel_case),
        CamelCaseOption::Dashes => Box::new(dashes),
    }
}

static DASH_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-+([A-Za-z0-9_])").expect("dash pattern is valid"));

/// Replace every run of `-` followed by a word character with that
/// character upper-cased. Underscores and existing case are left alone.
///
/// `.foo__bar--baz` becomes `.foo__barBaz`.
pub fn dashes(name: &str) -> String {
    DASH_RUN_RE
        .replace_all(name, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// Camel-case `name`, keeping a leading `.`.
///
/// Words are separated by ASCII punctuation (`-`, `_`, ...), by
/// lower-to-upper case changes and by digit runs. Symbols outside those
/// classes (e.g. emoji) form their own words and pass through unchanged.
pub fn camel_case(name: &str) -> String {
    let (prefix, body) = match name.strip_prefix('.') {
        Some(rest) => (".", rest),
        None => ("", name),
    };

    let mut out = String::with_capacity(name.len());
    out.push_str(prefix);
    for (i, word) in split_words(body).into_iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Separator,
    Upper,
    Lower,
    Digit,
    Symbol,
}

fn classify(ch: char) -> CharClass {
    if ch.is_ascii() && !ch.is_ascii_alphanumeric() {
        CharClass::Separator
    } else if ch.is_numeric() {
        CharClass::Digit
    } else if ch.is_uppercase() {
        CharClass::Upper
    } else if ch.is_alphabetic() {
        CharClass::Lower
    } else {
        CharClass::Symbol
    }
}

fn split_words(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char, CharClass)> = text
        .char_indices()
        .map(|(offset, ch)| (offset, ch, classify(ch)))
        .collect();

    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(offset, _, class)) in chars.iter().enumerate() {
        if class == CharClass::Separator {
            if let Some(s) = start.take() {
                words.push(&text[s..offset]);
            }
            continue;
        }

        let Some(s) = start else {
            start = Some(offset);
            continue;
        };

        let prev = chars[i - 1].2;
        let next = chars.get(i + 1).map(|&(_, _, class)| class);
        let boundary = match (prev, class) {
            (CharClass::Lower, CharClass::Upper) => true,
            // `XMLHttp`: the last capital of a run starts the next word.
            (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
            (CharClass::Upper, CharClass::Lower) | (CharClass::Lower, CharClass::Lower) => false,
            (a, b) => a != b,
        };
        if boundary {
            words.push(&text[s..offset]);
            start = Some(offset);
        }
    }
    if let Some(s) = start {
        words.push(&text[s..]);
    }
    words
}

#[cfg(test)]
#[path = "../tests/transform_tests.rs"]
mod transform_tests;
