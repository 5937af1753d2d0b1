// src/utilities/culture.rs
//! Numeric formatting conventions for sexagesimal text

use crate::error::{AlpacaError, Result};
use std::cell::RefCell;
use std::fmt;

/// Languages whose default decimal separator is a comma
const COMMA_LANGUAGES: &[&str] = &[
    "af", "bg", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fr", "gl", "hr", "hu",
    "id", "is", "it", "lt", "lv", "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl",
    "sr", "sv", "tr", "uk", "vi",
];

/// Languages whose default decimal separator is a full stop
const POINT_LANGUAGES: &[&str] = &[
    "ar", "en", "ga", "he", "hi", "ja", "ko", "ms", "mt", "th", "zh",
];

/// Language-region pairs that differ from their language default
const REGION_OVERRIDES: &[(&str, char)] = &[
    ("de-ch", '.'),
    ("de-li", '.'),
    ("es-mx", '.'),
    ("es-us", '.'),
    ("fr-ch", '.'),
    ("it-ch", '.'),
    ("en-za", ','),
];

thread_local! {
    static CURRENT: RefCell<Culture> = RefCell::new(Culture::invariant());
}

/// The numeric convention used to read and write the fractional part of a
/// sexagesimal field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    name: String,
    decimal_separator: char,
}

impl Culture {
    /// Culture-independent format with `.` as the decimal separator
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            decimal_separator: '.',
        }
    }

    /// Resolve a language tag such as `de`, `de-DE` or `en_US`
    pub fn from_name(name: &str) -> Result<Self> {
        let tag = name.trim().replace('_', "-").to_ascii_lowercase();
        if tag.is_empty() || tag == "invariant" {
            return Ok(Self::invariant());
        }

        let language = tag.split('-').next().unwrap_or_default();
        let separator = REGION_OVERRIDES
            .iter()
            .find(|(region, _)| *region == tag)
            .map(|(_, sep)| *sep)
            .or_else(|| COMMA_LANGUAGES.contains(&language).then_some(','))
            .or_else(|| POINT_LANGUAGES.contains(&language).then_some('.'))
            .ok_or_else(|| AlpacaError::InvalidValue(format!("unknown culture '{}'", name.trim())))?;

        Ok(Self {
            name: name.trim().to_string(),
            decimal_separator: separator,
        })
    }

    /// Build a culture with an arbitrary decimal separator
    pub fn with_decimal_separator(name: &str, decimal_separator: char) -> Result<Self> {
        if decimal_separator.is_ascii_digit()
            || decimal_separator.is_whitespace()
            || matches!(decimal_separator, ':' | '-' | '+')
        {
            return Err(AlpacaError::InvalidValue(format!(
                "'{}' cannot be used as a decimal separator",
                decimal_separator
            )));
        }

        Ok(Self {
            name: name.to_string(),
            decimal_separator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty() && self.decimal_separator == '.'
    }

    /// The ambient culture of the calling thread
    pub fn current() -> Self {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Replace the ambient culture of the calling thread only
    pub fn set_current(culture: Culture) {
        CURRENT.with(|current| *current.borrow_mut() = culture);
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "invariant")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Restores the previous ambient culture when dropped
struct RestoreCulture(Option<Culture>);

impl Drop for RestoreCulture {
    fn drop(&mut self) {
        if let Some(previous) = self.0.take() {
            Culture::set_current(previous);
        }
    }
}

/// Run `action` with `culture` as the calling thread's ambient culture
pub fn with_culture<T>(culture: Culture, action: impl FnOnce() -> T) -> T {
    let previous = Culture::current();
    Culture::set_current(culture);
    let _restore = RestoreCulture(Some(previous));
    action()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cultures() {
        assert_eq!(Culture::from_name("de").unwrap().decimal_separator(), ',');
        assert_eq!(Culture::from_name("de-DE").unwrap().decimal_separator(), ',');
        assert_eq!(Culture::from_name("fr_FR").unwrap().decimal_separator(), ',');
        assert_eq!(Culture::from_name("en-US").unwrap().decimal_separator(), '.');
        assert_eq!(Culture::from_name("de-CH").unwrap().decimal_separator(), '.');
        assert_eq!(Culture::from_name("DE").unwrap().name(), "DE");
    }

    #[test]
    fn test_invariant_names() {
        assert!(Culture::from_name("").unwrap().is_invariant());
        assert!(Culture::from_name("Invariant").unwrap().is_invariant());
        assert_eq!(Culture::invariant().to_string(), "invariant");
    }

    #[test]
    fn test_unknown_culture() {
        let err = Culture::from_name("xx-YY").unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn test_bad_separator() {
        assert!(Culture::with_decimal_separator("custom", ':').is_err());
        assert!(Culture::with_decimal_separator("custom", '5').is_err());
        assert_eq!(
            Culture::with_decimal_separator("custom", '\u{066B}').unwrap().decimal_separator(),
            '\u{066B}'
        );
    }

    #[test]
    fn test_with_culture_restores() {
        let german = Culture::from_name("de-DE").unwrap();
        let inside = with_culture(german.clone(), Culture::current);
        assert_eq!(inside, german);
        assert!(Culture::current().is_invariant());
    }

    #[test]
    fn test_current_is_thread_local() {
        Culture::set_current(Culture::from_name("fr").unwrap());
        let other = std::thread::spawn(Culture::current).join().unwrap();
        assert!(other.is_invariant());
        assert_eq!(Culture::current().decimal_separator(), ',');
        Culture::set_current(Culture::invariant());
    }
}
