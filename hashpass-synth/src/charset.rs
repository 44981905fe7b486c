use std::num::NonZeroU32;

use crate::error::{Error, Result};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Which character classes make up a generated character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for CharClasses {
    /// Letters and digits, no symbols.
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: false,
        }
    }
}

/// Ordered, non-empty sequence of candidate characters.
///
/// Its length is the modulus every hash call is reduced by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    chars: Vec<char>,
    modulus: NonZeroU32,
}

impl CharacterSet {
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        let Ok(len) = u32::try_from(chars.len()) else {
            return Err(Error::CharsetTooLarge(chars.len()));
        };
        let Some(modulus) = NonZeroU32::new(len) else {
            return Err(Error::InvalidInput("character set is empty"));
        };
        Ok(Self { chars, modulus })
    }

    /// Concatenates the selected classes in uppercase, lowercase, digits, symbols order.
    pub fn from_classes(classes: CharClasses) -> Result<Self> {
        let mut chars = String::new();
        if classes.uppercase {
            chars.push_str(UPPERCASE);
        }
        if classes.lowercase {
            chars.push_str(LOWERCASE);
        }
        if classes.digits {
            chars.push_str(DIGITS);
        }
        if classes.symbols {
            chars.push_str(SYMBOLS);
        }
        if chars.is_empty() {
            return Err(Error::InvalidInput("select at least one character class"));
        }
        Self::new(&chars)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn modulus(&self) -> NonZeroU32 {
        self.modulus
    }

    pub fn get(&self, index: u32) -> Option<char> {
        self.chars.get(index as usize).copied()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_charset_rejected() {
        assert!(matches!(CharacterSet::new(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_modulus_counts_chars_not_bytes() {
        let set = CharacterSet::new("aé€").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.modulus().get(), 3);
        assert_eq!(set.get(2), Some('€'));
        assert_eq!(set.get(3), None);
    }

    #[test]
    fn test_default_classes() {
        let set = CharacterSet::from_classes(CharClasses::default()).unwrap();
        assert_eq!(set.len(), 62);
        assert_eq!(set.get(0), Some('A'));
        assert_eq!(set.get(26), Some('a'));
        assert_eq!(set.get(52), Some('0'));
    }

    #[test]
    fn test_all_classes_in_order() {
        let classes = CharClasses {
            symbols: true,
            ..CharClasses::default()
        };
        let set = CharacterSet::from_classes(classes).unwrap();
        let expected: String = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS].concat();
        assert_eq!(set.as_chars().iter().collect::<String>(), expected);
    }

    #[test]
    fn test_symbols_only() {
        let classes = CharClasses {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: true,
        };
        let set = CharacterSet::from_classes(classes).unwrap();
        assert_eq!(set.len(), SYMBOLS.len());
    }

    #[test]
    fn test_no_classes_rejected() {
        let classes = CharClasses {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        };
        let result = CharacterSet::from_classes(classes);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
