//! Page language and text direction.
//!
//! The page always starts in English and nothing is persisted between
//! sessions. Toggling switches between English (left-to-right) and Arabic
//! (right-to-left).

use std::fmt;

/// Supported page languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    /// The `lang` attribute value.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction for this language.
    pub fn direction(self) -> Direction {
        match self {
            Self::En => Direction::Ltr,
            Self::Ar => Direction::Rtl,
        }
    }

    /// The other language.
    pub fn other(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text and slide direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// The `dir` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current page language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Locale {
    lang: Lang,
}

impl Locale {
    /// English, left-to-right.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn direction(&self) -> Direction {
        self.lang.direction()
    }

    /// Switch to the other language and return the new direction.
    pub fn toggle(&mut self) -> Direction {
        self.lang = self.lang.other();
        self.direction()
    }

    /// Label of the language toggle button: the name of the language it
    /// switches *to*, written in that language.
    pub fn toggle_label(&self) -> &'static str {
        match self.lang {
            Lang::En => "العربية",
            Lang::Ar => "English",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_english() {
        let locale = Locale::new();
        assert_eq!(locale.lang(), Lang::En);
        assert_eq!(locale.direction(), Direction::Ltr);
        assert_eq!(locale.toggle_label(), "العربية");
    }

    #[test]
    fn toggle_round_trip() {
        let mut locale = Locale::new();
        assert_eq!(locale.toggle(), Direction::Rtl);
        assert_eq!(locale.lang().code(), "ar");
        assert_eq!(locale.toggle_label(), "English");
        assert_eq!(locale.toggle(), Direction::Ltr);
        assert_eq!(locale.lang(), Lang::En);
    }

    #[test]
    fn display_values() {
        assert_eq!(Lang::Ar.to_string(), "ar");
        assert_eq!(Direction::Rtl.to_string(), "rtl");
    }
}
