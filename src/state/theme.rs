//! Theme preference cycling

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// User-selected theme, cycled Auto -> Light -> Dark -> Auto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

/// Theme actually applied by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Auto => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Auto,
        }
    }

    /// Resolve against the system theme; only `Auto` consults it
    pub fn resolve(self, system: Theme) -> Theme {
        match self {
            ThemePreference::Auto => system,
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Auto => "auto",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ThemePreference::Auto),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(format!("unknown theme preference: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_has_length_three() {
        let start = ThemePreference::Auto;
        let once = start.next();
        let twice = once.next();
        assert_eq!(once, ThemePreference::Light);
        assert_eq!(twice, ThemePreference::Dark);
        assert_eq!(twice.next(), start);
    }

    #[test]
    fn auto_follows_system() {
        assert_eq!(ThemePreference::Auto.resolve(Theme::Dark), Theme::Dark);
        assert_eq!(ThemePreference::Auto.resolve(Theme::Light), Theme::Light);
        assert_eq!(ThemePreference::Light.resolve(Theme::Dark), Theme::Light);
        assert_eq!(ThemePreference::Dark.resolve(Theme::Light), Theme::Dark);
    }

    #[test]
    fn parses_snapshot_tokens() {
        assert_eq!("Dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert!("sepia".parse::<ThemePreference>().is_err());
    }
}
