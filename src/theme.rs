use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeMode::Dark => "🌙",
            ThemeMode::Light => "☀️",
        }
    }

    /// Guess the terminal's scheme from `COLORFGBG` ("fg;bg"); light when the
    /// background is one of the bright ANSI colors.
    pub fn detect() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
            .unwrap_or_default()
    }

    fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if bg == 7 || bg >= 9 {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        })
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette {
                bg: Color::Rgb(15, 15, 26),
                fg: Color::Rgb(230, 230, 240),
                muted: Color::Rgb(140, 140, 160),
                accent: Color::Rgb(102, 126, 234),
                accent_alt: Color::Rgb(118, 75, 162),
                surface: Color::Rgb(28, 28, 46),
                success: Color::Rgb(37, 211, 102),
                error: Color::Rgb(245, 87, 108),
            },
            ThemeMode::Light => Palette {
                bg: Color::Rgb(245, 246, 250),
                fg: Color::Rgb(30, 30, 46),
                muted: Color::Rgb(110, 110, 130),
                accent: Color::Rgb(79, 100, 214),
                accent_alt: Color::Rgb(118, 75, 162),
                surface: Color::Rgb(255, 255, 255),
                success: Color::Rgb(22, 160, 75),
                error: Color::Rgb(220, 53, 80),
            },
        }
    }
}

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub surface: Color,
    pub success: Color,
    pub error: Color,
}
