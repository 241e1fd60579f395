//! Theme color definitions for the prompt window

use crate::config::Theme;
use ratatui::style::Color;

/// Color palette for the prompt
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Frame clear color
    pub bg: Color,
    /// Question text
    pub fg: Color,
    /// Progress and hints
    pub dim: Color,
    /// Border and title
    pub accent: Color,
    /// Notices about missing terminal support
    pub warning: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Dark theme, white on deep red
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(128, 0, 0),
            fg: Color::Rgb(240, 240, 240),
            dim: Color::Rgb(200, 150, 150),
            accent: Color::Rgb(255, 200, 120),
            warning: Color::Rgb(255, 230, 80),
        }
    }

    /// Light theme, high contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            warning: Color::Rgb(180, 120, 0),
        }
    }
}
