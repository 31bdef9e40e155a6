// SPDX-License-Identifier: MPL-2.0
//! Light/dark theming.

use crate::ui::design_tokens::{opacity, palette, with_alpha};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Colors the views draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub background: Color,
    pub surface: Color,

    pub text_primary: Color,
    pub text_secondary: Color,

    pub accent: Color,
    pub accent_strong: Color,
    pub highlight: Color,

    pub dot_inactive: Color,

    pub scrim: Color,
    pub card: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: palette::GRAY_100,
            surface: palette::WHITE,
            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,
            accent: palette::PINK_600,
            accent_strong: palette::PURPLE_500,
            highlight: palette::GOLD_400,
            dot_inactive: palette::GRAY_400,
            scrim: with_alpha(palette::BLACK, opacity::OVERLAY_STRONG),
            card: palette::PAPER,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: palette::PURPLE_900,
            surface: palette::GRAY_900,
            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_400,
            accent: palette::PINK_400,
            accent_strong: palette::PURPLE_500,
            highlight: palette::GOLD_400,
            dot_inactive: palette::GRAY_700,
            scrim: with_alpha(palette::BLACK, opacity::OVERLAY_HEAVY),
            card: palette::PAPER,
        }
    }

    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        if mode.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }

    /// The built-in Iced theme matching this mode.
    #[must_use]
    pub fn iced_theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}
