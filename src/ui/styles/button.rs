// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{opacity, palette::WHITE, radius, shadow, with_alpha};
use crate::ui::theming::ColorScheme;
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Round play/pause button of the player bar.
pub fn play(colors: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let accent = colors.accent;
    let accent_strong = colors.accent_strong;
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => accent_strong,
            button::Status::Active => accent,
            button::Status::Disabled => with_alpha(accent, opacity::OVERLAY_MEDIUM),
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: WHITE,
            border: Border {
                radius: radius::FULL.into(),
                ..Border::default()
            },
            shadow: shadow::MD,
            snap: true,
        }
    }
}

/// Navigation dot; the selected one is filled with the accent color.
pub fn dot(active: bool, colors: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let fill = if active {
        colors.accent
    } else {
        colors.dot_inactive
    };
    let hover = colors.accent_strong;
    move |_theme: &Theme, status: button::Status| {
        let color = match status {
            button::Status::Hovered if !active => hover,
            _ => fill,
        };
        button::Style {
            background: Some(Background::Color(color)),
            text_color: Color::TRANSPARENT,
            border: Border {
                radius: radius::FULL.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}
