// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Full-window background of the gallery and welcome screens.
pub fn backdrop(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let background = colors.background;
    let text = colors.text_primary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text),
        ..Default::default()
    }
}

/// Dimmed layer behind an overlay.
pub fn scrim(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let scrim = colors.scrim;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(scrim)),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

/// White polaroid frame around a stack photo.
pub fn polaroid(colors: &ColorScheme, opacity: f32) -> impl Fn(&Theme) -> container::Style {
    let card = Color {
        a: opacity,
        ..colors.card
    };
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(card)),
        text_color: Some(Color {
            a: opacity,
            ..Color::from_rgb(0.2, 0.2, 0.2)
        }),
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// The persistent player bar.
pub fn player_bar(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let surface = colors.surface;
    let text = colors.text_primary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(surface)),
        text_color: Some(text),
        border: Border {
            radius: radius::LG.into(),
            ..Border::default()
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}
