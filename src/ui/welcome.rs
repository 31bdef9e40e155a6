// SPDX-License-Identifier: MPL-2.0
//! The welcome screen: a greeting and a tap anywhere to continue.

use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::Horizontal;
use iced::widget::{mouse_area, Column, Container, Text};
use iced::{mouse, Element, Length};

pub const HEADLINE: &str = "Welcome!";
pub const PROMPT: &str = "Touch to continue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Touched,
}

pub fn view(colors: &ColorScheme) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .push(
            Text::new(HEADLINE)
                .size(typography::DISPLAY)
                .color(colors.accent),
        )
        .push(
            Text::new(PROMPT)
                .size(typography::BODY_LG)
                .color(colors.text_secondary),
        );

    let screen = Container::new(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(styles::container::backdrop(colors));

    mouse_area(screen)
        .on_press(Message::Touched)
        .interaction(mouse::Interaction::Pointer)
        .into()
}
