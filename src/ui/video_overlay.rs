// SPDX-License-Identifier: MPL-2.0
//! The looping video overlay. Tapping outside the video closes it.

use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::Horizontal;
use iced::widget::{image, mouse_area, opaque, Column, Container, Text};
use iced::{ContentFit, Element, Length};

pub const HINT: &str = "Tap background to exit";
pub const STARTING: &str = "Starting video…";
pub const UNAVAILABLE: &str = "Video unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Exit,
}

pub struct ViewContext<'a> {
    /// Latest decoded frame.
    pub frame: Option<&'a image::Handle>,
    pub failed: bool,
    pub colors: &'a ColorScheme,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = match ctx.frame {
        // Swallows taps on the picture so only the background exits.
        Some(handle) => opaque(
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain),
        ),
        None => Text::new(if ctx.failed { UNAVAILABLE } else { STARTING })
            .size(typography::TITLE_MD)
            .color(ctx.colors.text_secondary)
            .into(),
    };

    let layout = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::XL)
        .align_x(Horizontal::Center)
        .push(
            Container::new(body)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .push(Text::new(HINT).size(typography::BODY).color(ctx.colors.highlight));

    mouse_area(
        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::scrim(ctx.colors)),
    )
    .on_press(Message::Exit)
    .into()
}
