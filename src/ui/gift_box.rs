// SPDX-License-Identifier: MPL-2.0
//! The gift slide: present artwork for the current stage, the next
//! instruction and, once revealed, the ticket.

use crate::domain::unwrap::UnwrapStage;
use crate::ui::assets;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::theming::ColorScheme;
use iced::alignment::Horizontal;
use iced::widget::{image, Column, Stack, Text};
use iced::{ContentFit, Element, Length};
use std::path::Path;

pub struct ViewContext<'a> {
    pub stage: UnwrapStage,
    pub assets_dir: &'a Path,
    pub colors: &'a ColorScheme,
}

/// Renders the gift. Taps are handled by the enclosing slide.
pub fn view<'a, M: 'a>(ctx: ViewContext<'a>) -> Element<'a, M> {
    let present = image(assets::image_handle(
        ctx.assets_dir,
        ctx.stage.present_artwork(),
    ))
    .width(sizing::GIFT_IMAGE)
    .height(sizing::GIFT_IMAGE)
    .content_fit(ContentFit::Contain);

    let artwork: Element<'a, M> = match ctx.stage.ticket_artwork() {
        Some(ticket) => Stack::new()
            .push(present)
            .push(
                iced::widget::Container::new(
                    image(assets::image_handle(ctx.assets_dir, ticket))
                        .width(sizing::TICKET_IMAGE)
                        .content_fit(ContentFit::Contain),
                )
                .center_x(sizing::GIFT_IMAGE)
                .center_y(sizing::GIFT_IMAGE),
            )
            .into(),
        None => present.into(),
    };

    Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .width(Length::Shrink)
        .push(artwork)
        .push(
            Text::new(ctx.stage.instruction())
                .size(typography::BODY_LG)
                .color(if ctx.stage == UnwrapStage::TicketRevealed {
                    ctx.colors.highlight
                } else {
                    ctx.colors.text_secondary
                }),
        )
        .into()
}
