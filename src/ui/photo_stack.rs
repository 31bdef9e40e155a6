// SPDX-License-Identifier: MPL-2.0
//! The polaroid overlay.

use crate::application::photo_stack::{caption_date, PhotoCard, PhotoStack};
use crate::ui::assets;
use crate::ui::design_tokens::{opacity, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::Horizontal;
use iced::widget::{image, mouse_area, Column, Container, Stack, Text};
use iced::{mouse, ContentFit, Element, Length, Padding, Radians, Rotation};
use std::path::Path;

pub const HINT: &str = "Tap photos to advance • Tap background to exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A card was tapped.
    Advance,
    /// The background was tapped.
    Exit,
}

pub struct ViewContext<'a> {
    pub stack: &'a PhotoStack,
    pub assets_dir: &'a Path,
    pub colors: &'a ColorScheme,
}

/// Padding that shifts a centered child by `offset` pixels.
fn shift(offset: (f32, f32)) -> Padding {
    let (dx, dy) = offset;
    Padding {
        top: (dy * 2.0).max(0.0),
        bottom: (-dy * 2.0).max(0.0),
        left: (dx * 2.0).max(0.0),
        right: (-dx * 2.0).max(0.0),
    }
}

fn card<'a>(card: &'a PhotoCard, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let fade = if card.sliding_in {
        card.opacity.min(opacity::OVERLAY_STRONG)
    } else {
        card.opacity
    };

    let photo = image(assets::image_handle(ctx.assets_dir, &card.photo.src))
        .width(sizing::CARD_PHOTO)
        .height(sizing::CARD_PHOTO)
        .content_fit(ContentFit::Cover)
        .rotation(Rotation::Floating(Radians(card.rotation_deg.to_radians())))
        .opacity(fade);

    let caption = Column::new()
        .align_x(Horizontal::Center)
        .spacing(spacing::XXS)
        .push(Text::new(caption_date(&card.photo.date)).size(typography::BODY))
        .push(Text::new(card.photo.location.as_str()).size(typography::CAPTION));

    let frame = Container::new(
        Column::new()
            .spacing(spacing::XS)
            .align_x(Horizontal::Center)
            .push(photo)
            .push(caption),
    )
    .width(sizing::CARD_WIDTH)
    .padding([spacing::SM, spacing::SM])
    .style(styles::container::polaroid(ctx.colors, fade));

    Container::new(
        mouse_area(frame)
            .on_press(Message::Advance)
            .interaction(mouse::Interaction::Pointer),
    )
    .padding(shift(card.offset))
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut ordered: Vec<&PhotoCard> = ctx.stack.cards().iter().collect();
    // Lowest z first so the top card is drawn last and hit first.
    ordered.sort_by_key(|c| c.z_index);

    let deck = ordered
        .into_iter()
        .fold(Stack::new().width(Length::Fill).height(Length::Fill), |stack, c| {
            stack.push(card(c, &ctx))
        });

    let layout = Column::new()
        .align_x(Horizontal::Center)
        .padding(spacing::LG)
        .push(deck)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_moves_toward_offset() {
        let p = shift((10.0, -5.0));
        assert_eq!(p.left, 20.0);
        assert_eq!(p.right, 0.0);
        assert_eq!(p.top, 0.0);
        assert_eq!(p.bottom, 10.0);
    }

    #[test]
    fn zero_offset_needs_no_padding() {
        assert_eq!(shift((0.0, 0.0)), Padding::ZERO);
    }
}
