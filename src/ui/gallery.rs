// SPDX-License-Identifier: MPL-2.0
//! The gallery slide: title, artwork, status line and navigation dots.
//!
//! The slide only reports whether the pointer is over it. Presses and
//! releases come from the app's event subscription, so a swipe starts and
//! ends at positions taken from the same ordered event stream.

use crate::domain::catalog::{CatalogEntry, EntryKind};
use crate::domain::playback::PlaybackState;
use crate::domain::unwrap::UnwrapStage;
use crate::ui::assets;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::gift_box;
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, image, mouse_area, Column, Container, Row, Text};
use iced::{mouse, ContentFit, Element, Length};
use std::path::Path;

pub const TAP_TO_PLAY: &str = "Tap image to play music";
pub const LOADING_AUDIO: &str = "Loading audio…";
pub const PLAYING: &str = "🎵 Playing…";
pub const TAP_TO_WATCH: &str = "Tap to watch the video";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Pointer moved onto the slide.
    SlideEntered,
    /// Pointer moved off the slide.
    SlideExited,
    /// A navigation dot was clicked.
    DotSelected(usize),
}

pub struct ViewContext<'a> {
    pub entry: &'a CatalogEntry,
    pub index: usize,
    pub len: usize,
    pub gift_stage: UnwrapStage,
    pub playback: &'a PlaybackState,
    pub assets_dir: &'a Path,
    pub colors: &'a ColorScheme,
}

/// Status lines under a slide.
///
/// Normal entries say whether their own track is loading or playing. The
/// gift carries its instruction in the artwork instead.
#[must_use]
pub fn status_lines(entry: &CatalogEntry, playback: &PlaybackState) -> Vec<&'static str> {
    match entry.kind {
        EntryKind::SpecialVideo => vec![TAP_TO_WATCH],
        EntryKind::Gift => Vec::new(),
        EntryKind::Normal => {
            let current = entry.audio.is_some() && playback.source == entry.audio;
            let mut lines = vec![if current && playback.is_loading() {
                LOADING_AUDIO
            } else {
                TAP_TO_PLAY
            }];
            if current && playback.is_playing {
                lines.push(PLAYING);
            }
            lines
        }
    }
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let colors = ctx.colors;

    let artwork: Element<'_, Message> = if ctx.entry.is_gift() {
        gift_box::view(gift_box::ViewContext {
            stage: ctx.gift_stage,
            assets_dir: ctx.assets_dir,
            colors,
        })
    } else {
        image(assets::image_handle(ctx.assets_dir, &ctx.entry.image))
            .width(sizing::SLIDE_IMAGE)
            .height(sizing::SLIDE_IMAGE)
            .content_fit(ContentFit::Cover)
            .into()
    };

    let slide = mouse_area(artwork)
        .on_enter(Message::SlideEntered)
        .on_exit(Message::SlideExited)
        .interaction(mouse::Interaction::Pointer);

    let mut column = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(
            Text::new(ctx.entry.title.as_str())
                .size(typography::TITLE_LG)
                .color(colors.text_primary),
        )
        .push(slide);

    for line in status_lines(ctx.entry, ctx.playback) {
        let color = if line == PLAYING {
            colors.accent
        } else {
            colors.text_secondary
        };
        column = column.push(Text::new(line).size(typography::BODY).color(color));
    }

    column = column.push(dots(ctx.index, ctx.len, colors));

    Container::new(column)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(styles::container::backdrop(colors))
        .into()
}

fn dots(selected: usize, len: usize, colors: &ColorScheme) -> Element<'static, Message> {
    let row = (0..len).fold(
        Row::new().spacing(spacing::XS).align_y(Vertical::Center),
        |row, i| {
            let active = i == selected;
            let size = if active {
                sizing::DOT_ACTIVE
            } else {
                sizing::DOT
            };
            row.push(
                button(Text::new(""))
                    .width(size)
                    .height(size)
                    .padding(0)
                    .style(styles::button::dot(active, colors))
                    .on_press(Message::DotSelected(i)),
            )
        },
    );
    row.into()
}
