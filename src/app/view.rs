// SPDX-License-Identifier: MPL-2.0
//! View rendering for [`super::App`].
//!
//! Overlays are stacked over the gallery so the slide stays visible under the
//! scrim. The player bar sits below everything whenever a track is loaded.

use super::Message;
use crate::application::photo_stack::PhotoStack;
use crate::domain::catalog::Catalog;
use crate::domain::navigation::{ActiveView, NavigationState};
use crate::domain::playback::PlaybackState;
use crate::domain::unwrap::UnwrapStage;
use crate::ui::theming::ColorScheme;
use crate::ui::{gallery, music_player, photo_stack, styles, video_overlay, welcome};
use iced::widget::{image, Column, Container, Stack};
use iced::{Element, Length};
use std::path::Path;

/// Contextual data needed to render the application view.
pub struct ViewContext<'a> {
    pub navigation: NavigationState,
    pub catalog: &'a Catalog,
    pub gift_stage: UnwrapStage,
    pub playback: &'a PlaybackState,
    pub photo_stack: &'a PhotoStack,
    pub video_frame: Option<&'a image::Handle>,
    pub video_failed: bool,
    pub seek_preview: Option<f64>,
    pub assets_dir: &'a Path,
    pub colors: &'a ColorScheme,
}

/// Renders the complete application view.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match ctx.navigation.active_view {
        ActiveView::Welcome => welcome::view(ctx.colors).map(Message::Welcome),
        ActiveView::Gallery => view_gallery(&ctx),
        ActiveView::PhotoStackOverlay => Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(view_gallery(&ctx))
            .push(
                photo_stack::view(photo_stack::ViewContext {
                    stack: ctx.photo_stack,
                    assets_dir: ctx.assets_dir,
                    colors: ctx.colors,
                })
                .map(Message::PhotoStack),
            )
            .into(),
        ActiveView::VideoOverlay => Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(view_gallery(&ctx))
            .push(
                video_overlay::view(video_overlay::ViewContext {
                    frame: ctx.video_frame,
                    failed: ctx.video_failed,
                    colors: ctx.colors,
                })
                .map(Message::Video),
            )
            .into(),
    };

    let mut layout = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(Container::new(content).width(Length::Fill).height(Length::Fill));

    if ctx.playback.has_source() && ctx.navigation.active_view != ActiveView::Welcome {
        layout = layout.push(
            music_player::view(music_player::ViewContext {
                state: ctx.playback,
                colors: ctx.colors,
                seek_preview: ctx.seek_preview,
            })
            .map(Message::Player),
        );
    }

    Container::new(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::backdrop(ctx.colors))
        .into()
}

fn view_gallery<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let index = ctx.navigation.selected_index;
    let Some(entry) = ctx.catalog.get(index) else {
        // The coordinator keeps the index in range; render nothing otherwise.
        return Container::new(Column::new()).into();
    };

    gallery::view(gallery::ViewContext {
        entry,
        index,
        len: ctx.catalog.len(),
        gift_stage: ctx.gift_stage,
        playback: ctx.playback,
        assets_dir: ctx.assets_dir,
        colors: ctx.colors,
    })
    .map(Message::Gallery)
}
