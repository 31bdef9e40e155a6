// SPDX-License-Identifier: MPL-2.0
//! The player bar shown whenever a track is loaded.

use crate::domain::playback::PlaybackState;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::alignment::Vertical;
use iced::widget::{button, slider, Column, Container, Row, Space, Text};
use iced::{Element, Length};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlayback,
    /// The slider is being dragged to this position, in seconds.
    SeekPreview(f64),
    /// The slider was released.
    SeekCommit,
}

pub struct ViewContext<'a> {
    pub state: &'a PlaybackState,
    pub colors: &'a ColorScheme,
    /// Position under the slider thumb while dragging.
    pub seek_preview: Option<f64>,
}

/// Formats seconds as `m:ss`.
///
/// ```
/// use greeting_reel::ui::music_player::format_time;
///
/// assert_eq!(format_time(75.4), "1:15");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
#[must_use]
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Elapsed share of the track, 0 to 100. Zero while the duration is unknown.
#[must_use]
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    (current / duration * 100.0).clamp(0.0, 100.0)
}

/// Maps a click at `fraction` of the bar width to a position in seconds.
#[must_use]
pub fn seek_target(fraction: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !fraction.is_finite() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * duration)
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let state = ctx.state;

    let icon = if state.is_loading() {
        "…"
    } else if state.is_playing {
        "⏸"
    } else {
        "▶"
    };
    let play_button = button(
        Container::new(Text::new(icon).size(typography::TITLE_MD))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(sizing::PLAY_BUTTON)
    .height(sizing::PLAY_BUTTON)
    .padding(0)
    .style(styles::button::play(ctx.colors));
    let play_button = if state.is_loaded {
        play_button.on_press(Message::TogglePlayback)
    } else {
        play_button
    };

    let position = ctx.seek_preview.unwrap_or(state.current_time);
    let duration = state.duration;
    let timeline: Element<'_, Message> = if duration > 0.0 {
        slider(0.0..=100.0, progress_percent(position, duration), move |percent| {
            Message::SeekPreview(seek_target(percent / 100.0, duration).unwrap_or_default())
        })
        .step(0.1)
        .on_release(Message::SeekCommit)
        .width(Length::Fill)
        .into()
    } else {
        // Duration unknown: an inert bar.
        slider(0.0..=1.0, 0.0, |_| Message::SeekCommit)
            .width(Length::Fill)
            .into()
    };

    let title = Text::new(state.track_title.as_str())
        .size(typography::BODY)
        .color(ctx.colors.text_primary);
    let times = Text::new(format!(
        "{} / {}",
        format_time(position),
        format_time(duration)
    ))
    .size(typography::CAPTION)
    .color(ctx.colors.text_secondary);

    let details = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(
            Row::new()
                .push(title)
                .push(Space::new().width(Length::Fill))
                .push(times),
        )
        .push(timeline);

    let bar = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(play_button)
        .push(details);

    Container::new(bar)
        .padding([spacing::XS, spacing::MD])
        .width(Length::Fill)
        .height(sizing::PLAYER_BAR_HEIGHT)
        .center_y(sizing::PLAYER_BAR_HEIGHT)
        .style(styles::container::player_bar(ctx.colors))
        .into()
}
