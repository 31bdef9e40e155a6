// SPDX-License-Identifier: MPL-2.0
//! Application root state and the Iced program.
//!
//! `App` owns the navigation core and the pieces that exist only for the
//! front-end: the Iced-backed clock, the polaroid deck, the video loop and
//! pointer tracking. `App::update` routes view messages into core commands;
//! `App::view` renders snapshots of core state.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::photo_stack::PhotoStack;
use crate::application::port::MediaElement;
use crate::application::{NavigationCoordinator, PlaybackController};
use crate::config::{self, manifest, Config};
use crate::domain::catalog::Catalog;
use crate::infrastructure::{AudioOutput, FfmpegAudioElement, IcedClock, VideoLoop};
use crate::ui::theming::{ColorScheme, ThemeMode};
use iced::widget::image;
use iced::{window, Element, Point, Subscription, Task, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: f32 = 480.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 820.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

const WINDOW_TITLE: &str = "Happy Birthday!";

/// Root Iced application state.
pub struct App<E: MediaElement = FfmpegAudioElement> {
    coordinator: NavigationCoordinator<E>,
    clock: IcedClock,
    photo_stack: PhotoStack,
    rng: StdRng,
    video: Option<VideoLoop>,
    video_frame: Option<image::Handle>,
    video_failed: bool,
    assets_dir: PathBuf,
    theme_mode: ThemeMode,
    colors: ColorScheme,
    /// Last pointer position reported by the event subscription.
    pointer: Point,
    /// Whether the pointer is over the gallery slide.
    slide_hovered: bool,
    /// Slider position while the seek bar is being dragged.
    seek_preview: Option<f64>,
    /// Keeps the device stream open for the lifetime of the app.
    _audio_output: Option<AudioOutput>,
}

impl<E: MediaElement> fmt::Debug for App<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("navigation", &self.coordinator.state())
            .field("playback", self.coordinator.playback_state())
            .field("assets_dir", &self.assets_dir)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
#[must_use]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App<FfmpegAudioElement> {
    /// Loads config and catalog, opens the audio device and builds the core.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir, flags.assets_dir);

        let (config, config_warning) = config::load();
        if let Some(warning) = config_warning {
            tracing::warn!("{warning}");
        }

        let assets_dir = paths::get_assets_dir();
        let (catalog, catalog_warning) = manifest::load_catalog(&assets_dir);
        if let Some(warning) = catalog_warning {
            tracing::warn!("{warning}");
        }

        let output = match AudioOutput::new(config.volume()) {
            Ok(output) => Some(output),
            Err(err) => {
                tracing::warn!("continuing without sound: {err}");
                None
            }
        };
        let element = FfmpegAudioElement::new(&assets_dir, output.as_ref().map(AudioOutput::sink));

        tracing::info!(
            assets = %assets_dir.display(),
            entries = catalog.len(),
            "greeting ready"
        );

        let mut app = Self::with_parts(catalog, element, &config, assets_dir);
        app._audio_output = output;
        (app, Task::none())
    }
}

impl<E: MediaElement> App<E> {
    /// Assembles an app around an existing element. Used by `new` and tests.
    pub fn with_parts(catalog: Catalog, element: E, config: &Config, assets_dir: PathBuf) -> Self {
        let mut rng = StdRng::from_os_rng();
        let photo_stack = PhotoStack::new(catalog.photos(), &mut rng);

        let playback = PlaybackController::new(element).with_autoplay(config.autoplay());
        let coordinator = NavigationCoordinator::new(catalog, playback)
            .with_swipe_threshold(config.swipe_threshold())
            .with_reveal_delay(config.reveal_delay());

        let theme_mode = config.general.theme_mode;
        Self {
            coordinator,
            clock: IcedClock::new(),
            photo_stack,
            rng,
            video: None,
            video_frame: None,
            video_failed: false,
            assets_dir,
            theme_mode,
            colors: ColorScheme::for_mode(theme_mode),
            pointer: Point::ORIGIN,
            slide_hovered: false,
            seek_preview: None,
            _audio_output: None,
        }
    }

    #[must_use]
    pub fn coordinator(&self) -> &NavigationCoordinator<E> {
        &self.coordinator
    }

    #[must_use]
    pub fn photo_stack(&self) -> &PhotoStack {
        &self.photo_stack
    }

    fn title(&self) -> String {
        match self.coordinator.playback_state() {
            state if state.is_playing => format!("{} - {WINDOW_TITLE}", state.track_title),
            _ => WINDOW_TITLE.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_pointer_subscription(),
            subscription::create_media_subscription(),
            subscription::create_video_subscription(self.video.is_some()),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.handle(message);
        self.clock.drain_tasks(Message::TimerFired)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            navigation: self.coordinator.state(),
            catalog: self.coordinator.catalog(),
            gift_stage: self.coordinator.unwrap_state().stage,
            playback: self.coordinator.playback_state(),
            photo_stack: &self.photo_stack,
            video_frame: self.video_frame.as_ref(),
            video_failed: self.video_failed,
            seek_preview: self.seek_preview,
            assets_dir: &self.assets_dir,
            colors: &self.colors,
        })
    }
}
