// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the viewer and the host
//! screen.
//!
//! The `App` struct wires together the gallery viewer, localization and
//! toast notifications, and translates viewer effects into side effects like
//! image fetches and save dialogs. Policy decisions (window sizing, which
//! inputs open a manifest) stay close to the main update loop so user-facing
//! behavior is easy to audit.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::gallery::manifest::GalleryManifest;
use crate::gallery::GestureThresholds;
use crate::i18n::fluent::I18n;
use crate::ui::notifications;
use crate::ui::viewer::component;
use iced::{window, Element, Subscription, Task, Theme};
use std::path::Path;
use std::time::Instant;

const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
const MIN_WINDOW_WIDTH: f32 = 480.0;
const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Root Iced application state bridging the viewer, localization and
/// notifications.
pub struct App {
    pub i18n: I18n,
    viewer: component::State,
    notifications: notifications::Manager,
    last_tick: Option<Instant>,
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and opens any gallery named on the
    /// command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let thresholds = GestureThresholds::from_config(&config.gestures);

        let mut app = App {
            i18n,
            viewer: component::State::new(thresholds),
            notifications: notifications::Manager::new(),
            last_tick: None,
        };

        let task = if flags.inputs.is_empty() {
            Task::none()
        } else {
            app.open_inputs(flags.inputs)
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(self)
    }

    /// Opens a gallery from the launch inputs: a single `.toml` path is read
    /// as a manifest, anything else is treated as a list of image locators.
    fn open_inputs(&mut self, inputs: Vec<String>) -> Task<Message> {
        let manifest = if inputs.len() == 1 && inputs[0].ends_with(".toml") {
            GalleryManifest::load(Path::new(&inputs[0]))
        } else {
            Ok(GalleryManifest::from_raw_images(inputs))
        };

        self.open_manifest(manifest)
    }

    fn open_manifest(
        &mut self,
        manifest: crate::error::Result<GalleryManifest>,
    ) -> Task<Message> {
        match manifest.and_then(GalleryManifest::into_session) {
            Ok(session) => {
                let effect = self.viewer.open(session, None);
                update::run_effect(self, effect)
            }
            Err(err) => {
                self.notifications
                    .push(notifications::Notification::error(err.i18n_key()));
                Task::none()
            }
        }
    }
}
