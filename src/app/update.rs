// SPDX-License-Identifier: MPL-2.0
//! The application update loop: routes messages and executes viewer effects.

use super::{App, Message};
use crate::config::TICK_INTERVAL_MS;
use crate::gallery::download;
use crate::gallery::manifest::GalleryManifest;
use crate::ui::viewer::component::{self, Effect, FetchRequest};
use iced::widget::image::Handle;
use iced::Task;
use std::time::Duration;

/// A gap longer than this means the tick subscription was paused in between;
/// the baseline is stale, not 250 ms of animation owed.
const MAX_TICK_GAP: Duration = Duration::from_millis(250);

/// Step charged for the first tick after start or after a paused stretch.
const NOMINAL_TICK: Duration = Duration::from_millis(TICK_INTERVAL_MS);

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Viewer(msg) => {
            let effect = app.viewer.handle(msg);
            run_effect(app, effect)
        }
        Message::Notification(msg) => {
            app.notifications.handle_message(&msg);
            Task::none()
        }
        Message::Tick(now) => {
            let elapsed = match app.last_tick {
                Some(last) => {
                    let since = now.duration_since(last);
                    if since > MAX_TICK_GAP {
                        NOMINAL_TICK
                    } else {
                        since
                    }
                }
                None => NOMINAL_TICK,
            };
            app.last_tick = Some(now);
            app.notifications.tick();
            let effect = app.viewer.handle(component::Message::Tick(elapsed));
            run_effect(app, effect)
        }
        Message::OpenManifestDialog => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .add_filter("TOML", &["toml"])
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::OpenManifestDialogResult,
        ),
        Message::OpenManifestDialogResult(Some(path)) => {
            app.open_manifest(GalleryManifest::load(&path))
        }
        Message::OpenManifestDialogResult(None) => Task::none(),
        Message::SaveDialogResult {
            session_id,
            locator,
            path,
        } => match path {
            Some(destination) => Task::perform(
                async move { download::download_to(&locator, destination).await },
                move |result| match result {
                    Ok(filename) => Message::Viewer(component::Message::DownloadSaved {
                        session_id,
                        filename,
                    }),
                    Err(err) => Message::Viewer(component::Message::DownloadFailed {
                        session_id,
                        error_key: err.i18n_key(),
                    }),
                },
            ),
            None => Task::none(),
        },
        Message::SaveAllDialogResult {
            session_id,
            images,
            title,
            directory,
        } => match directory {
            Some(dir) => Task::perform(
                async move { download::download_all(&images, title.as_deref(), &dir).await },
                move |outcome| {
                    Message::Viewer(component::Message::BatchDownloadFinished {
                        session_id,
                        outcome,
                    })
                },
            ),
            None => {
                let effect = app
                    .viewer
                    .handle(component::Message::BatchDownloadCancelled { session_id });
                run_effect(app, effect)
            }
        },
    }
}

/// Turns a viewer effect into the tasks that realize it.
pub(super) fn run_effect(app: &mut App, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None | Effect::Closed => Task::none(),
        Effect::FetchImages(requests) => {
            Task::batch(requests.into_iter().map(fetch_task))
        }
        Effect::DownloadCurrent {
            session_id,
            locator,
            suggested_name,
        } => Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_file_name(&suggested_name)
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            move |path| Message::SaveDialogResult {
                session_id,
                locator: locator.clone(),
                path,
            },
        ),
        Effect::DownloadAll {
            session_id,
            images,
            title,
        } => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .pick_folder()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            move |directory| Message::SaveAllDialogResult {
                session_id,
                images: images.clone(),
                title: title.clone(),
                directory,
            },
        ),
        Effect::ShowNotification(notification) => {
            app.notifications.push(notification);
            Task::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Flags;
    use std::time::Instant;

    fn app_with_open_gallery() -> App {
        let (mut app, _task) = App::new(Flags::default());
        let session = GalleryManifest::from_raw_images(vec![
            "a.png".to_string(),
            "b.png".to_string(),
            "c.png".to_string(),
        ])
        .into_session()
        .unwrap();
        let _ = app.viewer.open(session, None);
        app
    }

    #[test]
    fn first_tick_charges_one_nominal_step() {
        let mut app = app_with_open_gallery();
        let _ = app.viewer.handle(component::Message::NavigateNext);
        assert!(app.viewer.is_animating());
        assert!(app.last_tick.is_none());

        let _ = update(&mut app, Message::Tick(Instant::now()));

        // One 16ms step of a 220ms slide; the transition must still be running.
        assert!(app.viewer.is_animating());
        assert!(app.last_tick.is_some());
    }

    #[test]
    fn tick_after_paused_subscription_does_not_jump_transitions() {
        let mut app = app_with_open_gallery();
        app.last_tick = Some(Instant::now() - Duration::from_secs(5));
        let _ = app.viewer.handle(component::Message::NavigateNext);
        assert!(app.viewer.is_animating());

        let _ = update(&mut app, Message::Tick(Instant::now()));

        assert!(app.viewer.is_animating());
    }

    #[test]
    fn back_to_back_ticks_use_real_elapsed_time() {
        let mut app = app_with_open_gallery();
        let _ = app.viewer.handle(component::Message::NavigateNext);

        let start = Instant::now();
        let _ = update(&mut app, Message::Tick(start));
        let _ = update(&mut app, Message::Tick(start + Duration::from_millis(200)));
        let _ = update(&mut app, Message::Tick(start + Duration::from_millis(400)));

        // 16ms + 200ms + 200ms exceeds the slide duration, so it settles.
        assert!(!app.viewer.is_animating());
    }
}

/// One asynchronous image fetch, decoded into a widget handle.
fn fetch_task(request: FetchRequest) -> Task<Message> {
    let FetchRequest {
        session_id,
        index,
        locator,
    } = request;

    Task::perform(
        async move {
            download::fetch_bytes(&locator)
                .await
                .map(Handle::from_bytes)
                .map_err(|err| err.to_string())
        },
        move |result| {
            Message::Viewer(component::Message::ImageFetched {
                session_id,
                index,
                result,
            })
        },
    )
}
