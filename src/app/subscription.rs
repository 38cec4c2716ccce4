// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard navigation and raw pointer events are routed to the viewer; a
//! periodic tick runs only while something actually needs frames.

use super::{App, Message};
use crate::config::TICK_INTERVAL_MS;
use crate::ui::viewer::component;
use iced::{event, keyboard, mouse, time, Subscription};
use std::time::Duration;

pub fn subscription(app: &App) -> Subscription<Message> {
    let mut subscriptions = vec![event_subscription()];

    let needs_ticks = app.viewer.is_animating()
        || app.viewer.is_dragging()
        || app.notifications.has_notifications();
    if needs_ticks {
        subscriptions.push(time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick));
    }

    Subscription::batch(subscriptions)
}

fn event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            if matches!(status, event::Status::Captured) {
                return None;
            }
            match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    Some(Message::Viewer(component::Message::CloseRequested))
                }
                keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                    Some(Message::Viewer(component::Message::NavigateNext))
                }
                keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                    Some(Message::Viewer(component::Message::NavigatePrevious))
                }
                _ => None,
            }
        }
        event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::Viewer(component::Message::CursorMoved(position)))
        }
        // A release outside the image still has to end an in-flight drag.
        event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::Viewer(component::Message::PointerReleased))
        }
        _ => None,
    })
}
