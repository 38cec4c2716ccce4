// SPDX-License-Identifier: MPL-2.0
//! Top-level view: the gallery viewer or the empty host screen, with the
//! toast overlay stacked on top.

use super::{App, Message};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::Toast;
use crate::ui::viewer;
use iced::widget::{button, Column, Container, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    Element, Length,
};

pub fn view(app: &App) -> Element<'_, Message> {
    let screen: Element<'_, Message> = if app.viewer.is_open() {
        viewer::view(&app.viewer, &app.i18n).map(Message::Viewer)
    } else {
        empty_state(app)
    };

    let toasts = Toast::view_overlay(&app.notifications, &app.i18n).map(Message::Notification);

    Stack::new()
        .push(screen)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Shown when no gallery is open: a title and a manifest picker.
fn empty_state(app: &App) -> Element<'_, Message> {
    let title = Text::new(app.i18n.tr("empty-title")).size(typography::TITLE_MD);

    let open_button = button(Text::new(app.i18n.tr("empty-open-manifest")).size(typography::BODY))
        .padding(spacing::SM)
        .on_press(Message::OpenManifestDialog);

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(title)
        .push(open_button);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}
