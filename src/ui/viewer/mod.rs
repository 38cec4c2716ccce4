// SPDX-License-Identifier: MPL-2.0
//! Gallery viewer UI: full-screen image over a darkened backdrop, with a
//! header bar, navigation arrows and swipe-driven paging.

pub mod component;

pub use component::{Effect, FetchRequest, Message, State};

use crate::gallery::transition::Slide;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, radius, spacing, typography};
use iced::widget::{button, mouse_area, Container, Image, Row, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    mouse, Background, Color, Element, Length, Padding, Theme, Vector,
};

/// Horizontal travel of a slide transition, logical px.
const SLIDE_TRAVEL: f32 = 120.0;

pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let Some(session) = state.session() else {
        // The shell swaps to its own screen once the viewer closes; this
        // branch only renders for a single frame in between.
        return Container::new(Text::new(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .into();
    };

    let backdrop = mouse_area(
        Container::new(Text::new(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| iced::widget::container::Style {
                background: Some(Background::Color(Color {
                    a: opacity::BACKDROP,
                    ..palette::BLACK
                })),
                ..Default::default()
            }),
    )
    .on_press(Message::BackdropPressed);

    let mut stack = Stack::new().push(backdrop);

    let drag = state.drag_offset();
    if let Some(outgoing) = state.outgoing_slide() {
        stack = stack.push(slide_view(state, i18n, outgoing, None));
    }
    if let Some(incoming) = state.incoming_slide() {
        stack = stack.push(slide_view(state, i18n, incoming, drag));
    }

    if session.len() > 1 {
        stack = stack.push(arrow_zone(Horizontal::Left, "◀", Message::NavigatePrevious));
        stack = stack.push(arrow_zone(Horizontal::Right, "▶", Message::NavigateNext));
    }

    stack = stack.push(header(state, i18n));

    stack.width(Length::Fill).height(Length::Fill).into()
}

/// One image of the slide transition, offset and faded per its phase, with
/// any in-flight drag applied on top.
fn slide_view<'a>(
    state: &'a State,
    i18n: &'a I18n,
    slide: &Slide,
    drag: Option<Vector>,
) -> Element<'a, Message> {
    let drag = drag.unwrap_or(Vector::new(0.0, 0.0));
    let shift_x = slide.offset_fraction() * SLIDE_TRAVEL + drag.x;
    let shift_y = drag.y.max(0.0);

    let content: Element<'a, Message> = match state.handle_for(slide.image_index) {
        Some(handle) => Image::new(handle.clone())
            .opacity(slide.opacity())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Text::new(i18n.tr("gallery-loading"))
            .size(typography::BODY)
            .style(|_theme: &Theme| iced::widget::text::Style {
                color: Some(palette::GRAY_400),
            })
            .into(),
    };

    let interaction = if state.is_dragging() {
        mouse::Interaction::Grabbing
    } else {
        mouse::Interaction::Grab
    };

    let image_area = mouse_area(content)
        .on_press(Message::ImagePressed)
        .on_release(Message::ImageReleased)
        .interaction(interaction);

    Container::new(image_area)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .padding(shift_padding(shift_x, shift_y))
        .into()
}

/// Padding that moves center-aligned content by `(x, y)` logical px.
/// A centered child shifts by half the one-sided padding, hence the doubling.
fn shift_padding(x: f32, y: f32) -> Padding {
    Padding {
        left: (2.0 * x).max(0.0) + spacing::LG,
        right: (-2.0 * x).max(0.0) + spacing::LG,
        top: (2.0 * y).max(0.0) + spacing::LG,
        bottom: (-2.0 * y).max(0.0) + spacing::LG,
    }
}

/// Edge zone holding a navigation arrow. Only the button itself reacts;
/// releases elsewhere in the zone belong to the drag gesture.
fn arrow_zone<'a>(side: Horizontal, glyph: &'a str, message: Message) -> Element<'a, Message> {
    let arrow = button(Text::new(glyph).size(typography::NAV_GLYPH))
        .padding(spacing::SM)
        .style(overlay_button_style)
        .on_press(message);

    Container::new(arrow)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(side)
        .align_y(Vertical::Center)
        .into()
}

/// Header bar: title, page indicator, download actions and the close button.
fn header<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let Some(session) = state.session() else {
        return Text::new("").into();
    };

    let title = Text::new(session.title().unwrap_or_default().to_string())
        .size(typography::TITLE_MD)
        .style(|_theme: &Theme| iced::widget::text::Style {
            color: Some(palette::WHITE),
        });

    let page_label = Text::new(session.page_label())
        .size(typography::CAPTION)
        .style(|_theme: &Theme| iced::widget::text::Style {
            color: Some(palette::GRAY_400),
        });

    // Download actions are refused while a batch is running; on_press_maybe
    // keeps the buttons visible but inert so the refusal is discoverable.
    let downloads_enabled = !session.is_downloading_all();

    let download_current = button(
        Text::new(i18n.tr("gallery-download-current")).size(typography::CAPTION),
    )
    .padding(spacing::XS)
    .style(overlay_button_style)
    .on_press_maybe(downloads_enabled.then_some(Message::DownloadCurrentRequested));

    let count = session.len().to_string();
    let download_all = button(
        Text::new(i18n.tr_with_args("gallery-download-all", &[("count", count.as_str())]))
            .size(typography::CAPTION),
    )
    .padding(spacing::XS)
    .style(overlay_button_style)
    .on_press_maybe(downloads_enabled.then_some(Message::DownloadAllRequested));

    let close = button(Text::new("✕").size(typography::TITLE_MD))
        .padding(spacing::XS)
        .style(overlay_button_style)
        .on_press(Message::CloseRequested);

    let bar = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .push(title)
        .push(
            Container::new(page_label)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .push(download_current)
        .push(download_all)
        .push(close);

    let background = Container::new(bar)
        .width(Length::Fill)
        .style(|_theme: &Theme| iced::widget::container::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            })),
            ..Default::default()
        });

    // Swallow presses so a click on the bar never reaches the backdrop.
    Container::new(mouse_area(background).on_press(Message::HeaderPressed))
        .width(Length::Fill)
        .align_y(Vertical::Top)
        .into()
}

/// Translucent button style for controls drawn over the image.
fn overlay_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let bg_alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_MEDIUM,
        button::Status::Pressed => opacity::OVERLAY_SUBTLE,
        button::Status::Active | button::Status::Disabled => 0.0,
    };
    let text_color = match status {
        button::Status::Disabled => palette::GRAY_400,
        _ => palette::WHITE,
    };

    button::Style {
        background: Some(Background::Color(Color {
            a: bg_alpha,
            ..palette::BLACK
        })),
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: crate::ui::design_tokens::shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gallery::GalleryManifest;

    fn i18n() -> I18n {
        I18n::new(Some("ru".to_string()), &Config::default())
    }

    #[test]
    fn view_renders_open_session() {
        let mut state = State::default();
        let manifest = GalleryManifest::from_raw_images(vec![
            "a.jpg".to_string(),
            "b.jpg".to_string(),
        ]);
        state.open(manifest.into_session().unwrap(), None);

        let i18n = i18n();
        let _element = view(&state, &i18n);
        // Smoke test to ensure rendering succeeds.
    }

    #[test]
    fn view_renders_after_close() {
        let mut state = State::default();
        let manifest = GalleryManifest::from_raw_images(vec!["a.jpg".to_string()]);
        state.open(manifest.into_session().unwrap(), None);
        state.handle(Message::CloseRequested);

        let i18n = i18n();
        let _element = view(&state, &i18n);
    }

    #[test]
    fn shift_padding_moves_content_left_for_negative_x() {
        let padding = shift_padding(-30.0, 0.0);
        assert!(padding.right > padding.left);
    }
}
