//! Slide-in panel anchored to the right edge of the window.
use iced::widget::{container, mouse_area, opaque, Space};
use iced::Length;

use crate::{theme, widget::*};

pub const FLYOUT_WIDTH: f32 = 480.0;
pub const FLYOUT_PADDING: u16 = 30;

pub struct Flyout<'a, Message> {
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    is_open: bool,
    id: &'static str,
    on_close: Option<Message>,
}

impl<'a, Message: Clone + 'a> Flyout<'a, Message> {
    /// Returns a new [`Flyout`] laying `content` over `base`.
    ///
    /// `id` is set on the panel container so the panel can be located by
    /// automated UI tests.
    pub fn new(
        base: impl Into<Element<'a, Message>>,
        content: impl Into<Element<'a, Message>>,
        id: &'static str,
    ) -> Self {
        Self {
            base: base.into(),
            content: content.into(),
            is_open: false,
            id,
            on_close: None,
        }
    }

    /// A closed flyout renders its base alone, the panel leaves the screen
    /// without exit animation.
    pub fn is_open(self, is_open: bool) -> Self {
        Self { is_open, ..self }
    }

    /// Message produced when the backdrop is pressed.
    pub fn on_close(self, on_close: Option<Message>) -> Self {
        Self { on_close, ..self }
    }
}

impl<'a, Message: Clone + 'a> From<Flyout<'a, Message>> for Element<'a, Message> {
    fn from(flyout: Flyout<'a, Message>) -> Element<'a, Message> {
        // A closed flyout keeps nothing on screen but the base.
        if !flyout.is_open {
            return flyout.base;
        }

        let panel = Container::new(flyout.content)
            .id(container::Id::new(flyout.id))
            .width(Length::Fixed(FLYOUT_WIDTH))
            .height(Length::Fill)
            .padding(FLYOUT_PADDING)
            .style(theme::card::flyout);

        let backdrop = mouse_area(
            Container::new(Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(theme::container::backdrop),
        );
        let backdrop = match flyout.on_close {
            Some(message) => backdrop.on_press(message),
            None => backdrop,
        };

        Stack::new()
            .push(flyout.base)
            .push(opaque(Row::new().push(backdrop).push(opaque(panel))))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
