use iced::Length;

use custody_ui::{component::text, theme, widget::*};

use crate::app::view::Message;

pub fn loading_view<'a>() -> Element<'a, Message> {
    Container::new(text::p1_regular("Loading...").style(theme::text::secondary))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(200.0))
        .into()
}
