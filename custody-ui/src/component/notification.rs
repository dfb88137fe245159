use iced::Length;

use crate::{component::text, theme, widget::*};

pub fn error<'a, T: 'a>(message: String) -> Container<'a, T> {
    Container::new(text::p1_bold(message))
        .padding(15)
        .style(theme::card::error)
        .width(Length::Fill)
}

pub fn warning<'a, T: 'a>(title: String, detail: String) -> Container<'a, T> {
    Container::new(
        Column::new()
            .spacing(5)
            .push(text::p1_bold(title))
            .push(text::p2_regular(detail)),
    )
    .padding(15)
    .style(theme::card::warning)
    .width(Length::Fill)
}
