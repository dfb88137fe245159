pub mod button;
pub mod flyout;
pub mod form;
pub mod notification;
pub mod text;

use iced::Length;

use crate::{theme, widget::*};

pub fn separation<'a, T: 'a>() -> Container<'a, T> {
    Container::new(Column::new())
        .style(theme::container::foreground)
        .width(Length::Fill)
        .height(Length::Fixed(1.0))
}
