use iced::widget::container::Style;
use iced::{Background, Border};

use super::palette::ContainerPalette;
use super::Theme;

fn card(palette: &ContainerPalette, radius: f32) -> Style {
    Style {
        background: Some(Background::Color(palette.background)),
        text_color: palette.text,
        border: if let Some(color) = palette.border {
            Border {
                radius: radius.into(),
                width: 1.0,
                color,
            }
        } else {
            Border {
                ..Default::default()
            }
        },
        ..Default::default()
    }
}

pub fn simple(theme: &Theme) -> Style {
    card(&theme.colors.cards.simple, 16.0)
}

/// Panel of a flyout, square on the screen edge side.
pub fn flyout(theme: &Theme) -> Style {
    card(&theme.colors.cards.flyout, 0.0)
}

pub fn selected(theme: &Theme) -> Style {
    card(&theme.colors.cards.selected, 16.0)
}

pub fn warning(theme: &Theme) -> Style {
    card(&theme.colors.cards.warning, 16.0)
}

pub fn error(theme: &Theme) -> Style {
    card(&theme.colors.cards.error, 16.0)
}
