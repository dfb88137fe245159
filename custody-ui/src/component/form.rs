use iced::Length;

use crate::{component::text, theme, widget::*};

#[derive(Debug, Clone)]
pub struct Value<T> {
    pub value: T,
    pub valid: bool,
}

impl std::default::Default for Value<String> {
    fn default() -> Self {
        Self {
            value: "".to_string(),
            valid: true,
        }
    }
}

pub struct Form<'a, Message> {
    input: TextInput<'a, Message>,
    warning: Option<&'a str>,
    valid: bool,
}

impl<'a, Message: 'a> Form<'a, Message>
where
    Message: Clone,
{
    /// Creates a new [`Form`].
    ///
    /// It expects:
    /// - a placeholder
    /// - the current value
    /// - a function that produces a message when the [`Form`] changes
    pub fn new<F>(placeholder: &str, value: &Value<String>, on_change: F) -> Self
    where
        F: 'a + Fn(String) -> Message,
    {
        Self {
            input: TextInput::new(placeholder, &value.value).on_input(on_change),
            warning: None,
            valid: value.valid,
        }
    }

    /// Creates a new [`Form`] accepting only a fiat amount with at most two decimals.
    /// Rejected keystrokes keep the previous value.
    pub fn new_amount_fiat<F>(placeholder: &str, value: &'a Value<String>, on_change: F) -> Self
    where
        F: 'a + Fn(String) -> Message,
    {
        Self {
            input: TextInput::new(placeholder, &value.value).on_input(move |s| {
                if s.is_empty() || is_partial_fiat_amount(&s) {
                    on_change(s)
                } else {
                    on_change(value.value.clone())
                }
            }),
            warning: None,
            valid: value.valid,
        }
    }

    /// Sets the [`Form`] with a warning message
    pub fn maybe_warning(mut self, warning: Option<&'a str>) -> Self {
        self.warning = warning;
        self
    }

    /// Sets the padding of the [`Form`].
    pub fn padding(mut self, units: u16) -> Self {
        self.input = self.input.padding(units);
        self
    }

    /// Sets the [`Form`] text size.
    pub fn size(mut self, size: u16) -> Self {
        self.input = self.input.size(size);
        self
    }
}

impl<'a, Message: 'a + Clone> From<Form<'a, Message>> for Element<'a, Message> {
    fn from(form: Form<'a, Message>) -> Element<'a, Message> {
        Container::new(
            Column::new()
                .push(if !form.valid {
                    form.input.style(theme::text_input::invalid)
                } else {
                    form.input
                })
                .push_maybe(if !form.valid {
                    form.warning
                        .map(|message| text::caption(message).style(theme::text::error))
                } else {
                    None
                })
                .width(Length::Fill)
                .spacing(5),
        )
        .width(Length::Fill)
        .into()
    }
}

/// Digits with an optional dot followed by at most two digits.
fn is_partial_fiat_amount(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let units = parts.next().unwrap_or_default();
    let cents = parts.next();
    units.chars().all(|c| c.is_ascii_digit())
        && cents.map_or(true, |c| c.len() <= 2 && c.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::is_partial_fiat_amount;

    #[test]
    fn partial_fiat_amount() {
        assert!(is_partial_fiat_amount("12"));
        assert!(is_partial_fiat_amount("12."));
        assert!(is_partial_fiat_amount("12.3"));
        assert!(is_partial_fiat_amount("0.05"));
        assert!(is_partial_fiat_amount(".5"));
        assert!(!is_partial_fiat_amount("12.345"));
        assert!(!is_partial_fiat_amount("1,2"));
        assert!(!is_partial_fiat_amount("1.2.3"));
        assert!(!is_partial_fiat_amount("-3"));
    }
}
