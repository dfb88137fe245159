use iced::Length;

use custody_ui::{
    component::{button, notification, text},
    theme,
    widget::*,
};

use crate::{
    app::{
        state::BROKERAGE_INELIGIBLE,
        view::{Message, WithdrawMessage},
    },
    store::{remote::RemoteData, selectors::WithdrawProps},
};

fn close_button<'a>() -> Button<'a, Message> {
    button::secondary(None, "Close")
        .on_press(Message::Withdraw(WithdrawMessage::Close))
        .width(Length::Fill)
}

pub fn ineligible_view<'a>() -> Element<'a, Message> {
    notification::error(BROKERAGE_INELIGIBLE.to_string()).into()
}

pub fn on_hold_view(props: &WithdrawProps) -> Element<'_, Message> {
    let currency = props.fiat_currency.unwrap_or_default();
    Column::new()
        .spacing(20)
        .push(notification::warning(
            "Your funds are on hold".to_string(),
            "Recent deposits are still settling and cannot be withdrawn yet.".to_string(),
        ))
        .push_maybe(match &props.balance {
            RemoteData::Success(balance) => Some(
                text::p1_regular(format!(
                    "On hold: {}{}",
                    currency.symbol(),
                    balance.total
                ))
                .style(theme::text::secondary),
            ),
            RemoteData::NotAsked | RemoteData::Loading | RemoteData::Failure(_) => None,
        })
        .push(close_button())
        .into()
}

pub fn rejected_view<'a>() -> Element<'a, Message> {
    Column::new()
        .spacing(20)
        .push(notification::error(
            "We could not verify your identity, withdrawals are unavailable.".to_string(),
        ))
        .push(
            text::p2_regular("Contact support to review your verification.")
                .style(theme::text::secondary),
        )
        .push(close_button())
        .into()
}
