use iced::{widget::Space, Alignment, Length};

use custody_ui::{
    component::{button, notification, separation, text},
    theme,
    widget::*,
};

use super::{warning_title, Message};
use crate::{
    app::error::Error,
    store::{
        model::{FiatBalance, FiatCurrency, WithdrawResponse},
        remote::RemoteData,
    },
};

pub fn home_view<'a>(
    currency: FiatCurrency,
    balance: &'a RemoteData<FiatBalance, String>,
    last_withdrawal: Option<&'a WithdrawResponse>,
    warning: Option<&'a Error>,
) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(20)
            .max_width(800.0)
            .push_maybe(
                warning.map(|e| notification::warning(warning_title(e).to_string(), e.to_string())),
            )
            .push(text::h2(format!("{} account", currency)))
            .push(balance_card(currency, balance))
            .push_maybe(last_withdrawal.map(withdrawal_card)),
    )
    .padding(40)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}

fn balance_card<'a>(
    currency: FiatCurrency,
    balance: &'a RemoteData<FiatBalance, String>,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match balance {
        RemoteData::NotAsked => Column::new()
            .spacing(10)
            .push(text::p1_regular("Custodial balance"))
            .push(text::p2_regular("Open a withdrawal to load your balance.").style(theme::text::secondary))
            .into(),
        RemoteData::Loading => text::p1_regular("Loading balance...")
            .style(theme::text::secondary)
            .into(),
        RemoteData::Failure(e) => text::p1_regular(e).style(theme::text::error).into(),
        RemoteData::Success(balance) => Column::new()
            .spacing(10)
            .push(text::p1_regular("Custodial balance").style(theme::text::secondary))
            .push(text::h3(format!(
                "{}{}",
                currency.symbol(),
                balance.total
            )))
            .push(
                text::p2_regular(format!(
                    "Available to withdraw: {}{}",
                    currency.symbol(),
                    balance.withdrawable
                ))
                .style(theme::text::secondary),
            )
            .into(),
    };
    Container::new(
        Row::new()
            .align_y(Alignment::Center)
            .push(Container::new(content).width(Length::Fill))
            .push(
                button::primary(None, "Withdraw")
                    .on_press(Message::OpenWithdraw)
                    .width(Length::Fixed(150.0)),
            ),
    )
    .padding(20)
    .style(theme::card::simple)
    .into()
}

fn withdrawal_card(withdrawal: &WithdrawResponse) -> Element<'_, Message> {
    Container::new(
        Column::new()
            .spacing(10)
            .push(text::p1_bold("Last withdrawal"))
            .push(separation())
            .push(
                Row::new()
                    .push(text::p1_regular(format!(
                        "{}{}",
                        withdrawal.currency.symbol(),
                        withdrawal.amount
                    )))
                    .push(Space::with_width(Length::Fill))
                    .push(text::p2_regular(format!("{:?}", withdrawal.state)).style(theme::text::secondary)),
            )
            .push(
                text::caption(withdrawal.created_at.format("%Y-%m-%d %H:%M UTC"))
                    .style(theme::text::secondary),
            ),
    )
    .padding(20)
    .style(theme::card::simple)
    .into()
}
