use iced::{Alignment, Length};

use custody_ui::{
    component::{button, form::Form, text},
    theme,
    widget::*,
};

use super::beneficiary_row;
use crate::{
    app::{
        saga::StepForm,
        view::{error_message, Message, WithdrawMessage},
    },
    store::{remote::RemoteData, selectors::WithdrawProps},
};

pub fn enter_amount_view<'a>(props: &'a WithdrawProps, form: &'a StepForm) -> Element<'a, Message> {
    let currency = props.fiat_currency.unwrap_or_default();
    let available = match &props.balance {
        RemoteData::Success(balance) => text::p2_regular(format!(
            "Available to withdraw: {}{}",
            currency.symbol(),
            balance.withdrawable
        )),
        RemoteData::NotAsked | RemoteData::Loading => text::p2_regular("Loading balance..."),
        RemoteData::Failure(e) => text::p2_regular(e),
    }
    .style(theme::text::secondary);

    let bank: Element<'a, Message> = match &props.beneficiary {
        Some(beneficiary) => Row::new()
            .align_y(Alignment::Center)
            .push(beneficiary_row(beneficiary).width(Length::Fill))
            .push(
                button::secondary(None, "Change")
                    .on_press(Message::Withdraw(WithdrawMessage::ChangeBankAccount))
                    .width(Length::Fixed(100.0)),
            )
            .into(),
        None => button::secondary(None, "Add a bank account")
            .on_press(Message::Withdraw(WithdrawMessage::AddBankAccount))
            .width(Length::Fill)
            .into(),
    };

    Column::new()
        .spacing(20)
        .push(text::p1_bold(format!("Amount ({})", currency)))
        .push(
            Row::new()
                .spacing(10)
                .align_y(Alignment::Center)
                .push(
                    Form::new_amount_fiat("0.00", &form.amount, |amount| {
                        Message::Withdraw(WithdrawMessage::AmountEdited(amount))
                    })
                    .maybe_warning(form.error.as_deref())
                    .size(text::P1_SIZE)
                    .padding(10),
                )
                .push(
                    button::secondary(None, "Max")
                        .on_press(Message::Withdraw(WithdrawMessage::UseMax))
                        .width(Length::Fixed(80.0)),
                ),
        )
        .push(available)
        .push(text::p1_bold("To"))
        .push(
            Container::new(bank)
                .padding(15)
                .style(theme::card::simple),
        )
        .push_maybe(if form.amount.valid {
            error_message(form.error.as_ref())
        } else {
            None
        })
        .push(
            button::primary(None, "Continue")
                .on_press_maybe(
                    (!form.processing && !form.amount.value.is_empty())
                        .then_some(Message::Withdraw(WithdrawMessage::Continue)),
                )
                .width(Length::Fill),
        )
        .into()
}
