use iced::Length;

use custody_ui::{
    component::{button, text},
    theme,
    widget::*,
};

use crate::{
    app::{
        saga::StepForm,
        view::{error_message, Message, WithdrawMessage},
    },
    store::selectors::WithdrawProps,
};

pub fn methods_view<'a>(props: &'a WithdrawProps, form: &'a StepForm) -> Element<'a, Message> {
    let currency = props.fiat_currency.unwrap_or_default();
    Column::new()
        .spacing(20)
        .push(
            text::p1_regular(format!(
                "Choose how to receive your {} withdrawal.",
                currency
            ))
            .style(theme::text::secondary),
        )
        .push(
            Container::new(
                Column::new()
                    .spacing(10)
                    .push(text::p1_bold("Bank transfer"))
                    .push(
                        text::p2_regular("Send funds to a bank account linked to your profile.")
                            .style(theme::text::secondary),
                    )
                    .push(
                        button::primary(None, "Use bank transfer")
                            .on_press_maybe(
                                (!form.processing).then_some(Message::Withdraw(
                                    WithdrawMessage::SelectBankTransfer,
                                )),
                            )
                            .width(Length::Fill),
                    ),
            )
            .padding(15)
            .style(theme::card::simple),
        )
        .push_maybe(error_message(form.error.as_ref()))
        .into()
}
