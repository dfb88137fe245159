use iced::{widget::Space, Length};

use custody_ui::{
    component::{button, separation, text},
    theme,
    widget::*,
};

use super::beneficiary_row;
use crate::{
    app::{
        saga::StepForm,
        view::{error_message, Message, WithdrawMessage},
    },
    store::selectors::WithdrawProps,
};

fn line<'a>(label: &'static str, value: String) -> Row<'a, Message> {
    Row::new()
        .push(text::p1_regular(label).style(theme::text::secondary))
        .push(Space::with_width(Length::Fill))
        .push(text::p1_bold(value))
}

pub fn confirm_view<'a>(props: &'a WithdrawProps, form: &'a StepForm) -> Element<'a, Message> {
    let currency = props.fiat_currency.unwrap_or_default();
    let amount = props.amount.as_deref().unwrap_or_default();
    Column::new()
        .spacing(20)
        .push(
            Container::new(
                Column::new()
                    .spacing(15)
                    .push(line("Amount", format!("{}{}", currency.symbol(), amount)))
                    .push(line("Currency", currency.to_string()))
                    .push(separation())
                    .push(text::p1_regular("To").style(theme::text::secondary))
                    .push_maybe(props.beneficiary.as_ref().map(beneficiary_row)),
            )
            .padding(15)
            .style(theme::card::simple),
        )
        .push(
            text::caption("Withdrawals usually reach your bank within one business day.")
                .style(theme::text::secondary),
        )
        .push_maybe(error_message(form.error.as_ref()))
        .push(
            button::primary(None, if form.processing { "Withdrawing..." } else { "Confirm" })
                .on_press_maybe(
                    (!form.processing).then_some(Message::Withdraw(WithdrawMessage::Confirm)),
                )
                .width(Length::Fill),
        )
        .into()
}
