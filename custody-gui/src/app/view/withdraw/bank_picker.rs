use iced::Length;

use custody_ui::{component::text, theme, widget::*};

use super::beneficiary_row;
use crate::{
    app::{
        saga::StepForm,
        view::{error_message, Message, WithdrawMessage},
    },
    store::{model::Beneficiary, remote::RemoteData, selectors::WithdrawProps},
};

pub fn bank_picker_view<'a>(props: &'a WithdrawProps, form: &'a StepForm) -> Element<'a, Message> {
    let list: Element<'a, Message> = match &props.beneficiaries {
        RemoteData::NotAsked | RemoteData::Loading => {
            text::p1_regular("Loading bank accounts...")
                .style(theme::text::secondary)
                .into()
        }
        RemoteData::Failure(e) => text::p1_regular(e).style(theme::text::error).into(),
        RemoteData::Success(beneficiaries) if beneficiaries.is_empty() => text::p1_regular(format!(
            "No {} bank account is linked to your profile yet.",
            props.fiat_currency.unwrap_or_default()
        ))
        .style(theme::text::secondary)
        .into(),
        RemoteData::Success(beneficiaries) => beneficiaries
            .iter()
            .fold(Column::new().spacing(10), |col, beneficiary| {
                let selected = props
                    .beneficiary
                    .as_ref()
                    .is_some_and(|b| b.id == beneficiary.id);
                col.push(beneficiary_button(beneficiary, selected))
            })
            .into(),
    };

    Column::new()
        .spacing(20)
        .push(list)
        .push_maybe(error_message(form.error.as_ref()))
        .into()
}

fn beneficiary_button(beneficiary: &Beneficiary, selected: bool) -> Button<'_, Message> {
    Button::new(
        Container::new(beneficiary_row(beneficiary))
            .padding(15)
            .width(Length::Fill)
            .style(if selected {
                theme::card::selected
            } else {
                theme::card::simple
            }),
    )
    .padding(0)
    .width(Length::Fill)
    .style(theme::button::transparent)
    .on_press(Message::Withdraw(WithdrawMessage::SelectBeneficiary(
        beneficiary.id.clone(),
    )))
}
