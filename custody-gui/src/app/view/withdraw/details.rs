use iced::{widget::Space, Length};

use custody_ui::{
    component::{button, text},
    theme,
    widget::*,
};

use crate::{
    app::view::{Message, WithdrawMessage},
    store::{model::WithdrawalState, selectors::WithdrawProps},
};

pub fn details_view(props: &WithdrawProps) -> Element<'_, Message> {
    let Some(withdrawal) = &props.withdrawal else {
        return text::p1_regular("No withdrawal to show.")
            .style(theme::text::secondary)
            .into();
    };
    let status = match withdrawal.state {
        WithdrawalState::Pending => text::p1_bold("Pending").style(theme::text::warning),
        WithdrawalState::Complete => text::p1_bold("Complete").style(theme::text::success),
        WithdrawalState::Failed => text::p1_bold("Failed").style(theme::text::error),
    };
    Column::new()
        .spacing(20)
        .push(text::h2(format!(
            "{}{}",
            withdrawal.currency.symbol(),
            withdrawal.amount
        )))
        .push(
            Row::new()
                .push(text::p1_regular("Status").style(theme::text::secondary))
                .push(Space::with_width(Length::Fill))
                .push(status),
        )
        .push(
            Row::new()
                .push(text::p1_regular("Reference").style(theme::text::secondary))
                .push(Space::with_width(Length::Fill))
                .push(text::p2_regular(&withdrawal.id)),
        )
        .push(
            Row::new()
                .push(text::p1_regular("Created").style(theme::text::secondary))
                .push(Space::with_width(Length::Fill))
                .push(text::p2_regular(
                    withdrawal.created_at.format("%Y-%m-%d %H:%M UTC"),
                )),
        )
        .push(
            button::primary(None, "Done")
                .on_press(Message::Withdraw(WithdrawMessage::Close))
                .width(Length::Fill),
        )
        .into()
}
