mod bank_picker;
mod confirm;
mod details;
mod enter_amount;
mod loading;
mod methods;
mod status;

use iced::{widget::Space, Alignment, Length};

use custody_ui::{
    component::{button, flyout::Flyout, text},
    widget::*,
};

use super::{Message, WithdrawMessage};
use crate::{
    app::{
        saga::StepForm,
        state::{FlyoutFrame, StepView},
    },
    store::{model::Beneficiary, selectors::WithdrawProps},
};

/// Lays the flyout holding the step view of `frame` over `base`.
pub fn flyout<'a>(
    base: Element<'a, Message>,
    frame: FlyoutFrame,
    props: &'a WithdrawProps,
    form: &'a StepForm,
) -> Element<'a, Message> {
    let close = frame
        .child
        .closable()
        .then_some(Message::Withdraw(WithdrawMessage::Close));

    let content = match frame.child {
        StepView::Loading => loading::loading_view(),
        StepView::EnterAmount => enter_amount::enter_amount_view(props, form),
        StepView::WithdrawalMethods => methods::methods_view(props, form),
        StepView::BankPicker => bank_picker::bank_picker_view(props, form),
        StepView::ConfirmWithdraw => confirm::confirm_view(props, form),
        StepView::WithdrawalDetails => details::details_view(props),
        StepView::Ineligible => status::ineligible_view(),
        StepView::OnHold => status::on_hold_view(props),
        StepView::Rejected => status::rejected_view(),
    };

    Flyout::new(
        base,
        Column::new()
            .spacing(30)
            .push(header(frame.child, props, close.clone()))
            .push(content),
        frame.tag,
    )
    .is_open(frame.is_open)
    .on_close(close)
    .into()
}

fn title(child: StepView) -> &'static str {
    match child {
        StepView::Loading
        | StepView::EnterAmount
        | StepView::Ineligible => "Withdraw",
        StepView::WithdrawalMethods => "Withdrawal method",
        StepView::BankPicker => "Select a bank account",
        StepView::ConfirmWithdraw => "Confirm withdrawal",
        StepView::WithdrawalDetails => "Withdrawal submitted",
        StepView::OnHold => "Funds on hold",
        StepView::Rejected => "Verification failed",
    }
}

fn header<'a>(
    child: StepView,
    props: &WithdrawProps,
    close: Option<Message>,
) -> Row<'a, Message> {
    let back = match child {
        StepView::BankPicker | StepView::ConfirmWithdraw => true,
        StepView::WithdrawalMethods => props.beneficiary.is_some(),
        StepView::Loading
        | StepView::EnterAmount
        | StepView::WithdrawalDetails
        | StepView::Ineligible
        | StepView::OnHold
        | StepView::Rejected => false,
    };
    Row::new()
        .align_y(Alignment::Center)
        .spacing(10)
        .push_maybe(back.then(|| {
            button::transparent(None, "Back")
                .on_press(Message::Withdraw(WithdrawMessage::Back))
                .width(Length::Fixed(80.0))
        }))
        .push(text::h3(title(child)))
        .push(Space::with_width(Length::Fill))
        .push_maybe(close.map(|message| {
            button::transparent(None, "Close")
                .on_press(message)
                .width(Length::Fixed(80.0))
        }))
}

fn beneficiary_row<'a>(beneficiary: &'a Beneficiary) -> Column<'a, Message> {
    Column::new()
        .spacing(5)
        .push(text::p1_bold(&beneficiary.name))
        .push(text::p2_regular(&beneficiary.agent_account))
}
