mod withdraw;

use custody_ui::widget::Element;

use super::{error::Error, view};
use crate::store::{
    model::{FiatBalance, FiatCurrency, WithdrawResponse},
    remote::RemoteData,
    RootState,
};

pub use withdraw::{
    dispatch, FlyoutFrame, StepView, Visibility, WithdrawFlow, BROKERAGE_INELIGIBLE,
};

pub trait State {
    fn view(&self) -> Element<'_, view::Message>;
    /// Called with the new state after every store change.
    fn reload(&mut self, _state: &RootState) {}
}

/// Screen lying under the modals: custodial balance and last withdrawal.
pub struct Home {
    currency: FiatCurrency,
    balance: RemoteData<FiatBalance, String>,
    last_withdrawal: Option<WithdrawResponse>,
    warning: Option<Error>,
}

impl Home {
    pub fn new(currency: FiatCurrency) -> Self {
        Self {
            currency,
            balance: RemoteData::NotAsked,
            last_withdrawal: None,
            warning: None,
        }
    }

    pub fn warning(&self) -> Option<&Error> {
        self.warning.as_ref()
    }

    pub fn set_warning(&mut self, warning: Option<Error>) {
        self.warning = warning;
    }
}

impl State for Home {
    fn view(&self) -> Element<'_, view::Message> {
        view::home::home_view(
            self.currency,
            &self.balance,
            self.last_withdrawal.as_ref(),
            self.warning.as_ref(),
        )
    }

    fn reload(&mut self, state: &RootState) {
        self.balance = state.brokerage.balance.clone();
        if let Some(withdrawal) = &state.withdraw.withdrawal {
            self.last_withdrawal = Some(withdrawal.clone());
        }
    }
}
