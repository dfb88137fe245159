use super::{
    model::{Beneficiary, FiatBalance, FiatCurrency, UserData, WithdrawResponse, WithdrawStep},
    remote::RemoteData,
    RootState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawData {
    pub user_data: UserData,
}

/// Everything the withdraw flow reads from the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithdrawProps {
    pub data: RemoteData<WithdrawData, String>,
    pub step: WithdrawStep,
    pub amount: Option<String>,
    pub beneficiary: Option<Beneficiary>,
    pub fiat_currency: Option<FiatCurrency>,
    pub withdrawal: Option<WithdrawResponse>,
    pub balance: RemoteData<FiatBalance, String>,
    pub beneficiaries: RemoteData<Vec<Beneficiary>, String>,
}

pub fn get_data(state: &RootState) -> RemoteData<WithdrawData, String> {
    state
        .profile
        .user_data
        .clone()
        .map(|user_data| WithdrawData { user_data })
}

pub fn select_withdraw_props(state: &RootState) -> WithdrawProps {
    WithdrawProps {
        data: get_data(state),
        step: state.withdraw.step,
        amount: state.withdraw.amount.clone(),
        beneficiary: state.withdraw.beneficiary.clone(),
        fiat_currency: state.withdraw.fiat_currency,
        withdrawal: state.withdraw.withdrawal.clone(),
        balance: state.brokerage.balance.clone(),
        beneficiaries: state.brokerage.beneficiaries.clone(),
    }
}
