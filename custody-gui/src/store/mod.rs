//! Global application state.
//!
//! A single [`RootState`] is mutated only through [`Store::dispatch`], which
//! runs the pure [`reduce`] function and notifies every subscriber.
pub mod model;
pub mod remote;
pub mod selectors;

use tokio::sync::watch;

use model::{Beneficiary, FiatBalance, FiatCurrency, UserData, WithdrawResponse, WithdrawStep};
use remote::RemoteData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalName {
    CustodyWithdraw,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootState {
    pub profile: ProfileState,
    pub brokerage: BrokerageState,
    pub withdraw: WithdrawState,
    /// Open modals, the last one being on top.
    pub modals: Vec<ModalName>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub user_data: RemoteData<UserData, String>,
}

/// Custodial account of the selected fiat currency.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrokerageState {
    pub balance: RemoteData<FiatBalance, String>,
    pub beneficiaries: RemoteData<Vec<Beneficiary>, String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithdrawState {
    pub step: WithdrawStep,
    pub amount: Option<String>,
    pub beneficiary: Option<Beneficiary>,
    pub fiat_currency: Option<FiatCurrency>,
    pub withdrawal: Option<WithdrawResponse>,
}

/// A step together with the fields that step needs.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPayload {
    Loading,
    EnterAmount {
        fiat_currency: FiatCurrency,
        beneficiary: Option<Beneficiary>,
    },
    WithdrawalMethods {
        fiat_currency: FiatCurrency,
    },
    BankPicker {
        fiat_currency: FiatCurrency,
    },
    ConfirmWithdraw {
        amount: String,
        beneficiary: Beneficiary,
        fiat_currency: FiatCurrency,
    },
    WithdrawalDetails {
        withdrawal: WithdrawResponse,
    },
    Ineligible,
    OnHold,
}

impl StepPayload {
    pub fn step(&self) -> WithdrawStep {
        match self {
            Self::Loading => WithdrawStep::Loading,
            Self::EnterAmount { .. } => WithdrawStep::EnterAmount,
            Self::WithdrawalMethods { .. } => WithdrawStep::WithdrawalMethods,
            Self::BankPicker { .. } => WithdrawStep::BankPicker,
            Self::ConfirmWithdraw { .. } => WithdrawStep::ConfirmWithdraw,
            Self::WithdrawalDetails { .. } => WithdrawStep::WithdrawalDetails,
            Self::Ineligible => WithdrawStep::Ineligible,
            Self::OnHold => WithdrawStep::OnHold,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Profile(ProfileAction),
    Brokerage(BrokerageAction),
    Withdraw(WithdrawAction),
    Modals(ModalsAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    SetUserData(RemoteData<UserData, String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrokerageAction {
    SetBalance(RemoteData<FiatBalance, String>),
    SetBeneficiaries(RemoteData<Vec<Beneficiary>, String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WithdrawAction {
    ShowModal { fiat_currency: FiatCurrency },
    SetStep(StepPayload),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalsAction {
    Open(ModalName),
    Close(ModalName),
}

pub fn reduce(state: &mut RootState, action: Action) {
    match action {
        Action::Profile(ProfileAction::SetUserData(data)) => {
            state.profile.user_data = data;
        }
        Action::Brokerage(BrokerageAction::SetBalance(balance)) => {
            state.brokerage.balance = balance;
        }
        Action::Brokerage(BrokerageAction::SetBeneficiaries(beneficiaries)) => {
            state.brokerage.beneficiaries = beneficiaries;
        }
        Action::Withdraw(action) => reduce_withdraw(&mut state.withdraw, action),
        Action::Modals(ModalsAction::Open(name)) => {
            state.modals.push(name);
        }
        Action::Modals(ModalsAction::Close(name)) => {
            if let Some(i) = state.modals.iter().rposition(|m| *m == name) {
                state.modals.remove(i);
            }
            if name == ModalName::CustodyWithdraw && !state.modals.contains(&name) {
                reduce_withdraw(&mut state.withdraw, WithdrawAction::Reset);
            }
        }
    }
}

fn reduce_withdraw(state: &mut WithdrawState, action: WithdrawAction) {
    match action {
        WithdrawAction::ShowModal { fiat_currency } => {
            *state = WithdrawState {
                step: WithdrawStep::Loading,
                fiat_currency: Some(fiat_currency),
                ..Default::default()
            };
        }
        WithdrawAction::Reset => *state = WithdrawState::default(),
        WithdrawAction::SetStep(payload) => {
            state.step = payload.step();
            match payload {
                StepPayload::Loading | StepPayload::Ineligible | StepPayload::OnHold => {}
                StepPayload::EnterAmount {
                    fiat_currency,
                    beneficiary,
                } => {
                    state.fiat_currency = Some(fiat_currency);
                    state.beneficiary = beneficiary;
                }
                StepPayload::WithdrawalMethods { fiat_currency }
                | StepPayload::BankPicker { fiat_currency } => {
                    state.fiat_currency = Some(fiat_currency);
                }
                StepPayload::ConfirmWithdraw {
                    amount,
                    beneficiary,
                    fiat_currency,
                } => {
                    state.amount = Some(amount);
                    state.beneficiary = Some(beneficiary);
                    state.fiat_currency = Some(fiat_currency);
                }
                StepPayload::WithdrawalDetails { withdrawal } => {
                    state.withdrawal = Some(withdrawal);
                }
            }
        }
    }
}

/// Read-only access to the store: a snapshot of the current state and a
/// receiver notified after every change.
pub trait SnapshotProvider: Send + Sync {
    fn snapshot(&self) -> RootState;
    fn subscribe(&self) -> watch::Receiver<RootState>;
}

pub struct Store {
    sender: watch::Sender<RootState>,
}

impl Store {
    pub fn new(state: RootState) -> Self {
        let (sender, _) = watch::channel(state);
        Self { sender }
    }

    pub fn dispatch(&self, action: Action) {
        tracing::debug!("Dispatching {:?}", action);
        self.sender.send_modify(|state| reduce(state, action));
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(RootState::default())
    }
}

impl SnapshotProvider for Store {
    fn snapshot(&self) -> RootState {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<RootState> {
        self.sender.subscribe()
    }
}
