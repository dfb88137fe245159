//! Moves the withdraw flow from step to step in reaction to user input,
//! fetching what each step needs from the custody backend.
use std::future::Future;
use std::sync::Arc;

use custody_ui::component::form;
use iced::{task, Task};

use super::{
    backend::CustodyBackend,
    error::Error,
    message::Message,
    view::WithdrawMessage,
};
use crate::store::{
    model::{Beneficiary, FiatAmount, FiatBalance, FiatCurrency},
    remote::RemoteData,
    Action, BrokerageAction, ProfileAction, SnapshotProvider, StepPayload, Store,
    WithdrawAction,
};

/// Input state of the step views.
#[derive(Debug, Default)]
pub struct StepForm {
    pub amount: form::Value<String>,
    pub error: Option<String>,
    pub processing: bool,
}

/// Drives one opened flyout. Backend calls still running when it is dropped
/// are aborted.
pub struct WithdrawSaga {
    id: u64,
    tasks: Vec<task::Handle>,
    store: Arc<Store>,
    backend: Arc<dyn CustodyBackend>,
    currency: FiatCurrency,
    form: StepForm,
}

impl WithdrawSaga {
    pub fn new(
        id: u64,
        store: Arc<Store>,
        backend: Arc<dyn CustodyBackend>,
        currency: FiatCurrency,
    ) -> Self {
        Self {
            id,
            tasks: Vec::new(),
            store,
            backend,
            currency,
            form: StepForm::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn form(&self) -> &StepForm {
        &self.form
    }

    fn run(
        &mut self,
        future: impl Future<Output = Result<(), Error>> + Send + 'static,
    ) -> Task<Message> {
        let id = self.id;
        let (task, handle) =
            Task::perform(future, move |res| Message::Withdraw(id, res)).abortable();
        self.tasks.push(handle.abort_on_drop());
        task
    }

    pub fn start(&mut self) -> Task<Message> {
        self.form.processing = true;
        let future = open_withdraw(self.store.clone(), self.backend.clone(), self.currency);
        self.run(future)
    }

    pub fn on_result(&mut self, res: Result<(), Error>) {
        self.form.processing = false;
        if let Err(e) = res {
            tracing::error!("Withdraw flow: {}", e);
            self.form.error = Some(e.to_string());
        }
    }

    pub fn update(&mut self, message: WithdrawMessage) -> Task<Message> {
        self.form.error = None;
        match message {
            WithdrawMessage::Close => {}
            WithdrawMessage::AmountEdited(amount) => {
                self.form.amount.valid = true;
                self.form.amount.value = amount;
            }
            WithdrawMessage::UseMax => {
                if let RemoteData::Success(balance) = self.store.snapshot().brokerage.balance {
                    self.form.amount.valid = true;
                    self.form.amount.value = balance.withdrawable.to_string();
                }
            }
            WithdrawMessage::Continue => {
                if let Err(e) = submit_amount(&self.store, &self.form.amount.value) {
                    self.form.amount.valid = false;
                    self.form.error = Some(e.to_string());
                }
            }
            WithdrawMessage::ChangeBankAccount | WithdrawMessage::SelectBankTransfer => {
                self.form.processing = true;
                let future =
                    show_bank_picker(self.store.clone(), self.backend.clone(), self.currency);
                return self.run(future);
            }
            WithdrawMessage::AddBankAccount => {
                self.store
                    .dispatch(Action::Withdraw(WithdrawAction::SetStep(
                        StepPayload::WithdrawalMethods {
                            fiat_currency: self.currency,
                        },
                    )));
            }
            WithdrawMessage::SelectBeneficiary(id) => {
                if let Err(e) = select_beneficiary(&self.store, self.currency, &id) {
                    self.form.error = Some(e.to_string());
                }
            }
            WithdrawMessage::Back => back_to_amount(&self.store, self.currency),
            WithdrawMessage::Confirm => {
                if self.form.processing {
                    return Task::none();
                }
                self.form.processing = true;
                let future = confirm_withdraw(self.store.clone(), self.backend.clone());
                return self.run(future);
            }
        }
        Task::none()
    }
}

fn set_step(store: &Store, payload: StepPayload) {
    store.dispatch(Action::Withdraw(WithdrawAction::SetStep(payload)));
}

async fn load_balance(
    store: &Store,
    backend: &dyn CustodyBackend,
    currency: FiatCurrency,
) -> Result<FiatBalance, Error> {
    let res = backend.balance(currency).await;
    store.dispatch(Action::Brokerage(BrokerageAction::SetBalance(
        res.clone().map_err(|e| e.to_string()).into(),
    )));
    Ok(res?)
}

async fn load_beneficiaries(
    store: &Store,
    backend: &dyn CustodyBackend,
    currency: FiatCurrency,
) -> Result<Vec<Beneficiary>, Error> {
    store.dispatch(Action::Brokerage(BrokerageAction::SetBeneficiaries(
        RemoteData::Loading,
    )));
    let res = backend.beneficiaries(currency).await;
    store.dispatch(Action::Brokerage(BrokerageAction::SetBeneficiaries(
        res.clone().map_err(|e| e.to_string()).into(),
    )));
    Ok(res?)
}

/// Fetches the user profile, then routes to the first step the user can act on.
pub async fn open_withdraw(
    store: Arc<Store>,
    backend: Arc<dyn CustodyBackend>,
    currency: FiatCurrency,
) -> Result<(), Error> {
    set_step(&store, StepPayload::Loading);
    store.dispatch(Action::Profile(ProfileAction::SetUserData(
        RemoteData::Loading,
    )));
    let user_data = backend.user_data().await;
    store.dispatch(Action::Profile(ProfileAction::SetUserData(
        user_data.clone().map_err(|e| e.to_string()).into(),
    )));
    user_data?;

    if !backend.is_eligible(currency).await? {
        tracing::info!("User is not eligible to withdraw {}", currency);
        set_step(&store, StepPayload::Ineligible);
        return Ok(());
    }

    let balance = load_balance(&store, backend.as_ref(), currency).await?;
    if balance.is_on_hold() {
        tracing::info!("{} balance is on hold", currency);
        set_step(&store, StepPayload::OnHold);
        return Ok(());
    }

    let beneficiaries = load_beneficiaries(&store, backend.as_ref(), currency).await?;
    match beneficiaries.into_iter().next() {
        Some(beneficiary) => set_step(
            &store,
            StepPayload::EnterAmount {
                fiat_currency: currency,
                beneficiary: Some(beneficiary),
            },
        ),
        None => set_step(
            &store,
            StepPayload::WithdrawalMethods {
                fiat_currency: currency,
            },
        ),
    }
    Ok(())
}

pub async fn show_bank_picker(
    store: Arc<Store>,
    backend: Arc<dyn CustodyBackend>,
    currency: FiatCurrency,
) -> Result<(), Error> {
    set_step(
        &store,
        StepPayload::BankPicker {
            fiat_currency: currency,
        },
    );
    load_beneficiaries(&store, backend.as_ref(), currency).await?;
    Ok(())
}

/// Validates the entered amount against the withdrawable balance and moves
/// to the confirmation.
pub fn submit_amount(store: &Store, amount: &str) -> Result<(), Error> {
    let state = store.snapshot();
    let amount: FiatAmount = amount.parse()?;
    let currency = state.withdraw.fiat_currency.ok_or(Error::Missing("currency"))?;
    let beneficiary = state
        .withdraw
        .beneficiary
        .ok_or(Error::Missing("bank account"))?;
    let RemoteData::Success(balance) = state.brokerage.balance else {
        return Err(Error::Missing("balance"));
    };
    if amount > balance.withdrawable {
        return Err(Error::InsufficientFunds(format!(
            "{} {}",
            balance.withdrawable, currency
        )));
    }
    set_step(
        store,
        StepPayload::ConfirmWithdraw {
            amount: amount.to_string(),
            beneficiary,
            fiat_currency: currency,
        },
    );
    Ok(())
}

pub fn select_beneficiary(store: &Store, currency: FiatCurrency, id: &str) -> Result<(), Error> {
    let RemoteData::Success(beneficiaries) = store.snapshot().brokerage.beneficiaries else {
        return Err(Error::UnknownBeneficiary(id.to_string()));
    };
    let beneficiary = beneficiaries
        .into_iter()
        .find(|b| b.id == id)
        .ok_or_else(|| Error::UnknownBeneficiary(id.to_string()))?;
    set_step(
        store,
        StepPayload::EnterAmount {
            fiat_currency: currency,
            beneficiary: Some(beneficiary),
        },
    );
    Ok(())
}

pub fn back_to_amount(store: &Store, currency: FiatCurrency) {
    let beneficiary = store.snapshot().withdraw.beneficiary;
    set_step(
        store,
        StepPayload::EnterAmount {
            fiat_currency: currency,
            beneficiary,
        },
    );
}

pub async fn confirm_withdraw(
    store: Arc<Store>,
    backend: Arc<dyn CustodyBackend>,
) -> Result<(), Error> {
    let state = store.snapshot().withdraw;
    let amount_str = state.amount.ok_or(Error::Missing("amount"))?;
    let amount: FiatAmount = amount_str.parse()?;
    let beneficiary = state.beneficiary.ok_or(Error::Missing("bank account"))?;
    let currency = state.fiat_currency.ok_or(Error::Missing("currency"))?;

    set_step(&store, StepPayload::Loading);
    match backend.withdraw(amount, &beneficiary, currency).await {
        Ok(withdrawal) => {
            set_step(&store, StepPayload::WithdrawalDetails { withdrawal });
            if let Err(e) = load_balance(&store, backend.as_ref(), currency).await {
                tracing::warn!("Failed to refresh balance after withdrawal: {}", e);
            }
            Ok(())
        }
        Err(e) => {
            set_step(
                &store,
                StepPayload::ConfirmWithdraw {
                    amount: amount_str,
                    beneficiary,
                    fiat_currency: currency,
                },
            );
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{
        backend::{
            mock::{Failing, FailingBackend},
            BackendError, DemoBackend,
        },
        config::CustodyConfig,
    };
    use crate::store::model::{KycState, WithdrawStep, WithdrawalState};

    fn backend(config: CustodyConfig) -> Arc<dyn CustodyBackend> {
        Arc::new(DemoBackend::new(CustodyConfig {
            latency_ms: 0,
            ..config
        }))
    }

    async fn opened(config: CustodyConfig) -> (Arc<Store>, Arc<dyn CustodyBackend>) {
        let store = Arc::new(Store::default());
        let backend = backend(config);
        open_withdraw(store.clone(), backend.clone(), FiatCurrency::EUR)
            .await
            .unwrap();
        (store, backend)
    }

    fn failing(failing: Failing) -> Arc<dyn CustodyBackend> {
        Arc::new(FailingBackend::new(
            CustodyConfig {
                latency_ms: 0,
                ..Default::default()
            },
            failing,
        ))
    }

    fn unavailable() -> Error {
        Error::Backend(BackendError::Request("service unavailable".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn failed_profile_fetch() {
        let store = Arc::new(Store::default());
        let res = open_withdraw(store.clone(), failing(Failing::UserData), FiatCurrency::EUR).await;
        assert_eq!(res, Err(unavailable()));

        let state = store.snapshot();
        assert_eq!(
            state.profile.user_data,
            RemoteData::Failure(unavailable().to_string())
        );
        assert_eq!(state.withdraw.step, WithdrawStep::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_balance_fetch() {
        let store = Arc::new(Store::default());
        let res = open_withdraw(store.clone(), failing(Failing::Balance), FiatCurrency::EUR).await;
        assert_eq!(res, Err(unavailable()));

        let state = store.snapshot();
        assert!(state.profile.user_data.is_success());
        assert!(matches!(state.brokerage.balance, RemoteData::Failure(_)));
        assert_eq!(state.withdraw.step, WithdrawStep::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_withdrawal_goes_back_to_confirmation() {
        let store = Arc::new(Store::default());
        let backend = failing(Failing::Withdraw);
        open_withdraw(store.clone(), backend.clone(), FiatCurrency::EUR)
            .await
            .unwrap();
        submit_amount(&store, "500").unwrap();

        let res = confirm_withdraw(store.clone(), backend).await;
        assert_eq!(res, Err(unavailable()));

        let state = store.snapshot();
        assert_eq!(state.withdraw.step, WithdrawStep::ConfirmWithdraw);
        assert_eq!(state.withdraw.amount.as_deref(), Some("500.00"));
        assert_eq!(state.withdraw.withdrawal, None);
        match state.brokerage.balance {
            RemoteData::Success(balance) => {
                assert_eq!(balance.withdrawable, FiatAmount(200_000))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ineligible_user() {
        let (store, _) = opened(CustodyConfig {
            eligible: false,
            ..Default::default()
        })
        .await;
        assert_eq!(store.snapshot().withdraw.step, WithdrawStep::Ineligible);
    }

    #[tokio::test(start_paused = true)]
    async fn funds_on_hold() {
        let (store, _) = opened(CustodyConfig {
            balance: FiatBalance {
                total: FiatAmount(100),
                withdrawable: FiatAmount(0),
            },
            ..Default::default()
        })
        .await;
        assert_eq!(store.snapshot().withdraw.step, WithdrawStep::OnHold);
    }

    #[tokio::test(start_paused = true)]
    async fn no_linked_bank() {
        let (store, _) = opened(CustodyConfig {
            beneficiaries: Vec::new(),
            ..Default::default()
        })
        .await;
        let state = store.snapshot();
        assert_eq!(state.withdraw.step, WithdrawStep::WithdrawalMethods);
        assert_eq!(state.brokerage.beneficiaries, RemoteData::Success(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_user_still_gets_profile() {
        let (store, _) = opened(CustodyConfig {
            kyc_state: KycState::Rejected,
            ..Default::default()
        })
        .await;
        match store.snapshot().profile.user_data {
            RemoteData::Success(user) => assert_eq!(user.kyc_state, KycState::Rejected),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn amount_validation() {
        let (store, _) = opened(CustodyConfig::default()).await;
        assert_eq!(store.snapshot().withdraw.step, WithdrawStep::EnterAmount);

        assert!(matches!(submit_amount(&store, "abc"), Err(Error::Amount(_))));
        assert!(matches!(submit_amount(&store, "0"), Err(Error::Amount(_))));
        assert_eq!(
            submit_amount(&store, "2000.01"),
            Err(Error::InsufficientFunds("2000.00 EUR".to_string()))
        );
        assert_eq!(store.snapshot().withdraw.step, WithdrawStep::EnterAmount);

        submit_amount(&store, "12.5").unwrap();
        let state = store.snapshot().withdraw;
        assert_eq!(state.step, WithdrawStep::ConfirmWithdraw);
        assert_eq!(state.amount.as_deref(), Some("12.50"));
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path() {
        let (store, backend) = opened(CustodyConfig::default()).await;
        submit_amount(&store, "500").unwrap();
        confirm_withdraw(store.clone(), backend).await.unwrap();

        let state = store.snapshot();
        assert_eq!(state.withdraw.step, WithdrawStep::WithdrawalDetails);
        let withdrawal = state.withdraw.withdrawal.unwrap();
        assert_eq!(withdrawal.amount, FiatAmount(50_000));
        assert_eq!(withdrawal.state, WithdrawalState::Pending);
        match state.brokerage.balance {
            RemoteData::Success(balance) => {
                assert_eq!(balance.withdrawable, FiatAmount(150_000))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn picking_another_bank() {
        let mut config = CustodyConfig::default();
        let mut savings = config.beneficiaries[0].clone();
        savings.id = "bank-2".to_string();
        savings.name = "Savings".to_string();
        config.beneficiaries.push(savings.clone());
        let (store, backend) = opened(config).await;

        show_bank_picker(store.clone(), backend, FiatCurrency::EUR)
            .await
            .unwrap();
        assert_eq!(store.snapshot().withdraw.step, WithdrawStep::BankPicker);

        assert_eq!(
            select_beneficiary(&store, FiatCurrency::EUR, "bank-3"),
            Err(Error::UnknownBeneficiary("bank-3".to_string()))
        );
        select_beneficiary(&store, FiatCurrency::EUR, "bank-2").unwrap();
        let state = store.snapshot().withdraw;
        assert_eq!(state.step, WithdrawStep::EnterAmount);
        assert_eq!(state.beneficiary, Some(savings));
    }
}
