use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::config::CustodyConfig;
use crate::store::model::{
    Beneficiary, FiatAmount, FiatBalance, FiatCurrency, UserData, WithdrawResponse,
    WithdrawalState,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Request to the custody service failed: {0}")]
    Request(String),
    #[error("Withdrawal rejected: {0}")]
    Rejected(String),
}

/// Custody service owning the user profile, fiat balances and linked bank
/// accounts.
#[async_trait]
pub trait CustodyBackend: Send + Sync {
    async fn user_data(&self) -> Result<UserData, BackendError>;
    async fn is_eligible(&self, currency: FiatCurrency) -> Result<bool, BackendError>;
    async fn balance(&self, currency: FiatCurrency) -> Result<FiatBalance, BackendError>;
    async fn beneficiaries(&self, currency: FiatCurrency)
        -> Result<Vec<Beneficiary>, BackendError>;
    async fn withdraw(
        &self,
        amount: FiatAmount,
        beneficiary: &Beneficiary,
        currency: FiatCurrency,
    ) -> Result<WithdrawResponse, BackendError>;
}

/// In-process backend answering from the configured account.
pub struct DemoBackend {
    config: CustodyConfig,
    balance: Mutex<FiatBalance>,
}

impl DemoBackend {
    pub fn new(config: CustodyConfig) -> Self {
        Self {
            balance: Mutex::new(config.balance),
            config,
        }
    }

    async fn round_trip(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
    }

    fn check_currency(&self, currency: FiatCurrency) -> Result<(), BackendError> {
        if currency != self.config.fiat_currency {
            return Err(BackendError::Request(format!(
                "No {} account for this user",
                currency
            )));
        }
        Ok(())
    }

    fn current_balance(&self) -> Result<FiatBalance, BackendError> {
        self.balance
            .lock()
            .map(|b| *b)
            .map_err(|e| BackendError::Request(e.to_string()))
    }
}

#[async_trait]
impl CustodyBackend for DemoBackend {
    async fn user_data(&self) -> Result<UserData, BackendError> {
        self.round_trip().await;
        Ok(UserData {
            kyc_state: self.config.kyc_state.clone(),
            display_name: None,
        })
    }

    async fn is_eligible(&self, currency: FiatCurrency) -> Result<bool, BackendError> {
        self.round_trip().await;
        Ok(self.config.eligible && currency == self.config.fiat_currency)
    }

    async fn balance(&self, currency: FiatCurrency) -> Result<FiatBalance, BackendError> {
        self.round_trip().await;
        self.check_currency(currency)?;
        self.current_balance()
    }

    async fn beneficiaries(
        &self,
        currency: FiatCurrency,
    ) -> Result<Vec<Beneficiary>, BackendError> {
        self.round_trip().await;
        Ok(self
            .config
            .beneficiaries
            .iter()
            .filter(|b| b.currency == currency)
            .cloned()
            .collect())
    }

    async fn withdraw(
        &self,
        amount: FiatAmount,
        beneficiary: &Beneficiary,
        currency: FiatCurrency,
    ) -> Result<WithdrawResponse, BackendError> {
        self.round_trip().await;
        self.check_currency(currency)?;
        if beneficiary.currency != currency {
            return Err(BackendError::Rejected(format!(
                "{} does not accept {}",
                beneficiary.name, currency
            )));
        }
        {
            let mut balance = self
                .balance
                .lock()
                .map_err(|e| BackendError::Request(e.to_string()))?;
            if amount > balance.withdrawable {
                return Err(BackendError::Rejected("insufficient funds".to_string()));
            }
            balance.withdrawable = FiatAmount(balance.withdrawable.0 - amount.0);
            balance.total = FiatAmount(balance.total.0.saturating_sub(amount.0));
        }
        let response = WithdrawResponse {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            currency,
            beneficiary_id: beneficiary.id.clone(),
            state: WithdrawalState::Pending,
            created_at: chrono::Utc::now(),
        };
        tracing::info!(
            "Withdrawal {} of {} {} to {} created",
            response.id,
            amount,
            currency,
            beneficiary.id
        );
        Ok(response)
    }
}

/// Backends failing on purpose.
#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Failing {
        UserData,
        Eligibility,
        Balance,
        Beneficiaries,
        Withdraw,
    }

    /// [`DemoBackend`] answering every request but one with an error.
    pub struct FailingBackend {
        inner: DemoBackend,
        failing: Failing,
    }

    impl FailingBackend {
        pub fn new(config: CustodyConfig, failing: Failing) -> Self {
            Self {
                inner: DemoBackend::new(config),
                failing,
            }
        }

        fn check(&self, request: Failing) -> Result<(), BackendError> {
            if request == self.failing {
                Err(BackendError::Request("service unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CustodyBackend for FailingBackend {
        async fn user_data(&self) -> Result<UserData, BackendError> {
            self.check(Failing::UserData)?;
            self.inner.user_data().await
        }

        async fn is_eligible(&self, currency: FiatCurrency) -> Result<bool, BackendError> {
            self.check(Failing::Eligibility)?;
            self.inner.is_eligible(currency).await
        }

        async fn balance(&self, currency: FiatCurrency) -> Result<FiatBalance, BackendError> {
            self.check(Failing::Balance)?;
            self.inner.balance(currency).await
        }

        async fn beneficiaries(
            &self,
            currency: FiatCurrency,
        ) -> Result<Vec<Beneficiary>, BackendError> {
            self.check(Failing::Beneficiaries)?;
            self.inner.beneficiaries(currency).await
        }

        async fn withdraw(
            &self,
            amount: FiatAmount,
            beneficiary: &Beneficiary,
            currency: FiatCurrency,
        ) -> Result<WithdrawResponse, BackendError> {
            self.check(Failing::Withdraw)?;
            self.inner.withdraw(amount, beneficiary, currency).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn withdraw_debits_the_balance() {
        let config = CustodyConfig::default();
        let beneficiary = config.beneficiaries[0].clone();
        let backend = DemoBackend::new(config);

        let res = backend
            .withdraw(FiatAmount(50_000), &beneficiary, FiatCurrency::EUR)
            .await
            .unwrap();
        assert_eq!(res.state, WithdrawalState::Pending);
        assert_eq!(res.beneficiary_id, beneficiary.id);

        let balance = backend.balance(FiatCurrency::EUR).await.unwrap();
        assert_eq!(balance.withdrawable, FiatAmount(150_000));
        assert_eq!(balance.total, FiatAmount(200_000));

        assert_eq!(
            backend
                .withdraw(FiatAmount(150_001), &beneficiary, FiatCurrency::EUR)
                .await,
            Err(BackendError::Rejected("insufficient funds".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn other_currencies_are_not_served() {
        let backend = DemoBackend::new(CustodyConfig::default());
        assert!(!backend.is_eligible(FiatCurrency::USD).await.unwrap());
        assert!(backend.balance(FiatCurrency::USD).await.is_err());
        assert!(backend
            .beneficiaries(FiatCurrency::USD)
            .await
            .unwrap()
            .is_empty());
    }
}
