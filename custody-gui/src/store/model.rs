use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawStep {
    #[default]
    Loading,
    EnterAmount,
    WithdrawalMethods,
    BankPicker,
    ConfirmWithdraw,
    WithdrawalDetails,
    Ineligible,
    OnHold,
}

impl WithdrawStep {
    pub const ALL: [WithdrawStep; 8] = [
        WithdrawStep::Loading,
        WithdrawStep::EnterAmount,
        WithdrawStep::WithdrawalMethods,
        WithdrawStep::BankPicker,
        WithdrawStep::ConfirmWithdraw,
        WithdrawStep::WithdrawalDetails,
        WithdrawStep::Ineligible,
        WithdrawStep::OnHold,
    ];
}

/// Identity verification status as reported by the custody backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum KycState {
    #[default]
    None,
    Pending,
    UnderReview,
    Verified,
    Rejected,
    Expired,
    Other(String),
}

impl KycState {
    pub fn is_rejected_or_expired(&self) -> bool {
        matches!(self, Self::Rejected | Self::Expired)
    }
}

impl From<String> for KycState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NONE" => Self::None,
            "PENDING" => Self::Pending,
            "UNDER_REVIEW" => Self::UnderReview,
            "VERIFIED" => Self::Verified,
            "REJECTED" => Self::Rejected,
            "EXPIRED" => Self::Expired,
            _ => Self::Other(s),
        }
    }
}

impl From<KycState> for String {
    fn from(state: KycState) -> String {
        state.to_string()
    }
}

impl Display for KycState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Pending => write!(f, "PENDING"),
            Self::UnderReview => write!(f, "UNDER_REVIEW"),
            Self::Verified => write!(f, "VERIFIED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct UserData {
    pub kyc_state: KycState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum FiatCurrency {
    #[default]
    EUR,
    GBP,
    USD,
    ARS,
}

impl FiatCurrency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::GBP => "£",
            Self::USD => "$",
            Self::ARS => "$",
        }
    }
}

impl Display for FiatCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EUR => write!(f, "EUR"),
            Self::GBP => write!(f, "GBP"),
            Self::USD => write!(f, "USD"),
            Self::ARS => write!(f, "ARS"),
        }
    }
}

impl FromStr for FiatCurrency {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "USD" => Ok(Self::USD),
            "ARS" => Ok(Self::ARS),
            _ => Err(format!("Unsupported fiat currency '{}'", s)),
        }
    }
}

/// A linked bank account eligible to receive withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Beneficiary {
    pub id: String,
    pub name: String,
    /// Masked account identifier, e.g. "•••• 4242".
    pub agent_account: String,
    pub currency: FiatCurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawalState {
    Pending,
    Complete,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WithdrawResponse {
    pub id: String,
    pub amount: FiatAmount,
    pub currency: FiatCurrency,
    pub beneficiary_id: String,
    pub state: WithdrawalState,
    pub created_at: DateTime<Utc>,
}

/// Amount of fiat in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
pub struct FiatAmount(pub u64);

impl FiatAmount {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Display for FiatAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,
    #[error("Amount must be a number with at most two decimals")]
    Malformed,
    #[error("Amount must be greater than zero")]
    Zero,
    #[error("Amount is too large")]
    Overflow,
}

impl FromStr for FiatAmount {
    type Err = AmountError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        let (units, cents) = match s.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (s, ""),
        };
        if cents.len() > 2
            || (units.is_empty() && cents.is_empty())
            || !units.chars().chain(cents.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(AmountError::Malformed);
        }
        let units: u64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| AmountError::Overflow)?
        };
        let cents: u64 = match cents.len() {
            0 => 0,
            1 => cents.parse::<u64>().map_err(|_| AmountError::Malformed)? * 10,
            _ => cents.parse().map_err(|_| AmountError::Malformed)?,
        };
        let total = units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .ok_or(AmountError::Overflow)?;
        if total == 0 {
            return Err(AmountError::Zero);
        }
        Ok(FiatAmount(total))
    }
}

/// Custodial balance of a fiat account. Funds not yet withdrawable are on hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct FiatBalance {
    pub total: FiatAmount,
    pub withdrawable: FiatAmount,
}

impl FiatBalance {
    pub fn is_on_hold(&self) -> bool {
        self.withdrawable.is_zero() && !self.total.is_zero()
    }
}
