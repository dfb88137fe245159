use super::{error::Error, view};

#[derive(Debug, Clone)]
pub enum Message {
    View(view::Message),
    /// The store changed.
    StoreUpdated,
    /// A withdraw step of the flow with the given id finished its backend calls.
    Withdraw(u64, Result<(), Error>),
}

impl From<view::Message> for Message {
    fn from(message: view::Message) -> Self {
        Self::View(message)
    }
}
