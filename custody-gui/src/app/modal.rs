use std::sync::Arc;

pub use crate::store::ModalName;
use crate::store::{Action, ModalsAction, Store};

/// Callback removing a modal from the modal stack.
pub type CloseFn = Arc<dyn Fn() + Send + Sync>;

impl ModalName {
    /// Identifier of the modal container, looked up by automated UI tests.
    pub fn e2e_tag(&self) -> &'static str {
        match self {
            Self::CustodyWithdraw => "custodyWithdrawModal",
        }
    }
}

pub fn open(store: &Store, name: ModalName) {
    tracing::info!("Opening modal {:?}", name);
    store.dispatch(Action::Modals(ModalsAction::Open(name)));
}

/// Returns the callback a modal calls, once its exit transition is over, to
/// leave the modal stack.
pub fn closer(store: Arc<Store>, name: ModalName) -> CloseFn {
    Arc::new(move || {
        tracing::info!("Closing modal {:?}", name);
        store.dispatch(Action::Modals(ModalsAction::Close(name)));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SnapshotProvider;

    #[test]
    fn closer_pops_the_modal() {
        let store = Arc::new(Store::default());
        open(&store, ModalName::CustodyWithdraw);
        assert_eq!(store.snapshot().modals, vec![ModalName::CustodyWithdraw]);

        let close = closer(store.clone(), ModalName::CustodyWithdraw);
        close();
        assert!(store.snapshot().modals.is_empty());
    }
}
