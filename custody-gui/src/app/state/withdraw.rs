//! The custodial withdrawal flyout.
//!
//! [`WithdrawFlow`] decides which single step view is on screen from what the
//! store says, and runs the two phase close: hide the flyout at once, then
//! leave the modal stack once the exit transition is over.
use std::sync::Arc;
use std::time::Duration;

use custody_ui::widget::Element;

use crate::app::{
    modal::{CloseFn, ModalName},
    saga::StepForm,
    timer::{Scheduler, TimerHandle},
    view,
};
use crate::store::{
    model::WithdrawStep,
    remote::RemoteData,
    selectors::{select_withdraw_props, WithdrawData, WithdrawProps},
    SnapshotProvider,
};

pub const BROKERAGE_INELIGIBLE: &str =
    "Your account is not currently eligible to withdraw funds. Please contact support.";

/// Visibility of the flyout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Not mounted yet.
    Hidden,
    Open,
    /// Exit transition running, the modal is still on the stack.
    Closing,
    /// The external close callback has been called.
    Closed,
}

impl Visibility {
    pub fn is_open(&self) -> bool {
        *self == Visibility::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepView {
    Loading,
    EnterAmount,
    WithdrawalMethods,
    BankPicker,
    ConfirmWithdraw,
    WithdrawalDetails,
    Ineligible,
    OnHold,
    Rejected,
}

impl StepView {
    pub fn for_step(step: WithdrawStep) -> Self {
        match step {
            WithdrawStep::Loading => Self::Loading,
            WithdrawStep::EnterAmount => Self::EnterAmount,
            WithdrawStep::WithdrawalMethods => Self::WithdrawalMethods,
            WithdrawStep::BankPicker => Self::BankPicker,
            WithdrawStep::ConfirmWithdraw => Self::ConfirmWithdraw,
            WithdrawStep::WithdrawalDetails => Self::WithdrawalDetails,
            WithdrawStep::Ineligible => Self::Ineligible,
            WithdrawStep::OnHold => Self::OnHold,
        }
    }

    /// Whether the view is handed the close handler.
    pub fn closable(&self) -> bool {
        match self {
            Self::Loading | Self::Ineligible => false,
            Self::EnterAmount
            | Self::WithdrawalMethods
            | Self::BankPicker
            | Self::ConfirmWithdraw
            | Self::WithdrawalDetails
            | Self::OnHold
            | Self::Rejected => true,
        }
    }
}

/// What the flow puts on screen: one flyout holding one step view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlyoutFrame {
    pub is_open: bool,
    pub tag: &'static str,
    pub child: StepView,
}

/// Picks the step view. `None` means nothing is rendered at all.
pub fn dispatch(data: &RemoteData<WithdrawData, String>, step: WithdrawStep) -> Option<StepView> {
    match data {
        RemoteData::Failure(_) => None,
        RemoteData::Loading | RemoteData::NotAsked => Some(StepView::Loading),
        RemoteData::Success(WithdrawData { user_data }) => {
            if user_data.kyc_state.is_rejected_or_expired() {
                Some(StepView::Rejected)
            } else {
                Some(StepView::for_step(step))
            }
        }
    }
}

pub struct WithdrawFlow {
    provider: Arc<dyn SnapshotProvider>,
    scheduler: Arc<dyn Scheduler>,
    transition: Duration,
    close: CloseFn,
    visibility: Visibility,
    pending_close: Option<TimerHandle>,
    props: WithdrawProps,
}

impl WithdrawFlow {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        scheduler: Arc<dyn Scheduler>,
        transition: Duration,
        close: CloseFn,
    ) -> Self {
        let props = select_withdraw_props(&provider.snapshot());
        Self {
            provider,
            scheduler,
            transition,
            close,
            visibility: Visibility::Hidden,
            pending_close: None,
            props,
        }
    }

    pub fn mount(&mut self) {
        if self.visibility == Visibility::Hidden {
            self.visibility = Visibility::Open;
        }
    }

    /// Re-reads the store.
    pub fn refresh(&mut self) {
        let props = select_withdraw_props(&self.provider.snapshot());
        if let (RemoteData::Failure(e), false) = (
            &props.data,
            matches!(self.props.data, RemoteData::Failure(_)),
        ) {
            // Nothing is rendered for a failed profile fetch, leave a trace of it.
            tracing::warn!("User data unavailable, withdraw flyout hidden: {}", e);
        }
        self.props = props;
    }

    pub fn props(&self) -> &WithdrawProps {
        &self.props
    }

    pub fn visibility(&self) -> Visibility {
        match (self.visibility, &self.pending_close) {
            (Visibility::Closing, Some(handle)) if handle.has_fired() => Visibility::Closed,
            (visibility, _) => visibility,
        }
    }

    /// Hides the flyout now and calls the external close once the exit
    /// transition elapsed. Later calls are ignored.
    pub fn handle_close(&mut self) {
        match self.visibility() {
            Visibility::Closing | Visibility::Closed => return,
            Visibility::Hidden | Visibility::Open => {}
        }
        self.visibility = Visibility::Closing;
        let close = self.close.clone();
        self.pending_close = Some(
            self.scheduler
                .schedule(self.transition, Box::new(move || close())),
        );
    }

    /// Cancels a close still waiting on its transition.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending_close.take() {
            if handle.cancel() {
                tracing::debug!("Withdraw flow torn down before its close fired");
            }
        }
    }

    pub fn render(&self) -> Option<FlyoutFrame> {
        dispatch(&self.props.data, self.props.step).map(|child| FlyoutFrame {
            is_open: self.visibility().is_open(),
            tag: ModalName::CustodyWithdraw.e2e_tag(),
            child,
        })
    }

    pub fn view<'a>(
        &'a self,
        base: Element<'a, view::Message>,
        form: &'a StepForm,
    ) -> Element<'a, view::Message> {
        match self.render() {
            Some(frame) => view::withdraw::flyout(base, frame, &self.props, form),
            None => base,
        }
    }
}

impl Drop for WithdrawFlow {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{modal, timer::TokioScheduler};
    use crate::store::{
        model::{KycState, UserData},
        Action, ProfileAction, StepPayload, Store, WithdrawAction,
    };
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const D: Duration = Duration::from_millis(500);

    fn user(kyc_state: KycState) -> RemoteData<UserData, String> {
        RemoteData::Success(UserData {
            kyc_state,
            display_name: None,
        })
    }

    fn set_step(store: &Store, payload: StepPayload) {
        store.dispatch(Action::Withdraw(WithdrawAction::SetStep(payload)));
    }

    fn set_user(store: &Store, data: RemoteData<UserData, String>) {
        store.dispatch(Action::Profile(ProfileAction::SetUserData(data)));
    }

    fn flow(store: Arc<Store>, closed: Arc<AtomicUsize>) -> WithdrawFlow {
        WithdrawFlow::new(
            store,
            Arc::new(TokioScheduler::new(tokio::runtime::Handle::current())),
            D,
            Arc::new(move || {
                closed.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn every_step_has_its_own_view() {
        let views: HashSet<StepView> = WithdrawStep::ALL
            .iter()
            .map(|step| StepView::for_step(*step))
            .collect();
        assert_eq!(views.len(), WithdrawStep::ALL.len());
        assert!(!views.contains(&StepView::Rejected));
    }

    #[test]
    fn close_handler_table() {
        let closable: Vec<WithdrawStep> = WithdrawStep::ALL
            .into_iter()
            .filter(|s| StepView::for_step(*s).closable())
            .collect();
        assert_eq!(
            closable,
            vec![
                WithdrawStep::EnterAmount,
                WithdrawStep::WithdrawalMethods,
                WithdrawStep::BankPicker,
                WithdrawStep::ConfirmWithdraw,
                WithdrawStep::WithdrawalDetails,
                WithdrawStep::OnHold,
            ]
        );
        assert!(StepView::Rejected.closable());
    }

    #[test]
    fn pending_data_renders_loading_whatever_the_step() {
        for step in WithdrawStep::ALL {
            assert_eq!(
                dispatch(&RemoteData::NotAsked, step),
                Some(StepView::Loading)
            );
            assert_eq!(dispatch(&RemoteData::Loading, step), Some(StepView::Loading));
            assert_eq!(
                dispatch(&RemoteData::Failure("500".to_string()), step),
                None
            );
        }
    }

    #[test]
    fn rejected_or_expired_users_ignore_the_step() {
        for kyc_state in [KycState::Rejected, KycState::Expired] {
            let data = RemoteData::Success(WithdrawData {
                user_data: UserData {
                    kyc_state: kyc_state.clone(),
                    display_name: None,
                },
            });
            for step in WithdrawStep::ALL {
                assert_eq!(dispatch(&data, step), Some(StepView::Rejected));
            }
        }
    }

    #[test]
    fn other_users_follow_the_step() {
        for kyc_state in [
            KycState::Verified,
            KycState::Pending,
            KycState::None,
            KycState::Other("TIER_2".to_string()),
        ] {
            let data = RemoteData::Success(WithdrawData {
                user_data: UserData {
                    kyc_state: kyc_state.clone(),
                    display_name: None,
                },
            });
            for step in WithdrawStep::ALL {
                assert_eq!(dispatch(&data, step), Some(StepView::for_step(step)));
            }
        }
    }

    #[tokio::test]
    async fn verified_user_entering_amount() {
        let store = Arc::new(Store::default());
        set_user(&store, user(KycState::Verified));
        set_step(
            &store,
            StepPayload::EnterAmount {
                fiat_currency: Default::default(),
                beneficiary: None,
            },
        );
        let mut flow = flow(store, Arc::new(AtomicUsize::new(0)));
        assert_eq!(flow.visibility(), Visibility::Hidden);
        flow.mount();
        assert_eq!(
            flow.render(),
            Some(FlyoutFrame {
                is_open: true,
                tag: "custodyWithdrawModal",
                child: StepView::EnterAmount,
            })
        );
    }

    #[tokio::test]
    async fn rejected_user_confirming() {
        let store = Arc::new(Store::default());
        set_user(&store, user(KycState::Rejected));
        let mut flow = flow(store.clone(), Arc::new(AtomicUsize::new(0)));
        flow.mount();
        set_step(&store, StepPayload::OnHold);
        flow.refresh();
        assert_eq!(flow.render().map(|f| f.child), Some(StepView::Rejected));
    }

    #[tokio::test]
    async fn failed_fetch_renders_nothing() {
        let store = Arc::new(Store::default());
        let mut flow = flow(store.clone(), Arc::new(AtomicUsize::new(0)));
        flow.mount();
        assert_eq!(flow.render().map(|f| f.child), Some(StepView::Loading));

        set_user(&store, RemoteData::Failure("network error".to_string()));
        flow.refresh();
        assert_eq!(flow.render(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn close_waits_for_the_transition() {
        let store = Arc::new(Store::default());
        set_user(&store, user(KycState::Verified));
        let closed = Arc::new(AtomicUsize::new(0));
        let mut flow = flow(store, closed.clone());
        flow.mount();

        flow.handle_close();
        assert_eq!(flow.visibility(), Visibility::Closing);
        assert!(!flow.render().unwrap().is_open);
        assert_eq!(closed.load(Ordering::SeqCst), 0);

        // A second request does not schedule a second close.
        flow.handle_close();

        tokio::time::sleep(D - Duration::from_millis(1)).await;
        assert_eq!(closed.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert_eq!(flow.visibility(), Visibility::Closed);

        flow.handle_close();
        tokio::time::sleep(D * 2).await;
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_flow_never_closes() {
        let store = Arc::new(Store::default());
        let closed = Arc::new(AtomicUsize::new(0));
        let mut flow = flow(store, closed.clone());
        flow.mount();
        flow.handle_close();
        drop(flow);

        tokio::time::sleep(D * 2).await;
        assert_eq!(closed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn close_pops_the_modal_stack() {
        let store = Arc::new(Store::default());
        modal::open(&store, ModalName::CustodyWithdraw);
        let mut flow = WithdrawFlow::new(
            store.clone(),
            Arc::new(TokioScheduler::new(tokio::runtime::Handle::current())),
            D,
            modal::closer(store.clone(), ModalName::CustodyWithdraw),
        );
        flow.mount();
        flow.handle_close();
        assert_eq!(store.snapshot().modals, vec![ModalName::CustodyWithdraw]);

        tokio::time::sleep(D + Duration::from_millis(1)).await;
        assert!(store.snapshot().modals.is_empty());
    }
}
