pub mod backend;
pub mod config;
pub mod message;
pub mod modal;
pub mod saga;
pub mod state;
pub mod timer;
pub mod view;

mod error;

use std::sync::Arc;
use std::time::Duration;

use iced::{Subscription, Task};
use tokio::runtime::Handle;
use tracing::{info, warn};

use custody_ui::widget::Element;

pub use config::Config;
pub use error::Error;
pub use message::Message;

use backend::{CustodyBackend, DemoBackend};
use modal::ModalName;
use saga::WithdrawSaga;
use state::{Home, State, WithdrawFlow};
use timer::{Scheduler, TokioScheduler};
use view::WithdrawMessage;

use crate::store::{
    model::FiatCurrency, Action, SnapshotProvider, Store, WithdrawAction,
};

pub struct App {
    store: Arc<Store>,
    backend: Arc<dyn CustodyBackend>,
    scheduler: Arc<dyn Scheduler>,
    transition: Duration,
    currency: FiatCurrency,
    home: Home,
    /// Id of the last mounted withdraw flow.
    flow_id: u64,
    withdraw: Option<(WithdrawFlow, WithdrawSaga)>,
}

impl App {
    pub fn new(config: Config, runtime: Handle) -> (Self, Task<Message>) {
        let backend = Arc::new(DemoBackend::new(config.custody.clone()));
        (Self::with_backend(&config, backend, runtime), Task::none())
    }

    fn with_backend(config: &Config, backend: Arc<dyn CustodyBackend>, runtime: Handle) -> Self {
        let currency = config.custody.fiat_currency;
        Self {
            store: Arc::new(Store::default()),
            backend,
            scheduler: Arc::new(TokioScheduler::new(runtime)),
            transition: config.flyout_transition(),
            currency,
            home: Home::new(currency),
            flow_id: 0,
            withdraw: None,
        }
    }

    pub fn title(&self) -> String {
        format!("Custody wallet v{}", crate::VERSION)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::run_with_id(
            "store",
            iced::futures::stream::unfold(self.store.subscribe(), |mut receiver| async move {
                receiver.changed().await.ok()?;
                Some((Message::StoreUpdated, receiver))
            }),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StoreUpdated => self.sync_modals(),
            Message::View(view::Message::OpenWithdraw) => {
                if self.withdraw.is_some() {
                    return Task::none();
                }
                self.home.set_warning(None);
                self.store.dispatch(Action::Withdraw(WithdrawAction::ShowModal {
                    fiat_currency: self.currency,
                }));
                modal::open(&self.store, ModalName::CustodyWithdraw);
                self.sync_modals()
            }
            Message::View(view::Message::Withdraw(WithdrawMessage::Close)) => {
                if let Some((flow, _)) = &mut self.withdraw {
                    flow.handle_close();
                }
                Task::none()
            }
            Message::View(view::Message::Withdraw(msg)) => match &mut self.withdraw {
                Some((flow, saga)) => {
                    let task = saga.update(msg);
                    flow.refresh();
                    task
                }
                None => Task::none(),
            },
            Message::Withdraw(id, res) => {
                match &mut self.withdraw {
                    Some((flow, saga)) if saga.id() == id => {
                        flow.refresh();
                        if let Err(e) = &res {
                            // Nothing rendered or no way to close: leave the
                            // modal and report on the home screen.
                            let stuck = !flow
                                .render()
                                .is_some_and(|frame| frame.child.closable());
                            if stuck {
                                warn!("Closing withdraw flow after failure: {}", e);
                                self.home.set_warning(Some(e.clone()));
                                flow.handle_close();
                            }
                        }
                        saga.on_result(res);
                    }
                    _ => {
                        if let Err(e) = res {
                            warn!("Withdraw step finished after its flyout closed: {}", e);
                        }
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let base = self.home.view();
        match &self.withdraw {
            Some((flow, saga)) => flow.view(base, saga.form()),
            None => base,
        }
        .map(Message::View)
    }

    /// Mounts or drops the withdraw flow to follow the modal stack.
    fn sync_modals(&mut self) -> Task<Message> {
        let state = self.store.snapshot();
        self.home.reload(&state);
        let open = state.modals.contains(&ModalName::CustodyWithdraw);
        if !open {
            if self.withdraw.take().is_some() {
                info!("Withdraw flow unmounted");
            }
            return Task::none();
        }
        if let Some((flow, _)) = &mut self.withdraw {
            flow.refresh();
            return Task::none();
        }

        self.flow_id += 1;
        info!("Mounting withdraw flow {}", self.flow_id);
        let provider: Arc<dyn SnapshotProvider> = self.store.clone();
        let mut flow = WithdrawFlow::new(
            provider,
            self.scheduler.clone(),
            self.transition,
            modal::closer(self.store.clone(), ModalName::CustodyWithdraw),
        );
        flow.mount();
        let mut saga = WithdrawSaga::new(
            self.flow_id,
            self.store.clone(),
            self.backend.clone(),
            self.currency,
        );
        let task = saga.start();
        self.withdraw = Some((flow, saga));
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{
        backend::mock::{Failing, FailingBackend},
        config::CustodyConfig,
        saga,
    };

    fn app(backend: Arc<dyn CustodyBackend>) -> App {
        App::with_backend(&Config::default(), backend, Handle::current())
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

    fn open(app: &mut App) -> u64 {
        let _ = app.update(Message::View(view::Message::OpenWithdraw));
        assert!(app.withdraw.is_some());
        app.flow_id
    }

    /// Runs the opening step of the flow the way the iced runtime would.
    async fn run_open(app: &mut App, id: u64) {
        let res = saga::open_withdraw(app.store.clone(), app.backend.clone(), app.currency).await;
        let _ = app.update(Message::Withdraw(id, res));
    }

    async fn wait_transition(app: &mut App) {
        tokio::time::sleep(app.transition + Duration::from_millis(1)).await;
        let _ = app.update(Message::StoreUpdated);
    }

    async fn assert_failure_closes_the_flyout(failing_request: Failing) {
        let mut app = app(failing(failing_request));
        let id = open(&mut app);
        run_open(&mut app, id).await;

        assert!(app.home.warning().is_some());
        assert!(app
            .withdraw
            .as_ref()
            .is_some_and(|(flow, _)| !flow.visibility().is_open()));

        wait_transition(&mut app).await;
        assert!(app.store.snapshot().modals.is_empty());
        assert!(app.withdraw.is_none());

        // The withdraw button works again.
        let reopened = open(&mut app);
        assert_ne!(reopened, id);
        assert_eq!(
            app.store.snapshot().modals,
            vec![ModalName::CustodyWithdraw]
        );
        assert!(app.home.warning().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_profile_fetch_closes_the_flyout() {
        assert_failure_closes_the_flyout(Failing::UserData).await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_balance_fetch_closes_the_flyout() {
        assert_failure_closes_the_flyout(Failing::Balance).await;
    }

    #[tokio::test(start_paused = true)]
    async fn failure_on_a_closable_step_stays_in_the_flyout() {
        let mut app = app(failing(Failing::Withdraw));
        let id = open(&mut app);
        run_open(&mut app, id).await;
        saga::submit_amount(&app.store, "10").unwrap();
        let res = saga::confirm_withdraw(app.store.clone(), app.backend.clone()).await;
        let _ = app.update(Message::Withdraw(id, res));

        let (flow, saga) = app.withdraw.as_ref().unwrap();
        assert!(flow.visibility().is_open());
        assert!(saga.form().error.is_some());
        assert!(app.home.warning().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn results_of_a_previous_flyout_are_ignored() {
        let mut app = app(failing(Failing::Withdraw));
        let first = open(&mut app);
        let _ = app.update(Message::View(view::Message::Withdraw(
            WithdrawMessage::Close,
        )));
        wait_transition(&mut app).await;
        assert!(app.withdraw.is_none());

        let second = open(&mut app);
        assert_ne!(first, second);
        let _ = app.view();
        let _ = app.update(Message::Withdraw(first, Err(Error::Missing("amount"))));

        let (flow, saga) = app.withdraw.as_ref().unwrap();
        assert!(flow.visibility().is_open());
        assert_eq!(saga.form().error, None);
        assert!(app.home.warning().is_none());
    }
}
