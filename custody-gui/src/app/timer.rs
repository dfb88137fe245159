use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::task::AbortHandle;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs a job once after a delay.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, job: Job) -> TimerHandle;
}

/// Handle on a scheduled job.
///
/// The job and its handle share a state word: whichever of firing or
/// cancelling wins the transition out of `PENDING` decides the outcome, so a
/// job runs at most once and never after [`TimerHandle::cancel`] returned.
#[derive(Debug)]
pub struct TimerHandle {
    state: Arc<AtomicU8>,
    abort: Option<AbortHandle>,
}

/// Scheduler side of a [`TimerHandle`].
pub struct Trigger {
    state: Arc<AtomicU8>,
}

impl TimerHandle {
    pub fn pair() -> (TimerHandle, Trigger) {
        let state = Arc::new(AtomicU8::new(PENDING));
        (
            TimerHandle {
                state: state.clone(),
                abort: None,
            },
            Trigger { state },
        )
    }

    pub fn with_abort_handle(mut self, abort: AbortHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Returns true if the job had not run yet and now never will.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) == PENDING
    }

    pub fn has_fired(&self) -> bool {
        self.state.load(Ordering::Acquire) == FIRED
    }
}

impl Trigger {
    /// Runs the job unless the handle cancelled it first.
    pub fn fire(self, job: Job) -> bool {
        if self
            .state
            .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            job();
            true
        } else {
            false
        }
    }
}

/// Spawns one sleeping task per job on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, job: Job) -> TimerHandle {
        let (handle, trigger) = TimerHandle::pair();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !trigger.fire(job) {
                tracing::debug!("Scheduled job was cancelled before firing");
            }
        });
        handle.with_abort_handle(task.abort_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, Job) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (
            count,
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
        let (count, job) = counter();
        let handle = scheduler.schedule(Duration::from_millis(500), job);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(handle.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(handle.has_fired());

        // Too late to cancel.
        assert!(!handle.cancel());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_job_never_runs() {
        let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
        let (count, job) = counter();
        let handle = scheduler.schedule(Duration::from_millis(500), job);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.cancel());
        assert!(!handle.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!handle.has_fired());
    }

    #[test]
    fn trigger_loses_against_cancel() {
        let (handle, trigger) = TimerHandle::pair();
        let (count, job) = counter();
        assert!(handle.cancel());
        assert!(!trigger.fire(job));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
