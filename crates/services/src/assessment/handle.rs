use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use quiz_core::Clock;
use quiz_core::model::{
    AttemptId, AttemptRecord, AttemptResult, AttemptState, Mutation, QuizDef, StudentId,
    SubmitOutcome, TickOutcome,
};
use storage::repository::AttemptRecordRepository;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use super::snapshot::AttemptSnapshot;
use crate::error::AttemptServiceError;

struct Inner {
    state: Mutex<AttemptState>,
    updates: watch::Sender<AttemptSnapshot>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    recorded: Mutex<Option<AttemptId>>,
    student_id: StudentId,
    clock: Clock,
    sink: Arc<dyn AttemptRecordRepository>,
}

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, AttemptState> {
        relock(&self.state)
    }

    fn publish(&self, state: &AttemptState) {
        self.updates.send_replace(AttemptSnapshot::of(state));
    }

    fn stop_ticker(&self) {
        if let Some(ticker) = relock(&self.ticker).take() {
            ticker.abort();
        }
    }

    /// Release the countdown's join handle. The task then finishes on its own
    /// even if the attempt is stopped or dropped meanwhile.
    fn detach_ticker(&self) {
        relock(&self.ticker).take();
    }

    fn tick(&self) -> TickOutcome {
        let mut state = self.state();
        let outcome = state.tick(self.clock.now());
        if !matches!(outcome, TickOutcome::Ignored) {
            self.publish(&state);
        }
        outcome
    }

    /// Hand the completed attempt to the result sink. Called once, by whichever
    /// path completed the attempt.
    async fn record(&self) {
        let record = {
            let state = self.state();
            AttemptRecord::from_completed(&state, self.student_id)
        };
        let Some(record) = record else {
            return;
        };

        match self.sink.append_attempt(&record).await {
            Ok(id) => {
                tracing::info!(
                    attempt_id = %id,
                    quiz_id = %record.quiz_id,
                    student_id = %record.student_id,
                    score = record.result.score_percent(),
                    submission = ?record.submission,
                    "attempt recorded"
                );
                *relock(&self.recorded) = Some(id);
            }
            Err(err) => {
                tracing::error!(quiz_id = %record.quiz_id, "could not record attempt: {err}");
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

/// Live handle to the attempt in progress.
///
/// Clones share the same attempt. The countdown task holds only a weak
/// reference, so dropping every handle (or calling [`cancel`](Self::cancel))
/// stops the timer.
#[derive(Clone)]
pub struct AttemptHandle {
    inner: Arc<Inner>,
}

impl AttemptHandle {
    /// Take ownership of a freshly started attempt and arm its countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(
        state: AttemptState,
        student_id: StudentId,
        clock: Clock,
        sink: Arc<dyn AttemptRecordRepository>,
        tick_period: Duration,
    ) -> Self {
        let (updates, _) = watch::channel(AttemptSnapshot::of(&state));
        let inner = Arc::new(Inner {
            state: Mutex::new(state),
            updates,
            ticker: Mutex::new(None),
            recorded: Mutex::new(None),
            student_id,
            clock,
            sink,
        });

        let ticker = tokio::spawn(run_countdown(Arc::downgrade(&inner), tick_period));
        *relock(&inner.ticker) = Some(ticker);

        Self { inner }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizDef> {
        Arc::clone(self.inner.state().quiz())
    }

    #[must_use]
    pub fn student_id(&self) -> StudentId {
        self.inner.student_id
    }

    #[must_use]
    pub fn snapshot(&self) -> AttemptSnapshot {
        AttemptSnapshot::of(&self.inner.state())
    }

    /// Receive a fresh snapshot after every selection, navigation, tick and submission.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AttemptSnapshot> {
        self.inner.updates.subscribe()
    }

    /// ID assigned by the result sink, once the completed attempt has been stored.
    #[must_use]
    pub fn record_id(&self) -> Option<AttemptId> {
        *relock(&self.inner.recorded)
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        relock(&self.inner.ticker)
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// # Errors
    ///
    /// Returns `AttemptServiceError::Attempt` for an out-of-range selection;
    /// the attempt is left as it was.
    pub fn select_answer(&self, question: usize, option: usize) -> Result<Mutation, AttemptServiceError> {
        let mut state = self.inner.state();
        match state.select_answer(question, option) {
            Ok(mutation) => {
                if mutation == Mutation::Applied {
                    tracing::debug!(question, option, "answer selected");
                    self.inner.publish(&state);
                }
                Ok(mutation)
            }
            Err(err) => {
                tracing::warn!(question, option, "rejected selection: {err}");
                Err(err.into())
            }
        }
    }

    pub fn go_to(&self, index: usize) -> Mutation {
        self.navigate(|state| state.go_to(index))
    }

    pub fn next(&self) -> Mutation {
        self.navigate(AttemptState::next)
    }

    pub fn previous(&self) -> Mutation {
        self.navigate(AttemptState::previous)
    }

    fn navigate(&self, step: impl FnOnce(&mut AttemptState) -> Mutation) -> Mutation {
        let mut state = self.inner.state();
        let mutation = step(&mut state);
        if mutation == Mutation::Applied {
            tracing::debug!(index = state.current_index(), "moved to question");
            self.inner.publish(&state);
        }
        mutation
    }

    /// Submit the attempt. Later calls return the first result unchanged.
    pub async fn submit(&self) -> AttemptResult {
        let outcome = {
            let mut state = self.inner.state();
            let outcome = state.submit(self.inner.clock.now());
            if let SubmitOutcome::Scored(_) = outcome {
                self.inner.publish(&state);
            }
            outcome
        };
        self.inner.stop_ticker();

        match outcome {
            SubmitOutcome::Scored(result) => {
                tracing::info!(score = result.score_percent(), "attempt submitted");
                self.inner.record().await;
                result
            }
            SubmitOutcome::AlreadyCompleted(result) => result,
        }
    }

    /// Stop the countdown without submitting. The attempt stays as it is.
    pub fn cancel(&self) {
        self.inner.stop_ticker();
    }
}

impl fmt::Debug for AttemptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttemptHandle")
            .field("student_id", &self.inner.student_id)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

async fn run_countdown(inner: Weak<Inner>, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let Some(inner) = inner.upgrade() else {
            break;
        };
        match inner.tick() {
            TickOutcome::Counted { remaining_secs } => {
                tracing::debug!(remaining_secs, "tick");
            }
            TickOutcome::Expired(result) => {
                tracing::info!(score = result.score_percent(), "time expired; attempt auto-submitted");
                inner.detach_ticker();
                inner.record().await;
                break;
            }
            TickOutcome::Ignored => break,
        }
    }
}
