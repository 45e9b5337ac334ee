use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::api::{resolve_from_date, HomeworkApi};
use crate::clock::{Clock, Sleeper, SystemClock, TokioSleeper};
use crate::config::{BotConfig, DEFAULT_RETRY_TIME};
use crate::error::PollError;
use crate::homework::{check_response, parse_status};
use crate::notify::{send_message, Notifier};
use crate::poller::state::{PollOutcome, PollerState};

/// Prefix of the message sent to the chat when an iteration fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Polls the homework API and reports status changes through a [`Notifier`].
pub struct Poller {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    state: PollerState,
}

impl Poller {
    pub fn new(api: Arc<dyn HomeworkApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            sleeper: Arc::new(TokioSleeper),
            clock: Arc::new(SystemClock),
            interval: DEFAULT_RETRY_TIME,
            state: PollerState::default(),
        }
    }

    pub fn from_config(
        config: &BotConfig,
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::new(api, notifier).with_interval(config.retry_interval)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Starts from an explicit `from_date` instead of the current time.
    pub fn with_from_date(mut self, from_date: i64) -> Self {
        self.state.from_date = Some(from_date);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    /// Runs until `shutdown` resolves. Errors never end the loop.
    ///
    /// `shutdown` is only observed while sleeping between iterations.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting homework status poller"
        );

        loop {
            // Failures are already reported by `tick`.
            if let Ok(outcome) = self.tick().await {
                debug!(?outcome, "Poll iteration finished");
            }

            tokio::select! {
                _ = self.sleeper.sleep(self.interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown signal received, stopping poller");
                    return;
                }
            }
        }
    }

    /// One iteration with failure handling: errors are reported to the chat
    /// and logged before being returned.
    pub async fn tick(&mut self) -> Result<PollOutcome, PollError> {
        match self.poll_once().await {
            Ok(outcome) => {
                self.state.consecutive_failures = 0;
                Ok(outcome)
            }
            Err(e) => {
                self.state.consecutive_failures += 1;
                self.report_failure(&e).await;
                Err(e)
            }
        }
    }

    /// One iteration without failure handling.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let from_date = resolve_from_date(self.state.from_date, self.clock.as_ref());
        let response = self.api.homework_statuses(from_date).await?;
        let homeworks = check_response(&response)?;

        let outcome = match homeworks.first() {
            Some(latest) => {
                let message = parse_status(latest)?;
                // Stored before sending so a failed delivery is not retried.
                if self.state.record_status(&message) {
                    let delivered = send_message(self.notifier.as_ref(), &message).await;
                    PollOutcome::StatusChanged { message, delivered }
                } else {
                    debug!("Homework status unchanged");
                    PollOutcome::Unchanged
                }
            }
            None => {
                debug!(from_date, "No new homework statuses in API response");
                PollOutcome::NoUpdates
            }
        };

        self.state.from_date = Some(self.clock.now());
        Ok(outcome)
    }

    async fn report_failure(&self, error: &PollError) {
        let message = failure_message(error);
        send_message(self.notifier.as_ref(), &message).await;
        error!(
            kind = %error.kind(),
            status = error.status_code(),
            consecutive_failures = self.state.consecutive_failures,
            "{message}"
        );
    }
}

pub fn failure_message(error: &PollError) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}
