/// Mutable state owned by the poll loop. Lives for the process lifetime only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerState {
    /// Text of the last status notification produced, empty before the first one.
    pub last_status: String,
    /// `from_date` for the next request; `None` means "now".
    pub from_date: Option<i64>,
    /// Failed iterations since the last successful one.
    pub consecutive_failures: u32,
}

impl PollerState {
    /// Stores `status` and returns `true` if it differs from the previous one.
    pub fn record_status(&mut self, status: &str) -> bool {
        if self.last_status == status {
            return false;
        }
        self.last_status = status.to_string();
        true
    }
}

/// Result of one successful poll iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The newest homework has a new status; a notification was attempted.
    StatusChanged { message: String, delivered: bool },
    /// Same status as last time.
    Unchanged,
    /// The API returned no homeworks.
    NoUpdates,
}
