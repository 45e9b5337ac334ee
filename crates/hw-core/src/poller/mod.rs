pub mod engine;
pub mod state;

pub use engine::{failure_message, Poller, FAILURE_PREFIX};
pub use state::{PollOutcome, PollerState};
