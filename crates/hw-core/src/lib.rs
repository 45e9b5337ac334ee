#![forbid(unsafe_code)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod homework;
pub mod notify;
pub mod poller;

pub use api::{FetchError, HomeworkApi, PracticumClient};
pub use clock::{Clock, Sleeper, SystemClock, TokioSleeper};
pub use config::{check_tokens, BotConfig, ConfigError};
pub use error::{ErrorKind, PollError};
pub use homework::{check_response, parse_status, HomeworkStatus, ResponseError, StatusError};
pub use notify::{send_message, DeliveryError, Notifier, TelegramNotifier};
pub use poller::{PollOutcome, Poller, PollerState};
