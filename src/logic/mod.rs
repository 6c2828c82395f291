pub mod dispatch;
pub mod fusion;
pub mod summary;

pub use dispatch::{Dispatcher, ForecastRequest, Outcome, Ticket};
pub use summary::{ForecastKind, Summarizer};
