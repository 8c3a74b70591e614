//! Logging infrastructure for console diagnostics.

mod logger;
mod subscriber;

pub use logger::Logger;
pub use subscriber::{ConsoleFormatter, init_subscriber};
