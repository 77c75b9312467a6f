pub mod config;
pub mod error;
pub mod record;
pub mod render;
pub mod tail;
pub mod watch;

pub use config::{Profile, WatchConfig};
pub use error::{DirewatchError, Result};
pub use watch::{Outcome, WatchStats, Watcher};
