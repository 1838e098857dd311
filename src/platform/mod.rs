//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, a JSON file natively)
//! - Time (wall clock and instant formatting)

pub mod storage;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{KeyValueStore, MemoryStore};
pub use time::{Clock, ManualClock, SystemClock, format_instant, parse_instant};
