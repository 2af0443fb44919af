//! Entry points invoked by the host: one-time bootstrap, session start, and the
//! per-turn incremental update.
//!
//! All three share the same parser and digest builder; they differ only in what
//! triggers them and what they persist.

pub mod bootstrap;
pub mod input;
pub mod start;
pub mod update;

pub use bootstrap::{BootstrapStats, bootstrap};
pub use input::HookInput;
pub use start::start;
pub use update::{UpdateOutcome, update};
