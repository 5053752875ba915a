// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod controller;
pub mod corpus;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod surface;
pub mod ui;

pub use controller::Controller;
pub use corpus::{Corpus, Difficulty};
pub use error::{Error, Result};
pub use metrics::compute_wpm;

pub const TICK_RATE_MS: u64 = 100;
