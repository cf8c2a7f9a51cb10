//! Imperative shell around the pure session core.
//!
//! # Key Concepts
//!
//! - **Engine**: Applies the pure operations and persists every result
//! - **Open**: Fetches a definition and loads its session as a
//!   Stillwater effect, run against a [`SessionEnv`]
//!
//! Following Stillwater conventions, `open_session` returns `impl Effect`
//! and is executed with `.run(&env).await`.

mod engine;
mod open;

pub use engine::SessionEngine;
pub use open::{open_session, OpenedSession, SessionEnv, SharedEngine};
