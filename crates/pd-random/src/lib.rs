//! `pd-random` - Uniform random sources for probdist.
//!
//! Provides the production [`StdRandomSource`] (seeded `rand::rngs::StdRng`),
//! its [`SourceConfig`], and a [`ScriptedSource`] that replays fixed draws.

pub mod config;
pub mod scripted;
pub mod std_source;

pub use config::{SourceConfig, SEED_ENV};
pub use scripted::ScriptedSource;
pub use std_source::StdRandomSource;
