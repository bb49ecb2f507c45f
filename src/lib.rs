// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod enrich;
pub mod error;
pub mod file;
pub mod model;
pub mod progress;
pub mod resolve;
pub mod specs;

pub use enrich::enrich;
pub use error::{Error, Result};
pub use model::{EntityQuery, ImageRef, ResolutionResult, RunSummary};
pub use resolve::{Resolve, Resolver};
