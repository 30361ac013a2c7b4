//! `shelfkeep-demo` — presentation layer for the lending core.
//!
//! Owns the sample data, the scripted run and every piece of console text.
//! The lending crate never formats output; it hands back structured results
//! that the renderers here turn into lines.

pub mod config;
pub mod render;
pub mod scenario;

pub use config::{DemoConfig, OutputMode};
pub use scenario::run;
