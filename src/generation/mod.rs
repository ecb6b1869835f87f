//! Turning a configuration into a rendered build pipeline

pub mod composer;
pub mod emitter;
pub mod selector;

pub use composer::{compose, hazards, Hazard};
pub use emitter::{render, render_json, GULPFILE};
pub use selector::{deploy_task, select};
