//! jekyllized - scaffolds Jekyll sites with a gulp build and deploy pipeline

pub mod cli;
pub mod core;
pub mod generation;
pub mod scaffold;

// Re-export commonly used types
pub use core::{Catalog, Composite, DeploymentVariant, GeneratorConfig, GeneratorError, Plan, TaskGroup};
pub use generation::{compose, render, select};
pub use scaffold::Project;
