//! Core domain models for the generator
//!
//! This module defines the tasks, groups and plans a generated build
//! pipeline is made of, and the configuration it is generated from.

pub mod catalog;
pub mod config;
pub mod deployment;
pub mod error;
pub mod group;
pub mod plan;
pub mod task;

pub use catalog::Catalog;
pub use config::{GeneratorConfig, PipelineConfiguration, ProjectOptions};
pub use deployment::DeploymentVariant;
pub use error::{GeneratorError, Result};
pub use group::TaskGroup;
pub use plan::{Composite, Pipeline, Plan};
pub use task::{Action, Task};
