//! Scenario-based tests for jekyllized

mod composition;
mod deploy_selection;
mod gulpfile_output;
mod scaffold_output;
