//! Test utility functions for jekyllized
#![allow(dead_code)]

use jekyllized::core::config::{PipelineConfiguration, UploadChoice};
use jekyllized::core::{Catalog, GeneratorConfig, Plan};
use jekyllized::{compose, render};

/// Configuration used by the scaffold scenarios
pub const PROJECT_YAML: &str = r#"
project:
  name: "jekyllized"
  description: "Tests for Jekyllized"
  url: "example.org"
  author_name: "Ola Nordmann"
  author_email: "ola.nordmann@email.com"
  author_uri: "homepage.com"
  author_bio: "I am a tester for tests"
  permalinks: "pretty"
"#;

/// Pipeline configuration with exactly one upload answer
pub fn pipeline_for(choice: UploadChoice) -> PipelineConfiguration {
    PipelineConfiguration::from_upload(choice)
}

/// Compose against the standard catalog
pub fn compose_standard(config: &PipelineConfiguration) -> Plan {
    compose(config, &Catalog::standard()).expect("composition should succeed")
}

/// Compose and render a gulpfile
pub fn gulpfile_for(config: &PipelineConfiguration) -> String {
    render(&compose_standard(config)).expect("render should succeed")
}

/// Project configuration with a given YAML `pipeline:` block appended
pub fn config_with_pipeline(pipeline_yaml: &str) -> GeneratorConfig {
    let yaml = format!("{}\npipeline:\n{}", PROJECT_YAML, pipeline_yaml);
    GeneratorConfig::from_yaml(&yaml).expect("config should parse")
}

/// Assert a generated file contains every expected fragment
pub fn assert_contains_all(contents: &str, expected: &[&str]) {
    for fragment in expected {
        assert!(
            contents.contains(fragment),
            "expected {:?} in:\n{}",
            fragment,
            contents
        );
    }
}
