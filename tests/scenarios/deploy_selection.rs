//! Test: Deploy Selection - one upload answer yields one deploy target

use crate::helpers::*;
use jekyllized::core::config::{PipelineConfiguration, UploadChoice};
use jekyllized::core::{Catalog, Composite, DeploymentVariant, GeneratorConfig, GeneratorError};
use jekyllized::{compose, select};

fn flags(amazon_s3: bool, rsync: bool, ghpages: bool, no_upload: bool) -> PipelineConfiguration {
    PipelineConfiguration {
        amazon_s3,
        rsync,
        ghpages,
        no_upload,
        ..PipelineConfiguration::default()
    }
}

/// Every pair of set flags is rejected before any composition happens
#[test]
fn test_every_flag_pair_is_ambiguous() {
    for i in 0..4 {
        for j in (i + 1)..4 {
            let mut set = [false; 4];
            set[i] = true;
            set[j] = true;
            let config = flags(set[0], set[1], set[2], set[3]);

            assert!(
                matches!(select(&config), Err(GeneratorError::Configuration(_))),
                "flags {:?} should be ambiguous",
                set
            );
            assert!(matches!(
                compose(&config, &Catalog::standard()),
                Err(GeneratorError::Configuration(_))
            ));
        }
    }
}

#[test]
fn test_s3_and_rsync_fail_before_composition() {
    let err = compose(&flags(true, true, false, false), &Catalog::standard()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("amazon_s3"));
    assert!(message.contains("rsync"));
}

#[test]
fn test_each_upload_answer_maps_to_one_variant() {
    let cases = [
        (UploadChoice::AmazonS3, Some("deploy:s3")),
        (UploadChoice::Rsync, Some("deploy:rsync")),
        (UploadChoice::GhPages, Some("deploy:gh-pages")),
        (UploadChoice::None, None),
    ];

    for (choice, deploy_leaf) in cases {
        let variant = select(&pipeline_for(choice)).unwrap();
        assert_eq!(variant.task_id(), deploy_leaf);
    }
}

/// An upload answer plus a different explicit flag counts as two flags
#[test]
fn test_upload_answer_conflicts_with_other_flag() {
    let config = PipelineConfiguration {
        rsync: true,
        ..pipeline_for(UploadChoice::GhPages)
    };
    assert!(matches!(select(&config), Err(GeneratorError::Configuration(_))));
}

#[test]
fn test_ambiguous_yaml_fails_validation() {
    let yaml = r#"
pipeline:
  amazon_s3: true
  ghpages: true
"#;
    let result = GeneratorConfig::from_yaml(yaml);
    assert!(matches!(result, Err(GeneratorError::Configuration(_))));
}

#[test]
fn test_deploy_params_flow_into_variant() {
    let config = config_with_pipeline(
        r#"  upload: "s3"
  params:
    s3_credentials: "secrets/aws.json"
    s3_concurrency: 8
"#,
    );

    assert_eq!(
        select(&config.pipeline).unwrap(),
        DeploymentVariant::ObjectStorage {
            credentials_file: "secrets/aws.json".to_string(),
            concurrency: 8,
        }
    );
}

#[test]
fn test_no_upload_has_no_deploy_entry_point() {
    for config in [flags(false, false, false, true), PipelineConfiguration::default()] {
        let plan = compose_standard(&config);
        assert!(plan.variant.is_none());
        assert!(plan.pipeline(Composite::Deploy).is_none());
        assert!(plan.tasks.iter().all(|t| !t.id.starts_with("deploy")));
    }
}
