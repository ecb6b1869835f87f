//! Test: Composition - fixed entry points over the standard catalog

use crate::helpers::*;
use jekyllized::core::config::{PipelineConfiguration, UploadChoice};
use jekyllized::core::{
    Action, Catalog, Composite, DeploymentVariant, GeneratorError, Pipeline, Task, TaskGroup,
};
use jekyllized::generation::composer::compose_pipelines;
use jekyllized::generation::hazards;

#[test]
fn test_rebuild_is_always_the_clean_sequence() {
    for choice in [
        UploadChoice::AmazonS3,
        UploadChoice::Rsync,
        UploadChoice::GhPages,
        UploadChoice::None,
    ] {
        let plan = compose_standard(&pipeline_for(choice));
        assert_eq!(
            plan.pipeline(Composite::Rebuild).unwrap().to_string(),
            "[clean:dist, clean:assets, clean:metadata]"
        );
    }
}

#[test]
fn test_standard_entry_points() {
    let plan = compose_standard(&PipelineConfiguration::default());

    let expected = [
        (Composite::Default, "[jekyll:dev, {styles, javascript, fonts, images}, serve]"),
        (Composite::Build, "[jekyll:dev, {styles, javascript, fonts, images}]"),
        (
            Composite::Optimize,
            "[jekyll:prod, {styles, javascript, fonts, images, copy}, optimize-assets]",
        ),
        (Composite::Check, "[doctor, jslint]"),
    ];
    for (name, group) in expected {
        assert_eq!(plan.pipeline(name).unwrap().to_string(), group);
    }
}

#[test]
fn test_deploy_chain_passes_through_optimize_assets() {
    for choice in [UploadChoice::AmazonS3, UploadChoice::Rsync, UploadChoice::GhPages] {
        let plan = compose_standard(&pipeline_for(choice));
        let leaf = plan.variant.task_id().unwrap();

        assert_eq!(
            plan.pipeline(Composite::Deploy),
            Some(&TaskGroup::sequence(vec![TaskGroup::task(leaf)]))
        );
        assert_eq!(
            plan.task(leaf).unwrap().dependencies,
            vec!["optimize-assets".to_string()]
        );

        let chain = plan.dependency_chain(leaf).unwrap();
        assert_eq!(chain, vec!["optimize-assets".to_string(), leaf.to_string()]);
    }
}

#[test]
fn test_deploy_is_never_folded_into_optimize() {
    let plan = compose_standard(&pipeline_for(UploadChoice::AmazonS3));
    let optimize = plan.pipeline(Composite::Optimize).unwrap();
    assert!(!optimize.task_ids().contains(&"deploy:s3"));
}

#[test]
fn test_optimize_reports_copy_hazards() {
    let plan = compose_standard(&PipelineConfiguration::default());
    let found = hazards(&plan);

    assert!(found
        .iter()
        .all(|h| h.pipeline == Composite::Optimize && h.reader == "copy"));
    let writers: Vec<&str> = found.iter().map(|h| h.writer.as_str()).collect();
    assert!(writers.contains(&"images"));
    assert!(writers.contains(&"fonts"));
}

fn catalog_with_publish() -> Catalog {
    let mut catalog = Catalog::standard();
    catalog
        .register(Task::new("publish", "", Action::shell("true")).depends_on("optimize-assets"))
        .unwrap();
    catalog
}

#[test]
fn test_out_of_order_dependency_is_rejected() {
    let pipelines = vec![Pipeline {
        name: Composite::Deploy,
        group: TaskGroup::sequence(vec![
            TaskGroup::task("publish"),
            TaskGroup::task("optimize-assets"),
        ]),
    }];

    let result = compose_pipelines(&catalog_with_publish(), DeploymentVariant::None, pipelines);
    assert!(matches!(result, Err(GeneratorError::Composition(_))));
}

#[test]
fn test_dependency_outside_pipeline_is_a_precondition() {
    let pipelines = vec![Pipeline {
        name: Composite::Deploy,
        group: TaskGroup::sequence(vec![TaskGroup::task("publish")]),
    }];

    let plan = compose_pipelines(&catalog_with_publish(), DeploymentVariant::None, pipelines).unwrap();
    assert_eq!(plan.tasks.len(), 1);
}

#[test]
fn test_unknown_and_repeated_tasks_are_rejected() {
    let unknown = vec![Pipeline {
        name: Composite::Check,
        group: TaskGroup::sequence(vec![TaskGroup::task("doctor"), TaskGroup::task("lint:css")]),
    }];
    assert!(matches!(
        compose_pipelines(&Catalog::standard(), DeploymentVariant::None, unknown),
        Err(GeneratorError::Composition(_))
    ));

    let repeated = vec![Pipeline {
        name: Composite::Check,
        group: TaskGroup::sequence(vec![TaskGroup::task("doctor"), TaskGroup::task("doctor")]),
    }];
    assert!(matches!(
        compose_pipelines(&Catalog::standard(), DeploymentVariant::None, repeated),
        Err(GeneratorError::Composition(_))
    ));
}
