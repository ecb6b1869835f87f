//! Pipeline composer - assembles the entry points from catalog tasks

use crate::core::{
    catalog::Catalog,
    config::PipelineConfiguration,
    deployment::DeploymentVariant,
    error::{GeneratorError, Result},
    group::TaskGroup,
    plan::{Composite, Pipeline, Plan},
};
use crate::generation::selector::{deploy_task, select};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Tasks run side by side by `default`, `build` and `optimize`
const ASSET_TASKS: [&str; 4] = ["styles", "javascript", "fonts", "images"];

/// Select the deploy target and compose every entry point for it
pub fn compose(config: &PipelineConfiguration, catalog: &Catalog) -> Result<Plan> {
    let variant = select(config)?;

    let mut catalog = catalog.clone();
    let mut pipelines = standard_pipelines();

    if let Some(task) = deploy_task(&variant) {
        let deploy = TaskGroup::sequence(vec![TaskGroup::task(&task.id)]);
        catalog.register(task)?;
        pipelines.push(Pipeline {
            name: Composite::Deploy,
            group: deploy,
        });
    }

    catalog.validate()?;
    let plan = compose_pipelines(&catalog, variant, pipelines)?;

    for hazard in hazards(&plan) {
        debug!(
            "{}: '{}' reads {} while '{}' writes it in the same parallel set",
            hazard.pipeline, hazard.reader, hazard.path, hazard.writer
        );
    }

    info!(
        "Composed {} entry points over {} tasks (deploy: {})",
        plan.pipelines.len(),
        plan.tasks.len(),
        plan.variant
    );
    Ok(plan)
}

/// The fixed entry points every generated gulpfile exposes
pub fn standard_pipelines() -> Vec<Pipeline> {
    let mut optimize_assets = ASSET_TASKS.to_vec();
    optimize_assets.push("copy");

    vec![
        Pipeline {
            name: Composite::Default,
            group: TaskGroup::sequence(vec![
                TaskGroup::task("jekyll:dev"),
                TaskGroup::parallel(&ASSET_TASKS),
                TaskGroup::task("serve"),
            ]),
        },
        Pipeline {
            name: Composite::Build,
            group: TaskGroup::sequence(vec![
                TaskGroup::task("jekyll:dev"),
                TaskGroup::parallel(&ASSET_TASKS),
            ]),
        },
        Pipeline {
            name: Composite::Optimize,
            group: TaskGroup::sequence(vec![
                TaskGroup::task("jekyll:prod"),
                TaskGroup::parallel(&optimize_assets),
                TaskGroup::task("optimize-assets"),
            ]),
        },
        Pipeline {
            name: Composite::Rebuild,
            group: TaskGroup::sequence(vec![
                TaskGroup::task("clean:dist"),
                TaskGroup::task("clean:assets"),
                TaskGroup::task("clean:metadata"),
            ]),
        },
        Pipeline {
            name: Composite::Check,
            group: TaskGroup::sequence(vec![TaskGroup::task("doctor"), TaskGroup::task("jslint")]),
        },
    ]
}

/// Validate `pipelines` against `catalog` and collect the tasks they use
pub fn compose_pipelines(
    catalog: &Catalog,
    variant: DeploymentVariant,
    pipelines: Vec<Pipeline>,
) -> Result<Plan> {
    let mut names = HashSet::new();
    for pipeline in &pipelines {
        if !names.insert(pipeline.name) {
            return Err(GeneratorError::Composition(format!(
                "{} is defined more than once",
                pipeline.name
            )));
        }
        validate_pipeline(pipeline, catalog)?;
    }

    let referenced: HashSet<&str> = pipelines
        .iter()
        .flat_map(|p| p.group.task_ids())
        .collect();

    let tasks = catalog
        .tasks()
        .iter()
        .filter(|t| referenced.contains(t.id.as_str()))
        .cloned()
        .collect();

    Ok(Plan {
        variant,
        tasks,
        pipelines,
    })
}

fn validate_pipeline(pipeline: &Pipeline, catalog: &Catalog) -> Result<()> {
    let mut members = HashSet::new();

    for id in pipeline.group.task_ids() {
        if !catalog.contains(id) {
            return Err(GeneratorError::Composition(format!(
                "{} references unknown task '{}'",
                pipeline.name, id
            )));
        }
        if !members.insert(id) {
            return Err(GeneratorError::Composition(format!(
                "{} runs task '{}' more than once",
                pipeline.name, id
            )));
        }
    }

    let mut done = HashSet::new();
    check_order(&pipeline.group, pipeline.name, &members, catalog, &mut done)
}

/// Dependencies that are part of the same pipeline must finish in an
/// earlier stage. Dependencies outside it are left to an earlier invocation.
fn check_order<'a>(
    group: &'a TaskGroup,
    name: Composite,
    members: &HashSet<&str>,
    catalog: &Catalog,
    done: &mut HashSet<&'a str>,
) -> Result<()> {
    match group {
        TaskGroup::Task(id) => {
            let task = catalog.lookup(id)?;
            for dep in &task.dependencies {
                if members.contains(dep.as_str()) && !done.contains(dep.as_str()) {
                    return Err(GeneratorError::Composition(format!(
                        "{}: task '{}' must run after '{}'",
                        name, id, dep
                    )));
                }
            }
            done.insert(id.as_str());
        }
        TaskGroup::Sequence(stages) => {
            for stage in stages {
                check_order(stage, name, members, catalog, done)?;
            }
        }
        TaskGroup::Parallel(branches) => {
            let before = done.clone();
            for branch in branches {
                let mut finished = before.clone();
                check_order(branch, name, members, catalog, &mut finished)?;
                done.extend(finished);
            }
        }
    }

    Ok(())
}

/// A parallel-set member reading a directory a sibling writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hazard {
    pub pipeline: Composite,
    pub reader: String,
    pub writer: String,
    pub path: String,
}

/// Find filesystem couplings between members of the same parallel set
pub fn hazards(plan: &Plan) -> Vec<Hazard> {
    let mut found = Vec::new();
    for pipeline in &plan.pipelines {
        collect_hazards(&pipeline.group, pipeline.name, plan, &mut found);
    }
    found
}

fn collect_hazards(group: &TaskGroup, name: Composite, plan: &Plan, found: &mut Vec<Hazard>) {
    let members = match group {
        TaskGroup::Task(_) => return,
        TaskGroup::Sequence(members) => {
            for member in members {
                collect_hazards(member, name, plan, found);
            }
            return;
        }
        TaskGroup::Parallel(members) => members,
    };

    for (i, reader_group) in members.iter().enumerate() {
        for (j, writer_group) in members.iter().enumerate() {
            if i == j {
                continue;
            }
            for reader in reader_group.task_ids().into_iter().filter_map(|id| plan.task(id)) {
                for writer in writer_group.task_ids().into_iter().filter_map(|id| plan.task(id)) {
                    for path in &reader.reads {
                        if writer.writes.iter().any(|w| overlaps(path, w)) {
                            found.push(Hazard {
                                pipeline: name,
                                reader: reader.id.clone(),
                                writer: writer.id.clone(),
                                path: path.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    for member in members {
        collect_hazards(member, name, plan, found);
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    let (a, b) = (Path::new(a), Path::new(b));
    a.starts_with(b) || b.starts_with(a)
}
