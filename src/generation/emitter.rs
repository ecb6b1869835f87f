//! Emitter - renders a composed plan as a gulpfile

use crate::core::{
    deployment::DeploymentVariant,
    error::Result,
    group::TaskGroup,
    plan::Plan,
    task::{Action, StreamSpec, Task},
};
use crate::generation::selector::js_str;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// File name of the emitted task-runner description
pub const GULPFILE: &str = "gulpfile.babel.js";

const GULPFILE_TEMPLATE: &str = include_str!("../../templates/gulpfile.babel.js.tera");

#[derive(Debug, Serialize)]
struct EmittedTask<'a> {
    name: String,
    description: &'a str,
    dependencies: &'a [String],
    body: String,
}

#[derive(Debug, Serialize)]
struct EmittedPipeline {
    name: String,
    description: &'static str,
    expression: String,
}

/// Render the gulpfile for a plan. Identical plans render identical bytes.
pub fn render(plan: &Plan) -> Result<String> {
    let tasks: Vec<EmittedTask> = plan
        .tasks
        .iter()
        .map(|task| {
            debug!("Emitting task {}", task.id);
            EmittedTask {
                name: js_str(&task.id),
                description: &task.description,
                dependencies: &task.dependencies,
                body: action_body(task),
            }
        })
        .collect();

    let pipelines: Vec<EmittedPipeline> = plan
        .pipelines
        .iter()
        .map(|pipeline| EmittedPipeline {
            name: js_str(pipeline.name.name()),
            description: pipeline.name.description(),
            expression: entry_expression(&pipeline.group),
        })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("variant", plan.variant.name());
    ctx.insert(
        "object_storage",
        &matches!(plan.variant, DeploymentVariant::ObjectStorage { .. }),
    );
    ctx.insert("tasks", &tasks);
    ctx.insert("pipelines", &pipelines);

    Ok(Tera::one_off(GULPFILE_TEMPLATE, &ctx, false)?)
}

/// Render the plan as pretty-printed JSON
pub fn render_json(plan: &Plan) -> Result<String> {
    let mut json = serde_json::to_string_pretty(plan)?;
    json.push('\n');
    Ok(json)
}

fn action_body(task: &Task) -> String {
    match &task.action {
        Action::Trash { paths } => {
            let paths: Vec<String> = paths.iter().map(|p| js_str(p)).collect();
            format!("done => {{ trash([{}]); done(); }}", paths.join(", "))
        }
        Action::Shell { command } => {
            format!("done => {{ shell.exec({}); done(); }}", js_str(command))
        }
        Action::Stream(spec) => stream_body(spec, task.reloads_preview),
        Action::Script { body } => body.clone(),
    }
}

fn stream_body(spec: &StreamSpec, reloads_preview: bool) -> String {
    let mut body = format!("() => {{\n  return gulp.src({})", js_str(&spec.source));

    for transform in &spec.transforms {
        body.push_str(&format!("\n    .pipe({})", transform));
    }
    body.push_str(&format!("\n    .pipe(gulp.dest({}))", js_str(&spec.dest)));
    body.push_str(&format!("\n    .pipe($.size({{title: {}}}))", js_str(&spec.title)));
    if reloads_preview {
        body.push_str("\n    .pipe(reload({stream: true}))");
    }

    body.push_str(";\n}");
    body
}

/// Top-level groups get one member per line, nested groups stay inline
fn entry_expression(group: &TaskGroup) -> String {
    let (function, members) = match group {
        TaskGroup::Task(_) => return format!("gulp.series({})", inline_expression(group)),
        TaskGroup::Sequence(members) => ("gulp.series", members),
        TaskGroup::Parallel(members) => ("gulp.parallel", members),
    };

    let members: Vec<String> = members
        .iter()
        .map(|m| format!("  {}", inline_expression(m)))
        .collect();
    format!("{}(\n{}\n)", function, members.join(",\n"))
}

fn inline_expression(group: &TaskGroup) -> String {
    let (function, members) = match group {
        TaskGroup::Task(id) => return js_str(id),
        TaskGroup::Sequence(members) => ("gulp.series", members),
        TaskGroup::Parallel(members) => ("gulp.parallel", members),
    };

    let members: Vec<String> = members.iter().map(inline_expression).collect();
    format!("{}({})", function, members.join(", "))
}
