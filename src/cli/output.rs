//! CLI output formatting

use crate::core::{DeploymentVariant, Plan, TaskGroup};
use crate::generation::Hazard;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a deployment variant for display
pub fn format_variant(variant: &DeploymentVariant) -> String {
    match variant {
        DeploymentVariant::None => style("no upload").dim().to_string(),
        other => style(other.to_string()).cyan().to_string(),
    }
}

/// Format a task group as an indented tree
pub fn format_group(group: &TaskGroup, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match group {
        TaskGroup::Task(id) => format!("{}- {}", pad, style(id).green()),
        TaskGroup::Sequence(members) | TaskGroup::Parallel(members) => {
            let label = if matches!(group, TaskGroup::Sequence(_)) {
                "sequence"
            } else {
                "parallel"
            };
            let mut lines = vec![format!("{}{}", pad, style(label).dim())];
            lines.extend(members.iter().map(|m| format_group(m, indent + 1)));
            lines.join("\n")
        }
    }
}

/// Format every entry point of a plan
pub fn format_plan(plan: &Plan) -> String {
    let mut sections = vec![format!("{} Deploy target: {}", INFO, format_variant(&plan.variant))];

    for pipeline in &plan.pipelines {
        sections.push(format!(
            "{}\n{}",
            style(pipeline.name.name()).bold(),
            format_group(&pipeline.group, 1)
        ));
    }

    sections.join("\n\n")
}

/// Format a filesystem hazard warning
pub fn format_hazard(hazard: &Hazard) -> String {
    format!(
        "{} {}: {} reads {} while {} writes it",
        WARN,
        style(hazard.pipeline.name()).bold(),
        style(&hazard.reader).yellow(),
        style(&hazard.path).dim(),
        style(&hazard.writer).yellow()
    )
}
