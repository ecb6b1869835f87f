use anyhow::{Context, Result};
use jekyllized::cli::commands::{GulpfileCommand, NewCommand, PlanCommand, ValidateCommand};
use jekyllized::cli::output::*;
use jekyllized::cli::{Cli, Command};
use jekyllized::core::{Catalog, GeneratorConfig};
use jekyllized::generation::{compose, hazards, render, render_json};
use jekyllized::scaffold::{write_atomic, Project};
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let result = match &cli.command {
        Command::New(cmd) => new_project(cmd),
        Command::Gulpfile(cmd) => emit_gulpfile(cmd),
        Command::Plan(cmd) => show_plan(cmd),
        Command::Validate(cmd) => validate_config(cmd),
    };

    if let Err(e) = result {
        eprintln!("{} {}", CROSS, style("Failed").red());
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn new_project(cmd: &NewCommand) -> Result<()> {
    let config = cmd.source.load().context("Failed to load generator config")?;

    println!(
        "{} Generating {} in {}",
        ROCKET,
        style(&config.project.name).bold(),
        style(cmd.dir.display()).cyan()
    );

    let project = Project::render(&config).context("Failed to render project")?;
    project
        .write(&cmd.dir, cmd.force)
        .with_context(|| format!("Failed to write project to {}", cmd.dir.display()))?;

    println!(
        "{} Wrote {} files, deploy target: {}",
        CHECK,
        style(project.files.len()).cyan(),
        format_variant(&project.plan.variant)
    );
    println!(
        "{} Run {} then {} to start",
        INFO,
        style("npm install && bundle install").dim(),
        style("gulp").bold()
    );

    Ok(())
}

fn emit_gulpfile(cmd: &GulpfileCommand) -> Result<()> {
    let config = cmd.source.load().context("Failed to load generator config")?;
    let plan = compose(&config.pipeline, &Catalog::standard()).context("Failed to compose pipeline")?;
    let gulpfile = render(&plan).context("Failed to render gulpfile")?;

    match &cmd.output {
        Some(path) => {
            write_atomic(path, &gulpfile)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Wrote {}", CHECK, style(path.display()).cyan());
        }
        None => print!("{}", gulpfile),
    }

    Ok(())
}

fn show_plan(cmd: &PlanCommand) -> Result<()> {
    let config = cmd.source.load().context("Failed to load generator config")?;
    let plan = compose(&config.pipeline, &Catalog::standard()).context("Failed to compose pipeline")?;

    if cmd.json {
        print!("{}", render_json(&plan)?);
        return Ok(());
    }

    println!("{}", format_plan(&plan));

    let found = hazards(&plan);
    if !found.is_empty() {
        println!();
        for hazard in &found {
            println!("{}", format_hazard(hazard));
        }
    }
    debug!("{} tasks in plan", plan.tasks.len());

    Ok(())
}

fn validate_config(cmd: &ValidateCommand) -> Result<()> {
    if !cmd.json {
        println!("{} Validating generator config...", INFO);
    }

    let config = GeneratorConfig::from_file(&cmd.file)
        .with_context(|| format!("Validation failed for {}", cmd.file.display()))?;
    let plan = compose(&config.pipeline, &Catalog::standard()).context("Validation failed")?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{} Generator configuration is valid!", CHECK);
    println!("  Project: {}", style(&config.project.name).bold());
    println!("  Permalinks: {}", style(config.project.permalinks).cyan());
    println!("  Deploy target: {}", format_variant(&plan.variant));
    println!("  Tasks: {}", style(plan.tasks.len()).cyan());
    Ok(())
}
