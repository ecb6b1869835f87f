//! CLI command definitions

use crate::core::{config::UploadChoice, GeneratorConfig, Result};
use clap::Args;
use std::path::PathBuf;

/// Where the generator configuration comes from
#[derive(Debug, Args, Clone)]
pub struct ConfigSource {
    /// Path to generator YAML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Deployment target, overrides the configuration file
    #[arg(long, value_enum)]
    pub upload: Option<UploadArg>,
}

impl ConfigSource {
    /// Load the configuration file (or defaults) and apply `--upload`
    pub fn load(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(upload) = self.upload {
            config.pipeline.override_upload(upload.into());
        }

        Ok(config)
    }
}

/// Generate a new project
#[derive(Debug, Args, Clone)]
pub struct NewCommand {
    /// Directory to generate the project into
    pub dir: PathBuf,

    #[command(flatten)]
    pub source: ConfigSource,

    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,
}

/// Print or write only the gulpfile
#[derive(Debug, Args, Clone)]
pub struct GulpfileCommand {
    #[command(flatten)]
    pub source: ConfigSource,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Show the composed task graph
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    #[command(flatten)]
    pub source: ConfigSource,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a generator configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to generator YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Deployment target argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UploadArg {
    S3,
    Rsync,
    GhPages,
    None,
}

impl From<UploadArg> for UploadChoice {
    fn from(arg: UploadArg) -> Self {
        match arg {
            UploadArg::S3 => UploadChoice::AmazonS3,
            UploadArg::Rsync => UploadChoice::Rsync,
            UploadArg::GhPages => UploadChoice::GhPages,
            UploadArg::None => UploadChoice::None,
        }
    }
}
