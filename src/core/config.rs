//! Generator configuration from YAML

use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Top-level generator configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Values written into the Jekyll site files
    pub project: ProjectOptions,

    /// Which build pipeline and deploy target to generate
    pub pipeline: PipelineConfiguration,
}

/// Project metadata for the generated site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    pub name: String,
    pub description: String,
    pub url: String,
    pub author_name: String,
    pub author_email: String,
    pub author_uri: String,
    pub author_bio: String,

    /// Jekyll permalink style
    pub permalinks: Permalinks,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            name: "jekyllized".to_string(),
            description: String::new(),
            url: String::new(),
            author_name: String::new(),
            author_email: String::new(),
            author_uri: String::new(),
            author_bio: String::new(),
            permalinks: Permalinks::Pretty,
        }
    }
}

/// Jekyll's built-in permalink styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permalinks {
    Date,
    None,
    #[default]
    Pretty,
    Ordinal,
}

impl Permalinks {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permalinks::Date => "date",
            Permalinks::None => "none",
            Permalinks::Pretty => "pretty",
            Permalinks::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for Permalinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The upload prompt answer; each choice implies one of the deploy flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadChoice {
    #[serde(rename = "s3")]
    AmazonS3,
    Rsync,
    GhPages,
    None,
}

/// Deploy selection flags and the parameters handed to the chosen target.
///
/// At most one of `amazon_s3`, `rsync`, `ghpages` and `no_upload` may be
/// set, counting the flag implied by `upload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfiguration {
    /// Deployment variant as answered at the upload prompt
    pub upload: Option<UploadChoice>,

    pub amazon_s3: bool,
    pub rsync: bool,
    pub ghpages: bool,
    pub no_upload: bool,

    /// Variant-specific parameters, passed through unvalidated
    pub params: DeployParams,
}

/// Parameters for each deploy target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployParams {
    /// JSON file with the S3 key, secret, bucket, region and distribution ID
    pub s3_credentials: String,

    /// Number of concurrent S3 uploads
    pub s3_concurrency: u32,

    /// JSON file with the rsync hostname, username and destination
    pub rsync_credentials: String,

    /// Local directory whose contents are uploaded over rsync
    pub rsync_root: String,

    /// Branch GitHub Pages serves from
    pub pages_branch: String,
}

impl Default for DeployParams {
    fn default() -> Self {
        Self {
            s3_credentials: "aws-credentials.json".to_string(),
            s3_concurrency: 30,
            rsync_credentials: "rsync-credentials.json".to_string(),
            rsync_root: "dist".to_string(),
            pages_branch: "master".to_string(),
        }
    }
}

impl PipelineConfiguration {
    /// Configuration equivalent to answering the upload prompt with `choice`
    pub fn from_upload(choice: UploadChoice) -> Self {
        Self {
            upload: Some(choice),
            ..Self::default()
        }
    }

    /// Replace the deploy selection, keeping the parameters
    pub fn override_upload(&mut self, choice: UploadChoice) {
        self.amazon_s3 = false;
        self.rsync = false;
        self.ghpages = false;
        self.no_upload = false;
        self.upload = Some(choice);
    }

    /// Effective flags in precedence order: amazon_s3, rsync, ghpages, no_upload
    pub fn flags(&self) -> [(&'static str, bool); 4] {
        let implied = |choice: UploadChoice| self.upload == Some(choice);
        [
            ("amazon_s3", self.amazon_s3 || implied(UploadChoice::AmazonS3)),
            ("rsync", self.rsync || implied(UploadChoice::Rsync)),
            ("ghpages", self.ghpages || implied(UploadChoice::GhPages)),
            ("no_upload", self.no_upload || implied(UploadChoice::None)),
        ]
    }

    /// Names of the flags that are set
    pub fn enabled_flags(&self) -> Vec<&'static str> {
        self.flags()
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(name, _)| *name)
            .collect()
    }
}

impl GeneratorConfig {
    /// Load generator configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse generator configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration by resolving its deployment variant
    pub fn validate(&self) -> Result<()> {
        crate::generation::select(&self.pipeline)?;
        Ok(())
    }
}
