//! Deployment target chosen at generation time

use serde::Serialize;
use std::fmt;

/// Where the optimized site gets published, if anywhere.
///
/// Parameters are passed through to the generated gulpfile as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum DeploymentVariant {
    /// Sync to an S3 bucket and invalidate CloudFront
    ObjectStorage {
        credentials_file: String,
        concurrency: u32,
    },

    /// Copy to a server over rsync
    RemoteSync {
        credentials_file: String,
        root: String,
    },

    /// Push to a GitHub Pages branch
    PagesPush { branch: String },

    None,
}

impl DeploymentVariant {
    /// Task ID of the synthesized deploy task
    pub fn task_id(&self) -> Option<&'static str> {
        match self {
            DeploymentVariant::ObjectStorage { .. } => Some("deploy:s3"),
            DeploymentVariant::RemoteSync { .. } => Some("deploy:rsync"),
            DeploymentVariant::PagesPush { .. } => Some("deploy:gh-pages"),
            DeploymentVariant::None => None,
        }
    }

    /// Fixed label for the variant, free of user-supplied parameters
    pub fn name(&self) -> &'static str {
        match self {
            DeploymentVariant::ObjectStorage { .. } => "object-storage",
            DeploymentVariant::RemoteSync { .. } => "remote-sync",
            DeploymentVariant::PagesPush { .. } => "pages-push",
            DeploymentVariant::None => "none",
        }
    }

    /// Credentials file the generated gulpfile reads at execution time
    pub fn credentials_file(&self) -> Option<&str> {
        match self {
            DeploymentVariant::ObjectStorage { credentials_file, .. }
            | DeploymentVariant::RemoteSync { credentials_file, .. } => Some(credentials_file),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DeploymentVariant::None)
    }
}

impl fmt::Display for DeploymentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentVariant::ObjectStorage { .. } => write!(f, "Amazon S3"),
            DeploymentVariant::RemoteSync { .. } => write!(f, "Rsync"),
            DeploymentVariant::PagesPush { branch } => write!(f, "GitHub Pages ({})", branch),
            DeploymentVariant::None => write!(f, "none"),
        }
    }
}
