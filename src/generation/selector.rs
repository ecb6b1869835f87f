//! Deployment selector - picks the deploy target and synthesizes its task

use crate::core::{
    config::PipelineConfiguration,
    deployment::DeploymentVariant,
    error::{GeneratorError, Result},
    task::{Action, Task},
};
use tracing::debug;

/// Task every deploy task waits on
pub const DEPLOY_UPSTREAM: &str = "optimize-assets";

/// Resolve the deployment variant for a configuration.
///
/// Fails when more than one deploy flag is set instead of falling back on
/// precedence, and when the chosen variant is missing a parameter.
pub fn select(config: &PipelineConfiguration) -> Result<DeploymentVariant> {
    let enabled = config.enabled_flags();
    if enabled.len() > 1 {
        return Err(GeneratorError::Configuration(format!(
            "Ambiguous deployment target: {} are all set, choose one",
            enabled.join(", ")
        )));
    }

    let params = &config.params;
    let variant = match enabled.first().copied() {
        Some("amazon_s3") => {
            require("s3_credentials", &params.s3_credentials)?;
            if params.s3_concurrency == 0 {
                return Err(GeneratorError::Configuration(
                    "Deployment parameter 's3_concurrency' must be at least 1".to_string(),
                ));
            }
            DeploymentVariant::ObjectStorage {
                credentials_file: params.s3_credentials.clone(),
                concurrency: params.s3_concurrency,
            }
        }
        Some("rsync") => {
            require("rsync_credentials", &params.rsync_credentials)?;
            require("rsync_root", &params.rsync_root)?;
            DeploymentVariant::RemoteSync {
                credentials_file: params.rsync_credentials.clone(),
                root: params.rsync_root.clone(),
            }
        }
        Some("ghpages") => {
            require("pages_branch", &params.pages_branch)?;
            DeploymentVariant::PagesPush {
                branch: params.pages_branch.clone(),
            }
        }
        _ => DeploymentVariant::None,
    };

    debug!("Selected deployment variant: {}", variant);
    Ok(variant)
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GeneratorError::Configuration(format!(
            "Missing required deployment parameter '{}'",
            name
        )));
    }
    Ok(())
}

/// Build the deploy task for a variant, `None` when nothing is uploaded
pub fn deploy_task(variant: &DeploymentVariant) -> Option<Task> {
    let id = variant.task_id()?;

    let (description, body) = match variant {
        DeploymentVariant::ObjectStorage {
            credentials_file,
            concurrency,
        } => (
            "Deploys the optimized site to Amazon S3 and CloudFront",
            s3_body(credentials_file, *concurrency),
        ),
        DeploymentVariant::RemoteSync {
            credentials_file,
            root,
        } => (
            "Uploads the optimized site to your server over rsync",
            rsync_body(credentials_file, root),
        ),
        DeploymentVariant::PagesPush { branch } => (
            "Pushes the optimized site to your GitHub Pages branch",
            pages_body(branch),
        ),
        DeploymentVariant::None => return None,
    };

    let mut task = Task::new(id, description, Action::script(body))
        .depends_on(DEPLOY_UPSTREAM)
        .reading("dist");
    if let Some(credentials) = variant.credentials_file() {
        task = task.reading(credentials);
    }
    Some(task)
}

/// Encode a value as a JavaScript string literal.
///
/// JSON string syntax is valid JavaScript once the two line separators
/// JSON leaves raw are escaped.
pub(crate) fn js_str(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

fn s3_body(credentials_file: &str, concurrency: u32) -> String {
    format!(
        r#"() => {{
  var credentials = JSON.parse(fs.readFileSync({credentials}, 'utf8'));
  var publisher = $.awspublish.create(credentials);

  return gulp.src('dist/**/*')
    .pipe($.awspublishRouter({{
      routes: {{
        '^assets/(?:.+)\\.(?:js|css)$': {{
          key: '$&',
          headers: {{
            'Cache-Control': 'max-age=315360000, no-transform, public',
            'Content-Encoding': 'gzip'
          }}
        }},
        '^assets/(?:.+)\\.(?:jpg|png|gif)$': {{
          key: '$&',
          headers: {{
            'Cache-Control': 'max-age=315360000, no-transform, public',
            'Content-Encoding': 'gzip'
          }}
        }},
        '^assets/fonts/(?:.+)\\.(?:eot|svg|ttf|woff)$': {{
          key: '$&',
          headers: {{
            'Cache-Control': 'max-age=315360000, no-transform, public'
          }}
        }},
        '^.+\\.html': {{
          key: '$&',
          headers: {{
            'Cache-Control': 'max-age=0, no-transform, public',
            'Content-Encoding': 'gzip'
          }}
        }},
        '^.+$': '$&'
      }}
    }}))
    .pipe($.awspublish.gzip())
    .pipe(parallelize(publisher.publish(), {concurrency}))
    .pipe(publisher.cache())
    .pipe(publisher.sync())
    .pipe($.awspublish.reporter())
    .pipe($.cloudfront(credentials));
}}"#,
        credentials = js_str(credentials_file),
        concurrency = concurrency,
    )
}

fn rsync_body(credentials_file: &str, root: &str) -> String {
    let module = if credentials_file.starts_with('.') || credentials_file.starts_with('/') {
        credentials_file.to_string()
    } else {
        format!("./{}", credentials_file)
    };

    format!(
        r#"() => {{
  var secret = require({module});

  return gulp.src({source})
    .pipe($.rsync({{
      root: {root},
      hostname: secret.hostname,
      username: secret.username,
      destination: secret.destination,
      incremental: true,
      progress: true
    }}));
}}"#,
        module = js_str(&module),
        source = js_str(&format!("{}/**", root)),
        root = js_str(root),
    )
}

fn pages_body(branch: &str) -> String {
    format!(
        r#"() => {{
  return gulp.src('dist/**/*')
    .pipe($.ghPages({{branch: {branch}}}));
}}"#,
        branch = js_str(branch),
    )
}
