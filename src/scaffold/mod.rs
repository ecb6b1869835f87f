//! Scaffold - renders the Jekyll project tree and writes it to disk

use crate::core::{
    catalog::Catalog,
    config::{GeneratorConfig, ProjectOptions},
    deployment::DeploymentVariant,
    error::Result,
    plan::Plan,
};
use crate::generation::{compose, render, GULPFILE};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tera::{Context, Tera};
use tracing::{debug, info};

const CONFIG_TEMPLATE: &str = include_str!("../../templates/site/_config.yml.tera");
const HUMANS_TEMPLATE: &str = include_str!("../../templates/site/humans.txt.tera");
const GITIGNORE_TEMPLATE: &str = include_str!("../../templates/site/gitignore.tera");

/// Files copied as-is; Liquid markup in them is left for Jekyll
const STATIC_FILES: [(&str, &str); 12] = [
    ("Gemfile", include_str!("../../templates/site/Gemfile")),
    ("_config.build.yml", include_str!("../../templates/site/_config.build.yml")),
    (".jshintrc", include_str!("../../templates/site/jshintrc")),
    ("src/404.html", include_str!("../../templates/site/404.html")),
    ("src/about.md", include_str!("../../templates/site/about.md")),
    ("src/crossdomain.xml", include_str!("../../templates/site/crossdomain.xml")),
    ("src/index.html", include_str!("../../templates/site/index.html")),
    ("src/robots.txt", include_str!("../../templates/site/robots.txt")),
    ("src/_layouts/default.html", include_str!("../../templates/site/default.html")),
    ("src/assets/scss/style.scss", include_str!("../../templates/site/style.scss")),
    ("src/assets/javascript/main.js", include_str!("../../templates/site/main.js")),
    ("src/assets/images/.gitkeep", ""),
];

/// A generated file, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub contents: String,
}

impl ScaffoldFile {
    fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// The generated project: its files and the pipeline plan behind the gulpfile
#[derive(Debug, Clone)]
pub struct Project {
    pub plan: Plan,
    pub files: Vec<ScaffoldFile>,
}

impl Project {
    /// Render every file of the project without touching the filesystem
    pub fn render(config: &GeneratorConfig) -> Result<Self> {
        let plan = compose(&config.pipeline, &Catalog::standard())?;

        let mut ctx = Context::new();
        ctx.insert("project", &config.project);
        ctx.insert("site_settings", &site_settings(&config.project)?);
        ctx.insert(
            "credentials_file",
            plan.variant.credentials_file().unwrap_or_default(),
        );

        let mut files = vec![
            ScaffoldFile::new("_config.yml", Tera::one_off(CONFIG_TEMPLATE, &ctx, false)?),
            ScaffoldFile::new("src/humans.txt", Tera::one_off(HUMANS_TEMPLATE, &ctx, false)?),
            ScaffoldFile::new(".gitignore", Tera::one_off(GITIGNORE_TEMPLATE, &ctx, false)?),
            ScaffoldFile::new(GULPFILE, render(&plan)?),
        ];

        files.extend(
            STATIC_FILES
                .iter()
                .map(|(path, contents)| ScaffoldFile::new(*path, *contents)),
        );

        if let Some(stub) = credentials_stub(&plan.variant)? {
            files.push(stub);
        }

        Ok(Self { plan, files })
    }

    /// Get a rendered file by its relative path
    pub fn file(&self, path: &str) -> Option<&ScaffoldFile> {
        self.files.iter().find(|f| f.path == Path::new(path))
    }

    /// Write every file under `root`.
    ///
    /// Nothing is written if a file already exists and `force` is off.
    /// Each file is written to a temporary sibling and renamed into place.
    pub fn write(&self, root: &Path, force: bool) -> Result<()> {
        if !force {
            if let Some(existing) = self.files.iter().find(|f| root.join(&f.path).exists()) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "{} already exists, use --force to overwrite",
                        root.join(&existing.path).display()
                    ),
                )
                .into());
            }
        }

        for file in &self.files {
            write_atomic(&root.join(&file.path), &file.contents)?;
        }

        info!("Wrote {} files to {}", self.files.len(), root.display());
        Ok(())
    }
}

/// Site and author block of `_config.yml`
#[derive(Debug, Serialize)]
struct SiteSettings<'a> {
    title: &'a str,
    description: &'a str,
    url: &'a str,
    baseurl: &'a str,
    author: AuthorSettings<'a>,
}

#[derive(Debug, Serialize)]
struct AuthorSettings<'a> {
    name: &'a str,
    email: &'a str,
    uri: &'a str,
    bio: &'a str,
}

/// Serialize the free-form project values as YAML so Jekyll reads them back verbatim
fn site_settings(project: &ProjectOptions) -> Result<String> {
    let settings = SiteSettings {
        title: &project.name,
        description: &project.description,
        url: &project.url,
        baseurl: "",
        author: AuthorSettings {
            name: &project.author_name,
            email: &project.author_email,
            uri: &project.author_uri,
            bio: &project.author_bio,
        },
    };
    Ok(serde_yaml::to_string(&settings)?)
}

/// Placeholder credentials for the deploy target, when it reads a file
/// inside the project
fn credentials_stub(variant: &DeploymentVariant) -> Result<Option<ScaffoldFile>> {
    let Some(path) = variant.credentials_file() else {
        return Ok(None);
    };
    if !inside_project(Path::new(path)) {
        debug!("Credentials file {} is outside the project, no stub written", path);
        return Ok(None);
    }

    let stub = match variant {
        DeploymentVariant::ObjectStorage { .. } => serde_json::json!({
            "key": "",
            "secret": "",
            "bucket": "",
            "region": "",
            "distributionId": ""
        }),
        _ => serde_json::json!({
            "hostname": "",
            "username": "",
            "destination": ""
        }),
    };

    let mut contents = serde_json::to_string_pretty(&stub)?;
    contents.push('\n');
    Ok(Some(ScaffoldFile::new(path, contents)))
}

/// Relative paths made only of plain components stay under the project root
fn inside_project(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Write `contents` to a temporary sibling of `target`, then rename it into place
pub fn write_atomic(target: &Path, contents: &str) -> Result<()> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(target).map_err(|e| e.error)?;

    debug!("Wrote {}", target.display());
    Ok(())
}
