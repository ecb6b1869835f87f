//! Test: Scaffold Output - generated project tree on disk

use crate::helpers::*;
use jekyllized::core::config::Permalinks;
use jekyllized::core::{GeneratorConfig, GeneratorError};
use jekyllized::Project;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn generate(config: &GeneratorConfig) -> TempDir {
    let dir = TempDir::new().unwrap();
    Project::render(config).unwrap().write(dir.path(), false).unwrap();
    dir
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

#[test]
fn test_generates_expected_files() {
    let dir = generate(&config_with_pipeline("  upload: \"none\"\n"));

    for path in [
        "Gemfile",
        "_config.yml",
        "_config.build.yml",
        "gulpfile.babel.js",
        "src/404.html",
        "src/about.md",
        "src/crossdomain.xml",
        "src/humans.txt",
        "src/index.html",
        "src/robots.txt",
    ] {
        assert!(dir.path().join(path).is_file(), "{} should exist", path);
    }
}

#[test]
fn test_config_contains_project_values() {
    let dir = generate(&config_with_pipeline("  upload: \"none\"\n"));

    assert_contains_all(
        &read(dir.path(), "_config.yml"),
        &[
            "title: jekyllized",
            "description: Tests for Jekyllized",
            "url: example.org",
            "name: Ola Nordmann",
            "email: ola.nordmann@email.com",
            "uri: homepage.com",
            "bio: I am a tester for tests",
            "permalink: pretty",
        ],
    );
}

#[test]
fn test_each_permalink_style_is_written() {
    for style in [
        Permalinks::Date,
        Permalinks::None,
        Permalinks::Pretty,
        Permalinks::Ordinal,
    ] {
        let mut config = config_with_pipeline("  upload: \"none\"\n");
        config.project.permalinks = style;

        let dir = generate(&config);
        assert!(read(dir.path(), "_config.yml").contains(&format!("permalink: {}", style)));
    }
}

#[test]
fn test_build_config_values() {
    let dir = generate(&GeneratorConfig::default());

    assert_contains_all(
        &read(dir.path(), "_config.build.yml"),
        &["future: false", "show_drafts: false", "limit_posts: 0"],
    );
}

#[test]
fn test_humans_txt_names_the_author() {
    let dir = generate(&config_with_pipeline("  upload: \"none\"\n"));
    assert!(read(dir.path(), "src/humans.txt").contains("Ola Nordmann -- <role> -- @"));
}

#[test]
fn test_rsync_project_gets_credentials_stub() {
    let dir = generate(&config_with_pipeline("  upload: \"rsync\"\n"));

    let stub: serde_json::Value =
        serde_json::from_str(&read(dir.path(), "rsync-credentials.json")).unwrap();
    assert_eq!(stub["hostname"], "");
    assert!(read(dir.path(), ".gitignore").contains("rsync-credentials.json"));
    assert!(read(dir.path(), "gulpfile.babel.js").contains("gulp.task(\"deploy:rsync\""));
}

#[test]
fn test_existing_files_are_not_overwritten() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Gemfile"), "# mine\n").unwrap();

    let project = Project::render(&GeneratorConfig::default()).unwrap();
    let err = project.write(dir.path(), false).unwrap_err();

    assert!(matches!(err, GeneratorError::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists));
    assert_eq!(read(dir.path(), "Gemfile"), "# mine\n");
    // Nothing else was written either
    assert!(!dir.path().join("_config.yml").exists());
}

#[test]
fn test_force_overwrites_existing_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Gemfile"), "# mine\n").unwrap();

    let project = Project::render(&GeneratorConfig::default()).unwrap();
    project.write(dir.path(), true).unwrap();

    assert_ne!(read(dir.path(), "Gemfile"), "# mine\n");
    assert!(dir.path().join("_config.yml").is_file());
}

#[test]
fn test_yaml_special_characters_round_trip() {
    let mut config = config_with_pipeline("  upload: \"none\"\n");
    config.project.description = "Notes: on Rust #1".to_string();
    config.project.author_bio = "*Writes* code & tests: daily # mostly".to_string();

    let dir = generate(&config);
    let site: serde_yaml::Value = serde_yaml::from_str(&read(dir.path(), "_config.yml")).unwrap();

    assert_eq!(site["title"], "jekyllized");
    assert_eq!(site["description"], "Notes: on Rust #1");
    assert_eq!(site["author"]["name"], "Ola Nordmann");
    assert_eq!(site["author"]["bio"], "*Writes* code & tests: daily # mostly");
    assert_eq!(site["permalink"], "pretty");
}

#[test]
fn test_credentials_stub_stays_inside_project() {
    let parent = TempDir::new().unwrap();
    let root = parent.path().join("site");

    let config = config_with_pipeline(
        r#"  upload: "rsync"
  params:
    rsync_credentials: "../escaped.json"
"#,
    );
    Project::render(&config).unwrap().write(&root, false).unwrap();

    assert!(!parent.path().join("escaped.json").exists());
    assert!(root.join("_config.yml").is_file());
}
