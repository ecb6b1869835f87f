//! Test: Gulpfile Output - rendered entry points and deploy tasks

use crate::helpers::*;
use jekyllized::core::config::{PipelineConfiguration, UploadChoice};

#[test]
fn test_identical_config_renders_identical_bytes() {
    for choice in [
        UploadChoice::AmazonS3,
        UploadChoice::Rsync,
        UploadChoice::GhPages,
        UploadChoice::None,
    ] {
        let config = pipeline_for(choice);
        assert_eq!(gulpfile_for(&config), gulpfile_for(&config));
    }
}

#[test]
fn test_s3_gulpfile() {
    let gulpfile = gulpfile_for(&pipeline_for(UploadChoice::AmazonS3));

    assert_contains_all(
        &gulpfile,
        &[
            "import parallelize from 'concurrent-transform';",
            "// Run after: optimize-assets\ngulp.task(\"deploy:s3\"",
            "aws-credentials.json",
            "gulp.task(\"deploy\", gulp.series(\n  \"deploy:s3\"\n));",
        ],
    );
}

#[test]
fn test_rsync_gulpfile() {
    let gulpfile = gulpfile_for(&pipeline_for(UploadChoice::Rsync));

    assert_contains_all(
        &gulpfile,
        &[
            "gulp.task(\"deploy:rsync\"",
            "rsync-credentials.json",
            "gulp.task(\"deploy\", gulp.series(\n  \"deploy:rsync\"\n));",
        ],
    );
    assert!(!gulpfile.contains("concurrent-transform"));
}

#[test]
fn test_no_upload_gulpfile_has_no_deploy() {
    let gulpfile = gulpfile_for(&pipeline_for(UploadChoice::None));

    assert!(!gulpfile.contains("gulp.task(\"deploy"));
    assert!(!gulpfile.contains("credentials"));
    assert_contains_all(
        &gulpfile,
        &[
            "gulp.task(\"default\"",
            "gulp.task(\"build\"",
            "gulp.task(\"optimize\"",
            "gulp.task(\"rebuild\"",
            "gulp.task(\"check\"",
        ],
    );
}

#[test]
fn test_parallel_members_keep_declared_order() {
    let gulpfile = gulpfile_for(&PipelineConfiguration::default());
    assert!(gulpfile.contains("gulp.parallel(\"styles\", \"javascript\", \"fonts\", \"images\", \"copy\")"));
}

#[test]
fn test_leaf_tasks_precede_entry_points() {
    let gulpfile = gulpfile_for(&pipeline_for(UploadChoice::GhPages));

    let last_leaf = gulpfile.find("gulp.task(\"deploy:gh-pages\"").unwrap();
    let first_entry = gulpfile.find("gulp.task(\"default\"").unwrap();
    assert!(last_leaf < first_entry);

    let clean = gulpfile.find("gulp.task(\"clean:dist\"").unwrap();
    let serve = gulpfile.find("gulp.task(\"serve\"").unwrap();
    assert!(clean < serve);
}
