//! Static registry of the build tasks a generated gulpfile can contain

use crate::core::{
    error::{GeneratorError, Result},
    task::{Action, StreamSpec, Task},
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ordered, immutable-per-run set of tasks
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed set of Jekyll build tasks
    pub fn standard() -> Self {
        let tasks = standard_tasks();
        let index = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (task.id.clone(), i))
            .collect();
        Self { tasks, index }
    }

    /// Add a task, rejecting duplicate identifiers
    pub fn register(&mut self, task: Task) -> Result<()> {
        if self.index.contains_key(&task.id) {
            return Err(GeneratorError::Composition(format!(
                "Task '{}' is already registered",
                task.id
            )));
        }

        debug!("Registering task {}", task.id);
        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Get a task by ID
    pub fn lookup(&self, id: &str) -> Result<&Task> {
        self.index
            .get(id)
            .map(|&i| &self.tasks[i])
            .ok_or_else(|| GeneratorError::UnknownTask(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Tasks in registration order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check that every dependency exists and the dependency graph is acyclic
    pub fn validate(&self) -> Result<()> {
        for task in &self.tasks {
            for dep in &task.dependencies {
                if dep == &task.id {
                    return Err(GeneratorError::Composition(format!(
                        "Task '{}' depends on itself",
                        task.id
                    )));
                }
                if !self.contains(dep) {
                    return Err(GeneratorError::Composition(format!(
                        "Task '{}' depends on '{}' which doesn't exist",
                        task.id, dep
                    )));
                }
            }
        }

        self.check_cycles()
    }

    fn check_cycles(&self) -> Result<()> {
        let mut visited = HashSet::new();
        let mut recursion_stack = Vec::new();

        for task in &self.tasks {
            if !visited.contains(&task.id) {
                self.dfs_check(&task.id, &mut visited, &mut recursion_stack)?;
            }
        }

        Ok(())
    }

    fn dfs_check(
        &self,
        id: &str,
        visited: &mut HashSet<String>,
        recursion_stack: &mut Vec<String>,
    ) -> Result<()> {
        visited.insert(id.to_string());
        recursion_stack.push(id.to_string());

        if let Ok(task) = self.lookup(id) {
            for dep in &task.dependencies {
                if recursion_stack.contains(dep) {
                    recursion_stack.push(dep.clone());
                    return Err(GeneratorError::Composition(format!(
                        "Circular dependency: {}",
                        recursion_stack.join(" -> ")
                    )));
                }
                if !visited.contains(dep) {
                    self.dfs_check(dep, visited, recursion_stack)?;
                }
            }
        }

        recursion_stack.pop();
        Ok(())
    }
}

fn stream(source: &str, transforms: &[&str], dest: &str, title: &str) -> Action {
    Action::Stream(StreamSpec {
        source: source.to_string(),
        transforms: transforms.iter().map(|t| t.to_string()).collect(),
        dest: dest.to_string(),
        title: title.to_string(),
    })
}

const COPY_BODY: &str = r#"() => {
  var images = gulp.src('.tmp/assets/images/**/*')
    .pipe(gulp.dest('dist/assets/images'))
    .pipe($.size({title: 'copied images'}));

  var fonts = gulp.src('.tmp/assets/fonts/**/*')
    .pipe(gulp.dest('dist/assets/fonts'))
    .pipe($.size({title: 'copied fonts'}));

  return merge(images, fonts);
}"#;

const OPTIMIZE_ASSETS_BODY: &str = r#"() => {
  var assets = $.useref.assets({searchPath: ['dist', '.tmp']});

  return gulp.src('dist/**/*.html')
    .pipe(assets)
    .pipe($.if('*.js', $.uglify({preserveComments: 'some'})))
    .pipe($.if('*.css', $.minifyCss()))
    .pipe($.revAll({
      quiet: true,
      ignore: ['.eot', '.svg', '.ttf', '.woff', '.woff2']
    }))
    .pipe(assets.restore())
    .pipe($.useref())
    .pipe($.revReplace())
    .pipe($.if('*.html', $.htmlmin({
      removeComments: true,
      removeCommentsFromCDATA: true,
      removeCDATASectionsFromCDATA: true,
      collapseWhitespace: true,
      collapseBooleanAttributes: true,
      removeAttributeQuotes: true,
      removeRedundantAttributes: true
    })))
    .pipe(gulp.dest('dist'))
    .pipe($.size({title: 'optimizations'}));
}"#;

const JSLINT_BODY: &str = r#"() => {
  return gulp.src('.tmp/assets/javascript/*.js')
    .pipe($.jshint('.jshintrc'))
    .pipe($.jshint.reporter());
}"#;

const SERVE_BODY: &str = r#"() => {
  browserSync({
    notify: true,
    server: {
      baseDir: ['dist', '.tmp']
    }
  });

  gulp.watch(['src/**/*.md',
              'src/**/*.html',
              'src/**/*.xml',
              'src/**/*.txt',
              'src/**/*.yml'],
              gulp.series('jekyll:dev', reload));
  gulp.watch('src/assets/javascript/**/*.js', gulp.series('javascript'));
  gulp.watch('src/assets/scss/**/*.scss', gulp.series('styles'));
  gulp.watch('src/assets/images/**/*', reload);
}"#;

fn standard_tasks() -> Vec<Task> {
    vec![
        Task::new(
            "clean:dist",
            "Deletes the directory the optimized site is output to",
            Action::trash(&["dist"]),
        )
        .writing("dist"),
        Task::new(
            "clean:assets",
            "Deletes the intermediate asset directory",
            Action::trash(&[".tmp"]),
        )
        .writing(".tmp"),
        Task::new(
            "clean:metadata",
            "Deletes Jekyll's incremental build metadata",
            Action::trash(&["src/.jekyll-metadata"]),
        )
        .writing("src/.jekyll-metadata"),
        Task::new(
            "jekyll:dev",
            "Compiles the site with the development configuration",
            Action::shell("jekyll build --quiet"),
        )
        .reading("src")
        .writing("dist"),
        Task::new(
            "jekyll:prod",
            "Compiles the site with the build configuration layered on top, so drafts and future posts stay unpublished",
            Action::shell("jekyll build --quiet --config _config.yml,_config.build.yml"),
        )
        .reading("src")
        .writing("dist"),
        Task::new(
            "styles",
            "Compiles the SASS entry point with sourcemaps and vendor prefixes",
            stream(
                "src/assets/scss/style.scss",
                &[
                    "$.sourcemaps.init()",
                    "$.sass({errLogToConsole: true})",
                    "$.autoprefixer('last 1 version', {cascade: true})",
                    "$.sourcemaps.write('.')",
                ],
                ".tmp/assets/stylesheets",
                "styles",
            ),
        )
        .reloading_preview()
        .reading("src/assets/scss")
        .writing(".tmp/assets/stylesheets"),
        Task::new(
            "javascript",
            "Concatenates the scripts into index.js with sourcemaps",
            stream(
                "src/assets/javascript/**/*.js",
                &[
                    "$.sourcemaps.init()",
                    "$.uglify({compress: false, preserveComments: 'all'})",
                    "$.groupConcat({'index.js': 'src/assets/javascript/**/*.js'})",
                    "$.sourcemaps.write('.')",
                ],
                ".tmp/assets/javascript",
                "javascript",
            ),
        )
        .reloading_preview()
        .reading("src/assets/javascript")
        .writing(".tmp/assets/javascript"),
        Task::new(
            "images",
            "Losslessly optimizes images, skipping ones already optimized",
            stream(
                "src/assets/images/**/*",
                &["$.cache($.imagemin({progressive: true, interlaced: true}))"],
                ".tmp/assets/images",
                "images",
            ),
        )
        .reading("src/assets/images")
        .writing(".tmp/assets/images"),
        Task::new(
            "fonts",
            "Copies fonts into the intermediate asset directory",
            stream("src/assets/fonts/**/*", &[], ".tmp/assets/fonts", "fonts"),
        )
        .reading("src/assets/fonts")
        .writing(".tmp/assets/fonts"),
        Task::new(
            "copy",
            "Copies optimized images and fonts into the output directory",
            Action::script(COPY_BODY),
        )
        .reading(".tmp/assets/images")
        .reading(".tmp/assets/fonts")
        .writing("dist/assets/images")
        .writing("dist/assets/fonts"),
        Task::new(
            "optimize-assets",
            "Minifies and cache-busts the CSS, JS and HTML of the compiled site",
            Action::script(OPTIMIZE_ASSETS_BODY),
        )
        .reading("dist")
        .reading(".tmp")
        .writing("dist"),
        Task::new(
            "jslint",
            "Checks script quality against .jshintrc",
            Action::script(JSLINT_BODY),
        )
        .reading(".tmp/assets/javascript"),
        Task::new(
            "doctor",
            "Checks the Jekyll configuration and URLs for errors",
            Action::shell("jekyll doctor"),
        ),
        Task::new(
            "serve",
            "Serves the site locally and live-reloads it on changes",
            Action::script(SERVE_BODY),
        )
        .reading("dist")
        .reading(".tmp"),
    ]
}
