//! Sass compilation stage.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Compiles SCSS item contents to CSS using the grass crate, a pure Rust
//! implementation that targets dart-sass.

use grass::{Options, OutputStyle};
use sassbundle_pipeline::{FileItem, PipelineError, PipelineStage};

/// Compile Sass source to CSS.
///
/// Output is `Compressed` when minification is enabled and `Expanded`
/// otherwise (grass does not implement dart-sass's removed `nested`
/// style). The item's directory goes on the load path so relative
/// `@use`/`@import` references resolve next to the entry file.
#[derive(Debug, Clone, Copy)]
pub struct CompileStage {
    minified: bool,
}

impl CompileStage {
    /// Create a compile stage.
    pub fn new(minified: bool) -> Self {
        Self { minified }
    }
}

impl PipelineStage for CompileStage {
    fn name(&self) -> &str {
        "compile"
    }

    fn run(&self, mut item: FileItem) -> Result<FileItem, PipelineError> {
        let scss = item.contents_str().ok_or_else(|| {
            PipelineError::stage(
                "compile",
                format!("{} is not valid UTF-8", item.path().display()),
            )
        })?;

        let style = if self.minified {
            OutputStyle::Compressed
        } else {
            OutputStyle::Expanded
        };

        let load_paths = [item.resolve_dir()];
        let options = Options::default().load_paths(&load_paths).style(style);

        let css = grass::from_string(scss, &options)
            .map_err(|e| PipelineError::stage("compile", e.to_string()))?;

        item.set_contents(css.into_bytes());
        item.set_extension("css");
        Ok(item)
    }
}
