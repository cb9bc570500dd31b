use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::options::RenderOptions;
use crate::process::SceneOutput;
use crate::script::{quote_arg, ScriptBuilder};

pub const MARKUP_FILE_NAME: &str = "scene.xml";
pub const SCRIPT_FILE_NAME: &str = "scene.ecs";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Output directory does not exist: {0}")]
    MissingDirectory(PathBuf),
}

/// Locations of the files written by [`write_scene_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenePaths {
    pub markup: PathBuf,
    pub script: PathBuf,
}

/// The full renderer configuration: the markup input, the scene's own
/// directives, then the invocation parameters.
pub fn compose_invocation(markup_path: &Path, script: &str, options: &RenderOptions) -> String {
    let mut builder = ScriptBuilder::new();
    builder
        .directive("-i", [quote_arg(&markup_path.display().to_string())])
        .append(script)
        .numbers("-size", &[f64::from(options.width), f64::from(options.height)])
        .directive("-renderer", [options.renderer.as_str()])
        .switch("-fullscreen", options.fullscreen)
        .directive("-accel", [options.spatial_index_structure.as_str()])
        .numbers("-gamma", &[options.gamma])
        .numbers("-depth", &[f64::from(options.depth)])
        .numbers("-spp", &[f64::from(options.spp)])
        .switch("--no-logging", !options.logging);
    if options.render_to_image {
        let image = options
            .render_to_image_path
            .clone()
            .unwrap_or_else(|| default_image_path(markup_path));
        builder.directive("-o", [quote_arg(&image.display().to_string())]);
    }
    builder.finish()
}

/// Write the markup and the composed script into an existing directory.
pub fn write_scene_files(
    dir: &Path,
    output: &SceneOutput,
    options: &RenderOptions,
) -> Result<ScenePaths, OutputError> {
    if !dir.is_dir() {
        return Err(OutputError::MissingDirectory(dir.to_path_buf()));
    }

    let markup = dir.join(MARKUP_FILE_NAME);
    let script = dir.join(SCRIPT_FILE_NAME);
    fs::write(&markup, &output.markup)?;
    fs::write(&script, compose_invocation(&markup, &output.script, options))?;

    log::info!("Wrote {} and {}", markup.display(), script.display());
    Ok(ScenePaths { markup, script })
}

fn default_image_path(markup_path: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let dir = markup_path.parent().unwrap_or_else(|| Path::new("."));
    dir.join(format!("{}.tga", millis))
}
