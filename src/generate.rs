//! The generation run: parse, diff, render, encode, snapshot.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    diff::stale_files,
    encode::write_png,
    error::{UishotError, UishotResult},
    manifest,
    render::{Panel, PanelSettings},
    widgets::{Theme, builtin_registry},
};

/// Options for one run. Defaults mirror the conventional project layout:
/// the manifest lives in the source tree, outputs and the snapshot under
/// the build directory.
#[derive(Clone, Debug)]
pub struct GeneratorOpts {
    pub config_file: PathBuf,
    pub look_and_feel: String,
    pub output_directory: PathBuf,
    pub saved_config_file: PathBuf,
    /// Paint the panel background in the theme's surface color instead of
    /// leaving it transparent.
    pub opaque: bool,
}

impl GeneratorOpts {
    pub fn new(look_and_feel: impl Into<String>) -> Self {
        Self {
            config_file: PathBuf::from("src/site/image-generator.json"),
            look_and_feel: look_and_feel.into(),
            output_directory: PathBuf::from("target/generated-site/resources/images"),
            saved_config_file: PathBuf::from("target/generated-site/image-generator.json"),
            opaque: false,
        }
    }
}

/// What a run did.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    /// Filenames rendered this run, in the order they were processed.
    pub rendered: Vec<String>,
    /// Descriptors skipped because they matched the snapshot.
    pub skipped: usize,
}

/// Execute a full generation run.
///
/// The snapshot is rewritten only after every stale image has been rendered
/// and encoded, so the next run always diffs against the last fully
/// successful state. Any failure aborts the run with the snapshot untouched.
#[tracing::instrument(skip_all, fields(config = %opts.config_file.display()))]
pub fn run(opts: &GeneratorOpts) -> UishotResult<RunStats> {
    let current = manifest::parse_file(&opts.config_file, true)?;
    let previous = manifest::parse_file(&opts.saved_config_file, false)?;

    ensure_output_directory(&opts.output_directory)?;

    let theme = Theme::from_name(&opts.look_and_feel)?;
    let registry = builtin_registry(theme);
    let mut panel = Panel::new(PanelSettings {
        clear_rgba: opts.opaque.then_some(theme.surface),
    });

    let stale = stale_files(&current, &previous);
    let mut stats = RunStats {
        rendered: Vec::with_capacity(stale.len()),
        skipped: current.len() - stale.len(),
    };

    for file in stale {
        let spec = &current[&file];
        tracing::info!(%file, class = %spec.class, "creating image file");

        let mut widget = registry.construct(&spec.class, &spec.args)?;
        for (name, value) in &spec.properties {
            widget.put_client_property(name, value.clone());
        }

        let buffer = panel.render(widget.as_ref(), spec)?;
        let out_path = opts.output_directory.join(format!("{file}.png"));
        write_png(&buffer, &out_path)?;
        stats.rendered.push(file);
    }

    save_snapshot(&opts.config_file, &opts.saved_config_file)?;
    tracing::debug!(
        rendered = stats.rendered.len(),
        skipped = stats.skipped,
        "run complete"
    );
    Ok(stats)
}

fn ensure_output_directory(dir: &Path) -> UishotResult<()> {
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => Err(UishotError::output_directory(format!(
            "'{}' exists but is not a directory",
            dir.display()
        ))),
        Ok(meta) if meta.permissions().readonly() => Err(UishotError::output_directory(format!(
            "'{}' exists but is not writable",
            dir.display()
        ))),
        Ok(_) => Ok(()),
        Err(_) => fs::create_dir_all(dir).map_err(|e| {
            UishotError::output_directory(format!("unable to create '{}': {e}", dir.display()))
        }),
    }
}

/// Byte-for-byte copy of the manifest to the snapshot path, so the next
/// run's lenient parse sees exactly what this run rendered from.
fn save_snapshot(config: &Path, snapshot: &Path) -> UishotResult<()> {
    if let Some(parent) = snapshot.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            UishotError::write(format!("unable to create '{}': {e}", parent.display()))
        })?;
    }
    fs::copy(config, snapshot).map_err(|e| {
        UishotError::write(format!(
            "unable to copy '{}' to '{}': {e}",
            config.display(),
            snapshot.display()
        ))
    })?;
    Ok(())
}
