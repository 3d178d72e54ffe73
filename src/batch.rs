use crate::error::{ConversionError, Result};
use crate::resolve::{resolve_target_size, TargetSpec};
use crate::transform::{load_image, transform_image, EncodingSpec};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Input extensions picked up from the input directory (case-insensitive).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const OUTPUT_EXTENSION: &str = "webp";

/// Everything a batch run needs, assembled once from the CLI arguments.
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub target: TargetSpec,
    pub encoding: EncodingSpec,
    pub overwrite: bool,
}

/// Result of attempting one candidate file.
#[derive(Debug)]
pub enum Outcome {
    Processed {
        input: PathBuf,
        output: PathBuf,
    },
    Skipped {
        input: PathBuf,
        output: PathBuf,
        reason: SkipReason,
    },
    Failed {
        input: PathBuf,
        error: ConversionError,
    },
}

/// Why a candidate was skipped rather than converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The output file already exists and `--overwrite` was not given.
    AlreadyExists,
    /// An earlier candidate (in sorted order) maps to the same output file,
    /// e.g. `a.jpg` and `a.png` both producing `a.webp`.
    DuplicateTarget,
}

/// Aggregate counts for a finished run. The run failed iff `failed > 0`;
/// skips never count against success.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// List the candidate files of `input_dir`, sorted by name for a
/// reproducible run order. Subdirectories are never entered.
pub fn collect_image_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ConversionError::InputDirNotFound(input_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_supported_image(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Output path for one candidate: `<stem>.webp` inside `output_dir`.
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or(input_path.as_os_str());
    output_dir.join(format!("{}.{}", stem.to_string_lossy(), OUTPUT_EXTENSION))
}

/// Convert every supported image in the input directory.
///
/// A missing input directory is the only fatal error once the options are
/// validated; anything that goes wrong with a single file is recorded as a
/// `Failed` outcome and the batch keeps going. Files are processed in
/// parallel but outcomes are reported in candidate order, so stdout is
/// identical from run to run.
///
/// When several inputs share a stem (`a.jpg` and `a.png` both map to
/// `a.webp`), only the first in sorted order is converted; the rest are
/// skipped. Claiming the output paths up front keeps the winner and the
/// counts independent of thread scheduling.
pub fn run_batch(options: &BatchOptions) -> Result<RunSummary> {
    let files = collect_image_files(&options.input_dir)?;

    fs::create_dir_all(&options.output_dir)
        .map_err(|_| ConversionError::DirectoryCreationFailed(options.output_dir.clone()))?;

    if files.is_empty() {
        println!("No JPG/JPEG/PNG images found in the input directory.");
        return Ok(RunSummary::default());
    }

    let mut claimed = HashSet::new();
    let tasks: Vec<(&PathBuf, PathBuf, bool)> = files
        .iter()
        .map(|input_path| {
            let output_path = output_path_for(input_path, &options.output_dir);
            let first_claim = claimed.insert(output_path.clone());
            (input_path, output_path, first_claim)
        })
        .collect();

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    let outcomes: Vec<Outcome> = tasks
        .par_iter()
        .map(|(input_path, output_path, first_claim)| {
            let outcome = if *first_claim {
                process_file(input_path, output_path, options)
            } else {
                Outcome::Skipped {
                    input: input_path.to_path_buf(),
                    output: output_path.clone(),
                    reason: SkipReason::DuplicateTarget,
                }
            };
            progress.inc(1);
            outcome
        })
        .collect();

    progress.finish_and_clear();

    let mut summary = RunSummary::default();
    for outcome in &outcomes {
        match outcome {
            Outcome::Processed { input, output } => {
                summary.processed += 1;
                println!("✅ {} -> {}", file_name(input), file_name(output));
            }
            Outcome::Skipped {
                input,
                output,
                reason,
            } => {
                summary.skipped += 1;
                match reason {
                    SkipReason::AlreadyExists => println!(
                        "⏭️  Skipping (exists, use --overwrite): {}",
                        file_name(output)
                    ),
                    SkipReason::DuplicateTarget => println!(
                        "⏭️  Skipping {} (duplicate output name {})",
                        file_name(input),
                        file_name(output)
                    ),
                }
            }
            Outcome::Failed { input, error } => {
                summary.failed += 1;
                eprintln!("❌ Failed to process {}: {}", file_name(input), error);
            }
        }
    }

    println!(
        "📊 Finished. Processed: {}, skipped: {}, failed: {}",
        summary.processed, summary.skipped, summary.failed
    );

    Ok(summary)
}

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

fn process_file(input_path: &Path, output_path: &Path, options: &BatchOptions) -> Outcome {
    if output_path.exists() && !options.overwrite {
        return Outcome::Skipped {
            input: input_path.to_path_buf(),
            output: output_path.to_path_buf(),
            reason: SkipReason::AlreadyExists,
        };
    }

    match convert_file(input_path, output_path, options) {
        Ok(()) => Outcome::Processed {
            input: input_path.to_path_buf(),
            output: output_path.to_path_buf(),
        },
        Err(error) => Outcome::Failed {
            input: input_path.to_path_buf(),
            error,
        },
    }
}

fn convert_file(input_path: &Path, output_path: &Path, options: &BatchOptions) -> Result<()> {
    let decoded = load_image(input_path)?;
    let resolved = resolve_target_size(decoded.dimensions(), &options.target);
    let encoded = transform_image(decoded, resolved, &options.encoding)?;
    fs::write(output_path, encoded)?;
    Ok(())
}
