//! Command-line interface for batch classification of CSV frieze descriptions

use crate::algorithm::pipeline::analyse_with_progress;
use crate::io::configuration::{
    DEFAULT_MIN_OVERLAP, EngineConfig, INPUT_EXTENSION, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::ingest::CsvDialect;
use crate::io::progress::ProgressManager;
use crate::math::tolerance::Tolerance;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "frieze")]
#[command(
    author,
    version,
    about = "Classify frieze patterns and draw their symmetries as SVG"
)]
/// Command-line arguments for the frieze classifier
pub struct Cli {
    /// Input CSV file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Matching tolerance as a fraction of the bounding-box diagonal, capped at a
    /// fifth of the closest spacing between primitives
    #[arg(short, long, value_name = "FRACTION", conflicts_with = "absolute_tolerance")]
    pub tolerance: Option<f64>,

    /// Matching tolerance as a fixed distance in input units
    #[arg(short, long, value_name = "DISTANCE")]
    pub absolute_tolerance: Option<f64>,

    /// Share of primitives a symmetry must map inside the sampled strip
    #[arg(short, long, value_name = "FRACTION", default_value_t = DEFAULT_MIN_OVERLAP)]
    pub min_overlap: f64,

    /// Row layout of the CSV input
    #[arg(short, long, value_enum, default_value_t = CsvDialect::Points)]
    pub format: CsvDialect,

    /// CSV field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Give up on a file after this many milliseconds of symmetry search
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration built from the defaults and the given flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the delimiter is not a single-byte character or
    /// any resulting parameter fails [`EngineConfig::validate`].
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::default().with_dialect(self.format);

        if let Some(fraction) = self.tolerance {
            config = config.with_tolerance(Tolerance::Relative(fraction));
        }
        if let Some(distance) = self.absolute_tolerance {
            config = config.with_tolerance(Tolerance::Absolute(distance));
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_time_budget(Duration::from_millis(ms));
        }
        config.detector.min_overlap = self.min_overlap;
        config.ingest.delimiter = u8::try_from(self.delimiter).map_err(|err| {
            invalid_parameter("delimiter", &self.delimiter, &err)
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Counts reported at the end of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files classified and written
    pub classified: usize,
    /// Files the engine could not classify
    pub failed: usize,
    /// Files skipped because their output already existed
    pub skipped: usize,
}

/// Orchestrates batch processing of CSV files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    config: EngineConfig,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the flags do not form a valid configuration.
    pub fn new(cli: Cli) -> Result<Self> {
        let config = cli.engine_config()?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            config,
            progress_manager,
        })
    }

    /// Process files according to CLI arguments
    ///
    /// Engine failures are reported per file and do not stop the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is unusable or a file cannot be read or written
    pub fn process(&mut self) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        let files = self.collect_files(&mut summary)?;

        if files.is_empty() {
            info!(skipped = summary.skipped, "nothing to process");
            return Ok(summary);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            if self.process_file(file, index)? {
                summary.classified += 1;
            } else {
                summary.failed += 1;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        info!(
            classified = summary.classified,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch complete"
        );
        Ok(summary)
    }

    fn collect_files(&self, summary: &mut BatchSummary) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        let candidates = if target.is_file() {
            if !has_input_extension(target) {
                return Err(file_system_error(
                    target,
                    "open target",
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "target file must have a .csv extension",
                    ),
                ));
            }
            vec![target.clone()]
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target)
                .map_err(|err| file_system_error(target, "read directory", err))?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|err| file_system_error(target, "read directory", err))?
                    .path();
                if path.is_file() && has_input_extension(&path) {
                    files.push(path);
                }
            }
            files.sort();
            files
        } else {
            return Err(file_system_error(
                target,
                "open target",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "target must be a CSV file or directory",
                ),
            ));
        };

        Ok(candidates
            .into_iter()
            .filter(|path| {
                let keep = self.should_process_file(path);
                if !keep {
                    summary.skipped += 1;
                }
                keep
            })
            .collect())
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    // Allow print for reporting results and per-file failures to the user
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<bool> {
        let output_path = output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let content = std::fs::read(input_path)
            .map_err(|err| file_system_error(input_path, "read input", err))?;

        let progress = &mut self.progress_manager;
        let outcome = analyse_with_progress(&content, &self.config, |stage| {
            if let Some(pm) = progress.as_mut() {
                pm.complete_stage(index, stage);
            }
        });

        let analysis = match outcome {
            Ok(analysis) => analysis,
            Err(err) if err.is_engine_failure() => {
                warn!(input = %input_path.display(), error = %err, "classification failed");
                if let Some(ref mut pm) = self.progress_manager {
                    pm.complete_file(index, "failed");
                }
                if !self.cli.quiet {
                    eprintln!("{}: {err}", input_path.display());
                }
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        std::fs::write(&output_path, &analysis.svg)
            .map_err(|err| file_system_error(&output_path, "write output", err))?;

        let group = analysis.classification.group();
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, group.name());
        }
        println!(
            "{}: {} ({}) period {:.3}",
            input_path.display(),
            group.name(),
            group.conway_name(),
            analysis.classification.period()
        );

        Ok(true)
    }
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
}

/// Output path for an input file: `<stem>_frieze.svg` beside it
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
