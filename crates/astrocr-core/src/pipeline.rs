//! Batch run over the input directory.
//!
//! A run moves through
//! `Idle -> Discovering -> ProcessingImages -> Normalizing -> Documenting -> Done`,
//! or ends in `Failed` when the engine is unavailable or no images exist.
//! Errors on individual images never fail the run.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use crate::aggregate::DomainAggregator;
use crate::error::{AstrocrError, OcrError, Result};
use crate::models::config::AstrocrConfig;
use crate::models::job::{ImageJob, OcrResult};
use crate::ocr::{create_recognizer, ImagePreprocessor, ImageProvider, TextRecognizer};
use crate::output::{
    ensure_dirs, validate_outputs, write_audit, write_documentation, write_domain_documents,
    ValidationReport,
};
use crate::tables::classify_and_parse;

/// Accepted image extensions (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Discovering,
    ProcessingImages,
    Normalizing,
    Documenting,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Discovering => "discovering",
            RunState::ProcessingImages => "processing images",
            RunState::Normalizing => "normalizing",
            RunState::Documenting => "documenting",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// State carried through one run.
#[derive(Debug)]
pub struct RunContext {
    pub config: AstrocrConfig,
    state: RunState,
    /// Results keyed by image filename, in processing order.
    pub results: IndexMap<String, OcrResult>,
}

impl RunContext {
    pub fn new(config: AstrocrConfig) -> Self {
        Self {
            config,
            state: RunState::Idle,
            results: IndexMap::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        info!("Run state: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Hooks for progress display. All methods default to no-ops.
pub trait RunObserver {
    fn on_discovered(&mut self, _jobs: &[ImageJob]) {}

    fn on_image_done(&mut self, _job: &ImageJob, _result: &OcrResult) {}
}

impl RunObserver for () {}

/// What a completed run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Images processed, including failed ones.
    pub processed: usize,
    pub failed: usize,
    /// Images that produced no usable table data.
    pub unclassified: usize,
    /// Data files written.
    pub written: Vec<PathBuf>,
    /// Markdown reports written.
    pub documents: Vec<PathBuf>,
    pub validation: Vec<ValidationReport>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.processed - self.failed
    }
}

/// The OCR pipeline: an image provider feeding a text recognizer.
pub struct Pipeline {
    recognizer: Box<dyn TextRecognizer>,
    provider: Box<dyn ImageProvider>,
}

impl Pipeline {
    pub fn new(recognizer: Box<dyn TextRecognizer>, provider: Box<dyn ImageProvider>) -> Self {
        Self {
            recognizer,
            provider,
        }
    }

    /// Build the configured recognizer and preprocessor.
    ///
    /// Fails with [`AstrocrError::DependencyMissing`] when the engine
    /// cannot start.
    pub fn from_config(config: &AstrocrConfig) -> Result<Self> {
        let recognizer = create_recognizer(config)?;
        let provider = ImagePreprocessor::from_config(&config.preprocessing);
        Ok(Self::new(recognizer, Box::new(provider)))
    }

    /// List jpg/jpeg/png files directly inside `input_dir`, sorted by name.
    /// Dot-files such as `._scan.png` are skipped.
    pub fn discover(input_dir: &Path) -> Result<Vec<ImageJob>> {
        let pattern = format!("{}/*", glob::Pattern::escape(&input_dir.to_string_lossy()));
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };

        let entries = glob::glob_with(&pattern, options)
            .map_err(|e| AstrocrError::Config(format!("invalid input directory: {}", e)))?;

        let mut jobs: Vec<ImageJob> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file() && has_image_extension(path))
            .map(ImageJob::new)
            .collect();

        jobs.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(jobs)
    }

    /// Prepare, recognize and parse one image, then write its audit file.
    ///
    /// Never fails: errors become a failed [`OcrResult`].
    pub fn process_image(&self, job: &ImageJob, tmp_dir: &Path) -> OcrResult {
        debug!("Processing {}", job.filename);

        let result = match self.recognize(job) {
            Ok(raw_text) => {
                let table_data = classify_and_parse(&raw_text, &job.filename);
                OcrResult::recognized(&job.filename, raw_text, table_data)
            }
            Err(e) => {
                warn!("Failed to process {}: {}", job.filename, e);
                OcrResult::failed(&job.filename, e)
            }
        };

        if let Err(e) = write_audit(tmp_dir, &job.stem(), &result) {
            warn!("Failed to write audit file for {}: {}", job.filename, e);
        }

        result
    }

    fn recognize(&self, job: &ImageJob) -> std::result::Result<String, OcrError> {
        let image = self.provider.prepare(&job.path)?;
        self.recognizer.recognize(&image)
    }

    /// Run every stage after engine start-up.
    pub fn run(&self, ctx: &mut RunContext, observer: &mut dyn RunObserver) -> Result<RunSummary> {
        ctx.transition(RunState::Discovering);
        let input_dir = ctx.config.input_dir();
        let jobs = match Self::discover(&input_dir) {
            Ok(jobs) if jobs.is_empty() => {
                ctx.transition(RunState::Failed);
                error!("No images found in {}", input_dir.display());
                return Err(AstrocrError::NoInputFound(input_dir));
            }
            Ok(jobs) => jobs,
            Err(e) => {
                ctx.transition(RunState::Failed);
                return Err(e);
            }
        };
        info!("Found {} image(s) to process", jobs.len());
        observer.on_discovered(&jobs);

        match self.process_all(ctx, &jobs, observer) {
            Ok(summary) => {
                ctx.transition(RunState::Done);
                Ok(summary)
            }
            Err(e) => {
                ctx.transition(RunState::Failed);
                error!("Run failed: {}", e);
                Err(e)
            }
        }
    }

    fn process_all(
        &self,
        ctx: &mut RunContext,
        jobs: &[ImageJob],
        observer: &mut dyn RunObserver,
    ) -> Result<RunSummary> {
        ctx.transition(RunState::ProcessingImages);
        let tmp_dir = ctx.config.tmp_dir();
        let mut summary = RunSummary::default();

        for job in jobs {
            let result = self.process_image(job, &tmp_dir);
            summary.processed += 1;
            if result.is_failed() {
                summary.failed += 1;
            } else if result.usable_table_data().is_none() {
                summary.unclassified += 1;
            }
            observer.on_image_done(job, &result);
            ctx.results.insert(job.filename.clone(), result);
        }

        ctx.transition(RunState::Normalizing);
        let mut aggregator = DomainAggregator::new();
        for result in ctx.results.values() {
            aggregator.absorb(result);
        }
        let (numerology, astrology) = aggregator.finish();
        let data_dir = ctx.config.data_dir();
        summary.written = write_domain_documents(&data_dir, &numerology, &astrology)?;

        ctx.transition(RunState::Documenting);
        let now = Local::now().naive_local();
        summary.documents = write_documentation(&ctx.config.docs_dir(), &ctx.results, &now)?;

        summary.validation = validate_outputs(&data_dir);

        info!(
            "Processed {} image(s): {} failed, {} without table data, {} data file(s) written",
            summary.processed,
            summary.failed,
            summary.unclassified,
            summary.written.len()
        );
        Ok(summary)
    }
}

/// Run the full pipeline described by `config`.
pub fn run(config: AstrocrConfig) -> Result<RunSummary> {
    execute(config, &mut ())
}

/// Run the full pipeline, reporting progress to `observer`.
///
/// Output directories are created first; if the OCR engine is then
/// unavailable the run stops before anything else is written.
pub fn execute(config: AstrocrConfig, observer: &mut dyn RunObserver) -> Result<RunSummary> {
    let mut ctx = RunContext::new(config);
    ensure_dirs(&ctx.config)?;

    let pipeline = match Pipeline::from_config(&ctx.config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            ctx.transition(RunState::Failed);
            error!("OCR engine unavailable: {}", e);
            return Err(e);
        }
    };

    pipeline.run(&mut ctx, observer)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
