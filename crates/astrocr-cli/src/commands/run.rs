//! Run command - process the input directory end to end.

use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use astrocr_core::{execute, ImageJob, OcrResult, RunObserver, RunSummary, ValidationStatus};

use super::GlobalOpts;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// Drives an indicatif bar from pipeline callbacks.
struct ProgressObserver {
    style: ProgressStyle,
    bar: Option<ProgressBar>,
}

impl RunObserver for ProgressObserver {
    fn on_discovered(&mut self, jobs: &[ImageJob]) {
        let bar = ProgressBar::new(jobs.len() as u64);
        bar.set_style(self.style.clone());
        self.bar = Some(bar);
    }

    fn on_image_done(&mut self, job: &ImageJob, result: &OcrResult) {
        if let Some(bar) = &self.bar {
            if let Some(error) = result.error() {
                bar.println(format!("{} {}: {}", style("✗").red(), job.filename, error));
            }
            bar.set_message(job.filename.clone());
            bar.inc(1);
        }
    }
}

pub fn run(args: RunArgs, opts: &GlobalOpts) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = opts.load_config()?;

    println!(
        "{} Scanning {}",
        style("ℹ").blue(),
        config.input_dir().display()
    );

    let summary = if args.no_progress {
        execute(config, &mut ())?
    } else {
        let mut observer = ProgressObserver {
            style: ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
            bar: None,
        };
        let summary = execute(config, &mut observer);
        if let Some(bar) = &observer.bar {
            bar.finish_and_clear();
        }
        summary?
    };

    print_summary(&summary, start);
    Ok(())
}

fn print_summary(summary: &RunSummary, start: Instant) {
    println!(
        "{} Processed {} image(s) in {:?}",
        style("✓").green(),
        summary.processed,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} without table data",
        style(summary.succeeded()).green(),
        style(summary.failed).red(),
        style(summary.unclassified).yellow()
    );

    if summary.written.is_empty() {
        println!("{} No data files written", style("⚠").yellow());
    } else {
        println!();
        println!("{}", style("Data files:").bold());
        for path in &summary.written {
            println!("  - {}", path.display());
        }
    }

    let invalid: Vec<_> = summary
        .validation
        .iter()
        .filter(|r| matches!(r.status, ValidationStatus::Invalid(_)))
        .collect();
    if !invalid.is_empty() {
        println!();
        println!("{}", style("Invalid data files:").red());
        for report in invalid {
            println!("  - {}: {}", report.path.display(), report.status);
        }
    }

    println!();
    println!("{}", style("Reports:").bold());
    for path in &summary.documents {
        println!("  - {}", path.display());
    }
}
