//! Validate command - re-read data files against their schemas.

use console::style;

use astrocr_core::{validate_outputs, ValidationStatus};

use super::GlobalOpts;

pub fn run(opts: &GlobalOpts) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let data_dir = config.data_dir();

    println!("{} {}", style("Validating").bold(), data_dir.display());

    let reports = validate_outputs(&data_dir);
    let mut invalid = 0;

    for report in &reports {
        let mark = match &report.status {
            ValidationStatus::Valid => style("✓").green(),
            ValidationStatus::Missing => style("-").dim(),
            ValidationStatus::Invalid(_) => {
                invalid += 1;
                style("✗").red()
            }
        };
        println!("  {} {} ({})", mark, report.file, report.status);
    }

    if invalid > 0 {
        anyhow::bail!("{} data file(s) failed validation", invalid);
    }

    Ok(())
}
