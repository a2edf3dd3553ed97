//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use astrocr_core::AstrocrConfig;

use super::GlobalOpts;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "ocr.page_segmentation_mode")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a plain string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, opts: &GlobalOpts) -> anyhow::Result<()> {
    let config_path = opts.config_path();

    match args.command {
        ConfigCommand::Show => show_config(&config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, &config_path),
        ConfigCommand::Get { key } => get_config(&config_path, &key),
        ConfigCommand::Set { key, value } => set_config(&config_path, &key, &value),
        ConfigCommand::Path => show_path(&config_path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<AstrocrConfig> {
    if path.exists() {
        Ok(AstrocrConfig::from_file(path)?)
    } else {
        Ok(AstrocrConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(args: InitArgs, default_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| default_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    AstrocrConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let parsed = parse_value(value);

    let mut json = serde_json::to_value(&config)?;
    assign(&mut json, key, parsed.clone())?;

    // Round-trip through the typed config so bad values are rejected.
    let config: AstrocrConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'astrocr config init' to create a configuration file.");
    }

    Ok(())
}

/// JSON if it parses, otherwise a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Replace an existing leaf addressed by a dotted key.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut parent = json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            parent = parent
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let object = parent
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !object.contains_key(leaf) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(leaf.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("6"), json!(6));
        assert_eq!(parse_value("false"), json!(false));
        assert_eq!(parse_value("/usr/bin/tesseract"), json!("/usr/bin/tesseract"));
    }

    #[test]
    fn test_lookup_dotted_key() {
        let json = serde_json::to_value(AstrocrConfig::default()).unwrap();
        assert_eq!(lookup(&json, "ocr.page_segmentation_mode"), Some(&json!(6)));
        assert_eq!(lookup(&json, "paths.data_dir"), Some(&json!("data")));
        assert_eq!(lookup(&json, "ocr.nope"), None);
    }

    #[test]
    fn test_assign_round_trips_into_config() {
        let mut json = serde_json::to_value(AstrocrConfig::default()).unwrap();
        assign(&mut json, "preprocessing.max_dimension", json!(1500)).unwrap();
        assign(&mut json, "ocr.backend", json!("onnx")).unwrap();

        let config: AstrocrConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.preprocessing.max_dimension, 1500);
        assert_eq!(config.ocr.backend, astrocr_core::OcrBackend::Onnx);
    }

    #[test]
    fn test_assign_rejects_unknown_keys() {
        let mut json = serde_json::to_value(AstrocrConfig::default()).unwrap();
        assert!(assign(&mut json, "ocr.missing", json!(1)).is_err());
        assert!(assign(&mut json, "nowhere.at_all", json!(1)).is_err());
    }

    #[test]
    fn test_set_then_get_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        set_config(&path, "ocr.language", "pol").unwrap();

        let config = AstrocrConfig::from_file(&path).unwrap();
        assert_eq!(config.ocr.language, "pol");
    }
}
