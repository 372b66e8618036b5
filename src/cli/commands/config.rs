//! `fleetdash config` command - Configuration management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::{DEFAULT_REFRESH_SECS, DEFAULT_TIMEOUT_SECS};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., api_url, refresh_secs)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of the local .fleetdash.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the local .fleetdash.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("api_url", "Base URL of the fleet API"),
    ("refresh_secs", "Seconds between refreshes in `fleetdash watch`"),
    ("timeout_secs", "Request timeout in seconds"),
    (
        "default_sort",
        "Sort order when --sort is not given (model-asc, year-desc, ...)",
    ),
    (
        "default_format",
        "Default output format (cards, tsv, json, etc.)",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let mut config = Config::load();
    if let Some(ref url) = global.api_url {
        config.api_url = Some(url.clone());
    }
    if let Some(secs) = global.timeout {
        config.timeout_secs = Some(secs);
    }

    if let Some(key) = &args.key {
        let value = get_config_value(&config, key)
            .ok_or_else(|| miette::miette!("Unknown configuration key '{}'", key))?;
        println!("{}", value);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        let value = get_config_value(&config, key).unwrap_or_default();
        println!("  {}: {}", style(key).cyan(), style(value).yellow());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags (--api-url, --timeout)");
    println!("  2. Environment variables (FLEETDASH_API_URL, FLEETDASH_REFRESH_SECS, FLEETDASH_TIMEOUT_SECS)");
    println!("  3. Local config (./.fleetdash.yaml)");
    println!("  4. Global config (~/.config/fleetdash/config.yaml)");
    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    check_key(&args.key)?;
    check_value(&args.key, &args.value)?;
    let config_path = config_path(args.global)?;

    let mut config_map = read_mapping(&config_path)?;
    config_map.insert(
        serde_yml::Value::String(args.key.clone()),
        typed_value(&args.key, &args.value),
    );

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    println!(
        "{} Set {} {} {} in {}",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        config_path.display()
    );
    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    check_key(&args.key)?;
    let config_path = config_path(args.global)?;

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    if config_map
        .remove(serde_yml::Value::String(args.key.clone()))
        .is_none()
    {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    println!(
        "{} Removed {} from {}",
        style("✓").green(),
        style(&args.key).cyan(),
        config_path.display()
    );
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!(
            "  {} {}",
            style("Global:").cyan(),
            style("(no home directory)").dim()
        ),
    }
    if let Some(path) = Config::local_config_path() {
        print_path("Local: ", &path);
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'fleetdash config set <key> <value>' to set a value.").dim()
    );
    Ok(())
}

// Helper functions

fn print_path(label: &str, path: &std::path::Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    let state = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("          {}", state);
}

fn config_path(global: bool) -> Result<PathBuf> {
    let path = if global {
        Config::global_config_path()
    } else {
        Config::local_config_path()
    };
    path.ok_or_else(|| miette::miette!("Could not determine config directory"))
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "Run 'fleetdash config keys' to list valid keys",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

fn check_value(key: &str, value: &str) -> Result<()> {
    match key {
        "refresh_secs" | "timeout_secs" => value
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| miette::miette!("{} must be a whole number of seconds", key)),
        "default_sort" => {
            <crate::core::SortKey as clap::ValueEnum>::from_str(value, true)
                .map(|_| ())
                .map_err(|e| miette::miette!("Invalid sort '{}': {}", value, e))
        }
        _ => Ok(()),
    }
}

/// Numeric keys are stored as YAML integers so they load back typed
fn typed_value(key: &str, value: &str) -> serde_yml::Value {
    match key {
        "refresh_secs" | "timeout_secs" => value
            .parse::<u64>()
            .map(|n| serde_yml::Value::Number(n.into()))
            .unwrap_or_else(|_| serde_yml::Value::String(value.to_string())),
        _ => serde_yml::Value::String(value.to_string()),
    }
}

fn read_mapping(path: &std::path::Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    if content.trim().is_empty() {
        return Ok(serde_yml::Mapping::new());
    }
    let parsed: serde_yml::Value = serde_yml::from_str(&content)
        .map_err(|e| miette::miette!("Invalid config in {}: {}", path.display(), e))?;
    match parsed {
        serde_yml::Value::Mapping(map) => Ok(map),
        serde_yml::Value::Null => Ok(serde_yml::Mapping::new()),
        _ => Err(miette::miette!(
            "Invalid config in {}: expected a mapping of keys to values",
            path.display()
        )),
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "api_url" => Some(config.api_url().to_string()),
        "refresh_secs" => Some(
            config
                .refresh_secs
                .unwrap_or(DEFAULT_REFRESH_SECS)
                .to_string(),
        ),
        "timeout_secs" => Some(
            config
                .timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS)
                .to_string(),
        ),
        "default_sort" => Some(config.default_sort().to_string()),
        "default_format" => Some(
            config
                .default_format
                .clone()
                .unwrap_or_else(|| "auto".to_string()),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_API_URL;

    #[test]
    fn test_defaults_for_every_key() {
        let config = Config::default();
        for (key, _) in VALID_KEYS {
            assert!(get_config_value(&config, key).is_some(), "{}", key);
        }
        assert_eq!(get_config_value(&config, "api_url").unwrap(), DEFAULT_API_URL);
        assert_eq!(get_config_value(&config, "default_sort").unwrap(), "none");
        assert!(get_config_value(&config, "editor").is_none());
    }

    #[test]
    fn test_check_value() {
        assert!(check_value("refresh_secs", "15").is_ok());
        assert!(check_value("refresh_secs", "soon").is_err());
        assert!(check_value("default_sort", "year-desc").is_ok());
        assert!(check_value("default_sort", "price").is_err());
        assert!(check_key("pager").is_err());
    }

    #[test]
    fn test_read_mapping_rejects_broken_yaml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(".fleetdash.yaml");

        fs::write(&path, "api_url: http://fleet/api\nrefresh_secs: [oops\n").unwrap();
        let err = read_mapping(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));

        fs::write(&path, "- just\n- a list\n").unwrap();
        assert!(read_mapping(&path).is_err());

        fs::write(&path, "").unwrap();
        assert!(read_mapping(&path).unwrap().is_empty());
    }

    #[test]
    fn test_typed_value() {
        assert_eq!(typed_value("timeout_secs", "5"), serde_yml::Value::Number(5u64.into()));
        assert_eq!(
            typed_value("api_url", "http://x"),
            serde_yml::Value::String("http://x".into())
        );
    }
}
