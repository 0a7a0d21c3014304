use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests {

    use super::*;

    fn settings() -> Settings {
        Settings {
            domains: vec![PathBuf::from("domain.json")],
            output_dir: PathBuf::from("out"),
            wind_direction: None,
            wind_speed: None,
            pretty: false,
            log_filter: default_log_filter(),
        }
    }

    #[test]
    fn default_config_loads() {
        let settings = load_default_config().unwrap();
        assert!(!settings.domains.is_empty());
        assert!(settings.wind_direction.is_none());
    }

    #[test]
    fn empty_domain_list_is_rejected() {
        let mut s = settings();
        s.domains.clear();
        assert!(validate_config(&s).is_err());
    }

    #[test]
    fn wind_overrides_are_checked() {
        let mut s = settings();
        s.wind_speed = Some(-2.0);
        assert!(validate_config(&s).is_err());

        let mut s = settings();
        s.wind_direction = Some(f64::NAN);
        assert!(validate_config(&s).is_err());

        let mut s = settings();
        s.wind_direction = Some(400.0);
        s.wind_speed = Some(0.0);
        assert!(validate_config(&s).is_ok());
    }

    #[test]
    fn cli_overrides_config() {
        let args = CliArgs::parse_from([
            "windtunnel",
            "--domain",
            "a.json",
            "b.json",
            "-o",
            "results",
            "--wind-speed",
            "4.5",
            "--pretty",
        ]);
        let mut s = settings();
        apply_cli_overrides(&mut s, &args);
        assert_eq!(s.domains, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(s.output_dir, PathBuf::from("results"));
        assert_eq!(s.wind_speed, Some(4.5));
        assert_eq!(s.wind_direction, None);
        assert!(s.pretty);
    }

    #[test]
    fn environment_overrides_domains_and_wind() {
        let root = retrieve_project_root().unwrap();
        let vars = config::Map::from([
            ("WINDTUNNEL_DOMAINS".to_string(), "a.json b.json".to_string()),
            ("WINDTUNNEL_WIND_SPEED".to_string(), "7.5".to_string()),
        ]);
        let s: Settings = Config::builder()
            .add_source(File::from(root.join("config/default.toml")).required(true))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(s.domains, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(s.wind_speed, Some(7.5));
        assert!(validate_config(&s).is_ok());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let s = settings();
        let text = toml::to_string(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(s, back);
    }
}

/// Unit string attached to every emitted primitive.
pub const UNITS: &str = "m";
/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "WINDTUNNEL";

/// Runtime configuration for the application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub domains: Vec<PathBuf>, // domain description files to annotate
    pub output_dir: PathBuf,
    pub wind_direction: Option<f64>, // overrides the azimuth of every domain
    pub wind_speed: Option<f64>,     // overrides the speed of every domain
    #[serde(default)]
    pub pretty: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let config: Settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the configuration file, then environment variables prefixed with
/// `WINDTUNNEL_`, then an optional extra file, then command-line overrides.
pub fn load_config(args: &CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        local_config
    } else {
        default_config_file
    };

    let builder = Config::builder()
        .add_source(File::from(config_file.as_path()).required(true))
        .add_source(environment());
    let builder = match &args.config {
        Some(extra) => builder.add_source(File::from(extra.as_path()).required(true)),
        None => builder,
    };

    let mut config: Settings = builder
        .build()
        .context("Error loading configuration")?
        .try_deserialize()
        .context("Error deserializing configuration")?;

    apply_cli_overrides(&mut config, args);

    validate_config(&config)?;

    Ok(config)
}

/// Environment source for `WINDTUNNEL_*` variables. `WINDTUNNEL_DOMAINS`
/// takes a space-separated list of files.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("domains")
}

fn apply_cli_overrides(config: &mut Settings, args: &CliArgs) {
    if let Some(domains) = &args.domain {
        config.domains = domains.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(wind_direction) = args.wind_direction {
        config.wind_direction = Some(wind_direction);
    }
    if let Some(wind_speed) = args.wind_speed {
        config.wind_speed = Some(wind_speed);
    }
    if args.pretty {
        config.pretty = true;
    }
    if let Some(filter) = &args.log {
        config.log_filter = filter.clone();
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the WINDTUNNEL_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("WINDTUNNEL_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .context("Could not find project root directory")
}

fn validate_config(config: &Settings) -> Result<()> {
    if config.domains.is_empty() {
        bail!("At least one domain file must be given");
    }
    if let Some(direction) = config.wind_direction {
        if !direction.is_finite() {
            bail!("Wind direction must be finite, got {}", direction);
        }
    }
    if let Some(speed) = config.wind_speed {
        if !speed.is_finite() || speed < 0.0 {
            bail!("Wind speed must be finite and non-negative, got {}", speed);
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "windtunnel - annotate CFD wind-tunnel domains")]
pub struct CliArgs {
    /// Domain description files (JSON), separated by spaces.
    #[arg(short, long, num_args = 1.., value_delimiter = ' ')]
    domain: Option<Vec<PathBuf>>,

    /// Directory the annotation files are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Wind direction as a compass azimuth in degrees (North = 0, East = 90).
    /// Replaces the direction stored in every domain file.
    #[arg(long)]
    wind_direction: Option<f64>,

    /// Wind speed in m/s. Replaces the speed stored in every domain file.
    #[arg(long)]
    wind_speed: Option<f64>,

    /// Pretty-print the written JSON.
    #[arg(long)]
    pretty: bool,

    /// Additional configuration file layered over the defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "windtunnel=trace".
    #[arg(long)]
    log: Option<String>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Settings {
    /// Serializes the settings back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Domains: {:?}
  - Output Directory: {}
  - Wind Direction Override: {:?}
  - Wind Speed Override: {:?}
  - Pretty: {}
  ",
            self.domains,
            self.output_dir.display(),
            self.wind_direction,
            self.wind_speed,
            self.pretty,
        )
    }
}
