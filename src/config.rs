//! Defaults file for connection parameters.
//!
//! `~/.config/talosup/config.toml` can carry the connection settings that
//! rarely change between runs:
//!
//! ```toml
//! [connection]
//! context = "homelab"
//! endpoints = ["10.0.0.10"]
//! nodes = ["10.0.0.10"]
//! talosconfig = "~/.talos/config"
//! ```
//!
//! Command-line flags always win over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use taloskit::Connection;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("talosup"))
}

/// Path of the defaults file
pub fn defaults_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[derive(Debug, Default, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub connection: Connection,
}

impl Defaults {
    /// Load the defaults file; a missing file yields empty defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&defaults_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))
    }
}

/// Fill unset connection fields from the defaults; CLI values win.
///
/// The talosconfig path is tilde-expanded after merging, whichever side
/// it came from.
pub fn merge_connection(mut cli: Connection, defaults: Connection) -> Connection {
    if cli.cluster.is_none() {
        cli.cluster = defaults.cluster;
    }
    if cli.context.is_none() {
        cli.context = defaults.context;
    }
    if cli.endpoints.is_empty() {
        cli.endpoints = defaults.endpoints;
    }
    if cli.nodes.is_empty() {
        cli.nodes = defaults.nodes;
    }
    if cli.talosconfig.is_none() {
        cli.talosconfig = defaults.talosconfig;
    }
    if let Some(talosconfig) = cli.talosconfig.take() {
        cli.talosconfig = Some(shellexpand::tilde(&talosconfig).into_owned());
    }
    cli
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let defaults = Defaults::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(defaults.connection, Connection::default());
    }

    #[test]
    fn test_load_from_parses_connection_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[connection]\ncontext = \"homelab\"\nnodes = [\"10.0.0.10\"]\ntalosconfig = \"/tmp/talosconfig\""
        )
        .unwrap();

        let defaults = Defaults::load_from(&path).unwrap();
        assert_eq!(defaults.connection.context.as_deref(), Some("homelab"));
        assert_eq!(defaults.connection.nodes, ["10.0.0.10"]);
        assert!(defaults.connection.cluster.is_none());
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[connection\n").unwrap();
        assert!(Defaults::load_from(&path).is_err());
    }

    #[test]
    fn test_merge_cli_wins() {
        let cli = Connection {
            context: Some("from-cli".to_string()),
            nodes: vec!["10.0.0.20".to_string()],
            ..Connection::default()
        };
        let defaults = Connection {
            cluster: Some("prod".to_string()),
            context: Some("from-file".to_string()),
            nodes: vec!["10.0.0.10".to_string()],
            endpoints: vec!["10.0.0.1".to_string()],
            talosconfig: None,
        };

        let merged = merge_connection(cli, defaults);
        assert_eq!(merged.context.as_deref(), Some("from-cli"));
        assert_eq!(merged.nodes, ["10.0.0.20"]);
        // Unset CLI fields fall back to the file
        assert_eq!(merged.cluster.as_deref(), Some("prod"));
        assert_eq!(merged.endpoints, ["10.0.0.1"]);
    }

    #[test]
    fn test_merge_expands_tilde_in_talosconfig() {
        let cli = Connection {
            talosconfig: Some("~/.talos/config".to_string()),
            ..Connection::default()
        };
        let merged = merge_connection(cli, Connection::default());
        let talosconfig = merged.talosconfig.unwrap();
        assert!(!talosconfig.starts_with('~'));
        assert!(talosconfig.ends_with(".talos/config"));
    }
}
