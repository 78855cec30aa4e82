//! Config commands

use anyhow::{bail, Result};
use clap::Subcommand;
use std::path::Path;

use ecosystem_core::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the configuration in effect (file plus command line overrides)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[clap(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    /// `config` is the resolved configuration, or the error from loading it
    pub fn execute(self, config: Result<Config>, path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => {
                print!("{}", config?.to_yaml()?);
            }
            ConfigCommand::Init { force } => init_config(path, force)?,
            ConfigCommand::Path => println!("{}", path.display()),
        }
        Ok(())
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to_path(path)?;
    tracing::info!("Wrote default config to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        init_config(&path, false).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "catalog: mine.json\n").unwrap();

        assert!(init_config(&path, false).is_err());
        assert_eq!(
            Config::load_from_path(&path).unwrap().catalog,
            "mine.json"
        );

        init_config(&path, true).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_show_reports_load_error() {
        let result = ConfigCommand::Show.execute(
            Err(anyhow::anyhow!("broken config")),
            Path::new("config.yaml"),
        );
        assert!(result.is_err());
    }
}
