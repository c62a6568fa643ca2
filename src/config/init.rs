use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::Config;

const HEADER: &str = "\
# property-valuer configuration
#
# Every value below is a built-in default. Edit district profiles, decoration
# scores or weights to adjust valuations without rebuilding. Weights of each
# algorithm must sum to 1.0.
";

/// Write a config file holding every built-in table and weight.
///
/// Refuses to overwrite an existing file unless `force` is set. The write is
/// atomic, so an interrupted run never leaves a truncated config behind.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }
    }

    let yaml = serde_saphyr::to_string(&Config::with_builtin_defaults())
        .context("Failed to serialize default config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        write_default_config(&path, false).unwrap();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config, Config::with_builtin_defaults());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_algorithm: simple\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "default_algorithm: simple\n");

        write_default_config(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("# property-valuer"));
    }
}
