use anyhow::{Context, Result, bail};
use shared::config::client::ClientConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a default configuration file into `dir` and returns its path.
///
/// `format` is one of `yaml`, `json` or `toml`.
///
/// # Errors
/// Returns an error if the format is unsupported or writing the file fails.
pub fn generate_config(format: &str, dir: &Path) -> Result<PathBuf> {
    let config = ClientConfig::with_defaults();
    let (file_name, serialized) = match format.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => ("config.yaml", config.to_yaml()?),
        "json" => ("config.json", config.to_json()?),
        "toml" => ("config.toml", config.to_toml()?),
        other => bail!("Unsupported format '{other}'. Use 'yaml', 'json', or 'toml'."),
    };

    let path = dir.join(file_name);
    fs::write(&path, serialized)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generated_files_load_back() {
        let dir = tempdir().unwrap();
        for format in ["yaml", "json", "toml"] {
            let path = generate_config(format, dir.path()).unwrap();
            let loaded = ClientConfig::from_file(&path).unwrap();
            assert_eq!(loaded, ClientConfig::with_defaults(), "format {format}");
        }
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let err = generate_config("xml", dir.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported format 'xml'"));
    }
}
