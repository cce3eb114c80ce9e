use std::{fs, path::Path};

use yaml_rust::{Yaml, YamlLoader};

use crate::error::ConfigError;

pub fn is_yaml_path(file_path: &str) -> bool {
    matches!(
        Path::new(file_path).extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

pub fn load_yaml(file_path: &str) -> Result<Vec<Yaml>, ConfigError> {
    let file_content = fs::read_to_string(file_path)?;
    Ok(YamlLoader::load_from_str(&file_content)?)
}
