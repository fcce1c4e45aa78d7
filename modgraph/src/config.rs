use std::path::{Path, PathBuf};

use modgraph_core::extract::GrammarProfile;
use modgraph_core::graph::CycleGuard;
use modgraph_core::resolve::AliasMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModgraphConfig {
    pub aliases: Option<AliasMap>,
    pub extensions: Option<Vec<String>>,
    pub routes_config_names: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub cycle_guard: Option<CycleGuard>,
    pub grammar: Option<GrammarProfile>,
}

const CONFIG_FILE_NAMES: [&str; 10] = [
    "modgraph.toml",
    "modgraph.config.json",
    "modgraph.config.json5",
    "modgraph.config.jsonc",
    "modgraph.config.yaml",
    "modgraph.config.yml",
    ".modgraphrc",
    ".modgraphrc.json",
    ".modgraphrc.yaml",
    ".modgraphrc.yml",
];

const PACKAGE_JSON_KEY: &str = "modgraph";

pub fn discover_config_path(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .into_iter()
        .map(|name| project_root.join(name))
        .find(|p| p.is_file())
}

pub fn load_modgraph_config(project_root: &Path) -> Result<ModgraphConfig, CliError> {
    if let Some(path) = discover_config_path(project_root) {
        tracing::debug!(path = %path.display(), "loading config file");
        return load_modgraph_config_from_path(&path);
    }
    load_package_json_config(&project_root.join("package.json"))
}

pub fn load_modgraph_config_from_path(path: &Path) -> Result<ModgraphConfig, CliError> {
    let ext = path
        .extension()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" | "json5" | "jsonc" => load_json_config(path),
        "yaml" | "yml" => load_yaml_config(path),
        "toml" => load_toml_config(path),
        // Extensionless rc files hold either JSON or YAML.
        "" => load_json_config(path).or_else(|_| load_yaml_config(path)),
        _ => Ok(ModgraphConfig::default()),
    }
}

fn read_config_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json_config(path: &Path) -> Result<ModgraphConfig, CliError> {
    let raw = read_config_text(path)?;
    json5::from_str::<ModgraphConfig>(&raw)
        .or_else(|_| serde_json::from_str::<ModgraphConfig>(&raw))
        .map_err(|err| CliError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn load_yaml_config(path: &Path) -> Result<ModgraphConfig, CliError> {
    let raw = read_config_text(path)?;
    serde_yaml::from_str::<ModgraphConfig>(&raw).map_err(|err| CliError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn load_toml_config(path: &Path) -> Result<ModgraphConfig, CliError> {
    let raw = read_config_text(path)?;
    let parse_error = |message: String| CliError::ConfigParse {
        path: path.to_path_buf(),
        message,
    };
    let toml_value =
        toml::from_str::<toml::Value>(&raw).map_err(|err| parse_error(err.to_string()))?;
    let json_value = serde_json::to_value(toml_value).map_err(|err| parse_error(err.to_string()))?;
    serde_json::from_value::<ModgraphConfig>(normalize_top_level_keys(json_value))
        .map_err(|err| parse_error(err.to_string()))
}

fn load_package_json_config(path: &Path) -> Result<ModgraphConfig, CliError> {
    if !path.is_file() {
        return Ok(ModgraphConfig::default());
    }
    let raw = read_config_text(path)?;
    let manifest =
        serde_json::from_str::<JsonValue>(&raw).map_err(|err| CliError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    let Some(section) = manifest.get(PACKAGE_JSON_KEY).cloned() else {
        return Ok(ModgraphConfig::default());
    };
    serde_json::from_value::<ModgraphConfig>(section).map_err(|err| CliError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Only top-level keys are renamed; alias prefixes are user data.
fn normalize_top_level_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(
            object
                .into_iter()
                .map(|(key, value)| (snake_to_camel(&key), value))
                .collect(),
        ),
        other => other,
    }
}

/// `max_depth` -> `maxDepth`; keys without a non-empty segment pass through.
fn snake_to_camel(key: &str) -> String {
    let camel = key
        .split('_')
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .flat_map(|(index, segment)| {
            let mut chars = segment.chars();
            let head = chars
                .next()
                .map(|c| if index == 0 { c } else { c.to_ascii_uppercase() });
            head.into_iter().chain(chars)
        })
        .collect::<String>();
    if camel.is_empty() {
        key.to_string()
    } else {
        camel
    }
}
