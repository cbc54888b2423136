use std::{fs, io::ErrorKind, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graphql_endpoint: String,
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphql_endpoint: "http://127.0.0.1:20002/graphql".into(),
            api_key: None,
        }
    }
}

impl Settings {
    /// Parses and checks the configured endpoint.
    pub fn endpoint_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.graphql_endpoint.trim()).with_context(|| {
            format!("invalid graphql endpoint '{}'", self.graphql_endpoint)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "graphql endpoint must use http or https, got '{}'",
                url.scheme()
            );
        }
        Ok(url)
    }
}

/// Loads `roster.toml` from the working directory, then applies environment
/// overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let settings = read_settings_file(path)?;
    Ok(apply_env_overrides(settings, |name| std::env::var(name).ok()))
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    toml::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

pub fn apply_env_overrides(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = non_empty("ROSTER_GRAPHQL_ENDPOINT") {
        settings.graphql_endpoint = v;
    }
    if let Some(v) = non_empty("APP__GRAPHQL_ENDPOINT") {
        settings.graphql_endpoint = v;
    }

    if let Some(v) = non_empty("ROSTER_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = non_empty("APP__API_KEY") {
        settings.api_key = Some(v);
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
