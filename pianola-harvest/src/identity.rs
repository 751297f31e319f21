//! Operator identity for the MusicBrainz API.
//!
//! MusicBrainz requires a descriptive user-agent with contact information
//! for anything beyond casual use. The contact string is mandatory: a run
//! refuses to start without one, before any network call is made.

use std::path::PathBuf;

use crate::error::HarvestError;

const DEFAULT_APP: &str = concat!("pianola/", env!("CARGO_PKG_VERSION"));

/// Identity sent to MusicBrainz in the User-Agent header.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Application name and version, e.g. "pianola/0.1.0".
    pub app: String,
    /// Contact address (email or URL) for the operator.
    pub contact: String,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    musicbrainz: Option<MusicBrainzConfig>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct MusicBrainzConfig {
    app: Option<String>,
    contact: Option<String>,
}

impl Identity {
    /// Load the identity from environment variables or the config file.
    ///
    /// Priority: env vars > config file. Required: contact.
    pub fn load() -> Result<Self, HarvestError> {
        let config = load_config_file();

        let contact = std::env::var("PIANOLA_CONTACT")
            .ok()
            .or_else(|| config.as_ref().and_then(|c| c.contact.clone()))
            .ok_or_else(|| {
                HarvestError::config(
                    "Missing contact address. Set PIANOLA_CONTACT env var or add to config file",
                )
            })?;

        let app = std::env::var("PIANOLA_APP")
            .ok()
            .or_else(|| config.as_ref().and_then(|c| c.app.clone()))
            .unwrap_or_else(|| DEFAULT_APP.to_string());

        Ok(Self { app, contact })
    }

    /// The User-Agent string sent with every request.
    pub fn user_agent(&self) -> String {
        format!("{} ({})", self.app, self.contact)
    }
}

/// Return the path to the identity config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pianola").join("identity.toml"))
}

/// Save the identity to the config file, creating parent directories as needed.
///
/// Returns the path the file was written to.
pub fn save_to_file(identity: &Identity) -> Result<PathBuf, HarvestError> {
    let path = config_path()
        .ok_or_else(|| HarvestError::config("Could not determine config directory"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        musicbrainz: Some(MusicBrainzConfig {
            app: if identity.app == DEFAULT_APP {
                None
            } else {
                Some(identity.app.clone())
            },
            contact: Some(identity.contact.clone()),
        }),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| HarvestError::config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(&path, toml_str)?;
    Ok(path)
}

fn load_config_file() -> Option<MusicBrainzConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    config.musicbrainz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let identity = Identity {
            app: "pianola/0.1.0".to_string(),
            contact: "ops@example.com".to_string(),
        };
        assert_eq!(identity.user_agent(), "pianola/0.1.0 (ops@example.com)");
    }

    #[test]
    fn test_config_file_parses() {
        let toml_str = "[musicbrainz]\ncontact = \"ops@example.com\"\n";
        let config: ConfigFile = toml::from_str(toml_str).unwrap();
        let mb = config.musicbrainz.unwrap();
        assert_eq!(mb.contact.as_deref(), Some("ops@example.com"));
        assert_eq!(mb.app, None);
    }
}
