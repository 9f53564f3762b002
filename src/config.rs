use crate::data::base_url::BaseUrl;
use directories::ProjectDirs;
use serde::Deserialize;
use snafu::{ResultExt, Snafu};
use std::path::{Path, PathBuf};

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Unable to read config file {}: {}", path.display(), source))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to parse file {}: {}", path.display(), source))]
    ParseFile {
        source: toml::de::Error,
        path: PathBuf,
    },
}

/// Settings read from the config file. Everything is optional;
/// command line options and environment variables take precedence.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct KbConfig {
    /// The base url to the knowledge-base service.
    pub base_url: Option<BaseUrl>,

    /// Where the session cookie is kept.
    pub session_file: Option<PathBuf>,

    /// The name of the session cookie used by the service.
    pub cookie_name: Option<String>,
}

/// The location of the config file when none is given explicitly.
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("io", "knowledge-base", "kb-cli").map(|p| p.config_dir().join("config.toml"))
}

impl KbConfig {
    pub fn read(file: &Path) -> Result<KbConfig, ConfigError> {
        let cnt = std::fs::read_to_string(file).context(ReadFileSnafu { path: file })?;
        toml::from_str(&cnt).context(ParseFileSnafu { path: file })
    }

    /// Reads the given file, or the default config file if it exists.
    /// Without an explicit file and no default file, the empty config
    /// is returned.
    pub fn load(file: Option<&Path>) -> Result<KbConfig, ConfigError> {
        match file {
            Some(f) => {
                log::debug!("Reading config file: {}", f.display());
                KbConfig::read(f)
            }
            None => match default_config_file().filter(|f| f.exists()) {
                Some(f) => {
                    log::debug!("Reading default config file: {}", f.display());
                    KbConfig::read(&f)
                }
                None => {
                    log::debug!("No config file found, using defaults");
                    Ok(KbConfig::default())
                }
            },
        }
    }
}

#[test]
fn read_full_config() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("config.toml");
    std::fs::write(
        &target,
        "base_url = \"http://kb.example.com\"\nsession_file = \"/tmp/kb-session\"\ncookie_name = \"kb\"\n",
    )
    .unwrap();
    let cfg = KbConfig::read(&target).unwrap();
    assert_eq!(
        cfg,
        KbConfig {
            base_url: Some(BaseUrl::parse("http://kb.example.com").unwrap()),
            session_file: Some(PathBuf::from("/tmp/kb-session")),
            cookie_name: Some("kb".into()),
        }
    );
}

#[test]
fn config_rejects_invalid_base_url() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("config.toml");
    std::fs::write(&target, "base_url = \"mailto:x@example.com\"\n").unwrap();
    assert!(matches!(
        KbConfig::read(&target),
        Err(ConfigError::ParseFile { .. })
    ));
}

#[test]
fn read_partial_config() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("config.toml");
    std::fs::write(&target, "cookie_name = \"other\"\n").unwrap();
    let cfg = KbConfig::load(Some(&target)).unwrap();
    assert_eq!(cfg.base_url, None);
    assert_eq!(cfg.cookie_name.as_deref(), Some("other"));
}

#[test]
fn explicit_missing_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let result = KbConfig::load(Some(&tmp.path().join("nope.toml")));
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}
