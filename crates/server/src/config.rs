//! Runtime configuration.
//!
//! Every setting is a CLI flag that falls back to an environment variable.
//! Settings are read once at startup and handed to `AppContext`; nothing
//! reads configuration after that.

use std::fmt;
use std::time::Duration;

use clap::Args;

use clients::{DEFAULT_TRANSLATION_ENDPOINT, DEFAULT_YOUTUBE_ENDPOINT};

#[derive(Clone, Args)]
pub struct Settings {
    /// YouTube Data API v3 key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: String,

    /// YouTube search.list endpoint
    #[arg(long, env = "YOUTUBE_API_URL", default_value = DEFAULT_YOUTUBE_ENDPOINT)]
    pub youtube_api_url: String,

    /// Google Cloud Translation API key
    #[arg(long, env = "TRANSLATION_API_KEY", hide_env_values = true)]
    pub translation_api_key: String,

    /// Translation endpoint
    #[arg(long, env = "TRANSLATION_API_URL", default_value = DEFAULT_TRANSLATION_ENDPOINT)]
    pub translation_api_url: String,

    /// Address/port for the HTTP listener
    #[arg(long, env = "MADRASA_HOST", default_value = "0.0.0.0:8000")]
    pub host: String,

    /// Allowed CORS origins, `;`-separated. `*` allows any origin.
    #[arg(long, env = "MADRASA_CORS_ORIGINS", value_delimiter = ';', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Timeout for each external API call, in seconds
    #[arg(long, env = "MADRASA_HTTP_TIMEOUT_SECS", default_value_t = 15)]
    pub http_timeout_secs: u64,
}

impl Settings {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("youtube_api_key", &"<redacted>")
            .field("youtube_api_url", &self.youtube_api_url)
            .field("translation_api_key", &"<redacted>")
            .field("translation_api_url", &self.translation_api_url)
            .field("host", &self.host)
            .field("cors_origins", &self.cors_origins)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn test_defaults_apply() {
        let cli = TestCli::try_parse_from([
            "madrasa",
            "--youtube-api-key",
            "yt",
            "--translation-api-key",
            "tr",
        ])
        .unwrap();

        let settings = cli.settings;
        assert_eq!(settings.youtube_api_url, DEFAULT_YOUTUBE_ENDPOINT);
        assert_eq!(settings.translation_api_url, DEFAULT_TRANSLATION_ENDPOINT);
        assert_eq!(settings.host, "0.0.0.0:8000");
        assert!(settings.allows_any_origin());
        assert_eq!(settings.http_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_origins_split_on_semicolon() {
        let cli = TestCli::try_parse_from([
            "madrasa",
            "--youtube-api-key",
            "yt",
            "--translation-api-key",
            "tr",
            "--cors-origins",
            "http://localhost:5173;https://t.me",
        ])
        .unwrap();

        assert_eq!(
            cli.settings.cors_origins,
            vec!["http://localhost:5173".to_string(), "https://t.me".to_string()]
        );
        assert!(!cli.settings.allows_any_origin());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let cli = TestCli::try_parse_from([
            "madrasa",
            "--youtube-api-key",
            "super-secret",
            "--translation-api-key",
            "also-secret",
        ])
        .unwrap();

        let debug = format!("{:?}", cli.settings);
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("also-secret"));
    }
}
