use serde::Deserialize;

/// Runtime settings for the storefront, loaded from `config/*.yaml` and
/// `APP__*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Key used to sign session, identity and flash cookies. At least 64 bytes.
    pub secret: String,
    /// Glob passed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub static_dir: String,
    /// Directory served under [`Self::media_url`].
    pub media_dir: String,
    /// URL prefix for uploaded media, with a trailing slash.
    pub media_url: String,
    /// Where anonymous visitors are sent when a login is required.
    pub login_url: String,
}

impl ServerConfig {
    /// Public URL of a media-relative path.
    pub fn media(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path.trim_start_matches('/'))
    }
}
