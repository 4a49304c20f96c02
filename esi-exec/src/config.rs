use esi_core::SpecDocument;

pub const DEFAULT_HOST: &str = "esi.evetech.net";
pub const DEFAULT_USER_AGENT: &str = concat!("esi-rs/", env!("CARGO_PKG_VERSION"));

/// Where and as whom calls are made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub base_path: String,
    /// The first scheme is used for requests.
    pub schemes: Vec<String>,
    pub user_agent: String,
    /// Sent as `Authorization: Bearer <token>`.
    pub token: Option<String>,
    /// Scopes granted to `token`; `None` means none are known.
    pub enabled_scopes: Option<Vec<String>>,
}

impl ClientConfig {
    pub fn from_spec(
        doc: &SpecDocument,
        token: Option<String>,
        enabled_scopes: Option<Vec<String>>,
    ) -> Self {
        let info = doc.info();
        Self {
            host: info.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            base_path: info.base_path.clone(),
            schemes: info.schemes.clone(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token,
            enabled_scopes,
        }
    }

    /// A fresh unauthenticated configuration.
    pub fn anonymous(doc: &SpecDocument) -> Self {
        Self::from_spec(doc, None, None)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn root_url(&self) -> String {
        let scheme = self.schemes.first().map(String::as_str).unwrap_or("https");
        format!("{scheme}://{}", self.host)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Send arguments without validating them.
    pub skip_validation: bool,
    /// Call even when the enabled scopes do not cover the operation.
    pub ignore_scopes: bool,
    /// Turn statuses outside `200..400` into [`crate::ResponseError`].
    pub raise_if_error: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            skip_validation: false,
            ignore_scopes: false,
            raise_if_error: true,
        }
    }
}
