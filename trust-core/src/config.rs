use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use time::Duration;
use trust_providers::exchange_protocol::self_issued::presentation::DEFAULT_SCOPE_NAMESPACE;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrustCoreConfig {
    pub token: TokenConfig,
    pub scope: ScopeConfig,
    pub did_method: DidMethodConfig,
    pub revocation: RevocationConfig,
    pub key_storage: KeyStorageConfig,
    pub formatter: FormatterConfig,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenConfig {
    /// Lifetime of issued self-issued tokens.
    #[serde_as(as = "DurationSeconds<i64>")]
    pub validity: Duration,
    /// Clock skew tolerance in seconds.
    pub leeway: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            validity: Duration::seconds(300),
            leeway: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeConfig {
    pub namespace: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_SCOPE_NAMESPACE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DidMethodConfig {
    pub resolve_to_insecure_http: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevocationConfig {
    /// Base URL of the revocation service; no revocation check when unset.
    pub url: Option<Url>,
    pub enforce: bool,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyStorageConfig {
    /// Passphrase encrypting private keys at rest.
    pub encryption: Option<String>,
}

impl std::fmt::Debug for KeyStorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStorageConfig")
            .field("encryption", &self.encryption.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatterConfig {
    pub leeway: u64,
    /// Lifetime of issued presentations, in seconds.
    pub presentation_validity: i64,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            leeway: 60,
            presentation_validity: 300,
        }
    }
}
