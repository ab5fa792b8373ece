//! Configuration for sync operations.
//!
//! Nothing is compiled in: the remote location and credential come from the
//! environment (or CLI flags). Without a token the session runs in local mode
//! and saves go to the local write endpoint.

use crate::error::ConfigError;
use crate::secret::AccessToken;
use std::time::Duration;

/// Default contents API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Default path of the stored file inside the repository.
pub const DEFAULT_FILE_PATH: &str = "data/employees.json";
/// Default branch.
pub const DEFAULT_BRANCH: &str = "main";
/// Default local write endpoint.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:4000/api/members";

/// Location of and credential for the remote file.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base URL.
    pub api_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// File path inside the repository.
    pub path: String,
    /// Branch to read and write.
    pub branch: String,
    /// Access token.
    pub token: AccessToken,
    /// Request timeout; `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

impl RemoteConfig {
    /// Creates a remote configuration with default path, branch and API base.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, token: AccessToken) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            path: DEFAULT_FILE_PATH.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            token,
            timeout: None,
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the file path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Sets a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the contents URL of the file, without the `ref` query.
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path.trim_start_matches('/')
        )
    }
}

/// Local fallback endpoint.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    /// Endpoint receiving the POSTed collection.
    pub endpoint: String,
    /// Request timeout; `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

impl LocalConfig {
    /// Creates a local configuration for an endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOCAL_ENDPOINT)
    }
}

/// Configuration for the write retry loop.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of write attempts.
    pub max_attempts: u32,
    /// Base delay; the wait after attempt `n` is `n × base_delay`.
    pub base_delay: Duration,
}

impl RetryConfig {
    /// Creates a retry configuration with the default 300 ms base delay.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::from_millis(300),
        }
    }

    /// Creates a configuration with a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Calculates the wait after a failed attempt (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Complete sync configuration.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Remote file; `None` selects local mode.
    pub remote: Option<RemoteConfig>,
    /// Local fallback endpoint.
    pub local: LocalConfig,
    /// Write retry behaviour.
    pub retry: RetryConfig,
}

impl SyncConfig {
    /// Creates a local-mode configuration.
    pub fn local_only() -> Self {
        Self::default()
    }

    /// Creates a configuration targeting a remote file.
    pub fn remote(remote: RemoteConfig) -> Self {
        Self {
            remote: Some(remote),
            ..Self::default()
        }
    }

    /// Sets the local fallback endpoint.
    pub fn with_local(mut self, local: LocalConfig) -> Self {
        self.local = local;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Returns true if a remote credential is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Loads configuration from `TEAMDIR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigSource::from_env()?.resolve()
    }
}

/// Raw settings before defaults and validation are applied.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Access token.
    pub token: Option<String>,
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// File path.
    pub path: Option<String>,
    /// Branch.
    pub branch: Option<String>,
    /// API base URL.
    pub api_base: Option<String>,
    /// Local write endpoint.
    pub local_endpoint: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ConfigSource {
    /// Environment variable names, in field order.
    pub const VARS: [&'static str; 8] = [
        "TEAMDIR_GITHUB_TOKEN",
        "TEAMDIR_GITHUB_OWNER",
        "TEAMDIR_GITHUB_REPO",
        "TEAMDIR_GITHUB_PATH",
        "TEAMDIR_GITHUB_BRANCH",
        "TEAMDIR_GITHUB_API",
        "TEAMDIR_LOCAL_ENDPOINT",
        "TEAMDIR_TIMEOUT_SECS",
    ];

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through a lookup function.
    ///
    /// Fails if the timeout is set but is not a whole number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let timeout_secs = match get(Self::VARS[7]) {
            None => None,
            Some(v) => Some(v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "TEAMDIR_TIMEOUT_SECS",
                message: format!("'{v}' is not a whole number of seconds"),
            })?),
        };
        Ok(Self {
            token: get(Self::VARS[0]),
            owner: get(Self::VARS[1]),
            repo: get(Self::VARS[2]),
            path: get(Self::VARS[3]),
            branch: get(Self::VARS[4]),
            api_base: get(Self::VARS[5]),
            local_endpoint: get(Self::VARS[6]),
            timeout_secs,
        })
    }

    /// Applies defaults and validates.
    ///
    /// A blank or missing token selects local mode. With a token, owner and
    /// repository are required.
    pub fn resolve(self) -> Result<SyncConfig, ConfigError> {
        let timeout = self.timeout_secs.map(Duration::from_secs);
        let mut local = LocalConfig::new(
            self.local_endpoint
                .unwrap_or_else(|| DEFAULT_LOCAL_ENDPOINT.to_string()),
        );
        local.timeout = timeout;

        let token = self
            .token
            .map(AccessToken::new)
            .filter(|t| !t.is_blank());

        let remote = match token {
            None => None,
            Some(token) => {
                let owner = self.owner.ok_or(ConfigError::Missing("TEAMDIR_GITHUB_OWNER"))?;
                let repo = self.repo.ok_or(ConfigError::Missing("TEAMDIR_GITHUB_REPO"))?;
                let api_base = self
                    .api_base
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
                if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                    return Err(ConfigError::Invalid {
                        name: "TEAMDIR_GITHUB_API",
                        message: format!("'{api_base}' is not an http(s) URL"),
                    });
                }
                let mut remote = RemoteConfig::new(owner, repo, token)
                    .with_api_base(api_base)
                    .with_path(self.path.unwrap_or_else(|| DEFAULT_FILE_PATH.to_string()))
                    .with_branch(self.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()));
                remote.timeout = timeout;
                Some(remote)
            }
        };

        Ok(SyncConfig {
            remote,
            local,
            retry: RetryConfig::default(),
        })
    }
}
