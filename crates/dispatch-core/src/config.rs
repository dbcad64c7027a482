use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://codegen-sh--rest-api.modal.run/v1";
pub const DEFAULT_ORG_ID: &str = "4969";
pub const DEFAULT_REPO_ID: u64 = 140699;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Length commit hashes are shortened to in prompts and metadata.
pub const SHORT_SHA_LEN: usize = 7;

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Where and how to reach the agent API. Built once at startup.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub org_id: String,
    pub repo_id: u64,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            org_id: DEFAULT_ORG_ID.to_string(),
            repo_id: DEFAULT_REPO_ID,
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
        }
    }
}

impl ApiConfig {
    /// `{base_url}/organizations/{org_id}/agent/run`
    pub fn run_url(&self) -> String {
        format!(
            "{}/organizations/{}/agent/run",
            self.base_url.trim_end_matches('/'),
            self.org_id
        )
    }

    /// The bearer token, treating an empty value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

// Hand-written so the token never reaches a log line.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .field("repo_id", &self.repo_id)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CiContext
// ---------------------------------------------------------------------------

/// Context the surrounding CI run provides about the code under repair.
///
/// Unset values stay empty rather than failing: a report with partial
/// context is still worth sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    /// `None` only when the slug was not provided at all.
    pub repository: Option<String>,
    pub workflow_run_id: String,
    pub pr_number: Option<String>,
    pub commit_sha: String,
    /// File the CI runner reads step outputs from (`GITHUB_OUTPUT`).
    pub output_path: Option<PathBuf>,
}

impl CiContext {
    /// Build a context from raw, possibly-unset values.
    pub fn new(
        repository: Option<String>,
        workflow_run_id: Option<String>,
        pr_number: Option<String>,
        commit_sha: Option<String>,
        output_path: Option<PathBuf>,
    ) -> Self {
        Self {
            repository,
            workflow_run_id: workflow_run_id.unwrap_or_default(),
            pr_number: pr_number.filter(|pr| !pr.is_empty()),
            commit_sha: short_sha(commit_sha.as_deref().unwrap_or_default()),
            output_path: output_path.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    /// Repository slug as used in prompts.
    pub fn repository(&self) -> &str {
        self.repository.as_deref().unwrap_or_default()
    }

    /// Repository slug as recorded in run metadata. An unset slug is
    /// `"unknown"`; an empty one is kept empty.
    pub fn metadata_repository(&self) -> &str {
        self.repository.as_deref().unwrap_or("unknown")
    }
}

fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}
