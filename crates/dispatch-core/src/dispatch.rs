use crate::ci_output;
use crate::client::AgentClient;
use crate::config::{ApiConfig, CiContext};
use crate::error::Result;
use crate::prompt;
use crate::types::{AgentRequest, AgentRunResult, IssueType, Metadata};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One detected issue, as described by the caller.
#[derive(Debug, Clone)]
pub struct IssueReport {
    pub issue: IssueType,
    pub details: String,
    /// Merged over the ambient metadata; caller keys win.
    pub extra_metadata: Metadata,
}

impl IssueReport {
    pub fn new(issue: IssueType, details: impl Into<String>) -> Self {
        Self {
            issue,
            details: details.into(),
            extra_metadata: Metadata::new(),
        }
    }
}

/// Assemble the request body for `report` without sending it.
pub fn build_request(
    api: &ApiConfig,
    ctx: &CiContext,
    report: &IssueReport,
    now: DateTime<Utc>,
) -> AgentRequest {
    let mut metadata = Metadata::new();
    metadata.insert("repository".into(), ctx.metadata_repository().into());
    metadata.insert("workflow_run_id".into(), ctx.workflow_run_id.clone().into());
    metadata.insert("timestamp".into(), Value::from(now.timestamp()));
    metadata.insert("issue_type".into(), report.issue.as_str().into());
    metadata.insert(
        "pr_number".into(),
        ctx.pr_number.clone().unwrap_or_default().into(),
    );
    metadata.insert("commit_sha".into(), ctx.commit_sha.clone().into());

    for (key, value) in &report.extra_metadata {
        metadata.insert(key.clone(), value.clone());
    }

    AgentRequest {
        prompt: prompt::render(&report.issue, &report.details, ctx),
        repo_id: api.repo_id,
        metadata,
    }
}

/// [`build_request`] stamped with the current time.
pub fn prepare(api: &ApiConfig, ctx: &CiContext, report: &IssueReport) -> AgentRequest {
    build_request(api, ctx, report, Utc::now())
}

/// Report one issue to the agent API.
///
/// The API key is checked before anything else, so a misconfigured run
/// never reaches the network. Nothing is written locally; call [`publish`]
/// once the run has been shown to the user.
pub fn dispatch(
    api: &ApiConfig,
    ctx: &CiContext,
    report: &IssueReport,
) -> Result<AgentRunResult> {
    let client = AgentClient::new(api)?;
    let request = prepare(api, ctx, report);

    tracing::info!(
        issue_type = %report.issue,
        repository = %ctx.repository(),
        url = %client.url(),
        "spawning agent"
    );
    client.spawn(&request)
}

/// Write the run's step outputs when the CI runner asked for them.
pub fn publish(ctx: &CiContext, result: &AgentRunResult) -> Result<()> {
    if let Some(path) = &ctx.output_path {
        ci_output::append_outputs(path, result)?;
    }
    Ok(())
}
