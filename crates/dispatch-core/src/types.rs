use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;

/// Free-form metadata attached to an agent run.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// IssueType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueType {
    Lint,
    Test,
    Build,
    Security,
    CodeRabbit,
    Performance,
    Coverage,
    /// Any label without a dedicated template. Kept verbatim.
    Other(String),
}

impl IssueType {
    /// The labels that select a dedicated prompt template.
    pub fn known() -> &'static [IssueType] {
        &[
            IssueType::Lint,
            IssueType::Test,
            IssueType::Build,
            IssueType::Security,
            IssueType::CodeRabbit,
            IssueType::Performance,
            IssueType::Coverage,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            IssueType::Lint => "lint",
            IssueType::Test => "test",
            IssueType::Build => "build",
            IssueType::Security => "security",
            IssueType::CodeRabbit => "coderabbit",
            IssueType::Performance => "performance",
            IssueType::Coverage => "coverage",
            IssueType::Other(label) => label,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "lint" => IssueType::Lint,
            "test" => IssueType::Test,
            "build" => IssueType::Build,
            "security" => IssueType::Security,
            "coderabbit" => IssueType::CodeRabbit,
            "performance" => IssueType::Performance,
            "coverage" => IssueType::Coverage,
            other => IssueType::Other(other.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// AgentRequest
// ---------------------------------------------------------------------------

/// JSON body of `POST /organizations/{org}/agent/run`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRequest {
    pub prompt: String,
    pub repo_id: u64,
    pub metadata: Metadata,
}

// ---------------------------------------------------------------------------
// AgentRunResult
// ---------------------------------------------------------------------------

/// The subset of the agent-run response this tool relays.
///
/// The API owns the shape, so fields are not validated: absent or `null`
/// fields decode to the empty string and numeric ids are rendered in
/// decimal. The body itself must still be a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct AgentRunResult {
    pub id: String,
    pub status: String,
    pub web_url: String,
}

impl TryFrom<Value> for AgentRunResult {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(format!("expected a JSON object, got {other}")),
        };
        let mut take = |key: &str| opaque_string(fields.remove(key));
        Ok(Self {
            id: take("id"),
            status: take("status"),
            web_url: take("web_url"),
        })
    }
}

fn opaque_string(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}
