mod output;
mod spawn;

use clap::Parser;
use dispatch_core::config::{DEFAULT_BASE_URL, DEFAULT_ORG_ID, DEFAULT_REPO_ID, DEFAULT_TIMEOUT};
use dispatch_core::IssueType;
use std::path::PathBuf;

const ISSUE_TYPES_HELP: &str = "\
Issue types: lint, test, build, security, coderabbit, performance, coverage
Any other label is sent with a generic \"fix <type> issue\" prompt.";

#[derive(Parser)]
#[command(
    name = "spawn-agent",
    about = "Spawn a hosted agent to fix a failing CI check",
    version,
    after_help = ISSUE_TYPES_HELP
)]
struct Cli {
    /// Kind of issue detected (selects the prompt template)
    issue_type: IssueType,

    /// Free-text description of the failure (may start with '-')
    #[arg(default_value = "", allow_hyphen_values = true)]
    details: String,

    /// Extra run metadata as KEY=VALUE (repeatable; overrides built-in keys)
    #[arg(long = "metadata", short = 'm', value_name = "KEY=VALUE", value_parser = spawn::parse_metadata)]
    metadata: Vec<(String, serde_json::Value)>,

    /// Print the request that would be sent and exit without calling the API
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Bearer token for the agent API
    #[arg(long, env = "CODEGEN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Agent API base URL
    #[arg(long, env = "CODEGEN_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Organization that owns the agent runs
    #[arg(long, env = "CODEGEN_ORG_ID", default_value = DEFAULT_ORG_ID)]
    org_id: String,

    /// Repository id sent with every run
    #[arg(long, env = "CODEGEN_REPO_ID", default_value_t = DEFAULT_REPO_ID)]
    repo_id: u64,

    /// Request timeout in seconds
    #[arg(long, env = "CODEGEN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Repository slug (owner/name)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Workflow run id
    #[arg(long, env = "GITHUB_RUN_ID")]
    run_id: Option<String>,

    /// Pull request number
    #[arg(long, env = "PR_NUMBER")]
    pr_number: Option<String>,

    /// Commit SHA (shortened to 7 characters)
    #[arg(long, env = "GITHUB_SHA")]
    commit_sha: Option<String>,

    /// File to append agent_id/agent_url/agent_status step outputs to
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,
}

fn main() {
    // Usage errors exit 1 like every other failure; --help/--version exit 0.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = spawn::run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
