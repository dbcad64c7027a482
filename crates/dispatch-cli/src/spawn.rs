use crate::output::{print_json, print_run};
use crate::Cli;
use anyhow::Context;
use dispatch_core::{dispatch, prepare, publish, ApiConfig, CiContext, IssueReport};
use serde_json::Value;
use std::time::Duration;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let api = ApiConfig {
        base_url: cli.api_url,
        org_id: cli.org_id,
        repo_id: cli.repo_id,
        timeout: Duration::from_secs(cli.timeout_secs),
        api_key: cli.api_key,
    };
    let ctx = CiContext::new(
        cli.repository,
        cli.run_id,
        cli.pr_number,
        cli.commit_sha,
        cli.output_file,
    );
    let mut report = IssueReport::new(cli.issue_type, cli.details);
    report.extra_metadata.extend(cli.metadata);
    tracing::debug!(?api, ?ctx, "resolved configuration");

    if cli.dry_run {
        let request = prepare(&api, &ctx, &report);
        print_json(&request)?;
        return Ok(());
    }

    if !cli.json {
        println!("Spawning agent for {} issue...", report.issue);
    }

    let result = dispatch(&api, &ctx, &report).context("failed to spawn agent")?;

    if cli.json {
        print_json(&result)?;
    } else {
        print_run(&result);
    }

    // The run already exists remotely; say which one if the outputs can't land.
    publish(&ctx, &result).with_context(|| {
        format!(
            "agent run {} ({}) was spawned but step outputs could not be written",
            result.id, result.web_url
        )
    })?;

    Ok(())
}

/// Parse a `KEY=VALUE` metadata pair. Numbers and booleans keep their JSON
/// type; anything else is sent as a string.
pub fn parse_metadata(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty metadata key in '{s}'"));
    }

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
        _ => Value::String(raw.to_string()),
    };
    Ok((key.to_string(), value))
}
