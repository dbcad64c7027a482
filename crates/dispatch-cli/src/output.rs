use dispatch_core::AgentRunResult;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_run(result: &AgentRunResult) {
    println!("Agent spawned successfully!");
    println!("  ID: {}", result.id);
    println!("  Status: {}", result.status);
    println!("  Web URL: {}", result.web_url);
}
