//! Prompt templates, one per issue type plus a generic fallback.

use crate::config::CiContext;
use crate::types::IssueType;

/// Render the full prompt for an issue: the type's template followed by
/// pull-request and commit context lines when those are known.
pub fn render(issue: &IssueType, details: &str, ctx: &CiContext) -> String {
    let mut prompt = template(issue, details, ctx);

    if let Some(pr) = &ctx.pr_number {
        prompt.push_str(&format!("\n\nContext: Pull Request #{pr}"));
    }
    if !ctx.commit_sha.is_empty() {
        prompt.push_str(&format!("\nCommit: {}", ctx.commit_sha));
    }

    prompt
}

/// The bare template for `issue`, without context lines.
pub fn template(issue: &IssueType, details: &str, ctx: &CiContext) -> String {
    let repo = ctx.repository();
    match issue {
        IssueType::Lint => format!(
            "Fix linting errors in repository {repo}.\n\
             Details: {details}\n\
             Make code comply with project style guide."
        ),
        IssueType::Test => format!(
            "Fix failing tests in repository {repo}.\n\
             Details: {details}\n\
             Ensure all tests pass without breaking existing functionality."
        ),
        IssueType::Build => format!(
            "Fix build errors in repository {repo}.\n\
             Details: {details}\n\
             Resolve compilation/build issues."
        ),
        IssueType::Security => format!(
            "Fix security vulnerabilities in repository {repo}.\n\
             Details: {details}\n\
             Apply security best practices and update dependencies."
        ),
        IssueType::CodeRabbit => {
            let pr = ctx.pr_number.as_deref().unwrap_or_default();
            format!(
                "Implement CodeRabbit suggestions for PR #{pr} in {repo}.\n\
                 Suggestions: {details}\n\
                 Apply all recommended improvements."
            )
        }
        IssueType::Performance => format!(
            "Optimize performance issues in repository {repo}.\n\
             Details: {details}\n\
             Improve code efficiency and reduce bottlenecks."
        ),
        IssueType::Coverage => format!(
            "Improve test coverage in repository {repo}.\n\
             Current coverage: {details}\n\
             Add comprehensive tests to reach 80% coverage."
        ),
        IssueType::Other(label) => fallback(label, details, repo),
    }
}

fn fallback(label: &str, details: &str, repo: &str) -> String {
    format!("Fix {label} issue in {repo}: {details}")
}
