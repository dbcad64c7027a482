//! `dispatch-core` turns a failing CI check into a request for a hosted
//! fix-up agent.
//!
//! ```text
//! IssueReport + CiContext ──► prompt::render ──► AgentRequest
//!                                                     │
//!                     ApiConfig ──► AgentClient::spawn (POST …/agent/run)
//!                                                     │
//!                                                     ▼
//!                       AgentRunResult ──► publish (ci_output::append_outputs)
//! ```
//!
//! Nothing here reads the process environment; callers build [`ApiConfig`]
//! and [`CiContext`] once and pass them in.

pub mod ci_output;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::AgentClient;
pub use config::{ApiConfig, CiContext};
pub use dispatch::{build_request, dispatch, prepare, publish, IssueReport};
pub use error::{DispatchError, Result};
pub use types::{AgentRequest, AgentRunResult, IssueType, Metadata};
