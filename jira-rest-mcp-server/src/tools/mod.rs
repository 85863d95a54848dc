//! Tools module for the JIRA REST MCP Server
//!
//! One module per MCP tool. Each tool builds a fresh Jira client from the
//! connection details in its arguments and performs a single request.

pub mod create_issue;
pub mod search_issues;
pub mod update_issue;

pub use create_issue::*;
pub use search_issues::*;
pub use update_issue::*;
