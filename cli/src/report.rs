//! Response bodies shared by the JSON output, HTTP server and MCP server

use serde::Serialize;
use triage::{Diagnosis, RuleDescriptor};

pub const NO_MATCH_MESSAGE: &str = "No matching rule found for the provided symptoms.";

#[derive(Debug, Serialize)]
pub struct DiagnoseResponse {
    pub result: Vec<Diagnosis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl DiagnoseResponse {
    pub fn new(result: Vec<Diagnosis>) -> Self {
        let message = result.is_empty().then_some(NO_MATCH_MESSAGE);
        Self { result, message }
    }
}

#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub rules: Vec<RuleDescriptor>,
}
