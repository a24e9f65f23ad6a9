#[cfg(feature = "mcp")]
pub mod server {
    use crate::report::NO_MATCH_MESSAGE;
    use anyhow::Result;
    use serde::{Deserialize, Serialize};
    use std::io::{self, BufRead, Write};
    use tracing::{debug, error, info};
    use triage::{Engine, ResourceLimits};

    const PROTOCOL_VERSION: &str = "2024-11-05";
    const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

    #[derive(Debug, Deserialize)]
    struct McpRequest {
        jsonrpc: String,
        #[serde(default)]
        id: Option<serde_json::Value>,
        method: String,
        #[serde(default)]
        params: Option<serde_json::Value>,
    }

    #[derive(Debug, Serialize)]
    struct McpResponse {
        jsonrpc: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<serde_json::Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<serde_json::Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<McpError>,
    }

    #[derive(Debug, Serialize)]
    struct McpError {
        code: i32,
        message: String,
    }

    impl McpError {
        fn parse_error(message: String) -> Self {
            Self {
                code: -32700,
                message,
            }
        }

        fn invalid_request(message: String) -> Self {
            Self {
                code: -32600,
                message,
            }
        }

        fn method_not_found(method: String) -> Self {
            Self {
                code: -32601,
                message: format!("Method not found: {}", method),
            }
        }

        fn invalid_params(message: String) -> Self {
            Self {
                code: -32602,
                message,
            }
        }
    }

    struct McpServer {
        engine: Engine,
        limits: ResourceLimits,
    }

    fn text_content(text: String) -> serde_json::Value {
        serde_json::json!({
            "content": [{
                "type": "text",
                "text": text
            }]
        })
    }

    impl McpServer {
        fn new(engine: Engine) -> Self {
            Self {
                engine,
                limits: ResourceLimits::default(),
            }
        }

        fn handle_request(&self, request: McpRequest) -> McpResponse {
            debug!("Handling request: method={}", request.method);

            if request.jsonrpc != "2.0" {
                return McpResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request.id,
                    result: None,
                    error: Some(McpError::invalid_request(
                        "Invalid JSON-RPC version, expected '2.0'".to_string(),
                    )),
                };
            }

            let result = match request.method.as_str() {
                "initialize" => self.initialize(),
                "tools/list" => self.list_tools(),
                "tools/call" => self.call_tool(request.params),
                _ => Err(McpError::method_not_found(request.method)),
            };

            match result {
                Ok(result) => McpResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request.id,
                    result: Some(result),
                    error: None,
                },
                Err(error) => McpResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request.id,
                    result: None,
                    error: Some(error),
                },
            }
        }

        fn initialize(&self) -> Result<serde_json::Value, McpError> {
            info!("Initializing MCP server");
            Ok(serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": "triage-mcp-server",
                    "version": SERVER_VERSION
                },
                "capabilities": {
                    "tools": {}
                }
            }))
        }

        fn list_tools(&self) -> Result<serde_json::Value, McpError> {
            debug!("Listing tools");
            Ok(serde_json::json!({
                "tools": [
                    {
                        "name": "diagnose",
                        "description": "Diagnose a computer problem from observed symptoms. Returns every matching diagnosis, highest confidence first.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "facts": {
                                    "type": "object",
                                    "description": "Observed facts, e.g. {\"high_temp\": true, \"loud_fan\": true, \"net_state\": \"wired\"}",
                                    "additionalProperties": true
                                }
                            },
                            "required": ["facts"]
                        }
                    },
                    {
                        "name": "list_rules",
                        "description": "List the diagnostic rules in the catalog with their confidence.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {}
                        }
                    },
                    {
                        "name": "show_rule",
                        "description": "Show one rule, including the condition that triggers it and the facts it reads.",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "rule_id": {
                                    "type": "string",
                                    "description": "Rule identifier, e.g. 'R3'"
                                }
                            },
                            "required": ["rule_id"]
                        }
                    }
                ]
            }))
        }

        fn call_tool(&self, params: Option<serde_json::Value>) -> Result<serde_json::Value, McpError> {
            let params =
                params.ok_or_else(|| McpError::invalid_params("Missing params".to_string()))?;

            let tool_name = params["name"]
                .as_str()
                .ok_or_else(|| McpError::invalid_params("Missing tool name".to_string()))?;

            let empty = serde_json::json!({});
            let arguments = params.get("arguments").unwrap_or(&empty);

            debug!("Calling tool: {}", tool_name);

            match tool_name {
                "diagnose" => self.tool_diagnose(arguments),
                "list_rules" => self.tool_list_rules(),
                "show_rule" => self.tool_show_rule(arguments),
                _ => Err(McpError::invalid_params(format!(
                    "Unknown tool: {}",
                    tool_name
                ))),
            }
        }

        fn tool_diagnose(&self, args: &serde_json::Value) -> Result<serde_json::Value, McpError> {
            let facts = args
                .get("facts")
                .ok_or_else(|| McpError::invalid_params("Missing 'facts' field".to_string()))?;

            let body = serde_json::to_vec(facts)
                .map_err(|e| McpError::invalid_params(format!("Invalid facts: {}", e)))?;
            let facts = triage::facts_from_json(&body, &self.limits).map_err(|e| {
                error!("Rejected facts: {}", e);
                McpError::invalid_params(format!("Invalid facts: {}", e))
            })?;

            let diagnoses = self.engine.infer(&facts);
            info!(
                "Diagnosed {} fact(s) with {} match(es)",
                facts.len(),
                diagnoses.len()
            );

            if diagnoses.is_empty() {
                return Ok(text_content(NO_MATCH_MESSAGE.to_string()));
            }

            let mut output = format!("## Diagnoses ({})\n\n", diagnoses.len());
            for diagnosis in &diagnoses {
                output.push_str(&format!(
                    "### {} ({}, confidence {:.2})\n\n",
                    diagnosis.cause, diagnosis.rule_id, diagnosis.confidence
                ));
                output.push_str(&format!("{}\n\n", diagnosis.explanation));
                for (i, step) in diagnosis.recommendations.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, step));
                }
                output.push('\n');
            }

            Ok(text_content(output))
        }

        fn tool_list_rules(&self) -> Result<serde_json::Value, McpError> {
            let rules = self.engine.describe_rules();

            let output = if rules.is_empty() {
                "No rules loaded.".to_string()
            } else {
                let mut s = format!("## Rules ({})\n\n", rules.len());
                for rule in &rules {
                    s.push_str(&format!(
                        "- **{}** {}: {} ({}%)\n",
                        rule.id, rule.name, rule.cause, rule.confidence_percent
                    ));
                }
                s
            };

            debug!("Listed {} rules", rules.len());
            Ok(text_content(output))
        }

        fn tool_show_rule(&self, args: &serde_json::Value) -> Result<serde_json::Value, McpError> {
            let rule_id = args["rule_id"]
                .as_str()
                .ok_or_else(|| McpError::invalid_params("Missing 'rule_id' field".to_string()))?;

            let rule = self.engine.catalog().get(rule_id).ok_or_else(|| {
                McpError::invalid_params(format!(
                    "Rule '{}' not found. Use list_rules to see available rules.",
                    rule_id
                ))
            })?;

            let mut output = format!("# Rule {}: {}\n\n", rule.id, rule.name);
            output.push_str(&format!("**When**: {}\n\n", rule.condition));
            output.push_str(&format!("**Cause**: {}\n\n", rule.cause));
            output.push_str(&format!("**Explanation**: {}\n\n", rule.explanation));
            output.push_str(&format!(
                "**Confidence**: {} ({}%)\n\n",
                rule.confidence,
                rule.confidence.percent()
            ));
            output.push_str("## Facts read\n\n");
            for key in rule.condition.fact_keys() {
                output.push_str(&format!("- {}\n", key));
            }

            Ok(text_content(output))
        }
    }

    pub fn start_server(engine: Engine) -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "triage=info".into()),
            )
            .with_writer(io::stderr)
            .init();

        info!("Starting triage MCP server v{}", SERVER_VERSION);
        info!("Protocol version: {}", PROTOCOL_VERSION);

        let server = McpServer::new(engine);
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            let response = match serde_json::from_str::<McpRequest>(&line) {
                Ok(request) => server.handle_request(request),
                Err(e) => {
                    error!("Parse error: {}", e);
                    McpResponse {
                        jsonrpc: "2.0".to_string(),
                        id: None,
                        result: None,
                        error: Some(McpError::parse_error(format!("Parse error: {}", e))),
                    }
                }
            };

            let response_json = serde_json::to_string(&response)?;
            writeln!(stdout, "{}", response_json)?;
            stdout.flush()?;
        }

        info!("MCP server shutting down");
        Ok(())
    }

}

#[cfg(not(feature = "mcp"))]
pub mod server {
    use anyhow::Result;
    use triage::Engine;

    pub fn start_server(_engine: Engine) -> Result<()> {
        anyhow::bail!("MCP feature not enabled. Recompile with --features mcp")
    }
}
