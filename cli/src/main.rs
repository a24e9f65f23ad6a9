mod error_formatter;
mod formatter;
mod interactive;
mod mcp;
mod report;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use report::{DiagnoseResponse, RulesResponse};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use triage::{Engine, ResourceLimits};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Rule-based diagnosis for misbehaving computers.")]
#[command(
    long_about = "Triage matches observed symptoms against a catalog of diagnostic rules and reports every diagnosis that applies, most confident first.\nThe CLI diagnoses from the command line, serves the engine over HTTP, or integrates with AI tools via MCP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a set of symptoms (try: high_temp loud_fan)
    ///
    /// Evaluates every rule in the catalog against the given facts and prints
    /// the matching diagnoses, highest confidence first.
    Diagnose {
        /// Observed facts (format: name, name=true|false, or name=value)
        ///
        /// Examples: high_temp, ip_valid=false, net_state=wired
        facts: Vec<String>,
        /// Read facts from a JSON object file ('-' for stdin)
        #[arg(long = "json-input", value_name = "FILE")]
        json_input: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Pick symptoms interactively
        #[arg(short = 'i', long)]
        interactive: bool,
        /// Rule catalog to use instead of the builtin one (TOML file or directory)
        #[arg(short = 'r', long = "rules", value_name = "PATH")]
        rules: Option<PathBuf>,
    },
    /// List all rules with their confidence
    Rules {
        /// Print the rules as JSON
        #[arg(long, conflicts_with = "toml")]
        json: bool,
        /// Print the catalog as TOML, ready to edit and load with --rules
        #[arg(long)]
        toml: bool,
        /// Rule catalog to use instead of the builtin one (TOML file or directory)
        #[arg(short = 'r', long = "rules", value_name = "PATH")]
        rules: Option<PathBuf>,
    },
    /// Show a single rule, including its condition
    Show {
        /// Rule id, e.g. R3
        rule_id: String,
        /// Rule catalog to use instead of the builtin one (TOML file or directory)
        #[arg(short = 'r', long = "rules", value_name = "PATH")]
        rules: Option<PathBuf>,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// API: POST /diagnose with a JSON object of facts, GET /rules
    Server {
        /// Rule catalog to use instead of the builtin one (TOML file or directory)
        #[arg(short = 'r', long = "rules", value_name = "PATH")]
        rules: Option<PathBuf>,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Start MCP server for AI assistant integration (stdio)
    ///
    /// Provides tools for diagnosing symptoms and inspecting the rule catalog.
    Mcp {
        /// Rule catalog to use instead of the builtin one (TOML file or directory)
        #[arg(short = 'r', long = "rules", value_name = "PATH")]
        rules: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Diagnose {
            facts,
            json_input,
            json,
            interactive,
            rules,
        } => diagnose_command(
            rules.as_deref(),
            facts,
            json_input.as_deref(),
            *json,
            *interactive,
        ),
        Commands::Rules { json, toml, rules } => rules_command(rules.as_deref(), *json, *toml),
        Commands::Show { rule_id, rules } => show_command(rules.as_deref(), rule_id),
        Commands::Server { rules, host, port } => server_command(rules.as_deref(), host, *port),
        Commands::Mcp { rules } => mcp_command(rules.as_deref()),
    };

    if let Err(e) = result {
        if let Some(triage_err) = e.downcast_ref::<triage::TriageError>() {
            eprintln!("{}", error_formatter::format_error(triage_err));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn diagnose_command(
    rules: Option<&Path>,
    facts: &[String],
    json_input: Option<&Path>,
    json: bool,
    interactive: bool,
) -> Result<()> {
    let engine = load_engine(rules)?;
    let limits = ResourceLimits::default();

    let refs: Vec<&str> = facts.iter().map(|s| s.as_str()).collect();
    let mut fact_set = triage::parse_facts(&refs, &limits)?;

    if interactive {
        let picked = interactive::run_interactive(engine.catalog())?;
        fact_set = triage::merge_facts(fact_set, &picked, &limits)?;
    }

    if let Some(path) = json_input {
        let body = read_input(path)?;
        let from_json = triage::facts_from_json(&body, &limits)?;
        fact_set = triage::merge_facts(fact_set, &from_json, &limits)?;
    }

    let diagnoses = engine.infer(&fact_set);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&DiagnoseResponse::new(diagnoses))?
        );
    } else {
        let formatter = Formatter::default();
        print!("{}", formatter.format_diagnoses(&fact_set, &diagnoses));
    }

    Ok(())
}

fn rules_command(rules: Option<&Path>, json: bool, toml: bool) -> Result<()> {
    let engine = load_engine(rules)?;

    if toml {
        print!("{}", engine.catalog().to_toml()?);
    } else if json {
        let response = RulesResponse {
            rules: engine.describe_rules(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let formatter = Formatter::default();
        print!("{}", formatter.format_rules(&engine.describe_rules()));
    }

    Ok(())
}

fn show_command(rules: Option<&Path>, rule_id: &str) -> Result<()> {
    let engine = load_engine(rules)?;

    let rule = engine
        .catalog()
        .get(rule_id)
        .with_context(|| format!("Rule '{}' not found. Run 'triage rules' to list them.", rule_id))?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_rule(rule));

    Ok(())
}

fn server_command(rules: Option<&Path>, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            let engine = load_engine(rules)?;

            println!(
                "Starting HTTP server with {} rule(s) loaded",
                engine.catalog().len()
            );
            server::http::start_server(engine, ResourceLimits::default(), host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (rules, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

fn mcp_command(rules: Option<&Path>) -> Result<()> {
    #[cfg(feature = "mcp")]
    {
        let engine = load_engine(rules)?;

        eprintln!(
            "Starting MCP server with {} rule(s) loaded",
            engine.catalog().len()
        );
        mcp::server::start_server(engine)?;
    }

    #[cfg(not(feature = "mcp"))]
    {
        let _ = rules;
        eprintln!("Error: MCP feature not enabled");
        eprintln!("Recompile with: cargo build --features mcp");
        std::process::exit(1);
    }

    Ok(())
}

/// Build an engine over the builtin catalog, or over the catalog at `rules`
fn load_engine(rules: Option<&Path>) -> Result<Engine> {
    match rules {
        Some(path) => Ok(Engine::new(Arc::new(triage::load_catalog(path)?))),
        None => Ok(Engine::default()),
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read facts from stdin")?;
        Ok(buffer)
    } else {
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
