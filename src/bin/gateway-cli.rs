use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use backoffice_gateway::config::loader::{load_config, load_default_config};
use backoffice_gateway::config::GatewayConfig;
use backoffice_gateway::routing::RouteTable;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the Back-Office Gateway", long_about = None)]
struct Cli {
    /// Configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a running gateway's health endpoint
    Health {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Show where the gateway would send a request path
    Resolve {
        /// Inbound request path (e.g. /hr/employees)
        path: String,
    },
    /// Load and validate a configuration, then print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli.config)?;

    match cli.command {
        Commands::Health { url } => {
            let client = reqwest::Client::new();
            let res = client.get(format!("{}/health", url)).send().await?;
            print_response(res).await?;
        }
        Commands::Resolve { path } => {
            let table = RouteTable::new(&config.services);
            match table.resolve(&path) {
                Some(route) => {
                    println!("{} -> {} [{}]", path, route.target_url(None), route.service)
                }
                None => println!("{} -> no route (gateway answers 404)", path),
            }
        }
        Commands::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load(path: &Option<PathBuf>) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };
    Ok(config)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
