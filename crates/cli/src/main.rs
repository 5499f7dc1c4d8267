//! Prioq CLI - Command-line interface for the Prioq daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9527";

#[derive(Parser)]
#[command(name = "prioq")]
#[command(about = "Prioq priority job queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "PRIOQ_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Enqueue jobs at the back of the queue, in the given order
    Enqueue {
        /// Job descriptions
        #[arg(required = true)]
        descriptions: Vec<String>,
    },

    /// List all jobs in processing order
    List,

    /// Show one job
    Get {
        /// Job ID
        job_id: i64,
    },

    /// Set a job's priority (lower runs earlier)
    Reprioritize {
        /// Job ID
        job_id: i64,

        /// New priority
        #[arg(allow_hyphen_values = true)]
        priority: i64,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    /// `null` when the server could not read the request id
    #[allow(dead_code)]
    id: Option<serde_json::Value>,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct JobRow {
    id: i64,
    priority: i64,
    description: String,
    #[tabled(display_with = "display_finished")]
    finished_at: Option<String>,
}

fn display_finished(finished_at: &Option<String>) -> String {
    finished_at.clone().unwrap_or_else(|| "-".to_string())
}

#[derive(Deserialize)]
struct JobList {
    jobs: Vec<JobRow>,
}

#[derive(Deserialize)]
struct JobEnvelope {
    job: JobRow,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    into_result(response)
}

fn into_result(response: JsonRpcResponse) -> Result<serde_json::Value> {
    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_jobs(jobs: Vec<JobRow>) {
    if jobs.is_empty() {
        println!("{}", "Queue is empty".yellow());
        return;
    }
    println!("{}", Table::new(jobs));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Enqueue { descriptions } => {
            let params = json!({ "descriptions": descriptions });

            let result = call_rpc(&cli.rpc_url, "jobs.enqueue.v1", params).await?;
            let created: JobList = serde_json::from_value(result)?;

            println!(
                "{}",
                format!("✓ {} job(s) enqueued", created.jobs.len())
                    .green()
                    .bold()
            );
            println!();
            print_jobs(created.jobs);
        }

        Commands::List => {
            let result = call_rpc(&cli.rpc_url, "jobs.list.v1", json!({})).await?;
            let listed: JobList = serde_json::from_value(result)?;

            println!("{}", "Jobs (processing order)".cyan().bold());
            println!();
            print_jobs(listed.jobs);
        }

        Commands::Get { job_id } => {
            let params = json!({ "job_id": job_id });

            let result = call_rpc(&cli.rpc_url, "jobs.get.v1", params).await?;
            let found: JobEnvelope = serde_json::from_value(result)?;

            print_jobs(vec![found.job]);
        }

        Commands::Reprioritize { job_id, priority } => {
            let params = json!({
                "job_id": job_id,
                "priority": priority,
            });

            let result = call_rpc(&cli.rpc_url, "jobs.reprioritize.v1", params).await?;
            let updated: JobEnvelope = serde_json::from_value(result)?;

            println!(
                "{}",
                format!("✓ Job {} now has priority {}", job_id, updated.job.priority)
                    .green()
                    .bold()
            );
            println!();
            print_jobs(vec![updated.job]);
        }
    }

    Ok(())
}
