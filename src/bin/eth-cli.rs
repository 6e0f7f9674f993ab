use clap::{Parser, Subcommand};
use serde_json::Value;

use eth_gateway::models::TransferRequest;

#[derive(Parser)]
#[command(name = "eth-cli")]
#[command(about = "Command-line client for the eth-gateway API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest block
    Block,
    /// Look up a transaction by hash
    Tx { hash: String },
    /// Show the balance of an address
    Balance { address: String },
    /// Send a native transfer
    Transfer {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Amount in wei
        #[arg(long)]
        amount: u128,
        /// Environment variable holding the sender's private key
        #[arg(long, default_value = "ETH_GATEWAY_PRIVATE_KEY")]
        key_env: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/api/v1/eth", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::Block => client.get(format!("{}/block/latest", base)).send().await?,
        Commands::Tx { hash } => {
            client
                .get(format!("{}/transaction", base))
                .query(&[("hash", hash)])
                .send()
                .await?
        }
        Commands::Balance { address } => {
            client.get(format!("{}/balance/{}", base, address)).send().await?
        }
        Commands::Transfer { to, amount, key_env } => {
            // Read from the environment so the key stays out of shell history.
            let priv_key = std::env::var(&key_env)
                .map_err(|_| format!("environment variable {} not set", key_env))?;
            client
                .post(format!("{}/transfer", base))
                .json(&TransferRequest { priv_key, to, amount })
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status == reqwest::StatusCode::NO_CONTENT {
        println!("Not found");
        return Ok(());
    }

    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
