use clap::Parser;
use url_relay::RelayResponse;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Fetch a URL through a running url-relay", long_about = None)]
struct Cli {
    /// Relay base URL.
    #[arg(short, long, default_value = "http://localhost:8001")]
    relay: String,

    /// URL the relay should fetch.
    url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .post(&cli.relay)
        .json(&serde_json::json!({ "url": cli.url }))
        .send()
        .await?;

    let status = res.status();
    match res.json::<RelayResponse>().await? {
        RelayResponse::Success { content, .. } => {
            println!("{}", content);
            Ok(())
        }
        RelayResponse::Error { message, .. } => {
            eprintln!("Error: relay returned status {}", status);
            eprintln!("Message: {}", message);
            std::process::exit(1);
        }
    }
}
