use clap::Parser;
use client::network::Client;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Ask the server to start the shared game once connected
    #[arg(long)]
    start: bool,

    /// Only watch; never send steering input
    #[arg(long)]
    no_autopilot: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    let mut client = Client::new(&args.server, args.start, !args.no_autopilot).await?;
    client.run().await?;

    let view = client.view();
    info!(
        "Final score {} after {} ticks ({} deaths seen)",
        view.score,
        view.tick(),
        view.deaths.len()
    );

    Ok(())
}
