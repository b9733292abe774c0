use clap::Parser;
use shopscrape_cli::{init_tracing, run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
