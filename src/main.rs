use clap::Parser;
use qartod_qc::cli::{run, Cli};
use qartod_qc::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
