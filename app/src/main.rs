use clap::Parser;
use vault_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vault_cli::init_tracing();
    vault_cli::run(Cli::parse()).await
}
