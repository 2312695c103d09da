use clap::Parser;
use policychat_cli::{Cli, run};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    run(Cli::parse()).await
}
