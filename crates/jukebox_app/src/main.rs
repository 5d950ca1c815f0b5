mod cli;
mod platform;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let matches = cli::build_cli().get_matches();
    platform::run_app(&matches).await
}
