mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tyrescan_lib::ScanConfig;

#[derive(Parser)]
#[command(name = "tyrescan")]
#[command(about = "Find UK truck tyre companies in the Companies House register")]
struct Cli {
    #[command(flatten)]
    scan: commands::scan::ScanArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tyrescan=info".parse()?)
                .add_directive("companies_house_api=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ScanConfig::load()?;
    cli.scan.apply(&mut config);

    commands::scan::run(&config).await
}
