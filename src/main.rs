use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = cli::Args::parse();
    let config = args.fetch_config()?;

    let meta = pagemeta::fetch_meta(&args.url, &config)?;
    println!("{}", serde_json::to_string_pretty(&meta)?);

    Ok(())
}
