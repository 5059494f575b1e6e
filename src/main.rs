use clap::Parser;
use xsratio::app::{self, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    app::run(&cli)?;
    Ok(())
}
