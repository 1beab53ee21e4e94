use std::env;

use clap::Parser;

use signconf_core::{SigningConfigurator, PROJECT_FILE, TEAM_ID_ENV};

#[derive(Debug, Parser)]
#[command(
    name = "signconf",
    author,
    version,
    about = "Switches an Xcode project to manual code signing for CI builds"
)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    Cli::parse();

    let configurator = SigningConfigurator::new(PROJECT_FILE, env::var(TEAM_ID_ENV).ok());
    configurator.run()?;

    Ok(())
}
