use clap::Parser;
use lasercam::cli::{run, Cli};
use lasercam::init_logging;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let cli = Cli::parse();
    tracing::debug!("lasercam {} (built {})", lasercam::VERSION, lasercam::BUILD_DATE);
    run(&cli)
}
