use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use windtunnel::batch::Batch;
use windtunnel::settings::{self, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let settings = settings::load_config(&args)?;

    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        domains = settings.domains.len(),
        output_dir = %settings.output_dir.display(),
        "loaded configuration"
    );
    debug!("{}", settings);

    let report = Batch::new(settings).run();
    if !report.is_success() {
        anyhow::bail!(
            "{} of {} domains failed",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }

    Ok(())
}
