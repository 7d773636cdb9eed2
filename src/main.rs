use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;
use unitview::cli::{completions, inspect, load_config, preview, render, validate, Cli, Commands};
use unitview::output::Printer;

fn main() -> Result<()> {
    // Validation findings are logged at warn, so show them unless RUST_LOG says otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Preview(args) => preview::run(args, &load_config(config)?, &printer)?,
        Commands::Render(args) => render::run(args, &load_config(config)?, &printer)?,
        Commands::Inspect(args) => inspect::run(args, &printer)?,
        Commands::Validate(args) => validate::run(args, &load_config(config)?, &printer)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
