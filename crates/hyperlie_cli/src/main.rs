//! Command-line interface for computing with simple Lie algebras.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;

    let config = cli::load_config(args.config.as_deref())?;
    log::debug!("using {config:?}");
    let engine = hyperlie::LieEngine::new(config);
    cli::exec(&engine, args.subcommand, args.text)
}
