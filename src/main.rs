use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod detail;
mod error;
mod interaction;
mod layout;
mod model;
mod output;
mod render;
mod tui;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with rendered output
    let filter = if cli.verbose {
        EnvFilter::new("ladder=debug")
    } else {
        EnvFilter::new("ladder=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => cli::render::execute(args),
        Commands::Layout(args) => cli::layout::execute(args),
        Commands::Show(args) => cli::show::execute(args),
        Commands::Validate(args) => cli::validate::execute(args),
        Commands::Init(args) => cli::init::execute(args),
        Commands::Schema => cli::schema::execute(),
        Commands::Tui(args) => cli::tui::execute(args),
    }
}
