use clap::Parser;

use termsol::logging::init_logging;
use termsol::renderer::CliRenderer;
use termsol::{Session, Table, Variant};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which solitaire to play.
    #[arg(long, value_enum, default_value_t = Variant::Klondike)]
    variant: Variant,
    #[arg(long, help = "Fix the shuffle seed for a reproducible deal (e.g., --seed 12345)")]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    println!(
        r#"
┌─────────────────────────────────────────┐
│        {:^8} Solitaire (CLI)          │
│   Type 'help' or '?' for commands.      │
└─────────────────────────────────────────┘
"#,
        cli.variant.name()
    );
    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }

    let table = Table::deal(cli.variant, cli.seed);
    let mut session = Session::new(table, CliRenderer::new());
    session.run()?;
    Ok(())
}
