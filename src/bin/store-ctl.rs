//! Maintenance CLI for the shared transaction counter.
//!
//! The running system never repairs the counter file itself; after a
//! corruption or a deliberate reset this tool is the operator's way to
//! inspect and rewrite it under the same lock the instances use.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use telemetry_sim::sequence::SequenceStore;

#[derive(Parser)]
#[command(name = "store-ctl")]
#[command(about = "Inspect and repair the shared transaction counter", long_about = None)]
struct Cli {
    /// Path to the counter file.
    #[arg(short, long, default_value = "data/transaction_counter.txt")]
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the id the next allocation will return
    Show,
    /// Rewrite the counter so the next allocation returns VALUE
    Set { value: u64 },
    /// Seed a fresh counter at 1
    Init,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let store = SequenceStore::new(&cli.path);

    match cli.command {
        Commands::Show => {
            let next = store.peek()?;
            println!("{}", next);
        }
        Commands::Set { value } => {
            store.reset(value)?;
            println!("counter set, next allocation returns {}", value);
        }
        Commands::Init => {
            store.reset(1)?;
            println!("counter initialized at {}", cli.path.display());
        }
    }

    Ok(())
}
