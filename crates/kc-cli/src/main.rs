/// `kc` command-line tool — inspect, round-trip check, JSON-export, and
/// scene-walk Koikatu-family card and scene PNG files.
///
/// # Command overview
///
/// ```text
/// kc <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Load a file and print an inspect summary and/or JSON export
///   roundtrip  Load then re-save a file, reporting byte-for-byte equality
///   walk       Walk a scene file's object tree
///   help       Print help information
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_json;
mod cmd_load;
mod cmd_save;
mod cmd_walk;

/// The `kc` command-line tool.
#[derive(Parser)]
#[command(name = "kc", version, about = "Koikatu-family card/scene codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a card or scene file and print an inspect summary or JSON export.
    Decode(DecodeArgs),
    /// Load then re-save a file, reporting byte-for-byte equality.
    Roundtrip(RoundtripArgs),
    /// Walk a scene file's object tree.
    Walk(WalkArgs),
}

/// Arguments for `kc decode`.
///
/// With no flags, prints the same summary as `--inspect`. `--json` and
/// `--inspect` may be combined; each prints its own section.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the card or scene `.png` file.
    pub file: PathBuf,

    /// Print a human-readable block summary (variant, header, block list).
    #[arg(long)]
    pub inspect: bool,

    /// Print (or write, with `-o`) the document's JSON export.
    #[arg(long)]
    pub json: bool,

    /// Include embedded image bytes (base64) in the JSON export.
    #[arg(long)]
    pub include_image: bool,

    /// Write JSON output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `kc roundtrip`.
#[derive(clap::Args)]
pub struct RoundtripArgs {
    /// Path to the card or scene `.png` file.
    pub file: PathBuf,
}

/// Arguments for `kc walk`.
#[derive(clap::Args)]
pub struct WalkArgs {
    /// Path to the scene `.png` file.
    pub file: PathBuf,

    /// Restrict output to nodes of this object-type tag (0=character,
    /// 1=item, 2=light, 3=folder, 4=route, 5=camera, 7=text).
    #[arg(long = "type")]
    pub object_type: Option<i64>,

    /// Include each node's traversal depth in the output.
    #[arg(long)]
    pub depth: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode(args) => run_decode(&args),
        Commands::Roundtrip(args) => cmd_save::run(&args),
        Commands::Walk(args) => cmd_walk::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    // Bare `kc decode file.png` behaves like `--inspect` so the common
    // case doesn't need a flag at all.
    let inspect = args.inspect || !args.json;
    if inspect {
        cmd_load::run(args)?;
    }
    if args.json {
        cmd_json::run(args)?;
    }
    Ok(())
}
