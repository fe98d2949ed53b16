//! CLI entry point for treedoc

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use treedoc::Generator;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treedoc")]
#[command(about = "Generate an annotated directory-tree document for a project")]
#[command(version)]
#[command(after_help = "Examples:
  treedoc                                      Generate docs/directory-structure.md
  treedoc --add src/main.rs \"CLI entry point\"  Record a description for one entry
  treedoc --missing                            List entries without descriptions")]
struct Args {
    /// Project root (default: auto-detected from the working directory)
    #[arg(short = 'r', long = "root")]
    root: Option<PathBuf>,

    /// Add a description for one entry and save it immediately
    #[arg(
        short = 'a',
        long = "add",
        num_args = 2,
        value_names = ["PATH", "DESCRIPTION"]
    )]
    add: Option<Vec<String>>,

    /// Only list entries lacking descriptions, without writing the document
    #[arg(short = 'm', long = "missing", conflicts_with = "add")]
    missing: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();
    let use_color = should_use_color(args.color);

    let mut generator = Generator::new(args.root.as_deref()).with_color(use_color);

    if let Some(pair) = args.add {
        let (path, description) = (&pair[0], &pair[1]);
        match generator.add_description(path, description) {
            Ok(relative) => {
                println!("Added description: {} -> {}", relative, description);
                if let Err(e) = generator.save_store() {
                    eprintln!("treedoc: error: cannot save config: {}", e);
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("treedoc: error: {}", e);
                process::exit(1);
            }
        }
    } else if args.missing {
        generator.show_missing();
    } else if let Err(e) = generator.generate_and_save() {
        eprintln!("treedoc: error: {}", e);
        process::exit(1);
    }
}
