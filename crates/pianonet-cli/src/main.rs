//! Pianonet CLI - Command-line interface for note sequences
//!
//! This binary creates, inspects, segments, and converts the flattened note
//! sequences used as model input.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pianonet_cli::{commands, logging};

/// Pianonet - Flattened pianoroll note sequences
#[derive(Parser)]
#[command(name = "pianonet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a note sequence from a 0/1 text file and a transformer description
    Create {
        /// Path to the transformer JSON description
        #[arg(short, long)]
        transformer: String,

        /// Path to a text file of 0/1 notes (whitespace ignored)
        #[arg(short, long)]
        notes: String,

        /// Output path
        #[arg(short, long)]
        output: String,

        /// Output container format
        #[arg(long, default_value = "json", value_parser = ["json", "binary"])]
        format: String,
    },

    /// Show lengths, transformer parameters, and the content hash of a sequence
    Info {
        /// Path to the saved sequence
        #[arg(short, long)]
        input: String,

        /// Container format of the input
        #[arg(long, default_value = "json", value_parser = ["json", "binary"])]
        format: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a random run of whole timesteps into a new sequence
    Segment {
        /// Path to the saved sequence
        #[arg(short, long)]
        input: String,

        /// Container format of the input
        #[arg(long, default_value = "json", value_parser = ["json", "binary"])]
        format: String,

        /// Segment length in timesteps
        #[arg(short = 'n', long)]
        timesteps: usize,

        /// Output path
        #[arg(short, long)]
        output: String,

        /// Output container format (default: same as input)
        #[arg(long, value_parser = ["json", "binary"])]
        output_format: Option<String>,

        /// RNG seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a window of notes as a 0/1 string
    Window {
        /// Path to the saved sequence
        #[arg(short, long)]
        input: String,

        /// Container format of the input
        #[arg(long, default_value = "json", value_parser = ["json", "binary"])]
        format: String,

        /// First note index (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        start: isize,

        /// Exclusive end note index
        #[arg(long, allow_hyphen_values = true)]
        end: isize,

        /// Pad positions outside the sequence with 0 instead of clamping
        #[arg(long)]
        pad: bool,
    },

    /// Re-encode a sequence in another container format
    Convert {
        /// Path to the saved sequence
        #[arg(short, long)]
        input: String,

        /// Container format of the input
        #[arg(long, value_parser = ["json", "binary"])]
        from: String,

        /// Output path
        #[arg(short, long)]
        output: String,

        /// Container format of the output
        #[arg(long, value_parser = ["json", "binary"])]
        to: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let result = match cli.command {
        Commands::Create {
            transformer,
            notes,
            output,
            format,
        } => commands::create::run(&transformer, &notes, &output, &format),
        Commands::Info {
            input,
            format,
            json,
        } => commands::info::run(&input, &format, json),
        Commands::Segment {
            input,
            format,
            timesteps,
            output,
            output_format,
            seed,
        } => commands::segment::run(
            &input,
            &format,
            timesteps,
            &output,
            output_format.as_deref(),
            seed,
        ),
        Commands::Window {
            input,
            format,
            start,
            end,
            pad,
        } => commands::window::run(&input, &format, start, end, pad),
        Commands::Convert {
            input,
            from,
            output,
            to,
        } => commands::convert::run(&input, &from, &output, &to),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_create() {
        let cli = Cli::try_parse_from([
            "pianonet",
            "create",
            "--transformer",
            "t.json",
            "--notes",
            "notes.txt",
            "--output",
            "song.pnsq",
            "--format",
            "binary",
        ])
        .unwrap();
        match cli.command {
            Commands::Create {
                transformer,
                notes,
                output,
                format,
            } => {
                assert_eq!(transformer, "t.json");
                assert_eq!(notes, "notes.txt");
                assert_eq!(output, "song.pnsq");
                assert_eq!(format, "binary");
            }
            _ => panic!("expected create command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_info_defaults_to_json_format() {
        let cli = Cli::try_parse_from(["pianonet", "info", "-i", "song.pnsq.json", "-v"]).unwrap();
        match cli.command {
            Commands::Info {
                input,
                format,
                json,
            } => {
                assert_eq!(input, "song.pnsq.json");
                assert_eq!(format, "json");
                assert!(!json);
            }
            _ => panic!("expected info command"),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_window_accepts_negative_start() {
        let cli = Cli::try_parse_from([
            "pianonet", "window", "-i", "song.pnsq.json", "--start", "-96", "--end", "4", "--pad",
        ])
        .unwrap();
        match cli.command {
            Commands::Window {
                start, end, pad, ..
            } => {
                assert_eq!(start, -96);
                assert_eq!(end, 4);
                assert!(pad);
            }
            _ => panic!("expected window command"),
        }
    }

    #[test]
    fn test_cli_segment_parses_seed() {
        let cli = Cli::try_parse_from([
            "pianonet",
            "segment",
            "-i",
            "song.pnsq",
            "--format",
            "binary",
            "-n",
            "32",
            "-o",
            "part.pnsq",
            "--seed",
            "7",
        ])
        .unwrap();
        match cli.command {
            Commands::Segment {
                timesteps,
                output_format,
                seed,
                ..
            } => {
                assert_eq!(timesteps, 32);
                assert_eq!(output_format, None);
                assert_eq!(seed, Some(7));
            }
            _ => panic!("expected segment command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let err = Cli::try_parse_from(["pianonet", "info", "-i", "song", "--format", "midi"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("midi"));
    }

    #[test]
    fn test_cli_convert_requires_target_format() {
        let err = Cli::try_parse_from(["pianonet", "convert", "-i", "a", "--from", "json", "-o", "b"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--to"));
    }
}
