use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use patch_scrub::PatchScrubber;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patch-scrub")]
#[command(version)]
#[command(about = "Strip self-closing markup reorder noise from unified diffs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a patch file, dropping noise-only markup changes
    Clean {
        /// Source patch file
        input: PathBuf,
        /// Destination path (default: `<stem>-scrubbed.<ext>` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate a roff man page
    Man,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { input, output } => {
            let destination = output.unwrap_or_else(|| default_output_path(&input));
            match PatchScrubber::new(&input, &destination).run() {
                Ok(outcome) => {
                    for block in &outcome.malformed {
                        eprintln!("Warning: {}", block);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "patch-scrub", &mut io::stdout());
        }
        Commands::Man => {
            if let Err(e) = clap_mangen::Man::new(Cli::command()).render(&mut io::stdout()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// `changes.patch` becomes `changes-scrubbed.patch` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("patch");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-scrubbed.{}", stem, ext),
        None => format!("{}-scrubbed", stem),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_keeps_extension() {
        assert_eq!(
            default_output_path(Path::new("dir/changes.patch")),
            PathBuf::from("dir/changes-scrubbed.patch")
        );
    }

    #[test]
    fn default_output_without_extension() {
        assert_eq!(
            default_output_path(Path::new("changes")),
            PathBuf::from("changes-scrubbed")
        );
    }
}
