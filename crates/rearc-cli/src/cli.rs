//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use rearc_core::Format;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rearc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute; interactive mode when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List files in an archive
    Ls(LsArgs),
    /// Create a new archive from a local file or directory
    Create(CreateArgs),
    /// Extract an archive to a directory
    Extract(ExtractArgs),
    /// Add a file or directory to an existing archive
    Add(AddArgs),
    /// Remove a file or directory from an existing archive
    Rm(RmArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct LsArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Password for encrypted archives
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Destination archive path
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Source file or directory to add
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Path inside the archive
    #[arg(short = 'd', long = "dest-path", value_name = "PATH", default_value = "")]
    pub dest_path: String,

    /// Password-protect the archive
    #[arg(short, long)]
    pub password: Option<String>,

    /// Force a container format instead of resolving it from the file name
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<Format>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory (default: current directory)
    #[arg(value_name = "DEST")]
    pub dest: Option<PathBuf>,

    /// Password for encrypted archives
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Path to the existing archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Source file or directory to add
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Path inside the archive
    #[arg(short = 'd', long = "dest-path", value_name = "PATH", default_value = "")]
    pub dest_path: String,

    /// Password for encrypted archives (reused for the re-export)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output archive path (default: overwrite the input archive)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Force a container format instead of resolving it from the file name
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<Format>,
}

#[derive(clap::Args)]
pub struct RmArgs {
    /// Path to the existing archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Path inside the archive to remove
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Password for encrypted archives (reused for the re-export)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output archive path (default: overwrite the input archive)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Force a container format instead of resolving it from the file name
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<Format>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

/// Parses a format tag such as `zip` or `tar.gz`.
fn parse_format(s: &str) -> Result<Format, String> {
    match Format::from_tag(s) {
        Format::Unknown => Err(format!(
            "unknown format '{s}' (expected one of: zip, tar, tar.gz, tar.xz, 7z, rar)"
        )),
        format => Ok(format),
    }
}
