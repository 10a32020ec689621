//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use mamekit_lib::{AssetKind, PartitionMode};

#[derive(Parser)]
#[command(name = "mamekit")]
#[command(about = "Split, merge, and archive MAME catalogs and copy the assets they name", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append the session log to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Grouping used by `partition`.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum GroupBy {
    Manufacturer,
    Year,
    SourceFile,
}

impl From<GroupBy> for PartitionMode {
    fn from(by: GroupBy) -> Self {
        match by {
            GroupBy::Manufacturer => PartitionMode::Manufacturer,
            GroupBy::Year => PartitionMode::Year,
            GroupBy::SourceFile => PartitionMode::SourceFile,
        }
    }
}

/// Asset family used by `copy`.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum CopyKind {
    Roms,
    Images,
}

impl From<CopyKind> for AssetKind {
    fn from(kind: CopyKind) -> Self {
        match kind {
            CopyKind::Roms => AssetKind::Rom,
            CopyKind::Images => AssetKind::Image,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write every named machine in a `-listxml` catalog to one record-set file
    FullList {
        /// MAME `-listxml` output
        catalog: PathBuf,

        /// Output file (default: <output_dir>/FullList.xml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a `-listxml` catalog into one record-set file per group
    Partition {
        /// MAME `-listxml` output
        catalog: PathBuf,

        /// Grouping key
        #[arg(long, value_enum)]
        by: GroupBy,

        /// Output directory (default: saved paths.output_dir, then current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flatten a directory of software lists (`hash/*.xml`) into one record-set file
    Software {
        /// Directory containing software list XML files
        dir: PathBuf,

        /// Output file (default: <output_dir>/Softwares.xml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parser workers (default: saved value, then available cores)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Merge record-set files into one XML list and a DAT archive
    Merge {
        /// Record-set files, in merge order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Merged XML output (default: <output_dir>/Merged.xml)
        #[arg(long)]
        xml: Option<PathBuf>,

        /// DAT output (default: the XML path with a .dat extension)
        #[arg(long)]
        dat: Option<PathBuf>,
    },

    /// Inspect DAT archives
    Dat {
        #[command(subcommand)]
        action: DatAction,
    },

    /// Copy the ROMs or images named by record-set files
    Copy {
        #[arg(value_enum)]
        kind: CopyKind,

        /// Record-set files naming the assets
        #[arg(required = true)]
        record_sets: Vec<PathBuf>,

        /// Source directory (default: saved copy.source_dir)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Destination directory (default: saved copy.dest_dir)
        #[arg(long)]
        to: Option<PathBuf>,
    },

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum DatAction {
    /// Print the records in a DAT archive
    Show {
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Show at most this many records
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show saved settings
    Show,

    /// Print the settings file path
    Path,

    /// Save a setting (paths.output_dir, copy.source_dir, copy.dest_dir, log.file, workers)
    Set { key: String, value: String },

    /// Remove a saved setting
    Unset { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn partition_parses_group_by() {
        let cli = Cli::try_parse_from(["mamekit", "partition", "mame.xml", "--by", "source-file"])
            .unwrap();
        match cli.command {
            Commands::Partition { by, output, .. } => {
                assert_eq!(PartitionMode::from(by), PartitionMode::SourceFile);
                assert!(output.is_none());
            }
            _ => panic!("expected partition"),
        }
    }

    #[test]
    fn copy_requires_record_sets() {
        assert!(Cli::try_parse_from(["mamekit", "copy", "roms"]).is_err());
        let cli = Cli::try_parse_from(["mamekit", "copy", "images", "a.xml", "b.xml", "--to", "out"])
            .unwrap();
        match cli.command {
            Commands::Copy {
                kind,
                record_sets,
                to,
                ..
            } => {
                assert_eq!(AssetKind::from(kind), AssetKind::Image);
                assert_eq!(record_sets.len(), 2);
                assert_eq!(to, Some(PathBuf::from("out")));
            }
            _ => panic!("expected copy"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mamekit", "merge", "a.xml", "--quiet", "--logfile", "run.log"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.logfile, Some(PathBuf::from("run.log")));
    }
}
