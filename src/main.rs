use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use patch_manifest::commands;
use patch_manifest::utils::dir_scan::{ListingOrder, ScanOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patch-manifest")]
#[command(about = "Write manifest.json files listing the .ips patches in each folder")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Write manifest.json in every subfolder that contains .ips files
    Generate(GenerateArgs),
    /// Write a <category>.json index of every .ips file below each category folder
    Index {
        /// Directory holding the category folders
        patches_dir: PathBuf,
        /// Category folder to index. Repeat for multiple.
        /// Defaults to: battle, map, portraits, game
        #[arg(short, long)]
        category: Vec<String>,
        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Directory whose immediate subfolders are scanned
    #[arg(default_value = ".")]
    base_dir: PathBuf,
    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Sort entries by name instead of keeping filesystem order
    #[arg(long)]
    sort: bool,
    /// Show what would be written without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        ScanOptions {
            order: if self.sort {
                ListingOrder::Sorted
            } else {
                ListingOrder::Filesystem
            },
            dry_run: self.dry_run,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_line(dry_run: bool, line: String) {
    if dry_run {
        println!("(dry run) {}", line);
    } else {
        println!("{}", line);
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => {
            let options = args.scan.options();
            match commands::generate::run(&args.base_dir, options, |m| {
                print_line(options.dry_run, m.confirmation())
            }) {
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
        Commands::Index {
            patches_dir,
            category,
            scan,
        } => {
            let options = scan.options();
            match commands::index::run(&patches_dir, &category, options, |i| {
                print_line(options.dry_run, i.confirmation())
            }) {
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn no_arguments_scans_current_directory() {
        let cli = parse(&["patch-manifest"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.base_dir, PathBuf::from("."));
        assert!(!cli.generate.scan.sort);
    }

    #[test]
    fn bare_flags_apply_to_default_generate() {
        let cli = parse(&["patch-manifest", "--sort", "--dry-run", "patches"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.base_dir, PathBuf::from("patches"));
        let options = cli.generate.scan.options();
        assert_eq!(options.order, ListingOrder::Sorted);
        assert!(options.dry_run);
    }

    #[test]
    fn generate_subcommand_wins_over_positional() {
        let cli = parse(&["patch-manifest", "generate", "--sort"]);

        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.base_dir, PathBuf::from("."));
                assert!(args.scan.sort);
            }
            _ => panic!("Expected generate subcommand"),
        }
    }

    #[test]
    fn dotted_path_named_like_subcommand_is_base_dir() {
        let cli = parse(&["patch-manifest", "./generate"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.base_dir, PathBuf::from("./generate"));
    }

    #[test]
    fn index_collects_repeated_categories() {
        let cli = parse(&["patch-manifest", "index", "public/patches", "-c", "map", "-c", "game"]);

        match cli.command {
            Some(Commands::Index {
                patches_dir,
                category,
                scan,
            }) => {
                assert_eq!(patches_dir, PathBuf::from("public/patches"));
                assert_eq!(category, vec!["map", "game"]);
                assert!(!scan.dry_run);
            }
            _ => panic!("Expected index subcommand"),
        }
    }

    #[test]
    fn positional_conflicts_with_subcommand() {
        let result = Cli::try_parse_from(["patch-manifest", "patches", "generate"]);

        // `generate` after a positional is an extra argument, not a subcommand
        assert!(result.is_err());
    }
}
