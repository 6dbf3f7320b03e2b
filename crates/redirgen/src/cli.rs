//! CLI surface.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "redirgen",
    version,
    about = "Generate and check synthetic redirect-rule fixtures",
    infer_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Config file (default: ./redirgen.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an acyclic, duplicate-free redirect-rule fixture.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Check a rules file for invalid lines, duplicate sources, and loops.
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Total number of rules to generate (default: 1000).
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<u64>,

    /// Maximum number of segments in a path (default: 4).
    #[arg(short = 'd', long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Probability (0.0 to 1.0) that a destination shares a prefix with
    /// its source (default: 0.7).
    #[arg(short = 'p', long, value_name = "PROB")]
    pub prefix_probability: Option<f64>,

    /// RNG seed for reproducible output (default: OS entropy).
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write rules here instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Word file overriding the bundled vocabulary (one segment per line).
    #[arg(long, value_name = "PATH")]
    pub words: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Rules file to check.
    pub file: PathBuf,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_flags_parse() {
        let cli = parse_from([
            "redirgen",
            "generate",
            "-n",
            "10",
            "-d",
            "3",
            "-p",
            "0.4",
            "--seed",
            "99",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.count, Some(10));
        assert_eq!(args.max_depth, Some(3));
        assert_eq!(args.prefix_probability, Some(0.4));
        assert_eq!(args.seed, Some(99));
    }

    #[test]
    fn gen_alias_works() {
        let cli = parse_from(["redirgen", "gen", "-n", "5"]);
        assert!(matches!(cli.command, Command::Generate(_)));
    }

    #[test]
    fn check_takes_a_file() {
        let cli = parse_from(["redirgen", "check", "rules.txt"]);
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.file, PathBuf::from("rules.txt"));
    }

    #[test]
    fn json_is_global() {
        let cli = parse_from(["redirgen", "generate", "--json"]);
        assert!(cli.json);
    }
}
