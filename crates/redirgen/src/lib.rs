//! Host crate for redirgen: CLI, config, telemetry, rendering.
//!
//! The generation algorithm lives in `redirgen-core`; this crate wires it
//! to files, flags, and logs.

#![forbid(unsafe_code)]

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod telemetry;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use redirgen_core::{Generated, Params, generate};

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Run a parsed CLI invocation.
pub fn run(cli: cli::Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        cli::Command::Generate(args) => run_generate(&args, &config, cli.json),
        cli::Command::Check(args) => run_check(&args, cli.json),
    }
}

fn run_generate(args: &cli::GenerateArgs, config: &config::Config, json: bool) -> Result<()> {
    let params = Params {
        target_count: args
            .count
            .or(config.defaults.count)
            .unwrap_or(config::DEFAULT_COUNT),
        max_depth: args
            .max_depth
            .or(config.defaults.max_depth)
            .unwrap_or(config::DEFAULT_MAX_DEPTH),
        prefix_probability: args
            .prefix_probability
            .or(config.defaults.prefix_probability)
            .unwrap_or(config::DEFAULT_PREFIX_PROBABILITY),
        vocabulary: config.vocabulary(args.words.as_deref())?,
    };

    let seed = args.seed.or(config.defaults.seed);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    tracing::info!(
        count = params.target_count,
        max_depth = params.max_depth,
        prefix_probability = params.prefix_probability,
        vocabulary = params.vocabulary.len(),
        seed,
        "generating redirect rules"
    );

    let mut sink = telemetry::TracingSink::default();
    let out = generate(&params, &mut rng, &mut sink)?;

    write_outcome(&out, args.output.as_deref(), json)?;

    tracing::info!(
        generated = out.generated,
        aborted = out.aborted,
        "generation complete"
    );
    Ok(())
}

fn write_outcome(out: &Generated, output: Option<&Path>, json: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::WriteFile {
                path: path.to_path_buf(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            render_to(&mut writer, out, json)?;
            writer.flush().map_err(|source| Error::WriteFile {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "saved rules");
        }
        None => {
            let stdout = std::io::stdout().lock();
            let mut writer = BufWriter::new(stdout);
            render_to(&mut writer, out, json)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_to(writer: &mut impl Write, out: &Generated, json: bool) -> std::io::Result<()> {
    if json {
        render::write_json(writer, out)
    } else {
        render::write_rules(writer, &out.rules)
    }
}

fn run_check(args: &cli::CheckArgs, json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(&args.file).map_err(|source| Error::ReadFile {
        path: args.file.clone(),
        source,
    })?;

    let report = check::check_rules(&contents);

    if json {
        let stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &report).map_err(std::io::Error::from)?;
        println!();
    } else {
        for problem in &report.problems {
            println!("{problem}");
        }
        println!(
            "{} rule(s), {} problem(s)",
            report.rules,
            report.problems.len()
        );
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(Error::CheckFailed {
            path: args.file.clone(),
            problems: report.problems.len(),
        })
    }
}
