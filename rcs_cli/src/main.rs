//! # rcs_cli
//!
//! Command-line front end for `rcs_core`: reads section check inputs from
//! JSON, runs the cracked-section solver and the allowable-stress check, and
//! prints a report.
//!
//! ```text
//! rcs_cli template > beam.json
//! rcs_cli check beam.json
//! rcs_cli check beam.json --json --output beam.out.json
//! RUST_LOG=debug rcs_cli check beam.json
//! ```
//!
//! The exit code is non-zero when any section fails its check or an input
//! cannot be processed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, LevelFilter};

use rcs_core::calculations::section_check::{calculate, SectionCheckInput, SectionCheckResult};
use rcs_core::file_io::{load_inputs, save_results};
use rcs_core::materials::MaterialLaw;
use rcs_core::CalcError;

#[derive(Parser, Debug)]
#[command(
    name = "rcs_cli",
    version,
    about = "Allowable-stress check of cracked reinforced-concrete sections"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify the section(s) described in a JSON file
    Check {
        /// Input file: one check object or an array of them
        input: PathBuf,

        /// Print results as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Also write the JSON results to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a sample input file
    Template,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

/// Returns whether every section passed.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Template => {
            let json = serde_json::to_string_pretty(&SectionCheckInput::example())
                .context("serializing template")?;
            println!("{}", json);
            Ok(true)
        }
        Command::Check { input, json, output } => {
            let inputs =
                load_inputs(&input).with_context(|| format!("loading {}", input.display()))?;
            info!("{} section(s) read from {}", inputs.len(), input.display());

            let mut results = Vec::with_capacity(inputs.len());
            for item in &inputs {
                let result = calculate(item)
                    .with_context(|| format!("checking \"{}\"", item.label))?;
                results.push(result);
            }

            if json {
                let text =
                    serde_json::to_string_pretty(&results).context("serializing results")?;
                println!("{}", text);
            } else {
                for (item, result) in inputs.iter().zip(&results) {
                    print_report(item, result);
                }
            }

            if let Some(path) = output {
                save_results(&results, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("results written to {}", path.display());
            }

            Ok(results.iter().all(SectionCheckResult::passes))
        }
    }
}

fn print_report(input: &SectionCheckInput, result: &SectionCheckResult) {
    let props = &result.properties;
    let stresses = &result.stresses;
    let check = &result.check;
    let limits = &input.allowable;

    println!("═══════════════════════════════════════");
    println!("  SECTION CHECK: {}", result.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!(
        "  Concrete: {} ring(s), {} vertices, n = {:.1}",
        input.geometry.polygons.len(),
        input.geometry.vertex_count(),
        input.geometry.n_homog
    );
    println!("  Steel:    {} bar(s), As = {:.2} cm²", input.geometry.bars.len(), props.area_steel);
    println!("  Laws:     {}; {}", input.concrete.describe(), input.steel.describe());
    println!(
        "  Loads:    N = {:.0} kgf, My = {:.0} kgf·m, Mz = {:.0} kgf·m",
        input.loads.n, input.loads.my, input.loads.mz
    );
    println!();
    println!("Section:");
    println!("  Ac = {:.1} cm², A* = {:.1} cm²", props.area_concrete, props.area_equivalent);
    println!("  G  = ({:.2}, {:.2}) cm", props.y_g, props.z_g);
    println!("  Iy = {:.0} cm⁴, Iz = {:.0} cm⁴, Iyz = {:.0} cm⁴", props.iy, props.iz, props.iyz);
    println!();
    println!("Solver:");
    println!(
        "  Cracked vertices: {} / {}   resisting area {:.1} cm²",
        stresses.excluded_vertices.len(),
        stresses.vertex_stresses.len(),
        stresses.resisting_area
    );
    println!(
        "  Iterations: {}{}",
        stresses.iterations,
        if stresses.converged { "" } else { " (not converged)" }
    );
    println!();
    println!("Stress Checks:");
    println!(
        "  Concrete:      {:.2} ({:.2}/{:.2} kgf/cm²) {}",
        check.concrete_unity,
        stresses.sigma_c_min,
        limits.sigma_c,
        status_icon(check.concrete_ok)
    );
    println!(
        "  Steel:         {:.2} ({:.1}/{:.1} kgf/cm²) {}",
        check.steel_unity,
        stresses.sigma_s_max,
        limits.sigma_s,
        status_icon(check.steel_ok)
    );
    println!(
        "  Mean concrete: {:.2} ({:.2}/{:.2} kgf/cm²) {}",
        check.mean_unity,
        stresses.sigma_c_mean,
        limits.sigma_c_mean,
        status_icon(check.mean_ok)
    );
    for message in &check.messages {
        println!("    - {}", message);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} (governs: {})",
        check.verdict(),
        check.governing_condition()
    );
    println!("═══════════════════════════════════════");
    println!();
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::parse_from(["rcs_cli", "-vv", "check", "beam.json", "--json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Check { input, json, output } => {
                assert_eq!(input, PathBuf::from("beam.json"));
                assert!(json);
                assert!(output.is_none());
            }
            Command::Template => panic!("expected check"),
        }
    }

    #[test]
    fn test_missing_file_is_error() {
        let command = Command::Check {
            input: PathBuf::from("/nonexistent/rcs/beam.json"),
            json: true,
            output: None,
        };
        let err = run(command).unwrap_err();
        assert!(err.downcast_ref::<CalcError>().is_some());
    }
}
