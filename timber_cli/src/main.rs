//! # timber_cli
//!
//! Command-line front end for `timber_core`: reads a verification request
//! as JSON, evaluates it and prints the report.
//!
//! ```text
//! timber_cli --input case.json [--pretty] [--summary] [--check <id>]...
//! ```
//!
//! Exit code 0 when the member is approved, 1 when rejected, 2 when the
//! request could not be read or parsed. Logs go to stderr and follow
//! `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use timber_core::checks::{CheckDetails, Ratio, Verdict};
use timber_core::{evaluate, AggregateReport, CheckId, InputSpecification, OverallVerdict};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "timber_cli", about = "NBR 7190-1 verification of rectangular timber members")]
struct Cli {
    /// JSON request file, or `-` for stdin.
    #[arg(long, short)]
    input: PathBuf,
    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
    /// Print a readable summary instead of JSON.
    #[arg(long)]
    summary: bool,
    /// Run only these checks, replacing the request's selection.
    #[arg(long = "check", value_name = "ID", value_parser = parse_check)]
    checks: Vec<CheckId>,
}

fn parse_check(s: &str) -> Result<CheckId, String> {
    CheckId::from_str_flexible(s).map_err(|e| e.to_string())
}

fn read_request(cli: &Cli) -> anyhow::Result<InputSpecification> {
    let text = if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
        buf
    } else {
        fs::read_to_string(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?
    };

    let mut request: InputSpecification =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", cli.input.display()))?;
    if !cli.checks.is_empty() {
        request.selected_checks = cli.checks.iter().copied().collect();
    }
    Ok(request)
}

fn run(cli: &Cli) -> anyhow::Result<OverallVerdict> {
    let request = read_request(cli)?;
    tracing::info!(label = %request.label, checks = request.selected_checks.len(), "request loaded");

    let report = evaluate(&request);
    if cli.summary {
        print_summary(&report);
    } else {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .context("serializing report")?;
        println!("{json}");
    }
    Ok(report.overall)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timber_core=info,timber_cli=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(OverallVerdict::Approved) => ExitCode::SUCCESS,
        Ok(OverallVerdict::Rejected) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn print_summary(report: &AggregateReport) {
    println!("═══════════════════════════════════════");
    println!("  NBR 7190-1 VERIFICATION  {}", report.label);
    println!("═══════════════════════════════════════");
    println!();

    if let (Some(g), Some(m)) = (&report.geometry, &report.material) {
        println!("Section:  {:.0} x {:.0} mm  (A = {:.0} mm²)", g.width_mm, g.height_mm, g.area_mm2);
        println!(
            "Material: kmod = {:.2}, f_c0d = {:.2} MPa, f_md = {:.2} MPa{}",
            m.kmod,
            m.f_c0d_mpa,
            m.f_md_mpa,
            if m.bending_estimated { " (estimated)" } else { "" }
        );
        println!();
    }

    println!("Checks:");
    if report.results.is_empty() {
        println!("  no relevant check applicable");
    }
    for result in &report.results {
        println!(
            "  {:<28} {:>8}  {}",
            result.check.display_name(),
            format_ratio(result.ratio),
            status_icon(result.verdict)
        );
        if let CheckDetails::Lateral(d) = &result.details {
            if d.exempt {
                println!("      L1/b = {:.1} ≤ {:.1}", d.l1_over_b, d.exemption_limit);
            }
        }
        if let Some(diagnostic) = &result.diagnostic {
            println!("      {diagnostic}");
        }
    }
    if !report.not_applicable.is_empty() {
        let names: Vec<&str> = report.not_applicable.iter().map(|c| c.code()).collect();
        println!();
        println!("Not applicable: {}", names.join(", "));
    }

    println!();
    println!("═══════════════════════════════════════");
    match report.governing_ratio() {
        Some((check, ratio)) => println!("  RESULT: {} (governs: {} at {:.2})", report.overall, check, ratio),
        None => println!("  RESULT: {}", report.overall),
    }
    println!("═══════════════════════════════════════");
}

fn format_ratio(ratio: Option<Ratio>) -> String {
    match ratio {
        Some(Ratio::Finite(v)) => format!("{v:.3}"),
        Some(Ratio::Infinite) => "inf".to_string(),
        Some(Ratio::Indeterminate) => "n/a".to_string(),
        None => "-".to_string(),
    }
}

fn status_icon(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Approved => "[OK]",
        Verdict::Exempt => "[EXEMPT]",
        Verdict::Failed => "[FAIL]",
        Verdict::Error => "[ERROR]",
        Verdict::NotApplicable => "[N/A]",
    }
}
