//! sansliterate CLI - transliterate Sanskrit text in DOCX files to Tamil

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use sansliterate::{ChangeReport, JsonFormat, Sansliterate, DEFAULT_TAMIL_FONT};

#[derive(Parser)]
#[command(name = "sansliterate")]
#[command(version)]
#[command(
    about = "Transliterate Sanskrit (Devanagari) text in a DOCX file to Tamil script \
             while leaving all other text and formatting unchanged",
    long_about = None
)]
struct Cli {
    /// Path to the input .docx file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path for the output .docx file (default: <input_stem>_ta.docx)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Only transliterate runs whose character style name matches this value
    #[arg(long, value_name = "STYLE_NAME")]
    style: Option<String>,

    /// Font for runs that were entirely Sanskrit (empty to keep fonts)
    #[arg(
        long,
        value_name = "FONT_NAME",
        env = "SANSLITERATE_TAMIL_FONT",
        default_value = DEFAULT_TAMIL_FONT
    )]
    tamil_font: String,

    /// Report which runs would be modified without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,

    /// Fail on malformed Devanagari (vowel signs or viramas without a consonant)
    #[arg(long)]
    strict: bool,

    /// Write a JSON change report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cmd_transliterate(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn cmd_transliterate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Sansliterate::new().with_tamil_font(cli.tamil_font.as_str());
    if let Some(style) = &cli.style {
        builder = builder.with_style(style.as_str());
    }
    if let Some(output) = &cli.output {
        builder = builder.with_output(output);
    }
    if cli.dry_run {
        builder = builder.dry_run();
    }
    if cli.strict {
        builder = builder.strict();
    }

    let pb = spinner(cli.verbose)?;
    pb.set_message(format!("Transliterating {}...", cli.input.display()));
    let result = builder.run(&cli.input);
    pb.finish_and_clear();
    let report = result?;

    if let Some(path) = &cli.report {
        fs::write(path, report.to_json(JsonFormat::Pretty)?)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    print_summary(&report);
    Ok(())
}

/// Spinner while the document is processed; hidden in verbose mode so it does
/// not interleave with debug output.
fn spinner(verbose: bool) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    if verbose {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_summary(report: &ChangeReport) {
    let stats = &report.stats;

    println!();
    if report.is_dry_run() {
        println!("{}", "Dry run: no files were written".yellow().bold());
    } else if let Some(output) = &report.output {
        println!("{} {}", "Saved to".green().bold(), output.display());
    }
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "Runs".bold(), stats.total_runs);
    if stats.skipped_by_style > 0 {
        println!("{}: {}", "Skipped by style".bold(), stats.skipped_by_style);
    }
    println!("{}: {}", "Modified".bold(), report.summary());
    println!("{}: {}", "Font overrides".bold(), stats.font_overrides);
}
