//! resize CLI - batch image resizer
//!
//! Resizes every JPEG and PNG file given on the command line (directories are
//! expanded) to a fixed size or by a scale factor.

use std::process;

use anyhow::Context;
use console::style;
use tracing::{debug, info, warn};

use resize::processing::output_path;
use resize::{
    collect_files, init_logging, parse_args, BatchReport, BatchRunner, Config, ConfigError,
    ImageEngine, Intake, Invocation, JobSummary, ResizeError, Resolver,
};

fn main() {
    let invocation = match parse_args(std::env::args_os()) {
        Ok(Intake::Help(text)) => {
            print!("{}", text);
            process::exit(0);
        }
        Ok(Intake::Run(invocation)) => invocation,
        Err(e) => fail(&anyhow::Error::new(e)),
    };

    match run(invocation) {
        Ok(code) => process::exit(code),
        Err(e) => fail(&e),
    }
}

fn fail(error: &anyhow::Error) -> ! {
    eprintln!("{} {:#}", style("Error:").red().bold(), error);
    process::exit(exit_code(error));
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<ConfigError>() {
        e.exit_code()
    } else if let Some(e) = error.downcast_ref::<ResizeError>() {
        e.exit_code()
    } else {
        1
    }
}

/// Resolve and execute one invocation, returning the exit status
fn run(invocation: Invocation) -> anyhow::Result<i32> {
    let Invocation {
        options,
        switches,
        config,
        files,
    } = invocation;

    let config = match &config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load defaults from {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(if switches.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    });

    let resolver = Resolver::new(&config.defaults);
    let job = resolver.resolve(&options)?;
    let naming = resolver.resolve_naming(&options, switches.keep)?;

    if options.scale.is_some() && options.width.is_some() && options.height.is_some() {
        debug!("--scale is ignored because --width and --height are set");
    }
    let cpus = num_cpus::get();
    if job.threads() > cpus {
        warn!(
            "{} threads requested but only {} logical CPUs are available",
            job.threads(),
            cpus
        );
    }

    if switches.summary {
        print!(
            "{}",
            JobSummary {
                job: &job,
                naming: &naming,
                switches: &switches,
                paths: &files,
            }
        );
    }

    let inputs = collect_files(&files, switches.recursive)?;
    if inputs.is_empty() {
        info!("No input files to resize");
        return Ok(0);
    }

    if switches.dry_run {
        println!("{} files would be resized:", style(inputs.len()).bold());
        for input in &inputs {
            let output = output_path(input, &naming, job.output_format());
            println!("  {} -> {}", input.display(), output.display());
        }
        return Ok(0);
    }

    let engine = ImageEngine::new();
    let report = BatchRunner::new(&engine, &job, &naming)
        .delete_fails(switches.delete_fails)
        .progress(switches.show_progress())
        .run(&inputs)?;

    print_report(&report);

    Ok(if report.is_success() { 0 } else { 1 })
}

fn print_summary_line(label: console::StyledObject<&str>, value: impl std::fmt::Display) {
    println!("  {}: {}", label, value);
}

/// Print processing summary
fn print_report(report: &BatchReport) {
    println!();
    println!("{}", style("Processing Summary:").bold());
    print_summary_line(style("Resized").green(), report.resized);
    if report.unchanged > 0 {
        print_summary_line(style("Unchanged").yellow(), report.unchanged);
    }
    if report.failed() > 0 {
        print_summary_line(style("Failed").red(), report.failed());
        for failure in &report.failures {
            let file = failure.error.file_path().unwrap_or(&failure.input);
            println!("    {}: {}", file.display(), failure.error);
        }
    }
    if !report.deleted.is_empty() {
        print_summary_line(style("Deleted").red(), report.deleted.len());
    }
    print_summary_line(
        style("Duration").blue(),
        format!("{:.2}s", report.elapsed.as_secs_f64()),
    );
    print_summary_line(
        style("Speed").cyan(),
        format!("{:.1} files/sec", report.files_per_second()),
    );
}
