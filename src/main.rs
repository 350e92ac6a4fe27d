use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser, error::ErrorKind};
use skipper_proc_rs::image_pipeline::{ProcessingConfig, ProcessingReport, SkipperError, SkipperPipeline};
use skipper_proc_rs::logger;

use tracing::{error, info};

const LONG_ABOUT: &str = "\
Processes raw Skipper CCD data. The overscan mean of every sample is
computed and subtracted line by line. The output file is a FITS image
holding the pixel value averaged over all the samples, after subtraction
of the corresponding overscan value.

With -s an additional file is saved holding the individual values of all
the samples: one extension per sample plus the mean, for every input
extension.";

/// Exit status for help and malformed invocations.
const USAGE_EXIT: u8 = 1;
/// Exit status for a missing or repeated output option.
const CONFLICT_EXIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "skipper_proc")]
#[command(about = "Subtract overscan and average the samples of a raw Skipper CCD image")]
#[command(long_about = LONG_ABOUT, disable_help_flag = true)]
struct Cli {
    /// Raw Skipper FITS file
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Output FITS file for the sample-averaged image
    #[arg(short = 'o', value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Also save the individual values of all the samples
    #[arg(short = 's')]
    save_samples: bool,

    /// Suppress progress and status output
    #[arg(short = 'q', short_alias = 'Q')]
    quiet: bool,

    /// Print help
    #[arg(short = 'h', short_alias = 'H', action = ArgAction::Help)]
    help: Option<bool>,
}

fn print_help(full: bool) {
    let mut cmd = Cli::command();
    let _ = if full { cmd.print_long_help() } else { cmd.print_help() };
}

fn usage_error(message: &str, code: u8) -> ExitCode {
    eprintln!("Error: {}\n", message);
    print_help(code == USAGE_EXIT);
    ExitCode::from(code)
}

/// Parses the command line into `(cli, input, output)`.
fn parse_args() -> Result<(Cli, PathBuf, PathBuf), ExitCode> {
    if std::env::args_os().len() <= 1 {
        print_help(true);
        return Err(ExitCode::from(USAGE_EXIT));
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            return Err(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    print_help(true);
                    ExitCode::from(USAGE_EXIT)
                }
                ErrorKind::ArgumentConflict => {
                    usage_error("can not set more than one output file!", CONFLICT_EXIT)
                }
                _ => {
                    let _ = e.print();
                    print_help(true);
                    ExitCode::from(USAGE_EXIT)
                }
            });
        }
    };

    let Some(output) = cli.output.clone() else {
        return Err(usage_error("output filename missing.", CONFLICT_EXIT));
    };

    let input = match cli.inputs.as_slice() {
        [] => return Err(usage_error("no input file provided!", USAGE_EXIT)),
        [input] => input.clone(),
        _ => return Err(usage_error("more than one input file provided!", USAGE_EXIT)),
    };
    if !input.exists() {
        let message = format!("error reading input file: {}\nThe file doesn't exist!", input.display());
        return Err(usage_error(&message, USAGE_EXIT));
    }

    Ok((cli, input, output))
}

fn run(cli: &Cli, input: &Path, output: &Path) -> anyhow::Result<ProcessingReport> {
    let config = ProcessingConfig::builder()
        .save_samples(cli.save_samples)
        .verbose(!cli.quiet)
        .build();
    let pipeline = SkipperPipeline::new(config);

    info!(input = %input.display(), "Will read the following file");
    info!(output = %output.display(), "The output will be saved in the file");

    pipeline
        .process_file(input, output)
        .with_context(|| format!("processing {} failed", input.display()))
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<SkipperError>()
        .map(SkipperError::exit_code)
        .unwrap_or(1);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let start = Instant::now();

    let (cli, input, output) = match parse_args() {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    logger::init(cli.quiet);

    match run(&cli, &input, &output) {
        Ok(report) => {
            info!(
                images = report.image_extensions().count(),
                samples = report.total_samples(),
                "Corrected image extensions"
            );
            if let Some(samples) = &report.sample_output {
                info!(samples = %samples.display(), "Individual samples saved");
            }
            if !cli.quiet {
                report.timings.print_summary();
            }
            info!(
                seconds = start.elapsed().as_secs_f64(),
                "All done!"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            exit_code_for(&e)
        }
    }
}
