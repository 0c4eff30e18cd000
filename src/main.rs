//! convert - turn notebook templates into RISE slideshows

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rise_convert::{Converter, ExportConfig, Options};

#[derive(Parser)]
#[command(name = "convert")]
#[command(version = "0.1", about = "Convert notebook templates into RISE slideshows", long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "EXAMPLES:
    convert files_to_convert.txt              Convert into the current directory
    convert --daytum files_to_convert.txt     Convert into Daytum format
    convert --dir=build files_to_convert.txt  Convert into ./build")]
struct Cli {
    /// Text file listing the files to convert, one per line
    #[arg(value_name = "FILES_TO_CONVERT")]
    manifest: PathBuf,

    /// Set options to convert into Daytum format
    #[arg(long)]
    daytum: bool,

    /// Output directory
    #[arg(short, long, value_name = "PATH", default_value = "./")]
    dir: PathBuf,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Show version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let options = Options::new(cli.manifest)
        .with_output_dir(cli.dir)
        .with_daytum(cli.daytum);
    let config = ExportConfig::for_mode(options.daytum);

    match Converter::new(options, &config).run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
