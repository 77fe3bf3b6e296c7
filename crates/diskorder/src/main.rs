use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lloggs::LoggingArgs;
use tracing::{error, info};

use diskorder::{collect_paths, order_files};

#[derive(Parser, Debug)]
#[command(name = "diskorder")]
#[command(about = "Print files sorted by physical disk order")]
struct Args {
    /// Files to order; if not given, files are read from stdin
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    #[command(flatten)]
    logging: LoggingArgs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = match args.logging.setup(|v| match v {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("diskorder: failed to set up logging: {err}");
            return ExitCode::FAILURE;
        }
    };

    let paths = match collect_paths(args.files, io::stdin().lock()) {
        Ok(paths) => paths,
        Err(err) => {
            error!(%err, "failed to read paths from stdin");
            eprintln!("diskorder: failed to read paths from stdin: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(files = paths.len(), "ordering files");

    let ordered = match order_files(&paths) {
        Ok(ordered) => ordered,
        Err(err) => {
            error!(path = %err.path().display(), %err, "failed to resolve file");
            eprintln!("diskorder: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    for path in &ordered {
        if let Err(err) = writeln!(out, "{}", path.display()) {
            eprintln!("diskorder: failed to write output: {err}");
            return ExitCode::FAILURE;
        }
    }
    if let Err(err) = out.flush() {
        eprintln!("diskorder: failed to write output: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
