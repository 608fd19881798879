//! Shamsi calendar CLI application.
//!
//! # Usage
//! ```ignore
//! scal                     // Current month
//! scal 1403                // Year 1403
//! scal 7 1403              // Mehr 1403
//! scal -g 2024-03-20       // Gregorian -> Shamsi
//! scal -s 1403-01-01       // Shamsi -> Gregorian
//! ```

use scal::args::{Args, Request, resolve_request};
use scal::error::CalError;
use scal::formatter::{render_month, render_year};
use scal::types::CalContext;
use tracing::{Level, info};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are reported as errors by clap but are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("scal: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<(), CalError> {
    let ctx = CalContext::new(args)?;
    let request = resolve_request(args, ctx.today)?;
    info!(?request, "resolved request");

    match request {
        Request::ToShamsi(date) => {
            println!("Gregorian {} is Shamsi {}", date, date.to_shamsi());
        }
        Request::ToGregorian(date) => {
            println!("Shamsi {} is Gregorian {}", date, date.to_gregorian());
        }
        Request::Month { year, month } => {
            print!(
                "{}",
                render_month(year, month, ctx.highlight_for(year, month), ctx.style)?
            );
        }
        Request::Year(year) => {
            print!("{}", render_year(&ctx, year)?);
        }
    }

    Ok(())
}
