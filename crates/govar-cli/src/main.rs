use clap::Parser;
use fern::colors::{Color, ColoredLevelConfig};
use govar_common::SourceFile;
use govar_driver::{Driver, DriverError, Value};
use log::LevelFilter;
use miette::NamedSource;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "govar")]
#[command(
    author,
    version,
    about = "Print the literal value of a top-level Go var or const"
)]
struct Cli {
    /// Go source file to search
    path: PathBuf,

    /// Name of the var or const to print
    name: String,

    /// Sets the log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Render errors as annotated source reports
    #[arg(long)]
    report: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        cli.log_level.max(LevelFilter::Debug)
    } else {
        cli.log_level
    };
    if let Err(err) = setup_logging(level) {
        eprintln!("govar: {err}");
        return ExitCode::FAILURE;
    }

    if cli.report {
        let hook = miette::set_hook(Box::new(|_| {
            Box::new(
                miette::MietteHandlerOpts::new()
                    .terminal_links(true)
                    .unicode(true)
                    .context_lines(3)
                    .build(),
            )
        }));
        if let Err(err) = hook {
            log::warn!("falling back to the default error report handler: {err}");
        }
    }

    let value = match run(&cli) {
        Ok(value) => value,
        Err((err, source)) => {
            report(err, source, cli.report);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    let written = stdout
        .write_all(value.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush());
    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("govar: failed to write value: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Look up the requested name.
///
/// On failure the loaded source, if any, is handed back for error reporting.
fn run(cli: &Cli) -> Result<Value, (DriverError, Option<SourceFile>)> {
    let mut driver = Driver::new().map_err(|err| (err, None))?;
    let source = driver.load(&cli.path).map_err(|err| (err, None))?;

    log::debug!("looking up {} in {}", cli.name, cli.path.display());
    driver
        .lookup(&source, &cli.name)
        .map_err(|err| (err, Some(source)))
}

fn report(err: DriverError, source: Option<SourceFile>, fancy: bool) {
    if !fancy {
        eprintln!("{err}");
        return;
    }

    let mut report = miette::Report::new(err);
    if let Some(source) = source {
        let name = source.path.display().to_string();
        report = report.with_source_code(NamedSource::new(name, source.content));
    }
    eprintln!("{report:?}");
}

fn setup_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Blue)
        .debug(Color::Magenta)
        .trace(Color::Green);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}
