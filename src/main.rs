#![deny(clippy::all, clippy::pedantic)]

use std::{io, process};

use latex_snippet_bridge::{
    application::{
        catalog,
        error::AppError,
        job::{self, ConversionJob},
    },
    config,
    infra::{error::InfraError, telemetry},
    native_converter,
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Convert(Box::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Convert(args) => run_convert(&settings, &args),
        config::Command::Modes(args) => run_modes(&args),
    }
}

fn run_convert(settings: &config::Settings, args: &config::ConvertArgs) -> Result<(), AppError> {
    let mut conversion = ConversionJob::new(settings.conversion.mode);
    if let Some(input) = args.input.as_ref() {
        conversion = conversion.with_input(input);
    }
    if let Some(output) = args.output.as_ref() {
        conversion = conversion.with_output(output);
    }

    let converter = native_converter();
    job::run(&converter, &conversion)?;
    Ok(())
}

fn run_modes(args: &config::ModesArgs) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let written = if args.json {
        catalog::write_json(&mut out)
    } else {
        catalog::write_text(&mut out)
    };

    written.map_err(|err| AppError::from(InfraError::from(err)))
}
