//! Read a snippet, convert it, write the result.

use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    time::Instant,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::application::convert::{ConversionMode, ConvertError, ConvertService};

/// One conversion requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub mode: ConversionMode,
    /// Snippet file; stdin when absent.
    pub input: Option<PathBuf>,
    /// Destination file; stdout when absent.
    pub output: Option<PathBuf>,
}

impl ConversionJob {
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            input: None,
            output: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Byte counts recorded for a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    pub mode: ConversionMode,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("failed to read snippet from `{path}`: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read snippet from stdin: {0}")]
    ReadStdin(#[source] io::Error),
    #[error("failed to write result to `{path}`: {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write result to stdout: {0}")]
    WriteStdout(#[source] io::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Run `job` against the process's stdin and stdout.
pub fn run(
    service: &dyn ConvertService,
    job: &ConversionJob,
) -> Result<ConversionReport, JobError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(service, job, stdin.lock(), stdout.lock())
}

/// Run `job`, falling back to `stdin`/`stdout` where the job names no file.
pub fn run_with_io(
    service: &dyn ConvertService,
    job: &ConversionJob,
    stdin: impl Read,
    stdout: impl Write,
) -> Result<ConversionReport, JobError> {
    let started_at = Instant::now();
    let snippet = read_snippet(job, stdin)?;

    debug!(
        target = "latex_snippet::job",
        mode = %job.mode,
        input_bytes = snippet.len(),
        "Converting snippet"
    );

    let converted = service.convert(job.mode, &snippet)?;
    write_result(job, stdout, &converted)?;

    let report = ConversionReport {
        mode: job.mode,
        input_bytes: snippet.len(),
        output_bytes: converted.len(),
    };

    info!(
        target = "latex_snippet::job",
        mode = %report.mode,
        input_bytes = report.input_bytes,
        output_bytes = report.output_bytes,
        elapsed_ms = started_at.elapsed().as_millis() as u64,
        "Snippet converted"
    );

    Ok(report)
}

fn read_snippet(job: &ConversionJob, mut stdin: impl Read) -> Result<String, JobError> {
    match job.input.as_ref() {
        Some(path) => fs::read_to_string(path).map_err(|source| JobError::ReadInput {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut snippet = String::new();
            stdin
                .read_to_string(&mut snippet)
                .map_err(JobError::ReadStdin)?;
            Ok(snippet)
        }
    }
}

fn write_result(
    job: &ConversionJob,
    mut stdout: impl Write,
    converted: &str,
) -> Result<(), JobError> {
    match job.output.as_ref() {
        Some(path) => fs::write(path, converted).map_err(|source| JobError::WriteOutput {
            path: path.display().to_string(),
            source,
        }),
        None => stdout
            .write_all(converted.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(JobError::WriteStdout),
    }
}
