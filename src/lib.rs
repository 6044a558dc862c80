use clap::Args;
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

pub mod error;
pub mod sequence;
pub mod telemetry;

pub use error::FiboError;
pub use sequence::{sequence_up_to, Bound, Sequence, Terms};
use telemetry::TelemetryCollector;

pub const DEFAULT_SEPARATOR: &str = ", ";

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        help = "Print every Fibonacci term less than or equal to this bound",
        allow_negative_numbers = true
    )]
    pub bound: i64,

    #[arg(long, default_value = DEFAULT_SEPARATOR, help = "Text placed between terms")]
    pub separator: String,

    #[arg(long, help = "Omit the \"Fibonacci sequence up to\" header line")]
    pub no_header: bool,

    #[arg(long, help = "Collect timing and memory data for this run")]
    pub enable_telemetry: bool,

    #[arg(long, default_value = "./telemetry_data")]
    pub telemetry_output_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub separator: String,
    pub header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            header: true,
        }
    }
}

impl From<&GenerateArgs> for RenderOptions {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            separator: args.separator.clone(),
            header: !args.no_header,
        }
    }
}

/// What a call to [`generate`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub terms: usize,
    pub last: Option<i64>,
}

/// Streams the Fibonacci terms not exceeding `bound` to `out`.
///
/// An invalid bound is reported before anything is written.
pub fn generate<W: Write>(
    bound: i64,
    options: &RenderOptions,
    out: &mut W,
) -> Result<Summary, FiboError> {
    let sequence = sequence_up_to(bound)?;

    if options.header {
        writeln!(out, "Fibonacci sequence up to {}:", sequence.bound().get())?;
    }

    let mut summary = Summary {
        terms: 0,
        last: None,
    };
    for term in sequence.terms() {
        if summary.terms > 0 {
            out.write_all(options.separator.as_bytes())?;
        }
        write!(out, "{}", term)?;
        debug!("term {}: {}", summary.terms, term);
        summary.terms += 1;
        summary.last = Some(term);
    }
    writeln!(out)?;
    out.flush()?;

    Ok(summary)
}

/// Runs one invocation: prints the sequence, or the notice for an invalid bound.
pub fn run<W: Write>(args: &GenerateArgs, out: &mut W) -> anyhow::Result<()> {
    info!("Generating Fibonacci sequence up to {}", args.bound);

    let mut telemetry = TelemetryCollector::new(args.bound, args.enable_telemetry);
    let generation_start = Instant::now();

    match generate(args.bound, &RenderOptions::from(args), out) {
        Ok(summary) => {
            telemetry.record_generation(generation_start.elapsed(), &summary);
        }
        Err(err @ FiboError::InvalidBound { .. }) => {
            warn!("Rejected bound {}", args.bound);
            writeln!(out, "{}", err)?;
            out.flush()?;
        }
        Err(err) => return Err(err.into()),
    }

    telemetry.sample_memory();
    if let Some(telemetry_data) = telemetry.finalize() {
        let report = telemetry::write_report(&telemetry_data, &args.telemetry_output_path)
            .inspect_err(|e| error!("Failed to save telemetry data: {:?}", e))?;
        info!("Telemetry data saved to: {}", report.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bound: i64, options: &RenderOptions) -> String {
        let mut out = Vec::new();
        generate(bound, options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_generate_with_header() {
        assert_eq!(
            render(10, &RenderOptions::default()),
            "Fibonacci sequence up to 10:\n0, 1, 1, 2, 3, 5, 8\n"
        );
    }

    #[test]
    fn test_generate_custom_separator_without_header() {
        let options = RenderOptions {
            separator: " ".to_string(),
            header: false,
        };
        assert_eq!(render(2, &options), "0 1 1 2\n");
    }

    #[test]
    fn test_generate_summary() {
        let mut out = Vec::new();
        let summary = generate(100, &RenderOptions::default(), &mut out).unwrap();
        assert_eq!(
            summary,
            Summary {
                terms: 12,
                last: Some(89)
            }
        );
    }

    #[test]
    fn test_invalid_bound_writes_nothing() {
        let mut out = Vec::new();
        let err = generate(0, &RenderOptions::default(), &mut out).unwrap_err();
        assert!(matches!(err, FiboError::InvalidBound { bound: 0 }));
        assert!(out.is_empty());
    }
}
