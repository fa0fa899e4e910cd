//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::error::{CliError, Result};
use crate::output::{Formatter, Report};
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};
use verdict_normalizer::{parse_raw, Normalizer};

/// Execute the normalize command.
pub fn execute_normalize(
    args: NormalizeArgs,
    normalizer: &Normalizer,
    formatter: &Formatter,
) -> Result<()> {
    let reports = normalize_inputs(&args.inputs, normalizer, || {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    })?;

    for report in reports.iter().filter(|r| r.outcome.analysis.is_error_record()) {
        eprintln!(
            "{}",
            formatter.warning(&format!("Could not extract an analysis from {}", report.source))
        );
    }

    println!("{}", formatter.format_reports(&reports, args.strategy)?);
    Ok(())
}

/// Read and normalize every input; `-` is read through `read_stdin`.
pub fn normalize_inputs<F>(
    inputs: &[String],
    normalizer: &Normalizer,
    mut read_stdin: F,
) -> Result<Vec<Report>>
where
    F: FnMut() -> Result<String>,
{
    if inputs.iter().filter(|input| input.as_str() == "-").count() > 1 {
        return Err(CliError::InvalidInput(
            "stdin ('-') can only be given once".to_string(),
        ));
    }

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        let raw = if input == "-" {
            read_stdin()?
        } else {
            fs::read_to_string(input)?
        };
        debug!("Read {} characters from {}", raw.chars().count(), input);

        let outcome = normalizer.run(&parse_raw(&raw));
        info!(
            "Normalized {} via {}",
            input,
            outcome.strategy.map_or("error record", |s| s.name())
        );

        reports.push(Report {
            source: input.clone(),
            outcome,
        });
    }

    Ok(reports)
}
