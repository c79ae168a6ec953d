//! Reads the inputs named by the configuration, counts them and reports the results.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::batch::{count_batch, count_batch_kanal, count_batch_rayon, count_batch_tokio, Outcome};
use crate::config::{CliConfig, Strategy};

const STDIN_LABEL: &str = "<stdin>";

/// Run the driver, writing one result line per input to `out`.
///
/// Returns `false` when at least one input could not be decoded; the reasons have already been
/// reported on stderr.
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<bool> {
    let (labels, messages) = read_inputs(config)?;
    let outcomes = count_all(config, messages)?;

    let labelled = labels.len() > 1;
    let mut all_decoded = true;

    for (label, outcome) in labels.iter().zip(outcomes) {
        match outcome {
            Ok(count) if labelled => writeln!(out, "{label}: {count}")?,
            Ok(count) => writeln!(out, "{count}")?,
            Err(e) => {
                eprintln!("{label}: {e}");
                all_decoded = false;
            }
        }
    }

    Ok(all_decoded)
}

fn read_inputs(config: &CliConfig) -> Result<(Vec<String>, Vec<Vec<u8>>)> {
    let mut labels = Vec::with_capacity(config.files.len().max(1));
    let mut messages = Vec::with_capacity(config.files.len().max(1));

    if config.files.is_empty() {
        let mut message = Vec::new();
        io::stdin()
            .read_to_end(&mut message)
            .context("failed to read standard input")?;
        labels.push(STDIN_LABEL.to_string());
        messages.push(message);
    } else {
        for path in &config.files {
            let message =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            labels.push(path.display().to_string());
            messages.push(message);
        }
    }

    if !config.strict {
        for message in &mut messages {
            strip_line_terminator(message);
        }
    }

    info!(inputs = messages.len(), "read inputs");
    Ok((labels, messages))
}

fn count_all(config: &CliConfig, messages: Vec<Vec<u8>>) -> Result<Vec<Outcome>> {
    debug!(strategy = ?config.strategy, jobs = config.jobs, "counting");

    let outcomes = match config.strategy {
        Strategy::Sequential => count_batch(&messages),
        Strategy::Rayon => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.jobs)
                .build()?;
            pool.install(|| count_batch_rayon(&messages))
        }
        Strategy::Kanal => count_batch_kanal(messages, config.jobs)?,
        Strategy::Tokio => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(count_batch_tokio(messages, config.jobs))?
        }
    };

    Ok(outcomes)
}

/// Removes one trailing `\n` or `\r\n`, as left by text editors.
pub fn strip_line_terminator(message: &mut Vec<u8>) {
    if message.last() == Some(&b'\n') {
        message.pop();
        if message.last() == Some(&b'\r') {
            message.pop();
        }
    }
}
