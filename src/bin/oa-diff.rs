//! oa-diff -- print the failure message for two files compared for equality.
//!
//! Usage: oa-diff <actual-file> <expected-file> [--encoding NAME] [--width N] [--no-diff]

use anyhow::{Context, bail};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = oa_diff::Configuration::from_env();
    let mut files = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--encoding" => {
                let name = args.next().context("--encoding requires a value")?;
                config = config.with_terminal_encoding(name.parse()?);
            }
            "--width" => {
                let width = args.next().context("--width requires a value")?;
                let width = width
                    .parse()
                    .with_context(|| format!("invalid width: {width}"))?;
                config = config.with_terminal_width(width);
            }
            "--no-diff" => config = config.with_diff_enabled(false),
            _ => files.push(arg),
        }
    }

    let [actual_path, expected_path] = files.as_slice() else {
        bail!("usage: oa-diff <actual-file> <expected-file> [--encoding NAME] [--width N] [--no-diff]");
    };
    let actual = std::fs::read_to_string(actual_path)
        .with_context(|| format!("failed to read {actual_path}"))?;
    let expected = std::fs::read_to_string(expected_path)
        .with_context(|| format!("failed to read {expected_path}"))?;

    let message = oa_diff::equality_failure(
        "Actual",
        &oa_diff::Value::from(actual),
        "Expected",
        &oa_diff::Value::from(expected),
        &config,
    )?;
    println!("{message}");
    Ok(())
}
