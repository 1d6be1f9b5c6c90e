//! Assemble failure messages from a headline and context rows.

use tracing::debug;

use crate::config::Configuration;
use crate::diff::context::{ContextGenerator, ContextLine};
use crate::error::ContextResult;
use crate::value::Value;

/// Join context rows, left-justifying labels to the widest one.
pub fn format_context(lines: &[ContextLine]) -> String {
    let width = lines
        .iter()
        .map(|line| line.label.chars().count())
        .max()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| match (line.label.is_empty(), line.value.is_empty()) {
            (true, true) => String::new(),
            (true, false) => format!("{:width$}  {}", "", line.value),
            (false, _) => format!("{:<width$}: {}", line.label, line.value),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether the expected text can be printed in the headline.
///
/// Only the terminal width decides; diffability does not.
pub fn expected_fits(expected: &str, config: &Configuration) -> bool {
    !expected.contains('\n') && expected.chars().count() <= config.terminal_width()
}

/// Failure message for "`actual_name` must be equal to `expected`".
pub fn equality_failure(
    actual_name: &str,
    actual: &Value,
    expected_name: &str,
    expected: &Value,
    config: &Configuration,
) -> ContextResult<String> {
    let expected_text = expected.to_string();
    let fits = expected_fits(&expected_text, config);
    let headline = if fits {
        format!("{actual_name} must be equal to {expected_text}.")
    } else {
        format!("{actual_name} must be equal to {expected_name}.")
    };

    let context = ContextGenerator::new(config.clone()).get_context(
        actual_name,
        actual,
        expected_name,
        expected,
        fits,
    )?;
    debug!(rows = context.len(), expected_in_headline = fits, "failure message assembled");

    if context.is_empty() {
        return Ok(headline);
    }
    Ok(format!("{headline}\n{}", format_context(&context)))
}
