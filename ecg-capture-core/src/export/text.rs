use crate::models::batch::SampleBatch;

/// Render a batch as plain text, one reading per line, volts to three
/// decimal places:
///
/// ```text
/// 1.650V
/// 2.247V
/// 1.053V
/// ```
///
/// No trailing newline; an empty batch renders as an empty string.
pub fn render_batch(batch: &SampleBatch) -> String {
    batch
        .samples()
        .iter()
        .map(|volts| format!("{:.3}V", volts))
        .collect::<Vec<_>>()
        .join("\n")
}
