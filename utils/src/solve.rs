use allfreqs_config::Settings;
use std::io::Write;

/// Writes the register encoding of the fastest clock not above `desired`
pub fn solve(
    settings: &Settings,
    desired: f64,
    mut output: impl Write,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let setting = settings.solver()?.solve(desired)?;
    let registers = setting.register_values()?;

    tracing::debug!(
        "Registers hold M - 1 = {} and D - 1 = {}",
        registers.multiplier,
        registers.divisor
    );
    writeln!(output, "{}", registers)?;

    Ok(())
}
