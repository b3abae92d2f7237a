use crate::pretty::pretty_list;
use allfreqs_config::{OutputStyle, Settings};
use itertools::Itertools;
use ron::ser::PrettyConfig;
use serde::Serialize;
use std::io::Write;

pub fn list(
    settings: &Settings,
    style: OutputStyle,
    pairs: bool,
    mut output: impl Write,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let enumerator = settings.enumerator()?;

    if pairs {
        let frequencies = enumerator.frequencies_with_pairs();
        tracing::info!("{} unique frequencies", frequencies.len());

        match style {
            OutputStyle::Pretty => writeln!(
                output,
                "{}",
                pretty_list(frequencies.iter().map(|(frequency, pairs)| format!(
                    "({}, [{}])",
                    frequency,
                    pairs.iter().join(", ")
                )))
            )?,
            OutputStyle::Lines => {
                for (frequency, pairs) in &frequencies {
                    writeln!(output, "{} {}", frequency, pairs.iter().join(" "))?;
                }
            }
            OutputStyle::Ron => write_ron(&mut output, &frequencies)?,
        }
    } else {
        let frequencies = enumerator.frequencies();
        tracing::info!("{} unique frequencies", frequencies.len());

        match style {
            OutputStyle::Pretty => writeln!(output, "{}", pretty_list(&frequencies))?,
            OutputStyle::Lines => {
                for frequency in &frequencies {
                    writeln!(output, "{}", frequency)?;
                }
            }
            OutputStyle::Ron => write_ron(&mut output, &frequencies)?,
        }
    }

    Ok(())
}

fn write_ron(
    mut output: impl Write,
    value: &impl Serialize,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    ron::Options::default().to_io_writer_pretty(&mut output, value, PrettyConfig::new())?;
    writeln!(output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(settings: &Settings, style: OutputStyle, pairs: bool) -> String {
        let mut output = Vec::new();
        list(settings, style, pairs, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn single_multiplier() -> Settings {
        Settings {
            base_frequency: 500.0,
            ..Default::default()
        }
    }

    #[test]
    fn pretty() {
        assert_eq!(
            run(&single_multiplier(), OutputStyle::Pretty, false),
            "[50.0,\n 55.55555555555556,\n 62.5,\n 71.42857142857143,\n 83.33333333333333,\n 100.0,\n 125.0,\n 166.66666666666666]\n"
        );
    }

    #[test]
    fn lines() {
        let output = run(&Settings::default(), OutputStyle::Lines, false);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 43);
        assert_eq!(lines.first(), Some(&"50.0"));
        assert_eq!(lines.last(), Some(&"200.0"));
    }

    #[test]
    fn ron_sequence() {
        let output = run(&single_multiplier(), OutputStyle::Ron, false);
        let frequencies: Vec<f64> = ron::from_str(&output).unwrap();

        assert_eq!(frequencies.len(), 8);
        assert_eq!(frequencies[0], 50.0);
    }

    #[test]
    fn empty_range() {
        let settings = Settings {
            base_frequency: 2000.0,
            ..Default::default()
        };

        assert_eq!(run(&settings, OutputStyle::Pretty, false), "[]\n");
        assert_eq!(run(&settings, OutputStyle::Lines, true), "");
    }

    #[test]
    fn pairs() {
        let output = run(&Settings::default(), OutputStyle::Lines, true);
        assert!(output.lines().any(|line| line == "200.0 4/2 6/3 8/4"));
        assert!(output.lines().any(|line| line == "50.0 4/8 5/10 6/12 7/14 8/16 9/18"));

        let output = run(&single_multiplier(), OutputStyle::Pretty, true);
        assert!(output.starts_with("[(50.0, [1/10]),\n (55.55555555555556, [1/9]),"));
    }

    #[test]
    fn invalid_settings() {
        let settings = Settings {
            divisor_span: 0,
            ..Default::default()
        };

        assert!(list(&settings, OutputStyle::Pretty, false, std::io::sink()).is_err());

        let settings = Settings {
            base_frequency: 1e-8,
            ..Default::default()
        };
        assert!(list(&settings, OutputStyle::Pretty, false, std::io::sink()).is_err());
    }
}
