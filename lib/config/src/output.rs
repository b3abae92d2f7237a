use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Default,
)]
#[strum(serialize_all = "lowercase")]
/// How enumerated frequencies are written to stdout
pub enum OutputStyle {
    #[default]
    /// Bracketed list, wrapped one value per line once it gets too wide
    Pretty,
    /// One bare value per line
    Lines,
    /// A ron sequence
    Ron,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip() {
        for style in OutputStyle::iter() {
            assert_eq!(OutputStyle::from_str(&style.to_string()), Ok(style));
        }

        assert_eq!(OutputStyle::Pretty.to_string(), "pretty");
        assert!(OutputStyle::from_str("json").is_err());
    }
}
