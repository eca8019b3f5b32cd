//! Export ordering

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order in which a registry exports its histograms
///
/// Fixed when the registry is constructed. Either way the order depends
/// only on the booked keys, never on fill order or hashing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOrder {
    /// Order in which keys were first booked; rebooking keeps the position
    #[default]
    Declaration,
    /// Keys sorted by byte-wise string comparison
    Lexicographic,
}

impl ExportOrder {
    /// Resolve the export order over the declared keys
    pub fn arrange<'a>(&self, declared: &'a [String]) -> Vec<&'a str> {
        let mut keys: Vec<&str> = declared.iter().map(String::as_str).collect();
        if *self == ExportOrder::Lexicographic {
            keys.sort_unstable();
        }
        keys
    }
}

impl fmt::Display for ExportOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOrder::Declaration => write!(f, "declaration"),
            ExportOrder::Lexicographic => write!(f, "lexicographic"),
        }
    }
}

impl FromStr for ExportOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "declaration" => Ok(ExportOrder::Declaration),
            "lexicographic" | "sorted" => Ok(ExportOrder::Lexicographic),
            other => Err(format!(
                "unknown export order '{}', expected 'declaration' or 'lexicographic'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_declaration_keeps_order() {
        let declared = keys(&["zeta", "alpha", "mid"]);
        assert_eq!(
            ExportOrder::Declaration.arrange(&declared),
            ["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_lexicographic_sorts() {
        let declared = keys(&["zeta", "alpha", "Mid"]);
        assert_eq!(
            ExportOrder::Lexicographic.arrange(&declared),
            ["Mid", "alpha", "zeta"]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("declaration".parse::<ExportOrder>(), Ok(ExportOrder::Declaration));
        assert_eq!("sorted".parse::<ExportOrder>(), Ok(ExportOrder::Lexicographic));
        assert!("random".parse::<ExportOrder>().is_err());
        assert_eq!(ExportOrder::default(), ExportOrder::Declaration);
    }
}
