use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pessimistic, expected or optimistic framing of the KPI assumptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Low,
    #[default]
    Base,
    High,
}

impl Scenario {
    /// Every scenario in chart order.
    pub const ALL: [Scenario; 3] = [Self::Low, Self::Base, Self::High];

    /// Multiplier applied to scenario-scalable KPI values.
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Low => Decimal::new(5, 1),
            Self::Base => Decimal::ONE,
            Self::High => Decimal::new(15, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Base => "base",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "base" => Some(Self::Base),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Base => "Base",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} (×{})", self.label(), self.multiplier())
    }
}
