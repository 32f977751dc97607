use std::fmt;

use serde::{Deserialize, Serialize};

/// The three service offerings, each with its own gross-profit formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    #[default]
    #[serde(rename = "blueprint")]
    Blueprint,
    #[serde(rename = "ops")]
    OpsDevLab,
    #[serde(rename = "accelerator")]
    Accelerator,
}

impl Service {
    pub const ALL: [Service; 3] = [Self::Blueprint, Self::OpsDevLab, Self::Accelerator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blueprint => "blueprint",
            Self::OpsDevLab => "ops",
            Self::Accelerator => "accelerator",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blueprint" => Some(Self::Blueprint),
            "ops" | "ops-dev-lab" => Some(Self::OpsDevLab),
            "accelerator" => Some(Self::Accelerator),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Blueprint => "Blueprint",
            Self::OpsDevLab => "Operations Dev Lab",
            Self::Accelerator => "Accelerator",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
