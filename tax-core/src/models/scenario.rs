use std::fmt;

use serde::{Deserialize, Serialize};

/// The built-in deduction strategies that can be compared.
///
/// The deduction logic for each variant lives in
/// [`crate::calculations::scenarios`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    NoDeductions,
    ConservativeDeductions,
    AverageDeductions,
    HighDeductions,
}

impl Scenario {
    /// Every scenario, in catalog order.
    pub const ALL: [Scenario; 4] = [
        Self::NoDeductions,
        Self::ConservativeDeductions,
        Self::AverageDeductions,
        Self::HighDeductions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoDeductions => "no-deductions",
            Self::ConservativeDeductions => "conservative-deductions",
            Self::AverageDeductions => "average-deductions",
            Self::HighDeductions => "high-deductions",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no-deductions" => Some(Self::NoDeductions),
            "conservative-deductions" => Some(Self::ConservativeDeductions),
            "average-deductions" => Some(Self::AverageDeductions),
            "high-deductions" => Some(Self::HighDeductions),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NoDeductions => "No Deductions",
            Self::ConservativeDeductions => "Conservative Deductions",
            Self::AverageDeductions => "Average Deductions",
            Self::HighDeductions => "High Deductions",
        }
    }

    /// Chart colour used by presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            Self::NoDeductions => "#EF4444",
            Self::ConservativeDeductions => "#F97316",
            Self::AverageDeductions => "#3B82F6",
            Self::HighDeductions => "#10B981",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NoDeductions => "Gross income with no deductions",
            Self::ConservativeDeductions => "10% retirement, basic medical aid",
            Self::AverageDeductions => "20% retirement, family medical aid",
            Self::HighDeductions => "Max retirement (27.5%), family of 4 medical aid",
        }
    }

    pub fn assumptions(&self) -> &'static str {
        match self {
            Self::NoDeductions => {
                "No retirement contributions, no medical aid, basic rebate only"
            }
            Self::ConservativeDeductions => {
                "10% retirement (max R350k), single medical aid (R364/month), primary rebate"
            }
            Self::AverageDeductions => {
                "20% retirement (max R350k), couple medical aid (R728/month), primary rebate"
            }
            Self::HighDeductions => {
                "27.5% retirement (max R350k), family of 4 medical aid (R1,220/month), primary rebate"
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
