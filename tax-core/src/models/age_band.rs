use std::fmt;

use serde::{Deserialize, Serialize};

/// Age band that determines which rebates a taxpayer receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    #[serde(rename = "under65")]
    Under65,
    #[serde(rename = "65plus")]
    From65,
    #[serde(rename = "75plus")]
    From75,
}

impl AgeBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under65 => "under65",
            Self::From65 => "65plus",
            Self::From75 => "75plus",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
