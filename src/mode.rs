use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Which upstream endpoint (and payload shape) a search goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Web,
    Images,
    Videos,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Web, Mode::Images, Mode::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Web => "web",
            Mode::Images => "images",
            Mode::Videos => "videos",
        }
    }

    /// Path of the upstream endpoint, relative to the configured base URL.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Mode::Web => "search",
            Mode::Images => "images",
            Mode::Videos => "videos",
        }
    }

    pub fn endpoint(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.endpoint_path())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Mode::Web),
            "images" => Ok(Mode::Images),
            "videos" => Ok(Mode::Videos),
            _ => Err(SearchError::InvalidMode(s.to_string())),
        }
    }
}
