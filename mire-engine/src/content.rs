// content.rs - Portfolio text shown over the scene

use serde::{Deserialize, Serialize};

use crate::error::{MireError, MireResult};

const EMBEDDED: &str = include_str!("../content/portfolio.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tech: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub name: String,
    pub role: String,
    pub contact: Contact,
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub education: String,
}

impl PortfolioData {
    pub fn from_json(json: &str) -> MireResult<Self> {
        serde_json::from_str(json).map_err(|e| MireError::config(format!("portfolio: {e}")))
    }

    /// The content compiled into the crate.
    pub fn embedded() -> MireResult<Self> {
        Self::from_json(EMBEDDED)
    }

    pub fn embedded_json() -> &'static str {
        EMBEDDED
    }
}
