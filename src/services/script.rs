use crate::models::Decision;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a swipe script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One user action in a recorded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    /// A drag with cumulative offsets sampled since drag start
    Drag { samples: Vec<f64> },
    /// A tap on the Pass or Match button
    Tap { decision: Decision },
    /// A fresh candidate batch arrives
    Reload,
}

/// Ordered user actions replayed against a deck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwipeScript {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl SwipeScript {
    pub fn parse(toml_str: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        let script = Self::parse(&text)?;
        tracing::info!("Loaded swipe script with {} steps from {}", script.steps.len(), path.as_ref().display());
        Ok(script)
    }

    /// Session used when no script is configured
    pub fn demo() -> Self {
        Self {
            steps: vec![
                Step::Drag { samples: vec![30.0, 90.0, 150.0] },
                Step::Drag { samples: vec![-40.0, -110.0, -150.0] },
                Step::Drag { samples: vec![20.0, 50.0] },
                Step::Tap { decision: Decision::Request },
                Step::Drag { samples: vec![120.0, 80.0, -30.0, -200.0] },
                Step::Tap { decision: Decision::Request },
                Step::Drag { samples: vec![200.0] },
            ],
        }
    }
}
