use crate::data::RowId;
use crate::error::ScenarioError;
use crate::estimator::{FlowParameters, FrequencyMode, Session};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// A scripted set of choices, used to run the estimator without prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub system: String,
    #[serde(default)]
    pub flows: Vec<ScenarioFlow>,
}

/// Parameters for one selected flow in a [`Scenario`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFlow {
    pub row: RowId,
    #[serde(default)]
    pub frequency: FrequencyMode,
    /// Ignored for real-time flows; defaults to 1 for scheduled ones.
    #[serde(default)]
    pub executions_per_hour: Option<u64>,
    #[serde(default)]
    pub monthly_volume: u64,
}

impl ScenarioFlow {
    pub fn parameters(&self) -> Result<FlowParameters, ScenarioError> {
        let params = match self.frequency {
            FrequencyMode::RealTime => FlowParameters::real_time(self.monthly_volume),
            FrequencyMode::Scheduled => FlowParameters::scheduled(
                self.executions_per_hour.unwrap_or(1),
                self.monthly_volume,
            )?,
        };
        Ok(params)
    }
}

impl Scenario {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replays the scenario onto `session`, replacing its system, selection
    /// and parameters.
    pub fn apply(&self, session: &mut Session<'_>) -> Result<(), ScenarioError> {
        session.choose_system(&self.system)?;
        let rows: Vec<RowId> = self.flows.iter().map(|f| f.row).collect();
        session.set_selection(&rows)?;
        for flow in &self.flows {
            session.set_parameters(flow.row, flow.parameters()?)?;
        }
        info!(
            system = %self.system,
            flows = session.selected().len(),
            "Applied scenario"
        );
        Ok(())
    }
}
