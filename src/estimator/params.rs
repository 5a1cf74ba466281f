use crate::error::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HOURS_PER_DAY: u64 = 24;
/// Months are always counted as 30 days.
pub const DAYS_PER_MONTH: u64 = 30;
pub const EXECUTIONS_PER_MONTH_FACTOR: u64 = HOURS_PER_DAY * DAYS_PER_MONTH;

pub const MIN_EXECUTIONS_PER_HOUR: u64 = 1;
pub const MAX_EXECUTIONS_PER_HOUR: u64 = 60;

/// How a flow is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyMode {
    /// Event driven; only monthly volume contributes messages.
    #[default]
    RealTime,
    /// Runs on a timer; every execution adds one message on top of the volume.
    Scheduled,
}

impl fmt::Display for FrequencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyMode::RealTime => write!(f, "Real Time"),
            FrequencyMode::Scheduled => write!(f, "Scheduled"),
        }
    }
}

/// User-supplied parameters for one selected flow.
///
/// Executions per month is never stored; it is always derived from
/// executions per hour so the two cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFlowParameters")]
pub struct FlowParameters {
    frequency: FrequencyMode,
    executions_per_hour: u64,
    pub monthly_volume: u64,
}

impl Default for FlowParameters {
    fn default() -> Self {
        Self::real_time(0)
    }
}

impl FlowParameters {
    pub fn real_time(monthly_volume: u64) -> Self {
        Self {
            frequency: FrequencyMode::RealTime,
            executions_per_hour: 0,
            monthly_volume,
        }
    }

    pub fn scheduled(executions_per_hour: u64, monthly_volume: u64) -> Result<Self, ParameterError> {
        Ok(Self {
            frequency: FrequencyMode::Scheduled,
            executions_per_hour: check_executions_per_hour(executions_per_hour)?,
            monthly_volume,
        })
    }

    pub fn frequency(&self) -> FrequencyMode {
        self.frequency
    }

    /// Zero unless the flow is scheduled.
    pub fn executions_per_hour(&self) -> u64 {
        self.executions_per_hour
    }

    pub fn executions_per_month(&self) -> u64 {
        self.executions_per_hour * EXECUTIONS_PER_MONTH_FACTOR
    }

    /// Switches the frequency mode. Entering `Scheduled` starts at the
    /// minimum rate; leaving it resets the rate to zero.
    pub fn set_frequency(&mut self, frequency: FrequencyMode) {
        if self.frequency == frequency {
            return;
        }
        self.frequency = frequency;
        self.executions_per_hour = match frequency {
            FrequencyMode::RealTime => 0,
            FrequencyMode::Scheduled => MIN_EXECUTIONS_PER_HOUR,
        };
    }

    pub fn set_executions_per_hour(&mut self, value: u64) -> Result<(), ParameterError> {
        if self.frequency != FrequencyMode::Scheduled {
            return Err(ParameterError::NotScheduled);
        }
        self.executions_per_hour = check_executions_per_hour(value)?;
        Ok(())
    }
}

/// Unchecked wire form of [`FlowParameters`].
#[derive(Deserialize)]
struct RawFlowParameters {
    #[serde(default)]
    frequency: FrequencyMode,
    #[serde(default)]
    executions_per_hour: Option<u64>,
    #[serde(default)]
    monthly_volume: u64,
}

impl TryFrom<RawFlowParameters> for FlowParameters {
    type Error = ParameterError;

    fn try_from(raw: RawFlowParameters) -> Result<Self, Self::Error> {
        match raw.frequency {
            FrequencyMode::RealTime => match raw.executions_per_hour {
                None | Some(0) => Ok(Self::real_time(raw.monthly_volume)),
                Some(_) => Err(ParameterError::NotScheduled),
            },
            FrequencyMode::Scheduled => Self::scheduled(
                raw.executions_per_hour.unwrap_or(MIN_EXECUTIONS_PER_HOUR),
                raw.monthly_volume,
            ),
        }
    }
}

fn check_executions_per_hour(value: u64) -> Result<u64, ParameterError> {
    if (MIN_EXECUTIONS_PER_HOUR..=MAX_EXECUTIONS_PER_HOUR).contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::ExecutionsPerHourOutOfRange {
            value,
            min: MIN_EXECUTIONS_PER_HOUR,
            max: MAX_EXECUTIONS_PER_HOUR,
        })
    }
}
