use super::params::{FlowParameters, FrequencyMode};
use crate::data::{FlowRecord, FlowTable, RowId};
use crate::error::{ParameterError, SelectionError};
use ahash::AHashMap;
use tracing::debug;

/// The live state of one user session.
///
/// The table is borrowed and never modified. Everything the user has chosen
/// (system, selected flows and their parameters) lives here and is the only
/// input to [`Estimator::compute`](super::Estimator::compute).
#[derive(Debug, Clone)]
pub struct Session<'a> {
    table: &'a FlowTable,
    system: Option<String>,
    selected: Vec<RowId>,
    parameters: AHashMap<RowId, FlowParameters>,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a FlowTable) -> Self {
        Self {
            table,
            system: None,
            selected: Vec::new(),
            parameters: AHashMap::new(),
        }
    }

    pub fn table(&self) -> &'a FlowTable {
        self.table
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Chooses the active system. Switching to a different system clears the
    /// current selection together with its parameters.
    pub fn choose_system(&mut self, system: &str) -> Result<(), SelectionError> {
        if !self.table.has_system(system) {
            return Err(SelectionError::UnknownSystem(system.to_string()));
        }
        if self.system.as_deref() != Some(system) {
            debug!(system, "Switching system");
            self.system = Some(system.to_string());
            self.selected.clear();
            self.parameters.clear();
        }
        Ok(())
    }

    /// Flows available for selection under the active system.
    pub fn available_flows(&self) -> Vec<&'a FlowRecord> {
        match &self.system {
            Some(system) => self.table.filter_by_system(system).collect(),
            None => Vec::new(),
        }
    }

    /// Selected row ids, in the order they were picked.
    pub fn selected(&self) -> &[RowId] {
        &self.selected
    }

    pub fn is_selected(&self, row: RowId) -> bool {
        self.selected.contains(&row)
    }

    /// Adds a flow to the selection with default parameters.
    pub fn select(&mut self, row: RowId) -> Result<(), SelectionError> {
        self.check_in_system(row)?;
        if !self.is_selected(row) {
            self.selected.push(row);
            self.parameters.insert(row, FlowParameters::default());
            debug!(%row, "Selected flow");
        }
        Ok(())
    }

    /// Removes a flow from the selection and forgets its parameters.
    pub fn deselect(&mut self, row: RowId) -> Result<(), SelectionError> {
        let pos = self
            .selected
            .iter()
            .position(|r| *r == row)
            .ok_or(SelectionError::NotSelected(row))?;
        self.selected.remove(pos);
        self.parameters.remove(&row);
        debug!(%row, "Deselected flow");
        Ok(())
    }

    /// Replaces the selection. Rows kept from the previous selection retain
    /// their parameters; new rows start with defaults.
    pub fn set_selection(&mut self, rows: &[RowId]) -> Result<(), SelectionError> {
        for row in rows {
            self.check_in_system(*row)?;
        }
        let mut selected: Vec<RowId> = Vec::with_capacity(rows.len());
        for row in rows {
            if !selected.contains(row) {
                selected.push(*row);
            }
        }
        self.parameters.retain(|row, _| selected.contains(row));
        for row in &selected {
            self.parameters.entry(*row).or_default();
        }
        self.selected = selected;
        debug!(count = self.selected.len(), "Replaced selection");
        Ok(())
    }

    pub fn parameters(&self, row: RowId) -> Option<&FlowParameters> {
        self.parameters.get(&row)
    }

    pub fn set_frequency(&mut self, row: RowId, frequency: FrequencyMode) -> Result<(), ParameterError> {
        self.parameters_mut(row)?.set_frequency(frequency);
        debug!(%row, %frequency, "Set frequency");
        Ok(())
    }

    pub fn set_executions_per_hour(&mut self, row: RowId, value: u64) -> Result<(), ParameterError> {
        self.parameters_mut(row)?.set_executions_per_hour(value)?;
        debug!(%row, value, "Set executions per hour");
        Ok(())
    }

    pub fn set_monthly_volume(&mut self, row: RowId, value: u64) -> Result<(), ParameterError> {
        self.parameters_mut(row)?.monthly_volume = value;
        debug!(%row, value, "Set monthly volume");
        Ok(())
    }

    /// Replaces all parameters of a selected flow at once.
    pub fn set_parameters(&mut self, row: RowId, parameters: FlowParameters) -> Result<(), ParameterError> {
        *self.parameters_mut(row)? = parameters;
        Ok(())
    }

    /// Selected records paired with their parameters, in selection order.
    pub fn selected_flows(&self) -> impl Iterator<Item = (&'a FlowRecord, FlowParameters)> + '_ {
        self.selected.iter().filter_map(move |row| {
            let record = self.table.get(*row)?;
            let params = self.parameters.get(row).copied().unwrap_or_default();
            Some((record, params))
        })
    }

    fn parameters_mut(&mut self, row: RowId) -> Result<&mut FlowParameters, SelectionError> {
        self.parameters
            .get_mut(&row)
            .ok_or(SelectionError::NotSelected(row))
    }

    fn check_in_system(&self, row: RowId) -> Result<(), SelectionError> {
        let system = self.system.as_deref().ok_or(SelectionError::NoSystem)?;
        match self.table.get(row) {
            Some(record) if record.system == system => Ok(()),
            _ => Err(SelectionError::NotInSystem {
                row,
                system: system.to_string(),
            }),
        }
    }
}
