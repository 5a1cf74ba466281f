//! Prompt-driven front end for a [`Session`].
//!
//! Input and output are generic so the whole loop can be driven from tests
//! with in-memory buffers. End of input is treated as a request to quit.

use crate::data::{FlowRecord, RowId};
use crate::estimator::{
    Estimator, FrequencyMode, MAX_EXECUTIONS_PER_HOUR, MIN_EXECUTIONS_PER_HOUR, Session,
};
use crate::report::ReportFormatter;
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn println(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Prompts once and returns the trimmed answer, or the default when the
    /// answer is empty. `None` means the input is exhausted.
    pub fn ask(&mut self, prompt_text: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let default_prompt = default.map_or(String::new(), |d| format!(" [default: {}]", d));
        write!(self.output, "> {}{}: ", prompt_text, default_prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(Some(default.unwrap_or_default().to_string()))
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Asks for a whole number in `min..=max` until a valid one is given.
    pub fn ask_number(
        &mut self,
        prompt_text: &str,
        min: u64,
        max: Option<u64>,
        default: u64,
    ) -> io::Result<Option<u64>> {
        let default_str = default.to_string();
        loop {
            let Some(answer) = self.ask(prompt_text, Some(&default_str))? else {
                return Ok(None);
            };
            match answer.replace(',', "").parse::<u64>() {
                Ok(n) if n >= min && max.is_none_or(|m| n <= m) => return Ok(Some(n)),
                _ => {
                    let range = match max {
                        Some(max) => format!("between {} and {}", min, max),
                        None => format!("of at least {}", min),
                    };
                    self.println(format!("Invalid value. Please enter a whole number {}.", range))?;
                }
            }
        }
    }

    /// Shows a numbered list and asks for one entry. Returns its index.
    pub fn choose_one(
        &mut self,
        title: &str,
        options: &[String],
        default: usize,
    ) -> io::Result<Option<usize>> {
        self.println(format!("\n{}", title))?;
        for (i, option) in options.iter().enumerate() {
            self.println(format!("  {}: {}", i + 1, option))?;
        }
        let default_str = (default + 1).to_string();
        loop {
            let Some(answer) = self.ask("Enter choice", Some(&default_str))? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => self.println(format!(
                    "Invalid choice. Please enter a number from 1 to {}.",
                    options.len()
                ))?,
            }
        }
    }
}

/// Parses a multi-select answer such as `"1, 3 4"` into zero-based indices.
///
/// `-` selects nothing. Duplicates are dropped and input order is kept.
pub fn parse_selection(input: &str, option_count: usize) -> Result<Vec<usize>, String> {
    let input = input.trim();
    if input == "-" {
        return Ok(Vec::new());
    }
    let mut picked = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let n: usize = token
            .parse()
            .map_err(|_| format!("'{}' is not a number", token))?;
        if n == 0 || n > option_count {
            return Err(format!("{} is not between 1 and {}", n, option_count));
        }
        if !picked.contains(&(n - 1)) {
            picked.push(n - 1);
        }
    }
    Ok(picked)
}

enum MenuAction {
    ChangeSystem,
    ChangeFlows,
    EditParameters,
    ToggleDetail,
    Quit,
}

/// The interactive estimator: choose system, pick flows, set parameters,
/// then loop on a menu. The estimate is recomputed after every change.
pub struct InteractiveApp<'a, R, W> {
    session: Session<'a>,
    prompter: Prompter<R, W>,
    formatter: ReportFormatter,
}

impl<'a, R: BufRead, W: Write> InteractiveApp<'a, R, W> {
    pub fn new(session: Session<'a>, prompter: Prompter<R, W>, formatter: ReportFormatter) -> Self {
        Self {
            session,
            prompter,
            formatter,
        }
    }

    pub fn session(&self) -> &Session<'a> {
        &self.session
    }

    /// Consumes the app, handing back the session and output sink.
    pub fn finish(self) -> (Session<'a>, W) {
        (self.session, self.prompter.into_output())
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.prompter.println("--- Flow Estimator Interactive Mode ---")?;

        if self.session.system().is_none() && !self.choose_system()? {
            return Ok(());
        }
        if !self.choose_flows()? || !self.configure_all()? {
            return Ok(());
        }
        self.show_results()?;

        loop {
            let action = match self.menu()? {
                Some(action) => action,
                None => return Ok(()),
            };
            let keep_going = match action {
                MenuAction::ChangeSystem => {
                    self.choose_system()? && self.choose_flows()? && self.configure_all()?
                }
                MenuAction::ChangeFlows => self.choose_flows()? && self.configure_all()?,
                MenuAction::EditParameters => self.edit_one()?,
                MenuAction::ToggleDetail => {
                    self.formatter.detailed = !self.formatter.detailed;
                    true
                }
                MenuAction::Quit => return Ok(()),
            };
            if !keep_going {
                return Ok(());
            }
            self.show_results()?;
        }
    }

    fn show_results(&mut self) -> io::Result<()> {
        let estimate = Estimator::compute(&self.session);
        self.prompter.println("\n--- Results ---")?;
        let report = self.formatter.render(estimate.as_ref());
        self.prompter.println(report)
    }

    fn menu(&mut self) -> io::Result<Option<MenuAction>> {
        let options = vec![
            "Change system".to_string(),
            "Change selected flows".to_string(),
            "Edit parameters of a flow".to_string(),
            if self.formatter.detailed {
                "Show summary columns".to_string()
            } else {
                "Show all columns".to_string()
            },
            "Quit".to_string(),
        ];
        let choice = self.prompter.choose_one("What next?", &options, 4)?;
        Ok(choice.map(|i| match i {
            0 => MenuAction::ChangeSystem,
            1 => MenuAction::ChangeFlows,
            2 => MenuAction::EditParameters,
            3 => MenuAction::ToggleDetail,
            _ => MenuAction::Quit,
        }))
    }

    fn choose_system(&mut self) -> io::Result<bool> {
        let table = self.session.table();
        let systems: Vec<String> = table.systems().into_iter().map(str::to_string).collect();
        if systems.is_empty() {
            self.prompter.println("The source table contains no systems.")?;
            return Ok(false);
        }
        let current = self
            .session
            .system()
            .and_then(|s| systems.iter().position(|x| x == s))
            .unwrap_or(0);
        let Some(idx) = self
            .prompter
            .choose_one("Select a system:", &systems, current)?
        else {
            return Ok(false);
        };
        self.session
            .choose_system(&systems[idx])
            .map_err(io::Error::other)?;
        Ok(true)
    }

    fn choose_flows(&mut self) -> io::Result<bool> {
        let flows = self.session.available_flows();
        self.prompter.println("\nStep 1: Select flows")?;
        for (i, flow) in flows.iter().enumerate() {
            let marker = if self.session.is_selected(flow.id) { "*" } else { " " };
            self.prompter
                .println(format!(" {}{:>3}: {}", marker, i + 1, flow.picker_label()))?;
        }

        let current = flows
            .iter()
            .enumerate()
            .filter(|(_, f)| self.session.is_selected(f.id))
            .map(|(i, _)| i + 1)
            .join(",");
        let default = if current.is_empty() { "-".to_string() } else { current };

        loop {
            let Some(answer) = self.prompter.ask(
                "Flows (numbers separated by commas, '-' for none)",
                Some(&default),
            )?
            else {
                return Ok(false);
            };
            match parse_selection(&answer, flows.len()) {
                Ok(indices) => {
                    let rows: Vec<RowId> = indices.iter().map(|i| flows[*i].id).collect();
                    self.session
                        .set_selection(&rows)
                        .map_err(io::Error::other)?;
                    debug!(selected = rows.len(), "Flows chosen interactively");
                    return Ok(true);
                }
                Err(message) => self.prompter.println(format!("Invalid selection: {}", message))?,
            }
        }
    }

    fn configure_all(&mut self) -> io::Result<bool> {
        if self.session.selected().is_empty() {
            return Ok(true);
        }
        self.prompter
            .println("\nStep 2: Configure parameters for each selected flow")?;
        let rows = self.session.selected().to_vec();
        for row in rows {
            if !self.configure(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn edit_one(&mut self) -> io::Result<bool> {
        let table = self.session.table();
        let rows = self.session.selected().to_vec();
        if rows.is_empty() {
            self.prompter.println("No flows are selected.")?;
            return Ok(true);
        }
        let labels: Vec<String> = rows
            .iter()
            .filter_map(|row| table.get(*row))
            .map(FlowRecord::picker_label)
            .collect();
        match self.prompter.choose_one("Which flow?", &labels, 0)? {
            Some(idx) => self.configure(rows[idx]),
            None => Ok(false),
        }
    }

    /// Prompts for every parameter of one flow. Returns `false` on end of input.
    fn configure(&mut self, row: RowId) -> io::Result<bool> {
        let Some(record) = self.session.table().get(row) else {
            return Ok(true);
        };
        let params = self.session.parameters(row).copied().unwrap_or_default();

        self.prompter.println("---")?;
        self.prompter.println(record.label())?;

        let modes = [FrequencyMode::RealTime, FrequencyMode::Scheduled];
        let mode_labels: Vec<String> = modes.iter().map(ToString::to_string).collect();
        let current = modes
            .iter()
            .position(|m| *m == params.frequency())
            .unwrap_or(0);
        let Some(mode_idx) = self.prompter.choose_one("Frequency", &mode_labels, current)? else {
            return Ok(false);
        };
        let frequency = modes[mode_idx];
        self.session
            .set_frequency(row, frequency)
            .map_err(io::Error::other)?;

        if frequency == FrequencyMode::Scheduled {
            let default = self
                .session
                .parameters(row)
                .map_or(MIN_EXECUTIONS_PER_HOUR, |p| p.executions_per_hour());
            let Some(per_hour) = self.prompter.ask_number(
                "Exec/hour",
                MIN_EXECUTIONS_PER_HOUR,
                Some(MAX_EXECUTIONS_PER_HOUR),
                default,
            )?
            else {
                return Ok(false);
            };
            self.session
                .set_executions_per_hour(row, per_hour)
                .map_err(io::Error::other)?;
        } else {
            self.prompter.println("Exec/hour: 0")?;
        }

        let Some(volume) =
            self.prompter
                .ask_number("Monthly Volume", 0, None, params.monthly_volume)?
        else {
            return Ok(false);
        };
        self.session
            .set_monthly_volume(row, volume)
            .map_err(io::Error::other)?;

        let per_month = self
            .session
            .parameters(row)
            .map_or(0, |p| p.executions_per_month());
        self.prompter.println(format!("Exec/Month: {}", per_month))?;
        Ok(true)
    }
}
