use log::debug;

use super::Spreadsheet;
use super::cell::{CellContents, CellValue};
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::{Formula, cells_to_recalculate};

impl Spreadsheet {
    /// Set a cell from raw input and recalculate everything that depends on it.
    ///
    /// Input that parses as a number becomes a number, input starting with
    /// `=` is parsed as a formula, anything else is stored as text (empty
    /// text clears the cell). Returns the cell and all of its direct and
    /// indirect dependents, in the order they were re-evaluated.
    ///
    /// Nothing changes if the name is invalid, the formula does not parse, or
    /// the formula would create a circular reference.
    pub fn set_contents_of_cell(&mut self, name: &str, input: &str) -> Result<Vec<String>> {
        let name = self.checked_name(name)?;
        let contents = CellContents::from_input(input, |text| {
            Formula::parse(text, &self.normalize, |v| self.is_acceptable(v))
        })?;

        let references: Vec<String> = match &contents {
            CellContents::Formula(formula) => formula.variables().map(str::to_string).collect(),
            _ => Vec::new(),
        };

        // Provisionally point the cell at its new references, then make sure
        // that did not close a loop.
        let previous: Vec<String> = self.graph.dependees(&name).map(str::to_string).collect();
        self.graph.replace_dependees(&name, &references);

        let order = match cells_to_recalculate(&self.graph, &name) {
            Ok(order) => order,
            Err(cycle) => {
                self.graph.replace_dependees(&name, &previous);
                debug!("rejected edit of {}: {}", name, cycle);
                return Err(SheetError::CircularReference(cycle));
            }
        };

        self.cells.entry(name.clone()).or_default().contents = contents;
        self.changed = true;
        self.recalculate(&order);

        debug!("set {}; recalculated {:?}", name, order);
        Ok(order)
    }

    /// Re-evaluate cells in dependency order.
    fn recalculate(&mut self, order: &[String]) {
        for name in order {
            let value = match self.cells.get(name).map(|cell| &cell.contents) {
                Some(CellContents::Formula(formula)) => {
                    match formula.evaluate(|v| self.numeric_value(v)) {
                        Ok(n) => CellValue::Number(n),
                        Err(e) => CellValue::Error(e),
                    }
                }
                Some(CellContents::Number(n)) => CellValue::Number(*n),
                Some(CellContents::Text(s)) => CellValue::Text(s.clone()),
                None => CellValue::default(),
            };
            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }
}
