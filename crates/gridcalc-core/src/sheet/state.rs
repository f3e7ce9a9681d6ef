use indexmap::IndexMap;

use super::cell::{Cell, CellContents, CellValue};
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::{DependencyGraph, is_cell_name};

/// Predicate deciding whether a normalized cell name is acceptable.
pub type NameValidator = Box<dyn Fn(&str) -> bool>;
/// Maps a cell name to its canonical form (e.g. upper-casing).
pub type NameNormalizer = Box<dyn Fn(&str) -> String>;

/// Spreadsheet state: cells, their dependency graph, and naming rules.
///
/// Edits go through [`Spreadsheet::set_contents_of_cell`], which keeps
/// every computed value consistent with the contents it depends on.
/// The spreadsheet is a plain owned value; callers that share it between
/// threads must serialize access themselves.
pub struct Spreadsheet {
    /// Cells that have been written, in order of first write.
    pub(crate) cells: IndexMap<String, Cell>,
    /// `(s, t)` means `t`'s formula references `s`.
    pub(crate) graph: DependencyGraph,
    pub(crate) is_valid: NameValidator,
    pub(crate) normalize: NameNormalizer,
    pub(crate) version: String,
    /// Whether the spreadsheet has been modified since creation or the last
    /// [`Spreadsheet::mark_saved`].
    pub(crate) changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet that accepts every cell name as-is.
    pub fn new() -> Self {
        Self::with_rules(|_| true, str::to_string, "default")
    }

    /// Create an empty spreadsheet with custom naming rules.
    ///
    /// Names are first passed through `normalize`; the result must be a
    /// letters-then-digits cell name and satisfy `is_valid`.
    pub fn with_rules<V, N>(is_valid: V, normalize: N, version: impl Into<String>) -> Self
    where
        V: Fn(&str) -> bool + 'static,
        N: Fn(&str) -> String + 'static,
    {
        Spreadsheet {
            cells: IndexMap::new(),
            graph: DependencyGraph::new(),
            is_valid: Box::new(is_valid),
            normalize: Box::new(normalize),
            version: version.into(),
            changed: false,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Clear the changed flag, e.g. after the contents were persisted.
    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    /// Normalize and validate a cell name.
    pub(crate) fn checked_name(&self, name: &str) -> Result<String> {
        if name.trim().is_empty() {
            return Err(SheetError::InvalidName(name.to_string()));
        }
        let normalized = (self.normalize)(name);
        if !self.is_acceptable(&normalized) {
            return Err(SheetError::InvalidName(name.to_string()));
        }
        Ok(normalized)
    }

    /// Whether an already normalized name may name a cell.
    pub(crate) fn is_acceptable(&self, normalized: &str) -> bool {
        is_cell_name(normalized) && (self.is_valid)(normalized)
    }

    /// Contents of a cell; empty text for cells never written.
    pub fn get_cell_contents(&self, name: &str) -> Result<CellContents> {
        let name = self.checked_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.contents.clone())
            .unwrap_or_default())
    }

    /// Value of a cell; empty text for cells never written.
    pub fn get_cell_value(&self, name: &str) -> Result<CellValue> {
        let name = self.checked_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.value.clone())
            .unwrap_or_default())
    }

    /// Names of all cells whose contents are not empty, in order of first write.
    pub fn names_of_nonempty_cells(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.contents.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Cells whose formulas reference `name` directly.
    pub fn get_direct_dependents(&self, name: &str) -> Result<Vec<String>> {
        let name = self.checked_name(name)?;
        Ok(self.graph.dependents(&name).map(str::to_string).collect())
    }

    /// Numeric value of a cell, as seen by formulas that reference it.
    pub(crate) fn numeric_value(&self, name: &str) -> Option<f64> {
        self.cells.get(name).and_then(|cell| cell.value.as_number())
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}
