use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::model::{Employee, EmployeeTable, COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Blocking load failures. Any of these replaces the dashboard body with an
/// error message; nothing is partially rendered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("required column '{column}' not found in the data file")]
    SchemaError { column: String },

    #[error("column '{column}' contains non-numeric value '{raw}' (row {row})")]
    TypeError {
        column: String,
        row: usize,
        raw: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// A loaded table together with the non-fatal warnings raised while loading.
#[derive(Debug)]
pub struct LoadedTable {
    pub table: EmployeeTable,
    pub warnings: Vec<String>,
}

/// Load an employee table from a CSV file.
///
/// The header row must contain every canonical column
/// (`Name, Age, Salary, City, Category, Department, Date`); extra columns are
/// kept on the rows for numeric-column discovery. Missing `Salary` cells are
/// filled with the mean of the present values and a warning is recorded. No
/// other column is repaired.
pub fn load(path: &Path) -> Result<LoadedTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    // Resolve every canonical column up front so the error names the first
    // missing one.
    let mut column_idx = BTreeMap::new();
    for col in COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h == col)
            .ok_or_else(|| LoadError::SchemaError {
                column: col.to_string(),
            })?;
        column_idx.insert(col, idx);
    }

    let extra_headers: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !COLUMNS.contains(&h.as_str()))
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut rows: Vec<Employee> = Vec::new();
    // Missing salaries, kept as NaN until the repair pass below.
    let mut missing_salary_rows: Vec<usize> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let field = |col: &str| record.get(column_idx[col]).unwrap_or("").trim();

        let age: u32 = field("Age")
            .parse()
            .map_err(|_| LoadError::TypeError {
                column: "Age".to_string(),
                row: row_no,
                raw: field("Age").to_string(),
            })?;

        let raw_salary = field("Salary");
        let salary = if raw_salary.is_empty() {
            missing_salary_rows.push(row_no);
            f64::NAN
        } else {
            raw_salary.parse().map_err(|_| LoadError::TypeError {
                column: "Salary".to_string(),
                row: row_no,
                raw: raw_salary.to_string(),
            })?
        };

        let mut extra = BTreeMap::new();
        for (idx, name) in &extra_headers {
            extra.insert(name.clone(), record.get(*idx).unwrap_or("").to_string());
        }

        rows.push(Employee {
            name: field("Name").to_string(),
            age,
            salary,
            city: field("City").to_string(),
            category: field("Category").to_string(),
            department: field("Department").to_string(),
            date: field("Date").to_string(),
            extra,
        });
    }

    let mut warnings = Vec::new();
    if !missing_salary_rows.is_empty() {
        let present: Vec<f64> = rows
            .iter()
            .map(|r| r.salary)
            .filter(|s| !s.is_nan())
            .collect();
        let mean = if present.is_empty() {
            0.0
        } else {
            present.iter().sum::<f64>() / present.len() as f64
        };
        for &row_no in &missing_salary_rows {
            rows[row_no].salary = mean;
        }
        let msg = format!(
            "Missing values found in 'Salary' column. Filled {} row(s) with the mean.",
            missing_salary_rows.len()
        );
        log::warn!("{msg}");
        warnings.push(msg);
    }

    Ok(LoadedTable {
        table: EmployeeTable::from_rows(rows),
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Session cache
// ---------------------------------------------------------------------------

/// Session-scoped table cache: the file is read once per path and the parsed
/// table is shared thereafter. Write-once-read-many under normal operation;
/// the mutex only matters if a host ever drives this from multiple threads.
#[derive(Default)]
pub struct TableCache {
    slot: Mutex<Option<(PathBuf, Arc<LoadedTable>)>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first access.
    /// Opening a different path replaces the cached entry.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<LoadedTable>, LoadError> {
        let mut slot = self.slot.lock().expect("table cache poisoned");
        if let Some((cached_path, cached)) = slot.as_ref() {
            if cached_path == path {
                return Ok(Arc::clone(cached));
            }
        }
        let loaded = Arc::new(load(path)?);
        *slot = Some((path.to_path_buf(), Arc::clone(&loaded)));
        Ok(loaded)
    }

    /// Drop the cached table so the next access re-reads the file. Not
    /// exercised during a normal session.
    pub fn invalidate(&self) {
        *self.slot.lock().expect("table cache poisoned") = None;
    }
}
