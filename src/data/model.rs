use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Canonical column names, in the order they appear in the source file and in
/// exported CSV.
pub const COLUMNS: [&str; 7] = [
    "Name",
    "Age",
    "Salary",
    "City",
    "Category",
    "Department",
    "Date",
];

// ---------------------------------------------------------------------------
// Employee – one row of the table
// ---------------------------------------------------------------------------

/// A single employee record (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: u32,
    /// Never NaN after loading: missing salaries are repaired by the loader.
    #[serde(rename = "Salary")]
    pub salary: f64,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Department")]
    pub department: String,
    /// ISO-8601 date string kept as text for simplicity.
    #[serde(rename = "Date")]
    pub date: String,
    /// Extra input columns the loader tolerated. Only consulted for
    /// numeric-column discovery; never filtered on or exported.
    #[serde(skip)]
    pub extra: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// EmployeeTable – the complete dataset (or a filtered subset of it)
// ---------------------------------------------------------------------------

/// An ordered set of employee rows with pre-computed column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeTable {
    /// All rows, in source order.
    pub rows: Vec<Employee>,
    /// Sorted set of distinct `Category` values present in `rows`.
    pub categories: BTreeSet<String>,
    /// Sorted set of distinct `Department` values present in `rows`.
    pub departments: BTreeSet<String>,
    /// Observed `(min, max)` salary; `(0.0, 0.0)` for an empty table.
    pub salary_bounds: (f64, f64),
    /// Columns usable for correlation analysis: `Age`, `Salary`, then any
    /// extra column whose every non-empty value parses as a number.
    pub numeric_columns: Vec<String>,
}

impl EmployeeTable {
    /// Build the distinct-value and numeric-column indices from the rows.
    pub fn from_rows(rows: Vec<Employee>) -> Self {
        let mut categories = BTreeSet::new();
        let mut departments = BTreeSet::new();
        let mut min_salary = f64::INFINITY;
        let mut max_salary = f64::NEG_INFINITY;
        let mut extra_columns: BTreeSet<String> = BTreeSet::new();

        for row in &rows {
            categories.insert(row.category.clone());
            departments.insert(row.department.clone());
            min_salary = min_salary.min(row.salary);
            max_salary = max_salary.max(row.salary);
            extra_columns.extend(row.extra.keys().cloned());
        }

        let salary_bounds = if rows.is_empty() {
            (0.0, 0.0)
        } else {
            (min_salary, max_salary)
        };

        let mut numeric_columns = vec!["Age".to_string(), "Salary".to_string()];
        for col in extra_columns {
            let all_numeric = rows.iter().all(|r| {
                r.extra
                    .get(&col)
                    .map(|v| v.trim().is_empty() || v.trim().parse::<f64>().is_ok())
                    .unwrap_or(true)
            });
            if all_numeric {
                numeric_columns.push(col);
            }
        }

        EmployeeTable {
            rows,
            categories,
            departments,
            salary_bounds,
            numeric_columns,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The values of a numeric column, one per row. Missing or unparseable
    /// cells of extra columns become NaN. Returns `None` for a column that is
    /// not in [`EmployeeTable::numeric_columns`].
    pub fn numeric_values(&self, column: &str) -> Option<Vec<f64>> {
        if !self.numeric_columns.iter().any(|c| c == column) {
            return None;
        }
        let values = match column {
            "Age" => self.rows.iter().map(|r| r.age as f64).collect(),
            "Salary" => self.rows.iter().map(|r| r.salary).collect(),
            _ => self
                .rows
                .iter()
                .map(|r| {
                    r.extra
                        .get(column)
                        .and_then(|v| v.trim().parse::<f64>().ok())
                        .unwrap_or(f64::NAN)
                })
                .collect(),
        };
        Some(values)
    }
}
