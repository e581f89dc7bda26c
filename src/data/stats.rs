use std::collections::BTreeMap;

use super::model::EmployeeTable;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Headline numbers for the metrics row. Both the full-table and the
/// filtered-view figures are kept so the UI can show "Total Employees" next
/// to the average of the rows the user is actually looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    pub total_count: usize,
    pub filtered_count: usize,
    pub total_mean_salary: f64,
    pub filtered_mean_salary: f64,
}

pub fn summary(full: &EmployeeTable, filtered: &EmployeeTable) -> SummaryMetrics {
    SummaryMetrics {
        total_count: full.len(),
        filtered_count: filtered.len(),
        total_mean_salary: mean_salary(full),
        filtered_mean_salary: mean_salary(filtered),
    }
}

/// Arithmetic mean of `Salary`; NaN for an empty table.
fn mean_salary(table: &EmployeeTable) -> f64 {
    if table.is_empty() {
        return f64::NAN;
    }
    table.rows.iter().map(|r| r.salary).sum::<f64>() / table.len() as f64
}

// ---------------------------------------------------------------------------
// Per-category averages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    pub category: String,
    pub mean_salary: f64,
    pub count: usize,
}

/// Group rows by `Category` and average `Salary` per group. Categories absent
/// from the table do not appear; the result is lexically ordered.
pub fn category_averages(table: &EmployeeTable) -> Vec<CategoryAverage> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        let entry = groups.entry(&row.category).or_insert((0.0, 0));
        entry.0 += row.salary;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(category, (sum, count))| CategoryAverage {
            category: category.to_string(),
            mean_salary: sum / count as f64,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pearson correlations for a selection of numeric columns. Square and
/// symmetric; entries are NaN when a column is constant (or carries NaN)
/// within the rows being summarized.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is the coefficient between `columns[i]` and
    /// `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Compute the correlation matrix over the selected columns, or `None` when
/// fewer than two of them resolve to numeric columns of `table`. The caller
/// renders the insufficient-columns warning; this is not an error path.
pub fn correlation_matrix(table: &EmployeeTable, columns: &[String]) -> Option<CorrelationMatrix> {
    let series: Vec<(String, Vec<f64>)> = columns
        .iter()
        .filter_map(|c| table.numeric_values(c).map(|v| (c.clone(), v)))
        .collect();
    if series.len() < 2 {
        return None;
    }

    let n = series.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            values[i][j] = if i == j {
                // Exactly 1.0 on the diagonal, NaN for a constant column.
                if variance_is_zero(&series[i].1) {
                    f64::NAN
                } else {
                    1.0
                }
            } else {
                pearson(&series[i].1, &series[j].1)
            };
        }
    }

    Some(CorrelationMatrix {
        columns: series.into_iter().map(|(c, _)| c).collect(),
        values,
    })
}

fn variance_is_zero(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().any(|v| v.is_nan()) || values.iter().all(|v| v == first),
        None => true,
    }
}

/// Pearson correlation coefficient of two equal-length series. NaN when
/// either series is constant, empty, or contains NaN.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n == 0 {
        return f64::NAN;
    }
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
