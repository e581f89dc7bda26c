use std::collections::BTreeSet;

use super::model::EmployeeTable;

// ---------------------------------------------------------------------------
// Filter criteria: the conjunction of user-selected inclusion predicates
// ---------------------------------------------------------------------------

/// Everything the sidebar controls select. All predicates are ANDed; the
/// search term alone matches Name OR City internally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Selected `Category` values. An empty set selects nothing.
    pub categories: BTreeSet<String>,
    /// Selected `Department` values. An empty set selects nothing.
    pub departments: BTreeSet<String>,
    /// Inclusive salary bounds. An inverted range selects nothing.
    pub salary_range: (f64, f64),
    /// Case-insensitive substring matched against Name or City. Empty means
    /// no text filter.
    pub search_term: String,
}

impl FilterCriteria {
    /// The "everything included" default: full distinct value sets and the
    /// full observed salary range.
    pub fn select_all(table: &EmployeeTable) -> Self {
        FilterCriteria {
            categories: table.categories.clone(),
            departments: table.departments.clone(),
            salary_range: table.salary_bounds,
            search_term: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Applying criteria
// ---------------------------------------------------------------------------

/// Return the subset of `table` satisfying `criteria`, in source order.
///
/// A row is kept when its Category and Department are selected and its salary
/// lies within the inclusive range; a non-empty search term then further
/// restricts the result to rows whose Name or City contains the term
/// (case-insensitive).
pub fn apply(table: &EmployeeTable, criteria: &FilterCriteria) -> EmployeeTable {
    let (min_salary, max_salary) = criteria.salary_range;
    let needle = criteria.search_term.trim().to_lowercase();

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            criteria.categories.contains(&row.category)
                && criteria.departments.contains(&row.department)
                && row.salary >= min_salary
                && row.salary <= max_salary
        })
        .filter(|row| {
            needle.is_empty()
                || row.name.to_lowercase().contains(&needle)
                || row.city.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    EmployeeTable::from_rows(rows)
}
