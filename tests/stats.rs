use std::collections::BTreeMap;

use staffscope::data::filter::{apply, FilterCriteria};
use staffscope::data::model::{Employee, EmployeeTable};
use staffscope::data::stats::{category_averages, correlation_matrix, summary};

fn emp(name: &str, age: u32, salary: f64, category: &str) -> Employee {
    Employee {
        name: name.to_string(),
        age,
        salary,
        city: "Chicago".to_string(),
        category: category.to_string(),
        department: "Operations".to_string(),
        date: "2022-01-01".to_string(),
        extra: BTreeMap::new(),
    }
}

fn eng_ops_table() -> EmployeeTable {
    EmployeeTable::from_rows(vec![
        emp("A", 30, 100.0, "Eng"),
        emp("B", 40, 200.0, "Eng"),
        emp("C", 50, 300.0, "Ops"),
    ])
}

#[test]
fn category_filter_scenario() {
    // criteria select category "Eng" only, full salary range
    let table = eng_ops_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.categories = ["Eng".to_string()].into();

    let filtered = apply(&table, &criteria);
    assert_eq!(filtered.len(), 2);

    let averages = category_averages(&filtered);
    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0].category, "Eng");
    assert_eq!(averages[0].mean_salary, 150.0);
}

#[test]
fn point_salary_range_scenario_yields_empty_result() {
    let table = eng_ops_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.salary_range = (150.0, 150.0);

    let filtered = apply(&table, &criteria);
    assert!(filtered.is_empty());
    // The empty result flows through aggregation without panicking.
    let metrics = summary(&table, &filtered);
    assert_eq!(metrics.filtered_count, 0);
    assert!(metrics.filtered_mean_salary.is_nan());
    assert!(category_averages(&filtered).is_empty());
}

#[test]
fn group_counts_sum_to_filtered_count() {
    let table = eng_ops_table();
    let averages = category_averages(&table);
    let total: usize = averages.iter().map(|a| a.count).sum();
    assert_eq!(total, table.len());
}

#[test]
fn absent_categories_are_not_zero_filled() {
    let table = eng_ops_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.categories = ["Ops".to_string()].into();

    let averages = category_averages(&apply(&table, &criteria));
    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0].category, "Ops");
}

#[test]
fn summary_keeps_total_and_filtered_means_separate() {
    let table = eng_ops_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.categories = ["Eng".to_string()].into();
    let filtered = apply(&table, &criteria);

    let metrics = summary(&table, &filtered);
    assert_eq!(metrics.total_count, 3);
    assert_eq!(metrics.filtered_count, 2);
    assert_eq!(metrics.total_mean_salary, 200.0);
    assert_eq!(metrics.filtered_mean_salary, 150.0);
}

#[test]
fn correlation_is_symmetric_with_unit_diagonal() {
    let table = eng_ops_table();
    let columns = vec!["Age".to_string(), "Salary".to_string()];
    let matrix = correlation_matrix(&table, &columns).unwrap();

    assert_eq!(matrix.columns, columns);
    for i in 0..2 {
        assert_eq!(matrix.get(i, i), 1.0);
        for j in 0..2 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
    // Age and salary rise together in this fixture.
    assert!((matrix.get(0, 1) - 1.0).abs() < 1e-9);
}

#[test]
fn correlation_with_constant_column_is_nan() {
    let table = EmployeeTable::from_rows(vec![
        emp("A", 30, 500.0, "Eng"),
        emp("B", 40, 500.0, "Eng"),
    ]);
    let columns = vec!["Age".to_string(), "Salary".to_string()];
    let matrix = correlation_matrix(&table, &columns).unwrap();

    // Salary is constant: its correlations and its diagonal are undefined.
    assert!(matrix.get(0, 1).is_nan());
    assert!(matrix.get(1, 1).is_nan());
    assert_eq!(matrix.get(0, 0), 1.0);
}

#[test]
fn correlation_needs_at_least_two_columns() {
    let table = eng_ops_table();
    assert!(correlation_matrix(&table, &["Salary".to_string()]).is_none());
    assert!(correlation_matrix(&table, &[]).is_none());
    // Unknown selections do not count towards the minimum.
    let columns = vec!["Salary".to_string(), "Nonexistent".to_string()];
    assert!(correlation_matrix(&table, &columns).is_none());
}
