use std::collections::BTreeMap;

use staffscope::data::filter::{apply, FilterCriteria};
use staffscope::data::model::{Employee, EmployeeTable};

fn emp(name: &str, age: u32, salary: f64, city: &str, category: &str, department: &str) -> Employee {
    Employee {
        name: name.to_string(),
        age,
        salary,
        city: city.to_string(),
        category: category.to_string(),
        department: department.to_string(),
        date: "2022-01-01".to_string(),
        extra: BTreeMap::new(),
    }
}

fn sample_table() -> EmployeeTable {
    EmployeeTable::from_rows(vec![
        emp("Alice", 34, 72000.0, "Chicago", "Engineer", "Engineering"),
        emp("Bob", 45, 88000.0, "Dallas", "Manager", "Operations"),
        emp("Cara", 29, 54000.0, "Phoenix", "Analyst", "Finance"),
        emp("Dan", 51, 96000.0, "Chicago", "Manager", "Engineering"),
    ])
}

#[test]
fn select_all_criteria_preserve_the_table() {
    let table = sample_table();
    let criteria = FilterCriteria::select_all(&table);
    let filtered = apply(&table, &criteria);
    assert_eq!(filtered.rows, table.rows);
}

#[test]
fn every_kept_row_satisfies_all_predicates() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.categories = ["Manager".to_string()].into();
    criteria.salary_range = (60000.0, 90000.0);

    let filtered = apply(&table, &criteria);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows[0].name, "Bob");
    for row in &filtered.rows {
        assert!(criteria.categories.contains(&row.category));
        assert!(row.salary >= 60000.0 && row.salary <= 90000.0);
    }
}

#[test]
fn salary_bounds_are_inclusive() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.salary_range = (54000.0, 54000.0);

    let filtered = apply(&table, &criteria);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows[0].name, "Cara");
}

#[test]
fn empty_category_set_selects_nothing() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.categories.clear();

    let filtered = apply(&table, &criteria);
    assert!(filtered.is_empty());
}

#[test]
fn inverted_salary_range_selects_nothing() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.salary_range = (90000.0, 60000.0);

    // Not an error, just an empty result.
    let filtered = apply(&table, &criteria);
    assert!(filtered.is_empty());
}

#[test]
fn search_matches_name_or_city_case_insensitively() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.search_term = "chi".to_string();

    let filtered = apply(&table, &criteria);
    // Alice and Dan are in Chicago.
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.rows[0].name, "Alice");
    assert_eq!(filtered.rows[1].name, "Dan");
}

#[test]
fn search_intersects_with_other_predicates() {
    let table = sample_table();
    let mut without_term = FilterCriteria::select_all(&table);
    without_term.categories = ["Manager".to_string()].into();

    let mut with_term = without_term.clone();
    with_term.search_term = "Chicago".to_string();

    let base = apply(&table, &without_term);
    let narrowed = apply(&table, &with_term);
    // The term can only shrink the result, never grow it.
    assert!(narrowed.len() <= base.len());
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed.rows[0].name, "Dan");
}

#[test]
fn row_order_is_preserved() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.departments = ["Engineering".to_string()].into();

    let filtered = apply(&table, &criteria);
    let names: Vec<&str> = filtered.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Dan"]);
}

#[test]
fn filtered_subset_rebuilds_its_indices() {
    let table = sample_table();
    let mut criteria = FilterCriteria::select_all(&table);
    criteria.categories = ["Manager".to_string()].into();

    let filtered = apply(&table, &criteria);
    assert_eq!(filtered.categories.len(), 1);
    assert!(filtered.categories.contains("Manager"));
    assert_eq!(filtered.salary_bounds, (88000.0, 96000.0));
}
