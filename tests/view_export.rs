use std::collections::BTreeMap;

use staffscope::data::export::to_csv_bytes;
use staffscope::data::model::{Employee, EmployeeTable, COLUMNS};
use staffscope::data::stats::category_averages;
use staffscope::view::{build, title_suffix, ChartData, ChartMode, HISTOGRAM_BINS};

fn emp(name: &str, age: u32, salary: f64, city: &str, category: &str) -> Employee {
    Employee {
        name: name.to_string(),
        age,
        salary,
        city: city.to_string(),
        category: category.to_string(),
        department: "Operations".to_string(),
        date: "2022-01-01".to_string(),
        extra: BTreeMap::new(),
    }
}

fn sample_table() -> EmployeeTable {
    EmployeeTable::from_rows(vec![
        emp("Alice", 34, 72000.0, "Chicago", "Engineer"),
        emp("Bob", 45, 88000.0, "Dallas", "Manager"),
        emp("Cara", 29, 54000.0, "Phoenix", "Engineer"),
        emp("Dan", 51, 96000.0, "Chicago", "Manager"),
    ])
}

// ---------------------------------------------------------------------------
// View assembly
// ---------------------------------------------------------------------------

#[test]
fn title_marks_strict_subsets_only() {
    assert_eq!(title_suffix(3, 4), " (Filtered)");
    assert_eq!(title_suffix(4, 4), "");

    let table = sample_table();
    let averages = category_averages(&table);
    let spec = build(ChartMode::Bar, &averages, &table, table.len());
    assert_eq!(spec.title, "Average Salary per Employee Category");

    let spec = build(ChartMode::Bar, &averages, &table, table.len() + 1);
    assert_eq!(spec.title, "Average Salary per Employee Category (Filtered)");
}

#[test]
fn bar_and_pie_use_category_averages() {
    let table = sample_table();
    let averages = category_averages(&table);

    let bar = build(ChartMode::Bar, &averages, &table, table.len());
    match bar.data {
        ChartData::Bar(data) => {
            assert_eq!(data.len(), 2);
            assert_eq!(data[0].category, "Engineer");
            assert_eq!(data[0].mean_salary, 63000.0);
            assert_eq!(data[1].category, "Manager");
            assert_eq!(data[1].mean_salary, 92000.0);
        }
        other => panic!("expected bar data, got {other:?}"),
    }

    let pie = build(ChartMode::Pie, &averages, &table, table.len());
    match pie.data {
        ChartData::Pie(slices) => {
            assert_eq!(slices.len(), 2);
            assert_eq!(slices[0].label, "Engineer");
            assert_eq!(slices[0].value, 63000.0);
        }
        other => panic!("expected pie data, got {other:?}"),
    }
}

#[test]
fn scatter_points_carry_tooltip_fields() {
    let table = sample_table();
    let spec = build(ChartMode::Scatter, &[], &table, table.len());
    match spec.data {
        ChartData::Scatter(points) => {
            assert_eq!(points.len(), 4);
            assert_eq!(points[0].name, "Alice");
            assert_eq!(points[0].city, "Chicago");
            assert_eq!(points[0].age, 34);
            assert_eq!(points[0].salary, 72000.0);
        }
        other => panic!("expected scatter data, got {other:?}"),
    }
}

#[test]
fn histogram_uses_fixed_bin_count_and_conserves_rows() {
    let table = sample_table();
    let spec = build(ChartMode::Histogram, &[], &table, table.len());
    match spec.data {
        ChartData::Histogram(bins) => {
            assert_eq!(bins.len(), HISTOGRAM_BINS);
            let total: usize = bins.iter().map(|b| b.count).sum();
            assert_eq!(total, table.len());
            assert_eq!(bins.first().unwrap().lo, 54000.0);
            assert_eq!(bins.last().unwrap().hi, 96000.0);
        }
        other => panic!("expected histogram data, got {other:?}"),
    }
}

#[test]
fn histogram_of_empty_table_is_empty() {
    let table = EmployeeTable::from_rows(Vec::new());
    let spec = build(ChartMode::Histogram, &[], &table, 10);
    match spec.data {
        ChartData::Histogram(bins) => assert!(bins.is_empty()),
        other => panic!("expected histogram data, got {other:?}"),
    }
}

#[test]
fn box_plot_summaries_are_ordered_per_category() {
    let table = sample_table();
    let spec = build(ChartMode::BoxPlot, &[], &table, table.len());
    match spec.data {
        ChartData::BoxPlot(boxes) => {
            assert_eq!(boxes.len(), 2);
            assert_eq!(boxes[0].category, "Engineer");
            assert_eq!(boxes[1].category, "Manager");
            for b in &boxes {
                assert!(b.lower_whisker <= b.q1);
                assert!(b.q1 <= b.median);
                assert!(b.median <= b.q3);
                assert!(b.q3 <= b.upper_whisker);
            }
            // Two managers at 88000 and 96000: median halfway between.
            assert_eq!(boxes[1].median, 92000.0);
        }
        other => panic!("expected box plot data, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_round_trips_field_for_field() {
    let table = sample_table();
    let bytes = to_csv_bytes(&table).unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, COLUMNS);

    let records: Vec<csv::StringRecord> =
        reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), table.len());

    for (record, row) in records.iter().zip(&table.rows) {
        assert_eq!(record.get(0).unwrap(), row.name);
        assert_eq!(record.get(1).unwrap().parse::<u32>().unwrap(), row.age);
        assert_eq!(record.get(2).unwrap().parse::<f64>().unwrap(), row.salary);
        assert_eq!(record.get(3).unwrap(), row.city);
        assert_eq!(record.get(4).unwrap(), row.category);
        assert_eq!(record.get(5).unwrap(), row.department);
        assert_eq!(record.get(6).unwrap(), row.date);
    }
}

#[test]
fn export_is_deterministic() {
    let table = sample_table();
    assert_eq!(to_csv_bytes(&table).unwrap(), to_csv_bytes(&table).unwrap());
}

#[test]
fn export_of_empty_table_still_has_a_header() {
    let table = EmployeeTable::from_rows(Vec::new());
    let bytes = to_csv_bytes(&table).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.trim_end(), "Name,Age,Salary,City,Category,Department,Date");
}
