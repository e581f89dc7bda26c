use crate::data::model::EmployeeTable;
use crate::data::stats::CategoryAverage;

// ---------------------------------------------------------------------------
// Chart mode
// ---------------------------------------------------------------------------

/// The mutually exclusive chart selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    #[default]
    Bar,
    Pie,
    Scatter,
    Histogram,
    BoxPlot,
}

impl ChartMode {
    pub const ALL: [ChartMode; 5] = [
        ChartMode::Bar,
        ChartMode::Pie,
        ChartMode::Scatter,
        ChartMode::Histogram,
        ChartMode::BoxPlot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartMode::Bar => "Bar Chart",
            ChartMode::Pie => "Pie Chart",
            ChartMode::Scatter => "Scatter Chart",
            ChartMode::Histogram => "Histogram",
            ChartMode::BoxPlot => "Box Plot",
        }
    }

    fn base_title(&self) -> &'static str {
        match self {
            ChartMode::Bar | ChartMode::Pie => "Average Salary per Employee Category",
            ChartMode::Scatter => "Salary vs Category (Size: Age)",
            ChartMode::Histogram => "Salary Distribution",
            ChartMode::BoxPlot => "Salary Distribution by Category",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart spec: everything the renderer needs, mode-specific
// ---------------------------------------------------------------------------

pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub category: String,
    pub salary: f64,
    pub age: u32,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Five-number summary for one category, plotly-style: whiskers reach the
/// outermost points within 1.5·IQR of the quartiles.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBox {
    pub category: String,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Bar(Vec<CategoryAverage>),
    Pie(Vec<PieSlice>),
    Scatter(Vec<ScatterPoint>),
    Histogram(Vec<HistogramBin>),
    BoxPlot(Vec<CategoryBox>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub data: ChartData,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// `" (Filtered)"` when the view is a strict subset of the full table.
pub fn title_suffix(filtered_rows: usize, total_rows: usize) -> &'static str {
    if filtered_rows < total_rows {
        " (Filtered)"
    } else {
        ""
    }
}

/// Package the aggregates (or the filtered rows themselves, depending on the
/// mode) into a renderable chart. Pure; an empty filtered table yields an
/// empty chart of the same shape.
pub fn build(
    mode: ChartMode,
    averages: &[CategoryAverage],
    filtered: &EmployeeTable,
    total_rows: usize,
) -> ChartSpec {
    let title = format!(
        "{}{}",
        mode.base_title(),
        title_suffix(filtered.len(), total_rows)
    );

    let data = match mode {
        ChartMode::Bar => ChartData::Bar(averages.to_vec()),
        ChartMode::Pie => ChartData::Pie(
            averages
                .iter()
                .map(|a| PieSlice {
                    label: a.category.clone(),
                    value: a.mean_salary,
                })
                .collect(),
        ),
        ChartMode::Scatter => ChartData::Scatter(
            filtered
                .rows
                .iter()
                .map(|r| ScatterPoint {
                    category: r.category.clone(),
                    salary: r.salary,
                    age: r.age,
                    name: r.name.clone(),
                    city: r.city.clone(),
                })
                .collect(),
        ),
        ChartMode::Histogram => ChartData::Histogram(salary_histogram(filtered)),
        ChartMode::BoxPlot => ChartData::BoxPlot(category_boxes(filtered)),
    };

    ChartSpec { title, data }
}

/// Bin `Salary` into a fixed number of equal-width bins over the observed
/// range. All-equal salaries collapse into the first bin.
fn salary_histogram(table: &EmployeeTable) -> Vec<HistogramBin> {
    if table.is_empty() {
        return Vec::new();
    }
    let (min, max) = table.salary_bounds;
    let width = (max - min) / HISTOGRAM_BINS as f64;

    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lo: min + width * i as f64,
            hi: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for row in &table.rows {
        let idx = if width > 0.0 {
            (((row.salary - min) / width) as usize).min(HISTOGRAM_BINS - 1)
        } else {
            0
        };
        bins[idx].count += 1;
    }
    bins
}

/// One box per category present in the table, in the table's (lexical)
/// category order.
fn category_boxes(table: &EmployeeTable) -> Vec<CategoryBox> {
    table
        .categories
        .iter()
        .map(|category| {
            let mut salaries: Vec<f64> = table
                .rows
                .iter()
                .filter(|r| &r.category == category)
                .map(|r| r.salary)
                .collect();
            salaries.sort_by(f64::total_cmp);

            let q1 = quantile(&salaries, 0.25);
            let median = quantile(&salaries, 0.5);
            let q3 = quantile(&salaries, 0.75);
            let iqr = q3 - q1;
            let low_fence = q1 - 1.5 * iqr;
            let high_fence = q3 + 1.5 * iqr;

            let lower_whisker = salaries
                .iter()
                .copied()
                .find(|&s| s >= low_fence)
                .unwrap_or(q1);
            let upper_whisker = salaries
                .iter()
                .copied()
                .rev()
                .find(|&s| s <= high_fence)
                .unwrap_or(q3);

            CategoryBox {
                category: category.clone(),
                lower_whisker,
                q1,
                median,
                q3,
                upper_whisker,
            }
        })
        .collect()
}

/// Linearly interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}
