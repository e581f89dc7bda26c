use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::filter::{self, FilterCriteria};
use crate::data::loader::TableCache;
use crate::data::model::EmployeeTable;
use crate::data::stats::{self, CategoryAverage, CorrelationMatrix, SummaryMetrics};
use crate::view::ChartMode;

// ---------------------------------------------------------------------------
// Filtered view: one pass's worth of derived data
// ---------------------------------------------------------------------------

/// The product of one filter pass: the subset plus the aggregates computed
/// from it. Recomputed whole on every criteria change, never patched.
pub struct FilteredView {
    pub table: EmployeeTable,
    pub metrics: SummaryMetrics,
    pub category_averages: Vec<CategoryAverage>,
    pub correlation: Option<CorrelationMatrix>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Path of the currently open file, if any.
    pub source_path: Option<PathBuf>,

    /// Session table cache: the file is parsed once and shared.
    pub cache: TableCache,

    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<Arc<EmployeeTable>>,

    /// Sidebar filter selections.
    pub criteria: FilterCriteria,

    /// Active chart selection.
    pub chart_mode: ChartMode,

    /// Numeric columns selected for correlation analysis.
    pub correlation_columns: BTreeSet<String>,

    /// Derived data for the current criteria (None until a dataset loads).
    pub view: Option<FilteredView>,

    /// Stable per-category colours, built from the full dataset.
    pub category_colors: Option<CategoryColors>,

    /// Non-fatal warnings from the last load (e.g. salary repair).
    pub load_warnings: Vec<String>,

    /// A blocking load failure; replaces the dashboard body when set.
    pub load_error: Option<String>,

    /// Transient status line (e.g. export confirmation).
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source_path: None,
            cache: TableCache::new(),
            dataset: None,
            criteria: FilterCriteria::default(),
            chart_mode: ChartMode::default(),
            correlation_columns: BTreeSet::new(),
            view: None,
            category_colors: None,
            load_warnings: Vec::new(),
            load_error: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Open a data file through the cache, replacing any current dataset.
    /// Blocking errors land in `load_error` and clear the dashboard.
    pub fn open(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(loaded) => {
                log::info!(
                    "Loaded {} employees from {}",
                    loaded.table.len(),
                    path.display()
                );
                self.load_warnings = loaded.warnings.clone();
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(Arc::new(loaded.table.clone()));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.load_error = Some(format!("Error: {e}"));
                self.load_warnings.clear();
                self.dataset = None;
                self.view = None;
            }
        }
    }

    /// Ingest a newly loaded dataset: select-all criteria, default
    /// correlation columns, fresh colours, first pass.
    pub fn set_dataset(&mut self, dataset: Arc<EmployeeTable>) {
        self.criteria = FilterCriteria::select_all(&dataset);
        // Default correlation selection: the first two numeric columns.
        self.correlation_columns = dataset.numeric_columns.iter().take(2).cloned().collect();
        self.category_colors = Some(CategoryColors::new(&dataset.categories));
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.recompute();
    }

    /// Re-run the whole pure pass: filter, then every aggregate. Called after
    /// any widget change; there is no incremental state between passes.
    pub fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.view = None;
            return;
        };

        let filtered = filter::apply(dataset, &self.criteria);
        let metrics = stats::summary(dataset, &filtered);
        let category_averages = stats::category_averages(&filtered);
        let columns: Vec<String> = self.correlation_columns.iter().cloned().collect();
        let correlation = stats::correlation_matrix(&filtered, &columns);

        self.view = Some(FilteredView {
            table: filtered,
            metrics,
            category_averages,
            correlation,
        });
    }

    /// Toggle one value in a set-valued criterion and re-run the pass.
    pub fn toggle_selection(set: &mut BTreeSet<String>, value: &str) {
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}
