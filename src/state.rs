use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::breakdown::{region_breakdown, score_order, BreakdownBar};
use crate::data::cache::DatasetCache;
use crate::data::filter::{filter, FilterMode, Summary};
use crate::data::model::{FeatureColumn, RiskQuadrant, Table};

/// The three choices of the selection-mode radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    All,
    LikelyToDefault,
    ByQuadrant,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 3] = [
        SelectionMode::All,
        SelectionMode::LikelyToDefault,
        SelectionMode::ByQuadrant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::All => "All Records",
            SelectionMode::LikelyToDefault => "Likely to Default (Score > 50%)",
            SelectionMode::ByQuadrant => "By Risk Quadrant",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// File the dashboard reads from.
    pub data_path: Option<PathBuf>,

    cache: DatasetCache,

    /// Loaded dataset (None until a file loads successfully).
    pub table: Option<Arc<Table>>,

    /// Column shown next to name and id in the results.
    pub feature: FeatureColumn,

    pub mode: SelectionMode,

    /// Quadrant used when `mode` is [`SelectionMode::ByQuadrant`].
    pub quadrant: Option<RiskQuadrant>,

    /// Rows passing the current selection, in file order.
    pub filtered: Option<Table>,

    /// Indices into `filtered`, highest score first.
    pub display_order: Vec<usize>,

    pub summary: Summary,

    pub breakdown: Vec<BreakdownBar>,

    /// Sector colours for the regional chart.
    pub sector_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: PathBuf) -> Self {
        let mut state = AppState::default();
        state.open(&data_path);
        state
    }

    /// Point the dashboard at a new file and load it.
    pub fn open(&mut self, path: &Path) {
        self.data_path = Some(path.to_path_buf());
        self.refresh();
    }

    /// Drop the cached copy of the current file and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = &self.data_path {
            self.cache.invalidate(path);
        }
        self.refresh();
    }

    /// Fetch the table through the cache and recompute the selection.
    ///
    /// Called on every user interaction; only a changed file costs a reload.
    pub fn refresh(&mut self) {
        let Some(path) = self.data_path.clone() else {
            return;
        };

        match self.cache.get_or_load(&path) {
            Ok(table) => {
                let changed = self
                    .table
                    .as_ref()
                    .map_or(true, |current| !Arc::ptr_eq(current, &table));
                if changed {
                    self.set_table(table);
                }
                self.apply_filter(changed);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.table = None;
                self.sector_colors = None;
                self.clear_results();
            }
        }
    }

    fn clear_results(&mut self) {
        self.filtered = None;
        self.display_order.clear();
        self.summary = Summary::default();
        self.breakdown.clear();
    }

    /// Ingest a newly loaded table and pick defaults that fit it.
    fn set_table(&mut self, table: Arc<Table>) {
        let present = table.quadrants_present();
        if !self.quadrant.is_some_and(|q| present.contains(&q)) {
            self.quadrant = present.iter().next().copied();
        }

        let sectors: BTreeSet<String> = table.rows.iter().map(|r| r.sector.clone()).collect();
        self.sector_colors = Some(ColorMap::new(&sectors));

        self.table = Some(table);
        self.status_message = None;
    }

    /// Quadrants the quadrant selector may offer.
    pub fn quadrant_choices(&self) -> Vec<RiskQuadrant> {
        self.table
            .as_ref()
            .map(|t| t.quadrants_present().into_iter().collect())
            .unwrap_or_default()
    }

    /// The filter implied by the current widgets, if one is complete.
    pub fn filter_mode(&self) -> Option<FilterMode> {
        match self.mode {
            SelectionMode::All => Some(FilterMode::All),
            SelectionMode::LikelyToDefault => Some(FilterMode::LikelyToDefault),
            SelectionMode::ByQuadrant => self.quadrant.map(FilterMode::ByQuadrant),
        }
    }

    /// Recompute the filtered rows against the current table.
    ///
    /// A rejected quadrant keeps the previous result, which is always built
    /// from this same table.
    pub fn refilter(&mut self) {
        self.apply_filter(false);
    }

    /// With `new_table` set, results that cannot be rebuilt are cleared
    /// instead of kept, so they never outlive the table they came from.
    fn apply_filter(&mut self, new_table: bool) {
        let Some(table) = &self.table else {
            return;
        };
        let Some(mode) = self.filter_mode() else {
            if new_table {
                self.clear_results();
            }
            return;
        };

        match filter(table, &mode) {
            Ok((rows, summary)) => {
                self.display_order = score_order(&rows);
                self.breakdown = region_breakdown(&rows);
                self.summary = summary;
                self.filtered = Some(rows);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Filter rejected: {e}");
                self.status_message = Some(format!("Error: {e}"));
                if new_table {
                    self.clear_results();
                }
            }
        }
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        self.refresh();
    }

    pub fn set_quadrant(&mut self, quadrant: RiskQuadrant) {
        self.quadrant = Some(quadrant);
        self.refresh();
    }

    pub fn set_feature(&mut self, feature: FeatureColumn) {
        self.feature = feature;
        self.refresh();
    }
}
