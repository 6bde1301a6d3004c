use crate::color::ColorMap;
use crate::data::aggregate::{self, PayloadScatter, SiteSuccessSummary};
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Payload slider domain
// ---------------------------------------------------------------------------

/// Fixed domain of the payload-range control, independent of the dataset.
pub const PAYLOAD_DOMAIN_MIN: f64 = 0.0;
pub const PAYLOAD_DOMAIN_MAX: f64 = 10_000.0;
pub const PAYLOAD_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Control state
// ---------------------------------------------------------------------------

/// Current values of the two bound controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub selected_site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl ControlState {
    /// Defaults for a freshly loaded dataset: "ALL" sites, payload range
    /// spanning the observed extent clamped into the slider domain (the
    /// full domain when the dataset is empty).
    pub fn defaults_for(dataset: &LaunchDataset) -> Self {
        let (low, high) = match dataset.payload_extent {
            Some((lo, hi)) => (
                lo.clamp(PAYLOAD_DOMAIN_MIN, PAYLOAD_DOMAIN_MAX),
                hi.clamp(PAYLOAD_DOMAIN_MIN, PAYLOAD_DOMAIN_MAX),
            ),
            None => (PAYLOAD_DOMAIN_MIN, PAYLOAD_DOMAIN_MAX),
        };
        ControlState {
            selected_site: SiteSelection::AllSites,
            payload_range: PayloadRange::ordered(low, high),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state: the immutable dataset, the current control values,
/// and the derived chart tables they produced.
pub struct AppState {
    /// Loaded dataset, read-only after construction.
    pub dataset: LaunchDataset,

    /// Current values of the site and payload-range controls.
    pub controls: ControlState,

    /// Pie-chart table for the current site selection.
    pub pie: SiteSuccessSummary,

    /// Scatter-chart table for the current site selection and range.
    pub scatter: PayloadScatter,

    /// Stable site → color assignment for the all-sites pie.
    pub site_colors: ColorMap,

    /// Stable booster category → color assignment for the scatter.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset) -> Self {
        let controls = ControlState::defaults_for(&dataset);
        let pie = aggregate::site_success_summary(&dataset, &controls.selected_site);
        let scatter = aggregate::filtered_payload_points(
            &dataset,
            &controls.selected_site,
            &controls.payload_range,
        );
        let site_colors = ColorMap::from_labels(dataset.sites.iter().map(String::as_str));
        let booster_colors =
            ColorMap::from_labels(dataset.booster_categories.iter().map(String::as_str));

        AppState {
            dataset,
            controls,
            pie,
            scatter,
            site_colors,
            booster_colors,
            status_message: None,
        }
    }

    /// Replace the dataset (File → Open…), resetting both controls to
    /// their defaults and recomputing both charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.controls = ControlState::defaults_for(&dataset);
        self.site_colors = ColorMap::from_labels(dataset.sites.iter().map(String::as_str));
        self.booster_colors =
            ColorMap::from_labels(dataset.booster_categories.iter().map(String::as_str));
        self.dataset = dataset;
        self.status_message = None;
        self.refresh_charts();
    }

    /// Re-run both derivations from scratch against the full dataset.
    /// Called once per control change; derived tables are never reused
    /// across control values.
    fn refresh_charts(&mut self) {
        self.pie =
            aggregate::site_success_summary(&self.dataset, &self.controls.selected_site);
        self.scatter = aggregate::filtered_payload_points(
            &self.dataset,
            &self.controls.selected_site,
            &self.controls.payload_range,
        );
    }

    /// Binding for the site dropdown: feeds both charts.
    pub fn select_site(&mut self, selection: SiteSelection) {
        if self.controls.selected_site != selection {
            self.controls.selected_site = selection;
            self.refresh_charts();
        }
    }

    /// Binding for the payload-range control: feeds the scatter chart.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.controls.payload_range != range {
            self.controls.payload_range = range;
            self.refresh_charts();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn record(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("SiteA", 500.0, 1, "v1"),
            record("SiteA", 1500.0, 0, "v1"),
            record("SiteB", 3000.0, 1, "v2"),
        ])
    }

    #[test]
    fn default_controls_span_the_observed_extent() {
        let state = AppState::new(dataset());
        assert_eq!(state.controls.selected_site, SiteSelection::AllSites);
        assert_eq!(state.controls.payload_range.low(), 500.0);
        assert_eq!(state.controls.payload_range.high(), 3000.0);
    }

    #[test]
    fn default_range_is_clamped_into_the_slider_domain() {
        let ds = LaunchDataset::from_records(vec![record("SiteA", 15600.0, 1, "FT")]);
        let controls = ControlState::defaults_for(&ds);
        assert_eq!(controls.payload_range.high(), PAYLOAD_DOMAIN_MAX);
    }

    #[test]
    fn empty_dataset_defaults_to_the_full_domain() {
        let controls = ControlState::defaults_for(&LaunchDataset::from_records(Vec::new()));
        assert_eq!(controls.payload_range.low(), PAYLOAD_DOMAIN_MIN);
        assert_eq!(controls.payload_range.high(), PAYLOAD_DOMAIN_MAX);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut state = AppState::new(dataset());
        assert_eq!(state.pie.slices.len(), 2);
        // Strict bounds exclude the 500 kg and 3000 kg launches sitting on
        // the default range's edges.
        assert_eq!(state.scatter.points.len(), 1);

        state.select_site(SiteSelection::Site("SiteA".to_string()));
        assert_eq!(state.pie.title, "Success/Failure of Launches for SiteA");
        assert_eq!(state.pie.total(), 2.0);
        assert_eq!(state.scatter.points.len(), 1);
    }

    #[test]
    fn range_change_recomputes_the_scatter() {
        let mut state = AppState::new(dataset());
        state.set_payload_range(PayloadRange::ordered(0.0, 2000.0));
        assert_eq!(state.scatter.points.len(), 2);

        // Boundary payload (3000 == high) stays excluded.
        state.set_payload_range(PayloadRange::ordered(0.0, 3000.0));
        assert_eq!(state.scatter.points.len(), 2);

        state.set_payload_range(PayloadRange::ordered(0.0, 3001.0));
        assert_eq!(state.scatter.points.len(), 3);
    }

    #[test]
    fn replacing_the_dataset_resets_the_controls() {
        let mut state = AppState::new(dataset());
        state.select_site(SiteSelection::Site("SiteA".to_string()));

        state.set_dataset(LaunchDataset::from_records(vec![record(
            "SiteC", 7000.0, 1, "B5",
        )]));
        assert_eq!(state.controls.selected_site, SiteSelection::AllSites);
        assert_eq!(state.controls.payload_range.low(), 7000.0);
        assert_eq!(state.pie.slices.len(), 1);
        assert_eq!(state.scatter.points.len(), 0);
    }
}
