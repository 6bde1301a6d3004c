use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Derived chart tables
// ---------------------------------------------------------------------------

/// One pie slice: a label and its (non-negative) value.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Input table for the success pie chart, recomputed on every site change.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSuccessSummary {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl SiteSuccessSummary {
    /// Sum of all slice values (0.0 for an empty summary).
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// One scatter point: a launch projected to the plotted attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

/// Input table for the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadScatter {
    pub title: String,
    pub points: Vec<PayloadPoint>,
}

// ---------------------------------------------------------------------------
// Derivation functions (pure)
// ---------------------------------------------------------------------------

/// Derive the pie-chart table for the current site selection.
///
/// * `AllSites`: one slice per distinct site, value = that site's success
///   count (sum of outcome classes). Sites with zero successes keep a
///   zero-value slice so the legend still lists them.
/// * `Site(name)`: one slice per outcome value present at that site,
///   value = the count of launches with that outcome.
///
/// A selection matching no records yields zero slices, never an error.
pub fn site_success_summary(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
) -> SiteSuccessSummary {
    let title = format!("Success/Failure of Launches for {}", selection.label());

    let slices = match selection {
        SiteSelection::AllSites => {
            let mut successes: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in &dataset.records {
                *successes.entry(rec.site.as_str()).or_default() += u64::from(rec.outcome.class());
            }
            successes
                .into_iter()
                .map(|(site, n)| PieSlice {
                    label: site.to_string(),
                    value: n as f64,
                })
                .collect()
        }
        SiteSelection::Site(_) => {
            let mut counts: BTreeMap<Outcome, u64> = BTreeMap::new();
            for rec in &dataset.records {
                if selection.matches(&rec.site) {
                    *counts.entry(rec.outcome).or_default() += 1;
                }
            }
            counts
                .into_iter()
                .map(|(outcome, n)| PieSlice {
                    label: outcome.label().to_string(),
                    value: n as f64,
                })
                .collect()
        }
    };

    SiteSuccessSummary { title, slices }
}

/// Derive the scatter-chart table for the current site and payload range.
///
/// Retains launches with payload strictly inside the range (boundary-equal
/// masses are excluded) and, under a single-site scope, only launches from
/// that site. An empty result is valid.
pub fn filtered_payload_points(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> PayloadScatter {
    let title = format!(
        "Correlation between Payload and Success for {} site(s)",
        selection.label()
    );

    let points = dataset
        .records
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| selection.matches(&rec.site))
        .map(|rec| PayloadPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
        })
        .collect();

    PayloadScatter { title, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn record(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_category: booster.to_string(),
        }
    }

    /// The three-record example dataset: two SiteA launches (one success,
    /// one failure) and one SiteB success.
    fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("SiteA", 500.0, 1, "v1"),
            record("SiteA", 1500.0, 0, "v1"),
            record("SiteB", 3000.0, 1, "v2"),
        ])
    }

    fn range(low: f64, high: f64) -> PayloadRange {
        PayloadRange::new(low, high).unwrap()
    }

    #[test]
    fn all_sites_pie_has_one_slice_per_site_with_success_sums() {
        let summary = site_success_summary(&sample_dataset(), &SiteSelection::AllSites);
        assert_eq!(summary.title, "Success/Failure of Launches for ALL");
        assert_eq!(
            summary.slices,
            vec![
                PieSlice {
                    label: "SiteA".to_string(),
                    value: 1.0
                },
                PieSlice {
                    label: "SiteB".to_string(),
                    value: 1.0
                },
            ]
        );
    }

    #[test]
    fn all_sites_slice_values_sum_to_total_success_count() {
        let ds = sample_dataset();
        let total_successes: u64 = ds
            .records
            .iter()
            .map(|r| u64::from(r.outcome.class()))
            .sum();
        let summary = site_success_summary(&ds, &SiteSelection::AllSites);
        assert_eq!(summary.total(), total_successes as f64);
    }

    #[test]
    fn single_site_slices_sum_to_site_record_count() {
        let ds = sample_dataset();
        let selection = SiteSelection::Site("SiteA".to_string());
        let summary = site_success_summary(&ds, &selection);

        assert_eq!(summary.title, "Success/Failure of Launches for SiteA");
        let site_records = ds.records.iter().filter(|r| r.site == "SiteA").count();
        assert_eq!(summary.total(), site_records as f64);

        // One success and one failure at SiteA.
        assert_eq!(summary.slices.len(), 2);
        assert!(summary
            .slices
            .iter()
            .any(|s| s.label == "Success" && s.value == 1.0));
        assert!(summary
            .slices
            .iter()
            .any(|s| s.label == "Failure" && s.value == 1.0));
    }

    #[test]
    fn unknown_site_yields_zero_slices() {
        let summary = site_success_summary(
            &sample_dataset(),
            &SiteSelection::Site("No Such Site".to_string()),
        );
        assert!(summary.slices.is_empty());
        assert_eq!(summary.total(), 0.0);
    }

    #[test]
    fn scatter_points_respect_range_and_site_scope() {
        let ds = sample_dataset();
        let scatter =
            filtered_payload_points(&ds, &SiteSelection::AllSites, &range(0.0, 2000.0));

        assert_eq!(
            scatter.title,
            "Correlation between Payload and Success for ALL site(s)"
        );
        // Only the two SiteA launches fall inside (0, 2000).
        assert_eq!(scatter.points.len(), 2);
        for p in &scatter.points {
            assert!(0.0 < p.payload_mass_kg && p.payload_mass_kg < 2000.0);
        }

        // Same range restricted to SiteB excludes everything.
        let scatter = filtered_payload_points(
            &ds,
            &SiteSelection::Site("SiteB".to_string()),
            &range(0.0, 2000.0),
        );
        assert!(scatter.points.is_empty());

        // SiteB's single launch sits at 3000 kg.
        let scatter = filtered_payload_points(
            &ds,
            &SiteSelection::Site("SiteB".to_string()),
            &range(2000.0, 4000.0),
        );
        assert_eq!(scatter.points.len(), 1);
        assert_eq!(scatter.points[0].booster_category, "v2");
        assert_eq!(scatter.points[0].outcome, Outcome::Success);
    }

    #[test]
    fn boundary_payloads_are_excluded() {
        let ds = LaunchDataset::from_records(vec![
            record("SiteA", 1000.0, 1, "v1"),
            record("SiteA", 2500.0, 1, "v1"),
            record("SiteA", 4000.0, 0, "v1"),
        ]);
        let scatter =
            filtered_payload_points(&ds, &SiteSelection::AllSites, &range(1000.0, 4000.0));
        assert_eq!(scatter.points.len(), 1);
        assert_eq!(scatter.points[0].payload_mass_kg, 2500.0);
    }

    #[test]
    fn derivations_are_idempotent() {
        let ds = sample_dataset();
        let selection = SiteSelection::Site("SiteA".to_string());
        let r = range(0.0, 10000.0);

        assert_eq!(
            site_success_summary(&ds, &selection),
            site_success_summary(&ds, &selection)
        );
        assert_eq!(
            filtered_payload_points(&ds, &selection, &r),
            filtered_payload_points(&ds, &selection, &r)
        );
    }

    #[test]
    fn all_sites_keeps_zero_success_sites_as_zero_slices() {
        let ds = LaunchDataset::from_records(vec![
            record("SiteA", 500.0, 0, "v1"),
            record("SiteB", 3000.0, 1, "v2"),
        ]);
        let summary = site_success_summary(&ds, &SiteSelection::AllSites);
        assert_eq!(summary.slices.len(), 2);
        assert_eq!(summary.slices[0].label, "SiteA");
        assert_eq!(summary.slices[0].value, 0.0);
        assert_eq!(summary.total(), 1.0);
    }
}
