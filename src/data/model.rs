use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, mirroring the 0/1 `class` column of the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map a raw `class` value to an outcome. Anything but 0/1 is invalid.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The raw class value (success = 1, failure = 0).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table). Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name, e.g. "CCAFS LC-40".
    pub site: String,
    /// Payload mass in kilograms (non-negative, finite).
    pub payload_mass_kg: f64,
    /// Success / failure of the launch.
    pub outcome: Outcome,
    /// Booster version category, e.g. "v1.1" or "FT".
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed lookups. Read-only after load.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches (rows).
    pub records: Vec<LaunchRecord>,
    /// Distinct launch-site names, sorted.
    pub sites: Vec<String>,
    /// Distinct booster version categories, sorted.
    pub booster_categories: BTreeSet<String>,
    /// Observed (min, max) payload mass, None when the dataset is empty.
    pub payload_extent: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build the lookup structures from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut site_set: BTreeSet<String> = BTreeSet::new();
        let mut booster_categories: BTreeSet<String> = BTreeSet::new();
        let mut payload_extent: Option<(f64, f64)> = None;

        for rec in &records {
            site_set.insert(rec.site.clone());
            booster_categories.insert(rec.booster_category.clone());
            payload_extent = match payload_extent {
                None => Some((rec.payload_mass_kg, rec.payload_mass_kg)),
                Some((lo, hi)) => {
                    Some((lo.min(rec.payload_mass_kg), hi.max(rec.payload_mass_kg)))
                }
            };
        }

        LaunchDataset {
            records,
            sites: site_set.into_iter().collect(),
            booster_categories,
            payload_extent,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SiteSelection – the dropdown value
// ---------------------------------------------------------------------------

/// Scope of the site dropdown: all sites, or one concrete site.
///
/// The UI contract uses the literal string "ALL" for the all-sites option;
/// [`SiteSelection::label`] preserves that while the rest of the code works
/// with the tagged variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    AllSites,
    Site(String),
}

impl SiteSelection {
    /// Dropdown label for the all-sites option.
    pub const ALL_LABEL: &'static str = "ALL";

    /// Whether a record from `site` falls inside this scope.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::AllSites => true,
            SiteSelection::Site(name) => name == site,
        }
    }

    /// The label shown in the dropdown and interpolated into chart titles.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::AllSites => Self::ALL_LABEL,
            SiteSelection::Site(name) => name,
        }
    }
}

impl Default for SiteSelection {
    fn default() -> Self {
        SiteSelection::AllSites
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – the slider value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid payload range: low bound {low} kg exceeds high bound {high} kg")]
pub struct InvalidPayloadRange {
    pub low: f64,
    pub high: f64,
}

/// Selected payload-mass window `[low, high]` with `low <= high` guaranteed.
///
/// Membership is strict on both ends: a record whose payload equals either
/// bound is excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, InvalidPayloadRange> {
        if low > high {
            return Err(InvalidPayloadRange { low, high });
        }
        Ok(PayloadRange { low, high })
    }

    /// Build a range from two bounds given in either order.
    pub fn ordered(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Strict containment: `low < mass < high`.
    pub fn contains(&self, mass: f64) -> bool {
        self.low < mass && mass < self.high
    }
}
