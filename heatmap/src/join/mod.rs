mod style;

pub use style::RegionStyle;

use crate::classifier::{classify_optional, Classification};
use crate::data_transfer::{ActivityLookup, ActivityRecord};
use geojson::{Feature, FeatureCollection};
use itertools::Itertools;
use regions::{Governorate, GovernorateName, RegionCatalog};
use std::fmt;

/// A governorate boundary decorated with its activity record.
#[derive(Debug, Clone)]
pub struct JoinedRegion {
    pub governorate: Governorate,
    pub record: ActivityRecord,
    pub classification: Classification,
    /// False when the record is the zero default.
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub name: GovernorateName,
    pub score: u32,
    pub events_count: u32,
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nScore: {}\nEvents: {}",
            self.name, self.score, self.events_count
        )
    }
}

impl JoinedRegion {
    fn new(governorate: &Governorate, lookup: &ActivityLookup) -> Self {
        let fetched = lookup.get(governorate.name.as_ref());
        let classification = classify_optional(fetched.map(|record| record.score));
        Self {
            governorate: governorate.clone(),
            record: fetched
                .cloned()
                .unwrap_or_else(|| ActivityRecord::empty(governorate.name.clone())),
            classification,
            matched: fetched.is_some(),
        }
    }

    pub fn name(&self) -> &GovernorateName {
        &self.governorate.name
    }

    pub fn tooltip(&self) -> Tooltip {
        Tooltip {
            name: self.name().clone(),
            score: self.record.score,
            events_count: self.record.events_count,
        }
    }

    pub fn style(&self, highlighted: bool) -> RegionStyle {
        if highlighted {
            RegionStyle::highlighted(self.classification.color)
        } else {
            RegionStyle::base(self.classification.color)
        }
    }

    pub fn to_feature(&self, highlighted: bool) -> Feature {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(self.governorate.boundary.clone()),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("name", self.name().as_ref());
        feature.set_property("code", self.governorate.code.as_ref());
        feature.set_property("score", self.record.score);
        feature.set_property("events_count", self.record.events_count);
        feature.set_property("tier", self.classification.tier.label());
        feature.set_property("fillColor", self.classification.color.as_str());
        feature.set_property("style", self.style(highlighted).to_json());
        feature.set_property("tooltip", self.tooltip().to_string());
        feature
    }
}

/// Boundaries joined with fetched activity by exact governorate name.
/// Rebuilt whenever a new lookup replaces the old one.
#[derive(Debug, Clone)]
pub struct RegionJoin {
    regions: Vec<JoinedRegion>,
    unmatched_records: Vec<GovernorateName>,
}

impl RegionJoin {
    pub fn new(catalog: &RegionCatalog, lookup: &ActivityLookup) -> Self {
        let regions = catalog
            .iter()
            .map(|governorate| JoinedRegion::new(governorate, lookup))
            .collect_vec();

        let unmatched_records = lookup
            .records()
            .filter(|record| !catalog.contains(record.governorate.as_ref()))
            .map(|record| record.governorate.clone())
            .sorted()
            .collect_vec();

        if !unmatched_records.is_empty() {
            tracing::debug!(?unmatched_records, "activity records without a boundary are ignored");
        }

        Self {
            regions,
            unmatched_records,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &JoinedRegion> {
        self.regions.iter()
    }

    pub fn get(&self, name: &str) -> Option<&JoinedRegion> {
        self.regions
            .iter()
            .find(|region| region.name().as_ref() == name)
    }

    /// The joined record, or the zero default when nothing was fetched for `name`.
    pub fn record_or_default(&self, name: &GovernorateName) -> ActivityRecord {
        self.get(name.as_ref())
            .map(|region| region.record.clone())
            .unwrap_or_else(|| ActivityRecord::empty(name.clone()))
    }

    /// Names that came back from the api but have no boundary.
    pub fn unmatched_records(&self) -> &[GovernorateName] {
        &self.unmatched_records
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn to_feature_collection(&self, hovered: Option<&GovernorateName>) -> FeatureCollection {
        let features = self
            .regions
            .iter()
            .map(|region| region.to_feature(Some(region.name()) == hovered))
            .collect_vec();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
