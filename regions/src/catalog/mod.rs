use anyhow::{anyhow, bail, Context};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use itertools::Itertools;
use shared_kernel::string_key;

string_key!(GovernorateName);
string_key!(GovernorateCode);

const TUNISIA_GOVERNORATES: &str = include_str!("../../data/tunisia_governorates.geojson");

/// Number of first-level administrative regions in Tunisia.
pub const GOVERNORATE_COUNT: usize = 24;

#[derive(Debug, Clone)]
pub struct Governorate {
    pub name: GovernorateName,
    pub code: GovernorateCode,
    pub boundary: Geometry,
}

/// The fixed set of governorates, in the order the boundaries are listed.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    governorates: Vec<Governorate>,
}

impl RegionCatalog {
    /// Loads the boundaries bundled with the crate.
    pub fn load() -> anyhow::Result<Self> {
        let catalog = Self::from_geojson(TUNISIA_GOVERNORATES)?;
        if catalog.len() != GOVERNORATE_COUNT {
            bail!(
                "Expected {GOVERNORATE_COUNT} governorates, found {}",
                catalog.len()
            );
        }
        Ok(catalog)
    }

    pub fn from_geojson(text: &str) -> anyhow::Result<Self> {
        let geojson = text
            .parse::<GeoJson>()
            .context("Failed to parse governorate boundaries")?;
        let collection = FeatureCollection::try_from(geojson)
            .context("Governorate boundaries must be a FeatureCollection")?;

        let governorates = collection
            .features
            .into_iter()
            .map(Governorate::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;

        if let Some(duplicate) = governorates.iter().map(|g| &g.name).duplicates().next() {
            bail!("Governorate {duplicate} is listed more than once");
        }

        Ok(Self { governorates })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Governorate> {
        self.governorates.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &GovernorateName> {
        self.governorates.iter().map(|governorate| &governorate.name)
    }

    /// Exact, case sensitive match.
    pub fn get(&self, name: &str) -> Option<&Governorate> {
        self.governorates
            .iter()
            .find(|governorate| governorate.name.as_ref() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.governorates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.governorates.is_empty()
    }
}

impl TryFrom<Feature> for Governorate {
    type Error = anyhow::Error;

    fn try_from(feature: Feature) -> Result<Self, Self::Error> {
        let name = string_property(&feature, "name")?;
        let code = string_property(&feature, "code").unwrap_or_default();
        let boundary = feature
            .geometry
            .ok_or_else(|| anyhow!("Governorate {name} has no boundary"))?;

        match boundary.value {
            Value::Polygon(_) | Value::MultiPolygon(_) => Ok(Governorate {
                name: GovernorateName::new(name),
                code: GovernorateCode::new(code),
                boundary,
            }),
            _ => bail!("Governorate {name} boundary is not a polygon"),
        }
    }
}

fn string_property(feature: &Feature, key: &str) -> anyhow::Result<String> {
    feature
        .property(key)
        .and_then(|value| value.as_str())
        .map(ToOwned::to_owned)
        .ok_or_else(|| anyhow!("Feature is missing the `{key}` property"))
}
