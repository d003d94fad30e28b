use crate::classifier::FillColor;
use serde_json::{json, Value};

/// Path options applied to a region outline on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStyle {
    pub fill_color: FillColor,
    pub weight: u8,
    pub opacity: f32,
    pub color: &'static str,
    pub dash_array: &'static str,
    pub fill_opacity: f32,
}

impl RegionStyle {
    pub fn base(fill_color: FillColor) -> Self {
        Self {
            fill_color,
            weight: 2,
            opacity: 1.0,
            color: "white",
            dash_array: "3",
            fill_opacity: 0.7,
        }
    }

    /// Thicker, darker outline for the region under the pointer.
    pub fn highlighted(fill_color: FillColor) -> Self {
        Self {
            weight: 4,
            color: "#666",
            dash_array: "",
            fill_opacity: 0.9,
            ..Self::base(fill_color)
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "fillColor": self.fill_color.as_str(),
            "weight": self.weight,
            "opacity": self.opacity,
            "color": self.color,
            "dashArray": self.dash_array,
            "fillOpacity": self.fill_opacity,
        })
    }
}
