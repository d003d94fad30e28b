use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Tier {
    /// Least to most severe.
    pub const ALL: [Tier; 4] = [Tier::Low, Tier::Medium, Tier::High, Tier::VeryHigh];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
            Tier::VeryHigh => "Very High",
        }
    }

    pub fn color(&self) -> FillColor {
        match self {
            Tier::Low => FillColor::BLUE,
            Tier::Medium => FillColor::YELLOW,
            Tier::High => FillColor::ORANGE,
            Tier::VeryHigh => FillColor::RED,
        }
    }

    /// Score range covered by the tier, as shown in the legend.
    pub fn score_range(&self) -> &'static str {
        match self {
            Tier::Low => "0",
            Tier::Medium => "1-3",
            Tier::High => "4-6",
            Tier::VeryHigh => "7+",
        }
    }

    pub fn legend_label(&self) -> String {
        format!("{} ({})", self.label(), self.score_range())
    }

    pub fn activity_label(&self) -> String {
        format!("{} Activity", self.label())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Hex fill color of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FillColor(&'static str);

impl FillColor {
    pub const RED: FillColor = FillColor("#ef4444");
    pub const ORANGE: FillColor = FillColor("#f97316");
    pub const YELLOW: FillColor = FillColor("#fbbf24");
    pub const BLUE: FillColor = FillColor("#3b82f6");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub color: FillColor,
}

/// Lower bounds are inclusive: 7+ very high, 4-6 high, 1-3 medium, 0 low.
pub fn classify(score: u32) -> Classification {
    let tier = match score {
        7.. => Tier::VeryHigh,
        4..=6 => Tier::High,
        1..=3 => Tier::Medium,
        0 => Tier::Low,
    };
    Classification {
        tier,
        color: tier.color(),
    }
}

/// A governorate without a score is classified as a score of zero.
pub fn classify_optional(score: Option<u32>) -> Classification {
    classify(score.unwrap_or_default())
}
