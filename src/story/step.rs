use std::fmt;

use serde::{Deserialize, Serialize};

/// The three charts of the story, by container element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartId {
    #[serde(rename = "chart-1")]
    LifeExpectancy,
    #[serde(rename = "chart-2")]
    HousingPrices,
    #[serde(rename = "chart-3")]
    CityTemperatures,
}

impl ChartId {
    #[must_use]
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::LifeExpectancy => "chart-1",
            Self::HousingPrices => "chart-2",
            Self::CityTemperatures => "chart-3",
        }
    }
}

/// Named scroll anchor. Crossing it fires the matching chart's handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    #[serde(rename = "into-graph")]
    IntoGraph,
    #[serde(rename = "asia-graph")]
    AsiaGraph,
    #[serde(rename = "africa-graph")]
    AfricaGraph,
    #[serde(rename = "na-graph")]
    NorthAmericaGraph,
    #[serde(rename = "low-gdp-graph")]
    LowGdpGraph,
    #[serde(rename = "continent-graph")]
    ContinentGraph,
    #[serde(rename = "reset-graph")]
    ResetGraph,
    #[serde(rename = "graph-2")]
    BlankPriceGraph,
    #[serde(rename = "drawlines")]
    DrawLines,
    #[serde(rename = "highlightUS")]
    HighlightUs,
    #[serde(rename = "highlightRegions")]
    HighlightRegions,
    #[serde(rename = "drawRectangle")]
    DrawRectangle,
    #[serde(rename = "nyc-step")]
    Nyc,
    #[serde(rename = "beijing-step")]
    Beijing,
    #[serde(rename = "stockholm-step")]
    Stockholm,
    #[serde(rename = "lima-step")]
    Lima,
    #[serde(rename = "tuscon-step")]
    Tuscon,
}

impl Step {
    pub const ALL: [Self; 17] = [
        Self::IntoGraph,
        Self::AsiaGraph,
        Self::AfricaGraph,
        Self::NorthAmericaGraph,
        Self::LowGdpGraph,
        Self::ContinentGraph,
        Self::ResetGraph,
        Self::BlankPriceGraph,
        Self::DrawLines,
        Self::HighlightUs,
        Self::HighlightRegions,
        Self::DrawRectangle,
        Self::Nyc,
        Self::Beijing,
        Self::Stockholm,
        Self::Lima,
        Self::Tuscon,
    ];

    /// Anchor element id, without the leading `#`.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::IntoGraph => "into-graph",
            Self::AsiaGraph => "asia-graph",
            Self::AfricaGraph => "africa-graph",
            Self::NorthAmericaGraph => "na-graph",
            Self::LowGdpGraph => "low-gdp-graph",
            Self::ContinentGraph => "continent-graph",
            Self::ResetGraph => "reset-graph",
            Self::BlankPriceGraph => "graph-2",
            Self::DrawLines => "drawlines",
            Self::HighlightUs => "highlightUS",
            Self::HighlightRegions => "highlightRegions",
            Self::DrawRectangle => "drawRectangle",
            Self::Nyc => "nyc-step",
            Self::Beijing => "beijing-step",
            Self::Stockholm => "stockholm-step",
            Self::Lima => "lima-step",
            Self::Tuscon => "tuscon-step",
        }
    }

    #[must_use]
    pub const fn chart(self) -> ChartId {
        match self {
            Self::IntoGraph
            | Self::AsiaGraph
            | Self::AfricaGraph
            | Self::NorthAmericaGraph
            | Self::LowGdpGraph
            | Self::ContinentGraph
            | Self::ResetGraph => ChartId::LifeExpectancy,
            Self::BlankPriceGraph
            | Self::DrawLines
            | Self::HighlightUs
            | Self::HighlightRegions
            | Self::DrawRectangle => ChartId::HousingPrices,
            Self::Nyc | Self::Beijing | Self::Stockholm | Self::Lima | Self::Tuscon => {
                ChartId::CityTemperatures
            }
        }
    }

    /// Resolves an anchor name, with or without the leading `#`.
    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let anchor = anchor.strip_prefix('#').unwrap_or(anchor);
        Self::ALL.into_iter().find(|step| step.anchor() == anchor)
    }

    /// Steps belonging to `chart`, in narrative order.
    pub fn for_chart(chart: ChartId) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |step| step.chart() == chart)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.anchor())
    }
}
