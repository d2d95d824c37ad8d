use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::axis::{AxisOrient, AxisSpec, AxisTick, axis_marks};
use super::{ScrollyChart, default_transition_ms, parse_config_json};
use crate::core::primitives::date_to_unix_seconds;
use crate::core::stats::{extent, group_by_key};
use crate::core::ticks::{format_tick, month_ticks};
use crate::core::{
    Color, LinearScale, Margin, OrdinalColorScale, PlotArea, Viewport, line_path,
    normalize_class_name, parse_palette,
};
use crate::data::{HousingRecord, load_housing_csv, parse_month_label};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Geometry, Layer, Mark, MarkId, MarkRole, Paint, Scene, Style, TextAnchor, TextGeometry,
};
use crate::story::{ChartId, Step, StepDispatcher, TransitionTable};

const WINTER_KEY: &str = "winter";

/// Layout and styling of the housing price line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_region_palette")]
    pub region_palette: Vec<String>,
    #[serde(default = "default_x_tick_count")]
    pub x_tick_count: usize,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    /// Region drawn in the focus color from `highlightUS` on.
    #[serde(default = "default_focus_region")]
    pub focus_region: String,
    #[serde(default = "default_highlight_regions")]
    pub highlight_regions: Vec<String>,
    #[serde(default = "default_focus_color")]
    pub focus_color: String,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default = "default_muted_color")]
    pub muted_color: String,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default = "default_winter_color")]
    pub winter_color: String,
    /// Winter rectangle: starts at `winter_anchor`, as wide as
    /// `winter_start..winter_end`. Month labels use the `November-16` format.
    #[serde(default = "default_winter_start")]
    pub winter_start: String,
    #[serde(default = "default_winter_end")]
    pub winter_end: String,
    #[serde(default = "default_winter_anchor")]
    pub winter_anchor: String,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f64,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_emphasis_weight")]
    pub emphasis_weight: u16,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u32,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            margin: default_margin(),
            title: default_title(),
            region_palette: default_region_palette(),
            x_tick_count: default_x_tick_count(),
            y_tick_count: default_y_tick_count(),
            focus_region: default_focus_region(),
            highlight_regions: default_highlight_regions(),
            focus_color: default_focus_color(),
            highlight_color: default_highlight_color(),
            muted_color: default_muted_color(),
            label_color: default_label_color(),
            winter_color: default_winter_color(),
            winter_start: default_winter_start(),
            winter_end: default_winter_end(),
            winter_anchor: default_winter_anchor(),
            line_width: default_line_width(),
            circle_radius: default_circle_radius(),
            label_font_size: default_label_font_size(),
            emphasis_weight: default_emphasis_weight(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl LineChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input, "line chart config")
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(600, 700)
}

fn default_margin() -> Margin {
    Margin::new(100.0, 150.0, 30.0, 50.0)
}

fn default_title() -> String {
    "U.S. housing prices fall in winter".to_owned()
}

fn default_region_palette() -> Vec<String> {
    [
        "#8dd3c7", "#ffffb3", "#b0aad6", "#fb8072", "#80b1d3", "#ffa743", "#b3de69", "#fccde5",
        "#ccc9c9", "#bc80bd",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_x_tick_count() -> usize {
    9
}

fn default_y_tick_count() -> usize {
    10
}

fn default_focus_region() -> String {
    "U.S.".to_owned()
}

fn default_highlight_regions() -> Vec<String> {
    ["Mountain", "Pacific", "West South Central", "South Atlantic"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_focus_color() -> String {
    "#ff0000".to_owned()
}

fn default_highlight_color() -> String {
    "#add8e6".to_owned()
}

fn default_muted_color() -> String {
    "#d3d3d3".to_owned()
}

fn default_label_color() -> String {
    "#000000".to_owned()
}

fn default_winter_color() -> String {
    "#d0e1f4".to_owned()
}

fn default_winter_start() -> String {
    "November-16".to_owned()
}

fn default_winter_end() -> String {
    "February-17".to_owned()
}

fn default_winter_anchor() -> String {
    "December-16".to_owned()
}

fn default_line_width() -> f64 {
    2.0
}

fn default_circle_radius() -> f64 {
    4.0
}

fn default_label_font_size() -> f64 {
    12.0
}

fn default_emphasis_weight() -> u16 {
    800
}

/// Coloring rule for lines, start circles and region labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceHighlight {
    /// Every region in its palette color; labels in the label color.
    Palette,
    /// Focus region in the focus color, the rest muted.
    Focus,
    /// Focus region, highlighted regions and the muted rest; labels follow
    /// the focus rule.
    FocusAndRegions,
}

/// Target visual state of a housing price step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceView {
    pub lines_visible: bool,
    pub highlight: PriceHighlight,
    pub emphasize_labels: bool,
    pub winter_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LineColors {
    focus: Color,
    highlight: Color,
    muted: Color,
    label: Color,
    winter: Color,
}

/// Records, scales and scene of the line chart; handed to step handlers.
#[derive(Debug, Clone)]
pub struct LineChartContext {
    config: LineChartConfig,
    colors: LineColors,
    plot: PlotArea,
    regions: IndexMap<String, Vec<HousingRecord>>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    color_scale: OrdinalColorScale,
    scene: Scene,
}

impl LineChartContext {
    fn new(records: Vec<HousingRecord>, config: LineChartConfig) -> ChartResult<Self> {
        let plot = PlotArea::new(config.viewport, config.margin)?;
        let x_scale =
            LinearScale::from_extent(records.iter().map(|record| date_to_unix_seconds(record.month)))?
                .with_range(0.0, plot.width)?;
        let y_scale = LinearScale::from_extent(records.iter().map(|record| record.price))?
            .with_range(plot.height, 0.0)?;

        let regions = group_by_key(records, |record| record.region.clone());
        let palette = parse_palette(&config.region_palette)?;
        let color_scale = OrdinalColorScale::new(regions.keys().cloned(), &palette)?;
        let colors = LineColors {
            focus: Color::from_hex(&config.focus_color)?,
            highlight: Color::from_hex(&config.highlight_color)?,
            muted: Color::from_hex(&config.muted_color)?,
            label: Color::from_hex(&config.label_color)?,
            winter: Color::from_hex(&config.winter_color)?,
        };

        let mut context = Self {
            config,
            colors,
            plot,
            regions,
            x_scale,
            y_scale,
            color_scale,
            scene: Scene::new(),
        };
        context.draw()?;
        Ok(context)
    }

    #[must_use]
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    /// Records grouped by region, in first-seen order.
    #[must_use]
    pub fn regions(&self) -> &IndexMap<String, Vec<HousingRecord>> {
        &self.regions
    }

    /// Time scale over unix seconds.
    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn date_to_pixel(&self, date: NaiveDate) -> ChartResult<f64> {
        self.x_scale.domain_to_pixel(date_to_unix_seconds(date))
    }

    fn month_to_pixel(&self, label: &str) -> ChartResult<f64> {
        self.date_to_pixel(parse_month_label(label)?)
    }

    /// Builds every mark hidden; `drawlines` reveals them.
    fn draw(&mut self) -> ChartResult<()> {
        let hidden = PriceView {
            lines_visible: false,
            highlight: PriceHighlight::Palette,
            emphasize_labels: false,
            winter_visible: false,
        };

        let mut marks = Vec::with_capacity(self.regions.len() * 3 + 2);
        for (region, records) in &self.regions {
            let class = normalize_class_name(region);
            let mut points = Vec::with_capacity(records.len());
            for record in records {
                points.push((
                    self.date_to_pixel(record.month)?,
                    self.y_scale.domain_to_pixel(record.price)?,
                ));
            }
            let Some(&(start_x, start_y)) = points.first() else {
                continue;
            };

            marks.push(
                Mark::new(
                    MarkId::new(MarkRole::PriceLine, region.clone()),
                    Layer::Marks,
                    Geometry::Path {
                        d: line_path(&points),
                    },
                )
                .with_class(class.clone()),
            );
            marks.push(
                Mark::new(
                    MarkId::new(MarkRole::PriceCircle, region.clone()),
                    Layer::Marks,
                    Geometry::Circle {
                        cx: start_x,
                        cy: start_y,
                        r: self.config.circle_radius,
                    },
                )
                .with_class(class.clone()),
            );
            marks.push(
                Mark::new(
                    MarkId::new(MarkRole::RegionLabel, region.clone()),
                    Layer::Labels,
                    Geometry::Text(
                        TextGeometry::new(region.clone(), start_x, start_y, self.config.label_font_size)
                            .with_offset(6.0, 4.0),
                    ),
                )
                .with_class(class),
            );
        }

        let winter_x = self.month_to_pixel(&self.config.winter_anchor)?;
        let winter_width = self.month_to_pixel(&self.config.winter_end)?
            - self.month_to_pixel(&self.config.winter_start)?;
        marks.push(Mark::new(
            MarkId::new(MarkRole::WinterHighlight, WINTER_KEY),
            Layer::Background,
            Geometry::Rect {
                x: winter_x,
                y: 0.0,
                width: winter_width,
                height: self.plot.height,
            },
        ));

        marks.push(Mark::new(
            MarkId::new(MarkRole::Title, "title"),
            Layer::Labels,
            Geometry::Text(
                TextGeometry::new(self.config.title.clone(), self.plot.width / 2.0, -40.0, 24.0)
                    .with_offset(40.0, 0.0)
                    .with_anchor(TextAnchor::Middle),
            ),
        ));

        marks.extend(self.axis_marks()?);
        for mark in marks {
            self.scene.upsert(mark);
        }
        self.apply_view(&hidden)?;
        // The initial draw is not animated.
        for role in [
            MarkRole::PriceLine,
            MarkRole::PriceCircle,
            MarkRole::RegionLabel,
            MarkRole::WinterHighlight,
        ] {
            self.scene
                .update_role(role, |mark| mark.style.transition_ms = None);
        }
        Ok(())
    }

    fn axis_marks(&self) -> ChartResult<Vec<Mark>> {
        let (start, end) = self
            .regions
            .values()
            .flatten()
            .map(|record| record.month)
            .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, month| match acc {
                None => Some((month, month)),
                Some((lo, hi)) => Some((lo.min(month), hi.max(month))),
            })
            .ok_or_else(|| ChartError::InvalidData("housing chart has no records".to_owned()))?;

        let x_ticks = month_ticks(start, end, self.config.x_tick_count)
            .into_iter()
            .map(|date| {
                Ok(AxisTick {
                    value: date_to_unix_seconds(date),
                    position: self.date_to_pixel(date)?,
                    label: date.format("%b %y").to_string(),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let y_values = self.y_scale.ticks(self.config.y_tick_count);
        let y_step = match y_values.as_slice() {
            [first, second, ..] => (second - first).abs(),
            _ => 1.0,
        };
        let y_ticks = y_values
            .into_iter()
            .map(|value| {
                Ok(AxisTick {
                    value,
                    position: self.y_scale.domain_to_pixel(value)?,
                    label: format_tick(value, y_step),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let x_spec = AxisSpec {
            offset: self.plot.height,
            ..AxisSpec::new(AxisOrient::Bottom, "x")
        };
        let mut marks = axis_marks(x_spec, &x_ticks, self.x_scale.range());
        marks.extend(axis_marks(
            AxisSpec::new(AxisOrient::Left, "y"),
            &y_ticks,
            self.y_scale.range(),
        ));
        Ok(marks)
    }

    fn region_color(&self, region: &str, highlight: PriceHighlight) -> Color {
        let is_focus = region == self.config.focus_region;
        match highlight {
            PriceHighlight::Palette => self.color_scale.color(region),
            PriceHighlight::Focus if is_focus => self.colors.focus,
            PriceHighlight::Focus => self.colors.muted,
            PriceHighlight::FocusAndRegions
                if self.config.highlight_regions.iter().any(|r| r == region) =>
            {
                self.colors.highlight
            }
            PriceHighlight::FocusAndRegions if is_focus => self.colors.focus,
            PriceHighlight::FocusAndRegions => self.colors.muted,
        }
    }

    fn label_color(&self, region: &str, highlight: PriceHighlight) -> Color {
        match highlight {
            PriceHighlight::Palette | PriceHighlight::Focus => self.colors.label,
            PriceHighlight::FocusAndRegions if region == self.config.focus_region => {
                self.colors.focus
            }
            PriceHighlight::FocusAndRegions => self.colors.muted,
        }
    }

    /// Rewrites every presentation attribute the housing steps touch.
    fn apply_view(&mut self, view: &PriceView) -> ChartResult<()> {
        let transition = Some(self.config.transition_ms);
        let opacity = if view.lines_visible { 1.0 } else { 0.0 };
        let weight = view.emphasize_labels.then_some(self.config.emphasis_weight);

        let styles: Vec<(String, Color, Color)> = self
            .regions
            .keys()
            .map(|region| {
                (
                    region.clone(),
                    self.region_color(region, view.highlight),
                    self.label_color(region, view.highlight),
                )
            })
            .collect();

        for (region, color, label_color) in styles {
            let line = MarkId::new(MarkRole::PriceLine, region.clone());
            if let Some(mark) = self.scene.get_mut(&line) {
                mark.style = Style {
                    opacity,
                    transition_ms: transition,
                    ..Style::stroked(color, self.config.line_width)
                };
            }
            let circle = MarkId::new(MarkRole::PriceCircle, region.clone());
            if let Some(mark) = self.scene.get_mut(&circle) {
                mark.style = Style {
                    opacity,
                    transition_ms: transition,
                    ..Style::filled(color)
                };
            }
            let label = MarkId::new(MarkRole::RegionLabel, region);
            if let Some(mark) = self.scene.get_mut(&label) {
                mark.style = Style {
                    opacity,
                    font_weight: weight,
                    transition_ms: transition,
                    ..Style::filled(label_color)
                };
            }
        }

        let winter = MarkId::new(MarkRole::WinterHighlight, WINTER_KEY);
        if let Some(mark) = self.scene.get_mut(&winter) {
            mark.style = Style {
                fill: Paint::Solid(self.colors.winter),
                opacity: if view.winter_visible { 1.0 } else { 0.0 },
                transition_ms: transition,
                ..Style::default()
            };
        }
        debug!(?view, regions = self.regions.len(), "restyled price lines");
        Ok(())
    }
}

/// Regional housing prices over time, one line per region.
#[derive(Debug)]
pub struct LineChart {
    context: LineChartContext,
    dispatcher: StepDispatcher<LineChartContext>,
}

impl LineChart {
    pub fn new(records: Vec<HousingRecord>, config: LineChartConfig) -> ChartResult<Self> {
        let context = LineChartContext::new(records, config)?;
        let dispatcher =
            StepDispatcher::from_table(&Self::transition_table()?, LineChartContext::apply_view)?;
        debug!(
            regions = context.regions.len(),
            marks = context.scene.len(),
            "housing price chart drawn"
        );
        Ok(Self {
            context,
            dispatcher,
        })
    }

    pub fn from_csv(path: impl AsRef<Path>, config: LineChartConfig) -> ChartResult<Self> {
        Self::new(load_housing_csv(path)?, config)
    }

    pub fn transition_table() -> ChartResult<TransitionTable<PriceView>> {
        let view = |lines_visible, highlight, emphasize_labels, winter_visible| PriceView {
            lines_visible,
            highlight,
            emphasize_labels,
            winter_visible,
        };
        TransitionTable::new(ChartId::HousingPrices)
            .with(
                Step::BlankPriceGraph,
                view(false, PriceHighlight::Palette, false, false),
            )?
            .with(
                Step::DrawLines,
                view(true, PriceHighlight::Palette, false, false),
            )?
            .with(
                Step::HighlightUs,
                view(true, PriceHighlight::Focus, false, false),
            )?
            .with(
                Step::HighlightRegions,
                view(true, PriceHighlight::FocusAndRegions, true, false),
            )?
            .with(
                Step::DrawRectangle,
                view(true, PriceHighlight::FocusAndRegions, true, true),
            )
    }

    #[must_use]
    pub fn context(&self) -> &LineChartContext {
        &self.context
    }

    #[must_use]
    pub fn mark(&self, role: MarkRole, key: &str) -> Option<&Mark> {
        self.context.scene.get(&MarkId::new(role, key))
    }

    /// Rebuilds every mark and restores the current step's view.
    pub fn redraw(&mut self) -> ChartResult<()> {
        self.context.draw()?;
        self.dispatcher.replay(&mut self.context)?;
        Ok(())
    }
}

impl ScrollyChart for LineChart {
    fn chart_id(&self) -> ChartId {
        ChartId::HousingPrices
    }

    fn plot_area(&self) -> PlotArea {
        self.context.plot
    }

    fn scene(&self) -> &Scene {
        &self.context.scene
    }

    fn steps(&self) -> Vec<Step> {
        self.dispatcher.steps().collect()
    }

    fn fire(&mut self, step: Step) -> ChartResult<bool> {
        self.dispatcher.fire(step, &mut self.context)
    }

    fn current_step(&self) -> Option<Step> {
        self.dispatcher.last_fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_is_distinct() {
        let table = LineChart::transition_table().expect("table");
        let views: Vec<&PriceView> = table.iter().map(|(_, view)| view).collect();
        for (index, view) in views.iter().enumerate() {
            assert!(!views[index + 1..].contains(view));
        }
    }

    #[test]
    fn default_winter_labels_parse() {
        let config = LineChartConfig::default();
        for label in [&config.winter_start, &config.winter_end, &config.winter_anchor] {
            assert!(parse_month_label(label).is_ok());
        }
    }
}
