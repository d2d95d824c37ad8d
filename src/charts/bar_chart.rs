use std::path::Path;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::axis::{AxisOrient, AxisSpec, AxisTick, axis_marks};
use super::{ScrollyChart, default_transition_ms, parse_config_json};
use crate::core::shapes::format_coord;
use crate::core::{
    BandScale, Color, LinearScale, Margin, OrdinalColorScale, PlotArea, Viewport,
    normalize_class_name, parse_palette,
};
use crate::data::{CountryRecord, load_countries_csv};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Geometry, Layer, Mark, MarkId, MarkRole, Paint, Scene, Style, TextAnchor, TextGeometry,
};
use crate::story::{ChartId, Step, StepDispatcher, TransitionTable};

const LABELLED_TICK: f64 = 80.0;
const GDP_NOTE_FONT_SIZE_PX: f64 = 12.0;
const GDP_NOTE_OFFSET_PX: f64 = 15.0;

/// Layout and styling of the life expectancy bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    /// Fixed y domain in years. Values outside it extrapolate off the plot.
    #[serde(default = "default_y_domain")]
    pub y_domain: (f64, f64),
    #[serde(default)]
    pub band_padding_inner: f64,
    #[serde(default)]
    pub band_padding_outer: f64,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    #[serde(default = "default_continent_palette")]
    pub continent_palette: Vec<String>,
    /// Countries strictly below this GDP per capita are "low GDP".
    #[serde(default = "default_low_gdp_threshold")]
    pub low_gdp_threshold: f64,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u32,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            margin: default_margin(),
            y_domain: default_y_domain(),
            band_padding_inner: 0.0,
            band_padding_outer: 0.0,
            y_tick_count: default_y_tick_count(),
            neutral_color: default_neutral_color(),
            highlight_color: default_highlight_color(),
            grid_color: default_grid_color(),
            continent_palette: default_continent_palette(),
            low_gdp_threshold: default_low_gdp_threshold(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl BarChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input, "bar chart config")
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(700, 400)
}

fn default_margin() -> Margin {
    Margin::new(30.0, 20.0, 30.0, 50.0)
}

fn default_y_domain() -> (f64, f64) {
    (0.0, 85.0)
}

fn default_y_tick_count() -> usize {
    5
}

fn default_neutral_color() -> String {
    "#d3d3d3".to_owned()
}

fn default_highlight_color() -> String {
    "#4cc1fc".to_owned()
}

fn default_grid_color() -> String {
    "#e6e6e6".to_owned()
}

fn default_continent_palette() -> Vec<String> {
    [
        "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_low_gdp_threshold() -> f64 {
    3000.0
}

/// Target bar coloring of a life expectancy step.
#[derive(Debug, Clone, PartialEq)]
pub enum BarHighlight {
    /// Every bar neutral.
    None,
    /// Bars whose continent class equals the given class are highlighted.
    Continent(String),
    /// Bars under the GDP threshold are highlighted.
    LowGdp,
    /// Bars take their continent's palette color.
    ContinentPalette,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BarColors {
    neutral: Color,
    highlight: Color,
    grid: Color,
}

/// Records, scales and scene of the bar chart; handed to step handlers.
#[derive(Debug, Clone)]
pub struct BarChartContext {
    config: BarChartConfig,
    colors: BarColors,
    plot: PlotArea,
    records: Vec<CountryRecord>,
    x_scale: BandScale,
    y_scale: LinearScale,
    color_scale: OrdinalColorScale,
    scene: Scene,
}

impl BarChartContext {
    fn new(mut records: Vec<CountryRecord>, config: BarChartConfig) -> ChartResult<Self> {
        if records.is_empty() {
            return Err(ChartError::InvalidData(
                "life expectancy chart needs at least one country".to_owned(),
            ));
        }
        records.sort_by_key(|record| OrderedFloat(record.life_expectancy));

        let plot = PlotArea::new(config.viewport, config.margin)?;
        let x_scale = BandScale::new(records.iter().map(|record| record.country.clone()))?
            .with_padding(config.band_padding_inner, config.band_padding_outer)?
            .with_range(0.0, plot.width)?;
        let y_scale = LinearScale::new(config.y_domain.0, config.y_domain.1)?
            .with_range(plot.height, 0.0)?;
        let palette = parse_palette(&config.continent_palette)?;
        let color_scale =
            OrdinalColorScale::new(records.iter().map(|record| record.continent.clone()), &palette)?;
        let colors = BarColors {
            neutral: Color::from_hex(&config.neutral_color)?,
            highlight: Color::from_hex(&config.highlight_color)?,
            grid: Color::from_hex(&config.grid_color)?,
        };

        let mut context = Self {
            config,
            colors,
            plot,
            records,
            x_scale,
            y_scale,
            color_scale,
            scene: Scene::new(),
        };
        context.draw()?;
        Ok(context)
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Records sorted ascending by life expectancy.
    #[must_use]
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    #[must_use]
    pub fn x_scale(&self) -> &BandScale {
        &self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn color_scale(&self) -> &OrdinalColorScale {
        &self.color_scale
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Builds every mark with its initial presentation. Re-running replaces
    /// marks in place.
    fn draw(&mut self) -> ChartResult<()> {
        let style = Style::filled(self.colors.neutral);
        for record in &self.records {
            let geometry = bar_geometry(&self.x_scale, self.y_scale, self.plot, record)?;
            self.scene.upsert(
                Mark::new(
                    MarkId::new(MarkRole::Bar, record.country.clone()),
                    Layer::Marks,
                    geometry,
                )
                .with_class(normalize_class_name(&record.continent))
                .with_style(style),
            );
        }
        self.draw_guides()
    }

    /// Reassigns bar geometry from the current scale ranges, keeping styles.
    fn layout(&mut self) -> ChartResult<()> {
        for record in &self.records {
            let geometry = bar_geometry(&self.x_scale, self.y_scale, self.plot, record)?;
            let id = MarkId::new(MarkRole::Bar, record.country.clone());
            if let Some(mark) = self.scene.get_mut(&id) {
                mark.geometry = geometry;
            }
        }
        self.draw_guides()
    }

    fn draw_guides(&mut self) -> ChartResult<()> {
        let ticks = self
            .y_scale
            .ticks(self.config.y_tick_count)
            .into_iter()
            .map(|value| {
                Ok(AxisTick {
                    value,
                    position: self.y_scale.domain_to_pixel(value)?,
                    label: life_expectancy_tick_label(value),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        let spec = AxisSpec {
            tick_size_inner: -self.plot.width,
            show_domain: false,
            line_color: self.colors.grid,
            ..AxisSpec::new(AxisOrient::Left, "y")
        };
        for mark in axis_marks(spec, &ticks, self.y_scale.range()) {
            self.scene.upsert(mark);
        }

        for (key, text, ratio) in [
            ("lower-gdp", "⟵ lower GDP", 0.25),
            ("higher-gdp", "higher GDP ⟶", 0.75),
        ] {
            let geometry = TextGeometry::new(
                text,
                self.plot.width * ratio,
                self.plot.height + GDP_NOTE_OFFSET_PX,
                GDP_NOTE_FONT_SIZE_PX,
            )
            .with_anchor(TextAnchor::Middle);
            self.scene.upsert(
                Mark::new(
                    MarkId::new(MarkRole::Note, key),
                    Layer::Labels,
                    Geometry::Text(geometry),
                )
                .with_class("gdp-note"),
            );
        }
        Ok(())
    }

    /// Rewrites the fill of every bar for `highlight`.
    fn apply_highlight(&mut self, highlight: &BarHighlight) -> ChartResult<()> {
        let transition = Some(self.config.transition_ms);
        let mut restyled = 0;
        for record in &self.records {
            let lit = match highlight {
                BarHighlight::None => false,
                BarHighlight::Continent(class) => normalize_class_name(&record.continent) == *class,
                BarHighlight::LowGdp => record.gdp_per_capita < self.config.low_gdp_threshold,
                BarHighlight::ContinentPalette => true,
            };
            let fill = match highlight {
                BarHighlight::ContinentPalette => self.color_scale.color(&record.continent),
                _ if lit => self.colors.highlight,
                _ => self.colors.neutral,
            };

            let id = MarkId::new(MarkRole::Bar, record.country.clone());
            if let Some(mark) = self.scene.get_mut(&id) {
                mark.style.fill = Paint::Solid(fill);
                mark.style.transition_ms = transition;
                restyled += 1;
            }
        }
        debug!(?highlight, restyled, "restyled bars");
        Ok(())
    }
}

fn bar_geometry(
    x_scale: &BandScale,
    y_scale: LinearScale,
    plot: PlotArea,
    record: &CountryRecord,
) -> ChartResult<Geometry> {
    let x = x_scale.position(&record.country).ok_or_else(|| {
        ChartError::InvalidData(format!("country `{}` is not in the band domain", record.country))
    })?;
    let y = y_scale.domain_to_pixel(record.life_expectancy)?;
    Ok(Geometry::Rect {
        x,
        y,
        width: x_scale.bandwidth(),
        height: plot.height - y,
    })
}

fn life_expectancy_tick_label(value: f64) -> String {
    if value == LABELLED_TICK {
        format!("{} years", format_coord(value))
    } else {
        format_coord(value)
    }
}

/// Life expectancy by country, one bar per country sorted low to high.
#[derive(Debug)]
pub struct BarChart {
    context: BarChartContext,
    dispatcher: StepDispatcher<BarChartContext>,
}

impl BarChart {
    pub fn new(records: Vec<CountryRecord>, config: BarChartConfig) -> ChartResult<Self> {
        let context = BarChartContext::new(records, config)?;
        let dispatcher =
            StepDispatcher::from_table(&Self::transition_table()?, BarChartContext::apply_highlight)?;
        debug!(
            bars = context.records.len(),
            marks = context.scene.len(),
            "life expectancy chart drawn"
        );
        Ok(Self {
            context,
            dispatcher,
        })
    }

    pub fn from_csv(path: impl AsRef<Path>, config: BarChartConfig) -> ChartResult<Self> {
        Self::new(load_countries_csv(path)?, config)
    }

    pub fn transition_table() -> ChartResult<TransitionTable<BarHighlight>> {
        let continent = |name: &str| BarHighlight::Continent(normalize_class_name(name));
        TransitionTable::new(ChartId::LifeExpectancy)
            .with(Step::IntoGraph, BarHighlight::None)?
            .with(Step::AsiaGraph, continent("Asia"))?
            .with(Step::AfricaGraph, continent("Africa"))?
            .with(Step::NorthAmericaGraph, continent("N. America"))?
            .with(Step::LowGdpGraph, BarHighlight::LowGdp)?
            .with(Step::ContinentGraph, BarHighlight::ContinentPalette)?
            .with(Step::ResetGraph, BarHighlight::None)
    }

    #[must_use]
    pub fn context(&self) -> &BarChartContext {
        &self.context
    }

    #[must_use]
    pub fn bar(&self, country: &str) -> Option<&Mark> {
        self.context
            .scene
            .get(&MarkId::new(MarkRole::Bar, country))
    }

    /// Rebuilds every mark from the records and scales, then re-applies the
    /// current step. Never duplicates marks.
    pub fn redraw(&mut self) -> ChartResult<()> {
        self.context.draw()?;
        self.dispatcher.replay(&mut self.context)?;
        Ok(())
    }

    /// Re-lays-out the chart for a new outer size.
    ///
    /// Scale domains and mark presentation are kept; only pixel ranges and
    /// geometry change.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let plot = PlotArea::new(viewport, self.context.config.margin)?;
        self.context.x_scale.set_range(0.0, plot.width)?;
        self.context.y_scale.set_range(plot.height, 0.0)?;
        self.context.plot = plot;
        self.context.config.viewport = viewport;
        self.context.layout()?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "life expectancy chart resized"
        );
        Ok(())
    }
}

impl ScrollyChart for BarChart {
    fn chart_id(&self) -> ChartId {
        ChartId::LifeExpectancy
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
    fn tick_eighty_reads_in_years() {
        assert_eq!(life_expectancy_tick_label(80.0), "80 years");
        assert_eq!(life_expectancy_tick_label(60.0), "60");
    }

    #[test]
    fn config_json_falls_back_to_defaults() {
        let config = BarChartConfig::from_json_str(r#"{"low_gdp_threshold": 1500}"#)
            .expect("config");
        assert_eq!(config.low_gdp_threshold, 1500.0);
        assert_eq!(config.viewport, Viewport::new(700, 400));
        assert_eq!(config.y_domain, (0.0, 85.0));
        assert!(BarChartConfig::from_json_str("{").is_err());
    }

    #[test]
    fn transition_table_covers_every_bar_step() {
        let table = BarChart::transition_table().expect("table");
        let steps: Vec<Step> = table.steps().collect();
        let expected: Vec<Step> = Step::for_chart(ChartId::LifeExpectancy).collect();
        assert_eq!(steps, expected);
        assert_eq!(
            table.target(Step::NorthAmericaGraph),
            Some(&BarHighlight::Continent("namerica".to_owned()))
        );
    }
}
