use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ScrollyChart, default_transition_ms, parse_config_json};
use crate::core::shapes::format_coord;
use crate::core::stats::mean;
use crate::core::{
    Color, LinearColorScale, LinearScale, Margin, PlotArea, PointScale, RadialSample, Viewport,
    normalize_class_name, radial_area_path,
};
use crate::data::{TemperatureRecord, load_temperatures_csv};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Geometry, Layer, Mark, MarkId, MarkRole, Paint, Scene, Style, TextAnchor, TextGeometry,
};
use crate::story::{ChartId, Step, StepDispatcher, TransitionTable};

const AREA_KEY: &str = "temp";
const CITY_NAME_KEY: &str = "city-name";
/// Trailing angle category so the last month does not land on the first.
const ANGLE_SENTINEL: &str = "";

/// A city step in narrative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStep {
    pub step: Step,
    pub city: String,
}

impl CityStep {
    #[must_use]
    pub fn new(step: Step, city: impl Into<String>) -> Self {
        Self {
            step,
            city: city.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    /// Temperature domain mapped onto `inner_radius..outer_radius`.
    #[serde(default = "default_radius_domain")]
    pub radius_domain: (f64, f64),
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f64,
    /// Mean-high domain of the fill color ramp.
    #[serde(default = "default_color_domain")]
    pub color_domain: (f64, f64),
    #[serde(default = "default_cold_color")]
    pub cold_color: String,
    #[serde(default = "default_hot_color")]
    pub hot_color: String,
    #[serde(default = "default_area_opacity")]
    pub area_opacity: f64,
    /// Month names clockwise from twelve o'clock.
    #[serde(default = "default_months")]
    pub months: Vec<String>,
    #[serde(default = "default_guide_rings")]
    pub guide_rings: Vec<f64>,
    #[serde(default = "default_guide_labels")]
    pub guide_labels: Vec<f64>,
    #[serde(default = "default_guide_color")]
    pub guide_color: String,
    #[serde(default = "default_guide_font_size")]
    pub guide_font_size: f64,
    #[serde(default = "default_city_name_font_size")]
    pub city_name_font_size: f64,
    #[serde(default = "default_city_name_weight")]
    pub city_name_weight: u16,
    #[serde(default = "default_city_steps")]
    pub city_steps: Vec<CityStep>,
    #[serde(default = "default_chip_size")]
    pub chip_size: (f64, f64),
    #[serde(default = "default_chip_gap")]
    pub chip_gap: f64,
    #[serde(default = "default_chip_font_size")]
    pub chip_font_size: f64,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u32,
}

impl Default for RadialChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            margin: default_margin(),
            radius_domain: default_radius_domain(),
            inner_radius: default_inner_radius(),
            outer_radius: default_outer_radius(),
            color_domain: default_color_domain(),
            cold_color: default_cold_color(),
            hot_color: default_hot_color(),
            area_opacity: default_area_opacity(),
            months: default_months(),
            guide_rings: default_guide_rings(),
            guide_labels: default_guide_labels(),
            guide_color: default_guide_color(),
            guide_font_size: default_guide_font_size(),
            city_name_font_size: default_city_name_font_size(),
            city_name_weight: default_city_name_weight(),
            city_steps: default_city_steps(),
            chip_size: default_chip_size(),
            chip_gap: default_chip_gap(),
            chip_font_size: default_chip_font_size(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl RadialChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        parse_config_json(input, "radial chart config")
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(480, 480)
}

fn default_margin() -> Margin {
    Margin::uniform(10.0)
}

fn default_radius_domain() -> (f64, f64) {
    (10.0, 100.0)
}

fn default_inner_radius() -> f64 {
    40.0
}

fn default_outer_radius() -> f64 {
    200.0
}

fn default_color_domain() -> (f64, f64) {
    (33.0, 110.0)
}

fn default_cold_color() -> String {
    "#5c7bec".to_owned()
}

fn default_hot_color() -> String {
    "#e54b5e".to_owned()
}

fn default_area_opacity() -> f64 {
    0.6
}

fn default_months() -> Vec<String> {
    [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_guide_rings() -> Vec<f64> {
    vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]
}

fn default_guide_labels() -> Vec<f64> {
    vec![30.0, 50.0, 70.0, 90.0]
}

fn default_guide_color() -> String {
    "#808080".to_owned()
}

fn default_guide_font_size() -> f64 {
    6.0
}

fn default_city_name_font_size() -> f64 {
    30.0
}

fn default_city_name_weight() -> u16 {
    700
}

fn default_city_steps() -> Vec<CityStep> {
    vec![
        CityStep::new(Step::Nyc, "NYC"),
        CityStep::new(Step::Beijing, "Beijing"),
        CityStep::new(Step::Stockholm, "Stockholm"),
        CityStep::new(Step::Lima, "Lima"),
        CityStep::new(Step::Tuscon, "Tuscon"),
    ]
}

fn default_chip_size() -> (f64, f64) {
    (64.0, 12.0)
}

fn default_chip_gap() -> f64 {
    4.0
}

fn default_chip_font_size() -> f64 {
    8.0
}

/// Target state of a city step: the city on display and how many legend
/// chips (in narrative order) are lit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityView {
    pub city: String,
    pub revealed: usize,
}

/// Precomputed band of one city.
#[derive(Debug, Clone, PartialEq)]
struct CityProfile {
    samples: Vec<RadialSample>,
    mean_high: f64,
    color: Color,
}

/// Scales, per-city bands and scene of the radial chart.
#[derive(Debug, Clone)]
pub struct RadialChartContext {
    config: RadialChartConfig,
    plot: PlotArea,
    radius_scale: LinearScale,
    angle_scale: PointScale,
    color_scale: LinearColorScale,
    cities: IndexMap<String, CityProfile>,
    /// Narrative steps whose city has data.
    city_steps: Vec<CityStep>,
    guide_color: Color,
    scene: Scene,
}

impl RadialChartContext {
    fn new(records: Vec<TemperatureRecord>, config: RadialChartConfig) -> ChartResult<Self> {
        let plot = PlotArea::new(config.viewport, config.margin)?;
        let radius_scale = LinearScale::new(config.radius_domain.0, config.radius_domain.1)?
            .with_range(config.inner_radius, config.outer_radius)?;
        let angle_scale = PointScale::new(
            config
                .months
                .iter()
                .map(String::as_str)
                .chain([ANGLE_SENTINEL]),
        )?
        .with_range(0.0, std::f64::consts::TAU)?;
        let color_scale = LinearColorScale::new(
            config.color_domain.0,
            config.color_domain.1,
            Color::from_hex(&config.cold_color)?,
            Color::from_hex(&config.hot_color)?,
        )?;
        let guide_color = Color::from_hex(&config.guide_color)?;

        let cities = build_profiles(records, &config, radius_scale, &angle_scale, color_scale)?;
        let city_steps: Vec<CityStep> = config
            .city_steps
            .iter()
            .filter(|city_step| {
                let known = cities.contains_key(&city_step.city);
                if !known {
                    warn!(
                        step = %city_step.step,
                        city = %city_step.city,
                        "no temperatures for city; step left unregistered"
                    );
                }
                known
            })
            .cloned()
            .collect();

        let mut context = Self {
            config,
            plot,
            radius_scale,
            angle_scale,
            color_scale,
            cities,
            city_steps,
            guide_color,
            scene: Scene::new(),
        };
        context.draw()?;
        Ok(context)
    }

    #[must_use]
    pub fn config(&self) -> &RadialChartConfig {
        &self.config
    }

    #[must_use]
    pub fn radius_scale(&self) -> LinearScale {
        self.radius_scale
    }

    /// Angle in radians of `month`, or `None` for an unknown month name.
    #[must_use]
    pub fn month_angle(&self, month: &str) -> Option<f64> {
        if month == ANGLE_SENTINEL {
            return None;
        }
        self.angle_scale.position(month)
    }

    #[must_use]
    pub fn color_scale(&self) -> LinearColorScale {
        self.color_scale
    }

    /// Cities with at least one usable month, in first-seen order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    /// Mean monthly high of `city`.
    #[must_use]
    pub fn mean_high(&self, city: &str) -> Option<f64> {
        self.cities.get(city).map(|profile| profile.mean_high)
    }

    #[must_use]
    pub fn city_color(&self, city: &str) -> Option<Color> {
        self.cities.get(city).map(|profile| profile.color)
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Guides, an empty temperature area, an empty city name and unlit chips.
    fn draw(&mut self) -> ChartResult<()> {
        let (cx, cy) = self.plot.center();

        for &value in &self.config.guide_rings {
            let r = self.radius_scale.domain_to_pixel(value)?;
            self.scene.upsert(
                Mark::new(
                    MarkId::new(MarkRole::GuideRing, format_coord(value)),
                    Layer::Background,
                    Geometry::Circle { cx, cy, r },
                )
                .with_style(Style::stroked(self.guide_color, 1.0)),
            );
        }
        for &value in &self.config.guide_labels {
            let r = self.radius_scale.domain_to_pixel(value)?;
            let text = TextGeometry::new(
                format!("{}°", format_coord(value)),
                cx,
                cy - r,
                self.config.guide_font_size,
            )
            .with_offset(0.0, -2.0)
            .with_anchor(TextAnchor::Middle);
            self.scene.upsert(Mark::new(
                MarkId::new(MarkRole::GuideLabel, format_coord(value)),
                Layer::Axis,
                Geometry::Text(text),
            ));
        }

        let area_style = Style {
            opacity: 0.0,
            ..Style::default()
        };
        self.scene.upsert(
            Mark::new(
                MarkId::new(MarkRole::TemperatureArea, AREA_KEY),
                Layer::Marks,
                Geometry::Path { d: String::new() },
            )
            .with_style(area_style),
        );
        self.scene.upsert(
            Mark::new(
                MarkId::new(MarkRole::CityName, CITY_NAME_KEY),
                Layer::Labels,
                Geometry::Text(
                    TextGeometry::new(String::new(), cx, cy, self.config.city_name_font_size)
                        .with_offset(0.0, self.config.city_name_font_size * 0.35)
                        .with_anchor(TextAnchor::Middle),
                ),
            )
            .with_style(area_style.with_font_weight(self.config.city_name_weight)),
        );

        let (chip_width, chip_height) = self.config.chip_size;
        for (index, city_step) in self.city_steps.iter().enumerate() {
            let y = index as f64 * (chip_height + self.config.chip_gap);
            let class = format!("label-{}", normalize_class_name(&city_step.city));
            self.scene.upsert(
                Mark::new(
                    MarkId::new(MarkRole::CityChip, city_step.city.clone()),
                    Layer::Labels,
                    Geometry::Rect {
                        x: 0.0,
                        y,
                        width: chip_width,
                        height: chip_height,
                    },
                )
                .with_class(class.clone())
                .with_style(Style {
                    fill: Paint::None,
                    ..Style::stroked(self.guide_color, 0.5)
                }),
            );
            self.scene.upsert(
                Mark::new(
                    MarkId::new(MarkRole::CityChipLabel, city_step.city.clone()),
                    Layer::Labels,
                    Geometry::Text(
                        TextGeometry::new(
                            city_step.city.clone(),
                            4.0,
                            y + chip_height / 2.0,
                            self.config.chip_font_size,
                        )
                        .with_offset(0.0, self.config.chip_font_size * 0.35),
                    ),
                )
                .with_class(class),
            );
        }
        Ok(())
    }

    /// Replaces the shared area, the city name and every chip background.
    fn apply_city(&mut self, view: &CityView) -> ChartResult<()> {
        let profile = self.cities.get(&view.city).ok_or_else(|| {
            ChartError::InvalidData(format!("no temperatures for city `{}`", view.city))
        })?;
        let transition = Some(self.config.transition_ms);

        // Closed by returning to the first month; the stored samples stay as loaded.
        let mut closed = Vec::with_capacity(profile.samples.len() + 1);
        closed.extend_from_slice(&profile.samples);
        closed.extend(profile.samples.first().copied());
        let d = radial_area_path(&closed, self.plot.center());
        let fill = profile.color;

        let area = MarkId::new(MarkRole::TemperatureArea, AREA_KEY);
        if let Some(mark) = self.scene.get_mut(&area) {
            mark.geometry = Geometry::Path { d };
            mark.style = Style {
                opacity: self.config.area_opacity,
                transition_ms: transition,
                ..Style::filled(fill)
            };
        }

        let name = MarkId::new(MarkRole::CityName, CITY_NAME_KEY);
        if let Some(mark) = self.scene.get_mut(&name) {
            if let Geometry::Text(text) = &mut mark.geometry {
                text.text.clone_from(&view.city);
            }
            mark.style.opacity = 1.0;
            mark.style.transition_ms = transition;
        }

        for (index, city_step) in self.city_steps.iter().enumerate() {
            let chip_fill = match self.cities.get(&city_step.city) {
                Some(chip) if index < view.revealed => Paint::Solid(chip.color),
                _ => Paint::None,
            };
            let id = MarkId::new(MarkRole::CityChip, city_step.city.clone());
            if let Some(mark) = self.scene.get_mut(&id) {
                mark.style.fill = chip_fill;
                mark.style.transition_ms = transition;
            }
        }
        debug!(
            city = %view.city,
            mean_high = profile.mean_high,
            revealed = view.revealed,
            "city band drawn"
        );
        Ok(())
    }

    fn transition_table(&self) -> ChartResult<TransitionTable<CityView>> {
        let mut table = TransitionTable::new(ChartId::CityTemperatures);
        for (index, city_step) in self.city_steps.iter().enumerate() {
            table.insert(
                city_step.step,
                CityView {
                    city: city_step.city.clone(),
                    revealed: index + 1,
                },
            )?;
        }
        Ok(table)
    }
}

/// Groups records by city name, dropping months outside the angle domain.
fn build_profiles(
    records: Vec<TemperatureRecord>,
    config: &RadialChartConfig,
    radius_scale: LinearScale,
    angle_scale: &PointScale,
    color_scale: LinearColorScale,
) -> ChartResult<IndexMap<String, CityProfile>> {
    let mut grouped: IndexMap<String, Vec<(RadialSample, f64)>> = IndexMap::new();
    for record in records {
        let angle = match angle_scale.position(&record.month_name) {
            Some(angle) if record.month_name != ANGLE_SENTINEL => angle,
            _ => {
                warn!(
                    city = %record.city,
                    month = %record.month_name,
                    "month outside the angle domain; skipping record"
                );
                continue;
            }
        };
        let sample = RadialSample {
            angle,
            inner_radius: radius_scale.domain_to_pixel(record.low_temp)?,
            outer_radius: radius_scale.domain_to_pixel(record.high_temp)?,
        };
        grouped
            .entry(record.city)
            .or_default()
            .push((sample, record.high_temp));
    }

    let mut profiles = IndexMap::with_capacity(grouped.len());
    for (city, mut rows) in grouped {
        rows.sort_by(|a, b| a.0.angle.total_cmp(&b.0.angle));
        let mean_high = mean(rows.iter().map(|(_, high)| *high)).ok_or_else(|| {
            ChartError::InvalidData(format!("city `{city}` has no temperatures"))
        })?;
        let color = color_scale.color(mean_high)?;
        let samples = rows.into_iter().map(|(sample, _)| sample).collect();
        profiles.insert(
            city,
            CityProfile {
                samples,
                mean_high,
                color,
            },
        );
    }

    if profiles.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "no temperature record matches the {} configured months",
            config.months.len()
        )));
    }
    Ok(profiles)
}

/// Monthly temperature band of one city at a time, drawn around a center.
#[derive(Debug)]
pub struct RadialChart {
    context: RadialChartContext,
    dispatcher: StepDispatcher<RadialChartContext>,
}

impl RadialChart {
    pub fn new(records: Vec<TemperatureRecord>, config: RadialChartConfig) -> ChartResult<Self> {
        let context = RadialChartContext::new(records, config)?;
        let dispatcher =
            StepDispatcher::from_table(&context.transition_table()?, RadialChartContext::apply_city)?;
        debug!(
            cities = context.cities.len(),
            marks = context.scene.len(),
            "city temperature chart drawn"
        );
        Ok(Self {
            context,
            dispatcher,
        })
    }

    pub fn from_csv(path: impl AsRef<Path>, config: RadialChartConfig) -> ChartResult<Self> {
        Self::new(load_temperatures_csv(path)?, config)
    }

    /// City steps with data, mapped to the view each produces.
    pub fn transition_table(&self) -> ChartResult<TransitionTable<CityView>> {
        self.context.transition_table()
    }

    #[must_use]
    pub fn context(&self) -> &RadialChartContext {
        &self.context
    }

    #[must_use]
    pub fn mark(&self, role: MarkRole, key: &str) -> Option<&Mark> {
        self.context.scene.get(&MarkId::new(role, key))
    }

    /// The shared temperature area.
    #[must_use]
    pub fn area(&self) -> Option<&Mark> {
        self.mark(MarkRole::TemperatureArea, AREA_KEY)
    }

    #[must_use]
    pub fn city_name(&self) -> Option<&Mark> {
        self.mark(MarkRole::CityName, CITY_NAME_KEY)
    }

    pub fn redraw(&mut self) -> ChartResult<()> {
        self.context.draw()?;
        self.dispatcher.replay(&mut self.context)?;
        Ok(())
    }
}

impl ScrollyChart for RadialChart {
    fn chart_id(&self) -> ChartId {
        ChartId::CityTemperatures
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
    use approx::assert_relative_eq;

    fn city(name: &str, highs: [f64; 2]) -> Vec<TemperatureRecord> {
        vec![
            TemperatureRecord::new(name, "Jan", highs[0], highs[0] - 15.0),
            TemperatureRecord::new(name, "Jul", highs[1], highs[1] - 15.0),
        ]
    }

    #[test]
    fn months_spread_over_the_circle_without_wrapping() {
        let chart = RadialChart::new(city("NYC", [40.0, 80.0]), RadialChartConfig::default())
            .expect("chart");
        let context = chart.context();
        assert_relative_eq!(context.month_angle("Jan").expect("jan"), 0.0);
        assert_relative_eq!(
            context.month_angle("Dec").expect("dec"),
            std::f64::consts::TAU * 11.0 / 12.0
        );
        assert_eq!(context.month_angle(""), None);
        assert_eq!(context.month_angle("Sep"), None);
    }

    #[test]
    fn unknown_months_are_skipped_and_cities_without_data_unregistered() {
        let mut records = city("Lima", [75.0, 65.0]);
        records.push(TemperatureRecord::new("Lima", "Smarch", 10.0, 0.0));
        let chart = RadialChart::new(records, RadialChartConfig::default()).expect("chart");
        assert_eq!(chart.steps(), vec![Step::Lima]);
        assert_relative_eq!(chart.context().mean_high("Lima").expect("mean"), 70.0);
    }

    #[test]
    fn only_unknown_months_is_an_error() {
        let records = vec![TemperatureRecord::new("Lima", "Smarch", 10.0, 0.0)];
        assert!(RadialChart::new(records, RadialChartConfig::default()).is_err());
    }

    #[test]
    fn area_closes_back_on_january() {
        let mut chart = RadialChart::new(city("NYC", [40.0, 80.0]), RadialChartConfig::default())
            .expect("chart");
        chart.fire(Step::Nyc).expect("fire");
        let Some(Geometry::Path { d }) = chart.area().map(|mark| &mark.geometry) else {
            panic!("expected a path");
        };
        // Outer edge: Jan, Jul, Jan again.
        assert_eq!(d.matches('L').count(), 2 + 3);
        assert!(d.ends_with('Z'));
    }
}
