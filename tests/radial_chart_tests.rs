mod common;

use approx::assert_relative_eq;
use scrolly_charts::charts::{CityStep, CityView, RadialChartConfig};
use scrolly_charts::data::TemperatureRecord;
use scrolly_charts::render::{Geometry, Mark, MarkRole, Paint};
use scrolly_charts::{RadialChart, ScrollyChart, Step};

fn chart() -> RadialChart {
    RadialChart::new(common::temperatures(), RadialChartConfig::default()).expect("chart")
}

fn path(mark: Option<&Mark>) -> String {
    match mark.map(|mark| &mark.geometry) {
        Some(Geometry::Path { d }) => d.clone(),
        other => panic!("expected a path, got {other:?}"),
    }
}

fn text(mark: Option<&Mark>) -> String {
    match mark.map(|mark| &mark.geometry) {
        Some(Geometry::Text(text)) => text.text.clone(),
        other => panic!("expected text, got {other:?}"),
    }
}

fn chip_fill(chart: &RadialChart, city: &str) -> Paint {
    chart
        .mark(MarkRole::CityChip, city)
        .map(|mark| mark.style.fill)
        .unwrap_or_else(|| panic!("missing chip for {city}"))
}

#[test]
fn initial_render_has_guides_and_an_empty_band() {
    let chart = chart();
    assert_eq!(chart.scene().with_role(MarkRole::GuideRing).count(), 8);
    assert_eq!(chart.scene().with_role(MarkRole::GuideLabel).count(), 4);
    assert_eq!(path(chart.area()), "");
    assert_eq!(text(chart.city_name()), "");
    assert_eq!(chart.area().map(|mark| mark.style.opacity), Some(0.0));

    let ring = chart.mark(MarkRole::GuideRing, "90").expect("ring");
    let Geometry::Circle { cx, cy, r } = ring.geometry else {
        panic!("expected a circle");
    };
    assert_relative_eq!(cx, 230.0);
    assert_relative_eq!(cy, 230.0);
    assert_relative_eq!(r, 40.0 + 160.0 * 80.0 / 90.0);
    assert_eq!(
        text(chart.mark(MarkRole::GuideLabel, "30")),
        "30°"
    );
}

#[test]
fn nyc_step_fills_the_band_with_the_mean_high_color() {
    let mut chart = chart();
    assert!(chart.fire(Step::Nyc).expect("fire"));

    let context = chart.context();
    let mean = context.mean_high("NYC").expect("mean");
    assert_relative_eq!(mean, 747.0 / 12.0);
    let expected = context.color_scale().color(mean).expect("color");

    let area = chart.area().expect("area");
    assert_eq!(area.style.fill, Paint::Solid(expected));
    assert_relative_eq!(area.style.opacity, 0.6);
    assert!(path(chart.area()).starts_with('M'));
    assert!(path(chart.area()).ends_with('Z'));
    assert_eq!(text(chart.city_name()), "NYC");
    assert_eq!(chart.city_name().map(|mark| mark.style.font_weight), Some(Some(700)));
    assert_eq!(chip_fill(&chart, "NYC"), Paint::Solid(expected));
    assert_eq!(chip_fill(&chart, "Beijing"), Paint::None);
}

#[test]
fn beijing_replaces_path_fill_and_name_entirely() {
    let mut chart = chart();
    chart.fire(Step::Nyc).expect("nyc");
    let nyc_path = path(chart.area());
    let nyc_color = chart.context().city_color("NYC").expect("color");

    chart.fire(Step::Beijing).expect("beijing");
    let beijing_color = chart.context().city_color("Beijing").expect("color");

    assert_ne!(path(chart.area()), nyc_path);
    assert_ne!(nyc_color, beijing_color);
    assert_eq!(
        chart.area().map(|mark| mark.style.fill),
        Some(Paint::Solid(beijing_color))
    );
    assert_eq!(text(chart.city_name()), "Beijing");
    assert_eq!(chart.scene().with_role(MarkRole::TemperatureArea).count(), 1);
    assert_eq!(chart.scene().with_role(MarkRole::CityName).count(), 1);

    // Both chips up to Beijing are lit.
    assert_eq!(chip_fill(&chart, "NYC"), Paint::Solid(nyc_color));
    assert_eq!(chip_fill(&chart, "Beijing"), Paint::Solid(beijing_color));
    assert_eq!(chip_fill(&chart, "Lima"), Paint::None);
}

#[test]
fn repeated_firing_does_not_grow_the_band() {
    let mut chart = chart();
    chart.fire(Step::Nyc).expect("fire");
    let first = path(chart.area());
    for _ in 0..3 {
        chart.fire(Step::Beijing).expect("beijing");
        chart.fire(Step::Nyc).expect("nyc");
    }
    assert_eq!(path(chart.area()), first);
    // 12 outer points plus the closing month, then 13 inner points.
    assert_eq!(first.matches('L').count(), 12 + 13);
}

#[test]
fn warmer_cities_lean_toward_the_hot_color() {
    let chart = chart();
    let context = chart.context();
    let nyc = context.city_color("NYC").expect("nyc");
    let lima = context.city_color("Lima").expect("lima");
    assert!(lima.red > nyc.red);
    assert!(lima.blue < nyc.blue);
}

#[test]
fn cities_are_keyed_by_name_not_position() {
    let mut records = common::city("Lima", [70.0; 12], 5.0);
    records.extend(common::city("NYC", [50.0; 12], 5.0));
    let mut chart = RadialChart::new(records, RadialChartConfig::default()).expect("chart");

    chart.fire(Step::Nyc).expect("fire");
    assert_eq!(text(chart.city_name()), "NYC");
    assert_relative_eq!(chart.context().mean_high("NYC").expect("mean"), 50.0);
}

#[test]
fn steps_without_city_data_stay_unregistered() {
    let mut chart = chart();
    assert!(!chart.fire(Step::Stockholm).expect("no-op"));
    assert!(!chart.fire(Step::Tuscon).expect("no-op"));
    assert!(chart.mark(MarkRole::CityChip, "Stockholm").is_none());

    let table = chart.transition_table().expect("table");
    assert_eq!(
        table.target(Step::Lima),
        Some(&CityView {
            city: "Lima".to_owned(),
            revealed: 3,
        })
    );
}

#[test]
fn city_steps_are_configurable() {
    let config = RadialChartConfig {
        city_steps: vec![
            CityStep::new(Step::Nyc, "Lima"),
            CityStep::new(Step::Lima, "NYC"),
        ],
        ..RadialChartConfig::default()
    };
    let mut chart = RadialChart::new(common::temperatures(), config).expect("chart");
    chart.fire(Step::Nyc).expect("fire");
    assert_eq!(text(chart.city_name()), "Lima");
}

#[test]
fn records_with_unknown_months_are_skipped() {
    let mut records = common::city("NYC", [50.0; 12], 5.0);
    records.push(TemperatureRecord::new("NYC", "Sep", 500.0, 490.0));
    let chart = RadialChart::new(records, RadialChartConfig::default()).expect("chart");
    assert_relative_eq!(chart.context().mean_high("NYC").expect("mean"), 50.0);
}
