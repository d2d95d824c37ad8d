mod common;

use scrolly_charts::charts::{BarChartConfig, LineChartConfig, RadialChartConfig};
use scrolly_charts::core::Viewport;
use scrolly_charts::{BarChart, ChartId, LineChart, RadialChart, ScrollyChart, Step};

fn bar_chart() -> BarChart {
    BarChart::new(common::countries(), BarChartConfig::default()).expect("bar chart")
}

fn line_chart() -> LineChart {
    LineChart::new(common::housing(), LineChartConfig::default()).expect("line chart")
}

fn radial_chart() -> RadialChart {
    RadialChart::new(common::temperatures(), RadialChartConfig::default()).expect("radial chart")
}

fn assert_idempotent<C: ScrollyChart>(make: impl Fn() -> C) {
    let steps = make().steps();
    assert!(!steps.is_empty());
    for step in steps {
        let mut once = make();
        once.fire(step).expect("fire once");
        let mut twice = make();
        twice.fire(step).expect("fire");
        twice.fire(step).expect("fire again");
        assert_eq!(once.scene(), twice.scene(), "{step} is not idempotent");
    }
}

fn assert_total<C: ScrollyChart>(make: impl Fn() -> C) {
    let steps = make().steps();
    for &first in &steps {
        for &second in &steps {
            let mut sequenced = make();
            sequenced.fire(first).expect("first");
            sequenced.fire(second).expect("second");
            let mut direct = make();
            direct.fire(second).expect("direct");
            assert_eq!(
                sequenced.scene(),
                direct.scene(),
                "{first} then {second} differs from {second} alone"
            );
            assert_eq!(sequenced.current_step(), Some(second));
        }
    }
}

#[test]
fn bar_steps_are_idempotent() {
    assert_idempotent(bar_chart);
}

#[test]
fn bar_steps_are_total_over_every_pair() {
    assert_total(bar_chart);
}

#[test]
fn bar_steps_and_resize_commute() {
    let viewport = Viewport::new(1020, 600);
    for step in bar_chart().steps() {
        let mut fired_first = bar_chart();
        fired_first.fire(step).expect("fire");
        fired_first.resize(viewport).expect("resize");

        let mut resized_first = bar_chart();
        resized_first.resize(viewport).expect("resize");
        resized_first.fire(step).expect("fire");

        assert_eq!(
            fired_first.scene(),
            resized_first.scene(),
            "{step} and resize depend on order"
        );
        assert_eq!(fired_first.plot_area(), resized_first.plot_area());
    }
}

#[test]
fn redraw_keeps_the_current_step_on_screen() {
    for step in bar_chart().steps() {
        let mut redrawn = bar_chart();
        redrawn.fire(step).expect("fire");
        redrawn.redraw().expect("redraw");
        let mut direct = bar_chart();
        direct.fire(step).expect("fire");
        assert_eq!(redrawn.scene(), direct.scene(), "bar {step}");
        assert_eq!(redrawn.current_step(), Some(step));
    }
    for step in line_chart().steps() {
        let mut redrawn = line_chart();
        redrawn.fire(step).expect("fire");
        redrawn.redraw().expect("redraw");
        let mut direct = line_chart();
        direct.fire(step).expect("fire");
        assert_eq!(redrawn.scene(), direct.scene(), "line {step}");
    }
    for step in radial_chart().steps() {
        let mut redrawn = radial_chart();
        redrawn.fire(step).expect("fire");
        redrawn.redraw().expect("redraw");
        let mut direct = radial_chart();
        direct.fire(step).expect("fire");
        assert_eq!(redrawn.scene(), direct.scene(), "radial {step}");
    }

    let mut untouched = bar_chart();
    untouched.redraw().expect("redraw");
    assert_eq!(untouched.scene(), bar_chart().scene());
    assert_eq!(untouched.current_step(), None);
}

#[test]
fn line_steps_are_idempotent() {
    assert_idempotent(line_chart);
}

#[test]
fn line_steps_are_total_over_every_pair() {
    assert_total(line_chart);
}

#[test]
fn radial_steps_are_idempotent() {
    assert_idempotent(radial_chart);
}

#[test]
fn radial_steps_are_total_over_every_pair() {
    assert_total(radial_chart);
}

#[test]
fn scrolling_back_up_restores_the_earlier_state() {
    let mut chart = line_chart();
    for step in [
        Step::DrawLines,
        Step::HighlightUs,
        Step::HighlightRegions,
        Step::DrawRectangle,
    ] {
        chart.fire(step).expect("scroll down");
    }
    chart.fire(Step::HighlightUs).expect("scroll up");

    let mut direct = line_chart();
    direct.fire(Step::HighlightUs).expect("direct");
    assert_eq!(chart.scene(), direct.scene());
}

#[test]
fn each_chart_registers_only_its_own_steps() {
    let bar = bar_chart();
    let line = line_chart();
    let radial = radial_chart();

    assert_eq!(
        bar.steps(),
        Step::for_chart(ChartId::LifeExpectancy).collect::<Vec<_>>()
    );
    assert_eq!(
        line.steps(),
        Step::for_chart(ChartId::HousingPrices).collect::<Vec<_>>()
    );
    // Stockholm and Tuscon have no data in the fixture.
    assert_eq!(radial.steps(), vec![Step::Nyc, Step::Beijing, Step::Lima]);

    let charts: [&dyn ScrollyChart; 3] = [&bar, &line, &radial];
    for chart in charts {
        for step in chart.steps() {
            assert_eq!(step.chart(), chart.chart_id());
        }
    }
}

#[test]
fn foreign_steps_leave_every_chart_untouched() {
    let mut charts: Vec<Box<dyn ScrollyChart>> = vec![
        Box::new(bar_chart()),
        Box::new(line_chart()),
        Box::new(radial_chart()),
    ];
    for chart in &mut charts {
        let before = chart.scene().clone();
        let id = chart.chart_id();
        for step in Step::ALL.into_iter().filter(|step| step.chart() != id) {
            assert!(!chart.fire(step).expect("no-op"));
        }
        assert_eq!(chart.scene(), &before);
        assert_eq!(chart.current_step(), None);
    }
}
