use crate::core::Color;
use crate::core::shapes::format_coord;
use crate::render::{Geometry, Layer, Mark, MarkId, MarkRole, Style, TextAnchor, TextGeometry};

const AXIS_FONT_SIZE_PX: f64 = 10.0;
const AXIS_TICK_PADDING_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AxisOrient {
    Left,
    Bottom,
}

/// One tick: its data value (used in the mark key), pixel position and label.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Axis appearance. A negative `tick_size_inner` turns ticks into grid lines
/// spanning the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AxisSpec {
    pub orient: AxisOrient,
    pub name: &'static str,
    pub tick_size_inner: f64,
    pub show_domain: bool,
    /// Perpendicular offset of the axis line (plot height for a bottom axis).
    pub offset: f64,
    pub line_color: Color,
    pub label_color: Color,
}

impl AxisSpec {
    pub(crate) fn new(orient: AxisOrient, name: &'static str) -> Self {
        Self {
            orient,
            name,
            tick_size_inner: 6.0,
            show_domain: true,
            offset: 0.0,
            line_color: Color::BLACK,
            label_color: Color::BLACK,
        }
    }
}

/// Tick lines, tick labels and the optional domain line of one axis.
pub(crate) fn axis_marks(spec: AxisSpec, ticks: &[AxisTick], range: (f64, f64)) -> Vec<Mark> {
    let class = format!("{}-axis", spec.name);
    let key = |value: f64| format!("{}:{}", spec.name, format_coord(value));
    let line_style = Style::stroked(spec.line_color, 1.0);
    let label_style = Style::filled(spec.label_color);
    let spacing = spec.tick_size_inner.max(0.0) + AXIS_TICK_PADDING_PX;

    let mut marks = Vec::with_capacity(ticks.len() * 2 + 1);
    if spec.show_domain {
        let geometry = match spec.orient {
            AxisOrient::Left => Geometry::Line {
                x1: spec.offset,
                y1: range.0,
                x2: spec.offset,
                y2: range.1,
            },
            AxisOrient::Bottom => Geometry::Line {
                x1: range.0,
                y1: spec.offset,
                x2: range.1,
                y2: spec.offset,
            },
        };
        marks.push(
            Mark::new(MarkId::new(MarkRole::AxisDomain, spec.name), Layer::Axis, geometry)
                .with_class(class.clone())
                .with_style(line_style),
        );
    }

    for tick in ticks {
        let (line, text) = match spec.orient {
            AxisOrient::Left => (
                Geometry::Line {
                    x1: spec.offset,
                    y1: tick.position,
                    x2: spec.offset - spec.tick_size_inner,
                    y2: tick.position,
                },
                TextGeometry::new(
                    tick.label.clone(),
                    spec.offset - spacing,
                    tick.position,
                    AXIS_FONT_SIZE_PX,
                )
                .with_offset(0.0, AXIS_FONT_SIZE_PX * 0.32)
                .with_anchor(TextAnchor::End),
            ),
            AxisOrient::Bottom => (
                Geometry::Line {
                    x1: tick.position,
                    y1: spec.offset,
                    x2: tick.position,
                    y2: spec.offset + spec.tick_size_inner,
                },
                TextGeometry::new(
                    tick.label.clone(),
                    tick.position,
                    spec.offset + spacing,
                    AXIS_FONT_SIZE_PX,
                )
                .with_offset(0.0, AXIS_FONT_SIZE_PX * 0.71)
                .with_anchor(TextAnchor::Middle),
            ),
        };

        marks.push(
            Mark::new(MarkId::new(MarkRole::AxisTick, key(tick.value)), Layer::Axis, line)
                .with_class(class.clone())
                .with_style(line_style),
        );
        marks.push(
            Mark::new(
                MarkId::new(MarkRole::AxisLabel, key(tick.value)),
                Layer::Axis,
                Geometry::Text(text),
            )
            .with_class(class.clone())
            .with_style(label_style),
        );
    }
    marks
}
