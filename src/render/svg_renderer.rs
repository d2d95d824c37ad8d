use std::fmt::Write;

use crate::core::shapes::format_coord;
use crate::error::{ChartError, ChartResult};
use crate::render::{Geometry, Mark, Paint, RenderFrame, Renderer};

/// Renders frames into standalone SVG documents.
///
/// The last rendered document is kept in memory; hosts write it wherever
/// they need it.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = write_document(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        Ok(())
    }
}

fn write_document(frame: &RenderFrame) -> Result<String, std::fmt::Error> {
    let mut svg = String::new();
    let (width, height) = (frame.viewport.width, frame.viewport.height);
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(
        svg,
        r#"  <g id="{}" transform="translate({},{})">"#,
        escape_xml(&frame.container_id),
        format_coord(frame.origin.0),
        format_coord(frame.origin.1)
    )?;
    for mark in &frame.marks {
        write_mark(&mut svg, mark)?;
    }
    svg.push_str("  </g>\n</svg>\n");
    Ok(svg)
}

fn write_mark(svg: &mut String, mark: &Mark) -> std::fmt::Result {
    let common = common_attributes(mark)?;
    match &mark.geometry {
        Geometry::Rect {
            x,
            y,
            width,
            height,
        } => writeln!(
            svg,
            r#"    <rect x="{}" y="{}" width="{}" height="{}"{common}/>"#,
            format_coord(*x),
            format_coord(*y),
            format_coord(*width),
            format_coord(*height)
        ),
        Geometry::Line { x1, y1, x2, y2 } => writeln!(
            svg,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}"{common}/>"#,
            format_coord(*x1),
            format_coord(*y1),
            format_coord(*x2),
            format_coord(*y2)
        ),
        Geometry::Circle { cx, cy, r } => writeln!(
            svg,
            r#"    <circle cx="{}" cy="{}" r="{}"{common}/>"#,
            format_coord(*cx),
            format_coord(*cy),
            format_coord(*r)
        ),
        Geometry::Path { d } => writeln!(svg, r#"    <path d="{}"{common}/>"#, escape_xml(d)),
        Geometry::Text(text) => writeln!(
            svg,
            r#"    <text x="{}" y="{}" dx="{}" dy="{}" font-size="{}" text-anchor="{}"{common}>{}</text>"#,
            format_coord(text.x),
            format_coord(text.y),
            format_coord(text.dx),
            format_coord(text.dy),
            format_coord(text.font_size_px),
            text.anchor.as_str(),
            escape_xml(&text.text)
        ),
    }
}

fn paint_attribute(paint: Paint) -> String {
    match paint {
        Paint::None => "none".to_owned(),
        Paint::Solid(color) => color.to_hex(),
    }
}

fn common_attributes(mark: &Mark) -> Result<String, std::fmt::Error> {
    let mut attrs = String::new();
    let style = &mark.style;
    write!(attrs, r#" data-mark="{}""#, escape_xml(&mark.id.to_string()))?;

    let mut classes = vec![mark.id.role.as_str().to_owned()];
    classes.extend(mark.classes.iter().cloned());
    write!(attrs, r#" class="{}""#, escape_xml(&classes.join(" ")))?;

    write!(attrs, r#" fill="{}""#, paint_attribute(style.fill))?;
    write!(attrs, r#" stroke="{}""#, paint_attribute(style.stroke))?;
    if let Some(width) = style.stroke_width {
        write!(attrs, r#" stroke-width="{}""#, format_coord(width))?;
    }
    if style.opacity < 1.0 {
        write!(attrs, r#" opacity="{}""#, format_coord(style.opacity))?;
    }
    if let Some(weight) = style.font_weight {
        write!(attrs, r#" font-weight="{weight}""#)?;
    }
    if let Some(duration) = style.transition_ms {
        write!(attrs, r#" style="transition: all {duration}ms""#)?;
    }
    Ok(attrs)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Margin, PlotArea, Viewport};
    use crate::render::{Layer, MarkId, MarkRole, Scene, Style, TextGeometry};

    #[test]
    fn writes_translated_group_with_classed_marks() {
        let mut scene = Scene::new();
        scene.upsert(
            Mark::new(
                MarkId::new(MarkRole::Bar, "Chad"),
                Layer::Marks,
                Geometry::Rect {
                    x: 1.0,
                    y: 2.5,
                    width: 3.0,
                    height: 4.0,
                },
            )
            .with_class("africa")
            .with_style(Style::filled(Color::LIGHT_GREY)),
        );
        scene.upsert(Mark::new(
            MarkId::new(MarkRole::Note, "lower"),
            Layer::Labels,
            Geometry::Text(TextGeometry::new("<lower & \"GDP\">", 0.0, 0.0, 12.0)),
        ));

        let plot = PlotArea::new(Viewport::new(700, 400), Margin::new(30.0, 20.0, 30.0, 50.0))
            .expect("plot");
        let mut renderer = SvgRenderer::new();
        renderer
            .render(&scene.frame(plot, "chart-1"))
            .expect("render");
        let svg = renderer.document();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"700\""));
        assert!(svg.contains(r#"<g id="chart-1" transform="translate(50,30)">"#));
        assert!(svg.contains(
            r##"<rect x="1" y="2.5" width="3" height="4" data-mark="bar/Chad" class="bar africa" fill="#d3d3d3" stroke="none"/>"##
        ));
        assert!(svg.contains("&lt;lower &amp; &quot;GDP&quot;&gt;</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn optional_style_attributes_follow_the_paint() {
        let mark = Mark::new(
            MarkId::new(MarkRole::PriceLine, "U.S."),
            Layer::Marks,
            Geometry::Path { d: "M0,0".to_owned() },
        )
        .with_class("us")
        .with_style(Style {
            opacity: 0.5,
            font_weight: Some(800),
            transition_ms: Some(250),
            ..Style::stroked(Color::RED, 2.0)
        });
        assert_eq!(
            common_attributes(&mark).expect("attributes"),
            r##" data-mark="price-line/U.S." class="price-line us" fill="none" stroke="#ff0000" stroke-width="2" opacity="0.5" font-weight="800" style="transition: all 250ms""##
        );
    }

    #[test]
    fn rejects_invalid_frames() {
        let mut scene = Scene::new();
        scene.upsert(Mark::new(
            MarkId::new(MarkRole::Bar, "bad"),
            Layer::Marks,
            Geometry::Circle {
                cx: f64::NAN,
                cy: 0.0,
                r: 1.0,
            },
        ));
        let plot = PlotArea::new(Viewport::new(10, 10), Margin::uniform(1.0)).expect("plot");
        let mut renderer = SvgRenderer::new();
        assert!(renderer.render(&scene.frame(plot, "chart-1")).is_err());
        assert!(renderer.document().is_empty());
    }
}
