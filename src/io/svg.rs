//! SVG serialization of a classified pattern
//!
//! The drawing uses input units at 1:1 scale with the y-axis flipped, so a length
//! measured in the document equals the same length in the input. Annotations are
//! laid out in strip coordinates and mapped back to the world before the canvas is
//! sized, so every glyph lies inside the `viewBox`.

use std::fmt::Write;

use crate::algorithm::classifier::{FriezeClassification, FriezeGroup};
use crate::algorithm::symmetry::{Symmetry, SymmetryCandidate, SymmetryKind};
use crate::io::configuration::{
    DEFAULT_MARGIN_FRACTION, MIN_MARGIN, POINT_RADIUS_FRACTION, STROKE_FRACTION,
};
use crate::spatial::pattern::{BoundingBox, PatternSet};
use crate::spatial::primitive::{Point, Shape};
use crate::spatial::strip::{StripExtent, StripFrame, StripPoint};

// Glyph size relative to the larger of the drawing diagonal and the period
const GLYPH_FRACTION: f64 = 0.03;

const STYLE: &str = "\
.point { fill: #222222; }
.segment { stroke: #222222; stroke-linecap: round; }
.period-bracket { stroke: #1f77b4; fill: none; }
.mirror-horizontal, .mirror-vertical { stroke: #d62728; stroke-dasharray: 4 2; fill: none; }
.rotation-center { stroke: #2ca02c; fill: #2ca02c; fill-opacity: 0.4; }
.glide-axis { stroke: #9467bd; stroke-dasharray: 6 2 1 2; fill: none; }
.fundamental-domain { stroke: #ff7f0e; fill: #ff7f0e; fill-opacity: 0.12; }
.caption { font-family: sans-serif; fill: #222222; }";

/// Diagram layout settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Margin around the drawing as a fraction of its diagonal
    pub margin_fraction: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin_fraction: DEFAULT_MARGIN_FRACTION,
        }
    }
}

/// Render a classified pattern with the default layout
pub fn render(pattern: &PatternSet, classification: &FriezeClassification) -> String {
    SvgRenderer::new(RenderConfig::default()).render(pattern, classification)
}

/// Escape the five XML special characters
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// World-space geometry of one annotation
#[derive(Debug, Clone)]
enum Mark {
    Line(Point, Point),
    Polygon(Vec<Point>),
}

impl Mark {
    fn points(&self) -> Vec<Point> {
        match self {
            Self::Line(a, b) => vec![*a, *b],
            Self::Polygon(points) => points.clone(),
        }
    }
}

/// Annotation group drawn for one accepted candidate
#[derive(Debug, Clone)]
struct Annotation {
    class: &'static str,
    kind: SymmetryKind,
    label: String,
    marks: Vec<Mark>,
}

/// Maps world points into document coordinates
#[derive(Debug, Clone, Copy)]
struct Canvas {
    min_x: f64,
    max_y: f64,
    margin: f64,
    width: f64,
    height: f64,
}

impl Canvas {
    fn around(bounds: &BoundingBox, margin_fraction: f64) -> Self {
        let margin = (margin_fraction * bounds.diagonal()).max(MIN_MARGIN);
        Self {
            min_x: bounds.min.x,
            max_y: bounds.max.y,
            margin,
            width: 2.0f64.mul_add(margin, bounds.width()),
            height: 2.0f64.mul_add(margin, bounds.height()),
        }
    }

    fn map(&self, p: Point) -> (f64, f64) {
        (p.x - self.min_x + self.margin, self.max_y - p.y + self.margin)
    }
}

/// Serializes classified patterns to SVG
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    /// Create a renderer
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Produce one self-contained SVG document
    pub fn render(&self, pattern: &PatternSet, classification: &FriezeClassification) -> String {
        debug_assert!(classification.period() > 0.0, "classified period must be positive");
        debug_assert!(!pattern.is_empty(), "pattern sets are never empty");

        let layout = Layout::new(pattern, classification);
        let annotations: Vec<Annotation> = classification
            .candidates()
            .iter()
            .map(|candidate| layout.annotate(candidate))
            .collect();
        let domain = layout.fundamental_domain(classification);

        let drawn = pattern
            .primitives()
            .iter()
            .flat_map(|p| p.shape.endpoints())
            .chain(annotations.iter().flat_map(|a| a.marks.iter().flat_map(Mark::points)))
            .chain(domain.iter().copied());
        let bounds = BoundingBox::enclosing(drawn).unwrap_or(*pattern.bounds());
        let canvas = Canvas::around(&bounds, self.config.margin_fraction);

        let scale = bounds.diagonal().max(classification.period());
        let stroke = STROKE_FRACTION * scale;
        let group = classification.group();
        let summary = format!(
            "{} ({}), period {:.3}",
            group.name(),
            group.conway_name(),
            classification.period()
        );

        let mut out = String::new();
        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.3}" height="{h:.3}" viewBox="0 0 {w:.3} {h:.3}">"#,
            w = canvas.width,
            h = canvas.height,
        );
        let _ = writeln!(out, "  <title>Frieze group {}</title>", xml_escape(&summary));
        let _ = writeln!(
            out,
            "  <desc>{}</desc>",
            xml_escape(&describe(classification))
        );
        let _ = writeln!(out, "  <style>\n{STYLE}\n  </style>");

        write_domain(&mut out, &canvas, &domain, group, stroke);
        write_pattern(&mut out, &canvas, pattern, POINT_RADIUS_FRACTION * scale, stroke);

        let _ = writeln!(out, r#"  <g id="symmetries">"#);
        for annotation in &annotations {
            write_annotation(&mut out, &canvas, annotation, stroke);
        }
        let _ = writeln!(out, "  </g>");

        let font_size = 0.5 * canvas.margin;
        let _ = writeln!(
            out,
            r#"  <text class="caption" x="{:.3}" y="{:.3}" font-size="{:.3}">{}</text>"#,
            0.5 * canvas.margin,
            0.7 * canvas.margin,
            font_size,
            xml_escape(&summary),
        );
        let _ = writeln!(out, "</svg>");
        out
    }
}

fn describe(classification: &FriezeClassification) -> String {
    let mut text = format!(
        "epsilon {:.4}; symmetries:",
        classification.epsilon()
    );
    for candidate in classification.candidates() {
        let _ = write!(
            text,
            " {candidate} [confidence {:.2}];",
            candidate.confidence()
        );
    }
    text
}

fn write_pattern(out: &mut String, canvas: &Canvas, pattern: &PatternSet, radius: f64, stroke: f64) {
    let _ = writeln!(out, r#"  <g id="pattern" stroke-width="{stroke:.4}">"#);
    for primitive in pattern.primitives() {
        match primitive.shape {
            Shape::Point(p) => {
                let (x, y) = canvas.map(p);
                let _ = writeln!(
                    out,
                    r#"    <circle class="point" data-index="{}" cx="{x:.4}" cy="{y:.4}" r="{radius:.4}"/>"#,
                    primitive.index,
                );
            }
            Shape::Segment(a, b) => {
                let (x1, y1) = canvas.map(a);
                let (x2, y2) = canvas.map(b);
                let _ = writeln!(
                    out,
                    r#"    <line class="segment" data-index="{}" x1="{x1:.4}" y1="{y1:.4}" x2="{x2:.4}" y2="{y2:.4}"/>"#,
                    primitive.index,
                );
            }
        }
    }
    let _ = writeln!(out, "  </g>");
}

fn write_annotation(out: &mut String, canvas: &Canvas, annotation: &Annotation, stroke: f64) {
    let _ = writeln!(
        out,
        r#"    <g class="{}" data-kind="{}" stroke-width="{stroke:.4}">"#,
        annotation.class,
        annotation.kind.name(),
    );
    let _ = writeln!(out, "      <title>{}</title>", xml_escape(&annotation.label));
    for mark in &annotation.marks {
        match mark {
            Mark::Line(a, b) => {
                let (x1, y1) = canvas.map(*a);
                let (x2, y2) = canvas.map(*b);
                let _ = writeln!(
                    out,
                    r#"      <line x1="{x1:.4}" y1="{y1:.4}" x2="{x2:.4}" y2="{y2:.4}"/>"#
                );
            }
            Mark::Polygon(points) => {
                let _ = writeln!(
                    out,
                    r#"      <polygon points="{}"/>"#,
                    polygon_points(canvas, points)
                );
            }
        }
    }
    let _ = writeln!(out, "    </g>");
}

fn write_domain(out: &mut String, canvas: &Canvas, domain: &[Point], group: FriezeGroup, stroke: f64) {
    let _ = writeln!(
        out,
        r#"  <polygon class="fundamental-domain" data-group="{}" stroke-width="{stroke:.4}" points="{}"/>"#,
        group.name(),
        polygon_points(canvas, domain),
    );
}

fn polygon_points(canvas: &Canvas, points: &[Point]) -> String {
    points
        .iter()
        .map(|&p| {
            let (x, y) = canvas.map(p);
            format!("{x:.4},{y:.4}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip-space geometry shared by every annotation
struct Layout {
    frame: StripFrame,
    extent: StripExtent,
    period: f64,
    epsilon: f64,
    glyph: f64,
}

impl Layout {
    fn new(pattern: &PatternSet, classification: &FriezeClassification) -> Self {
        let period = classification.period();
        Self {
            frame: *classification.frame(),
            extent: *classification.extent(),
            period,
            epsilon: classification.epsilon(),
            glyph: GLYPH_FRACTION * pattern.bounds().diagonal().max(period),
        }
    }

    fn world(&self, u: f64, v: f64) -> Point {
        self.frame.to_world(StripPoint::new(u, v))
    }

    fn line(&self, from: (f64, f64), to: (f64, f64)) -> Mark {
        Mark::Line(self.world(from.0, from.1), self.world(to.0, to.1))
    }

    // Positions `origin + k * step` inside the extent along the axis
    fn repeats(&self, origin: f64, step: f64) -> Vec<f64> {
        if step <= 0.0 {
            return vec![origin];
        }
        let first = first_at_or_after(origin, step, self.extent.u_min - self.epsilon);
        (0..)
            .map(|k| f64::from(k).mul_add(step, first))
            .take_while(|&u| u <= self.extent.u_max + self.epsilon)
            .collect()
    }

    fn annotate(&self, candidate: &SymmetryCandidate) -> Annotation {
        let e = self.extent;
        let g = self.glyph;
        let half = 0.5 * self.period;
        let (class, marks) = match candidate.symmetry {
            Symmetry::Translation { period } => {
                let v = 2.0f64.mul_add(-g, e.v_min);
                let start = e.u_min;
                let end = start + period;
                (
                    "period-bracket",
                    vec![
                        self.line((start, v), (end, v)),
                        self.line((start, v - 0.5 * g), (start, v + 0.5 * g)),
                        self.line((end, v - 0.5 * g), (end, v + 0.5 * g)),
                    ],
                )
            }
            Symmetry::HorizontalReflection { axis_offset } => (
                "mirror-horizontal",
                vec![self.line((e.u_min - g, axis_offset), (e.u_max + g, axis_offset))],
            ),
            Symmetry::VerticalReflection { offset } => (
                "mirror-vertical",
                self.repeats(offset, half)
                    .into_iter()
                    .map(|u| self.line((u, e.v_min - g), (u, e.v_max + g)))
                    .collect(),
            ),
            Symmetry::HalfTurn { center } => (
                "rotation-center",
                self.repeats(center.u, half)
                    .into_iter()
                    .map(|u| {
                        let r = 0.5 * g;
                        Mark::Polygon(vec![
                            self.world(u - r, center.v),
                            self.world(u, center.v + r),
                            self.world(u + r, center.v),
                            self.world(u, center.v - r),
                        ])
                    })
                    .collect(),
            ),
            Symmetry::GlideReflection { axis_offset, shift } => {
                let mut marks = vec![self.line((e.u_min - g, axis_offset), (e.u_max + g, axis_offset))];
                if shift > self.epsilon {
                    // footprints alternate sides of the glide line
                    let steps = self.repeats(e.u_min, shift);
                    for (i, u) in steps.into_iter().enumerate() {
                        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                        marks.push(self.line(
                            (u, axis_offset + side * 0.25 * g),
                            (u + 0.5 * g, axis_offset + side * 0.75 * g),
                        ));
                    }
                }
                ("glide-axis", marks)
            }
        };
        Annotation {
            class,
            kind: candidate.kind(),
            label: candidate.to_string(),
            marks,
        }
    }

    /// Outline of one fundamental domain of the group, in world coordinates
    fn fundamental_domain(&self, classification: &FriezeClassification) -> Vec<Point> {
        let e = self.extent;
        let half = 0.5 * self.period;
        let midline = e.midline();
        let first = |kind: SymmetryKind| {
            let origin = match classification.find(kind).map(|c| c.symmetry) {
                Some(Symmetry::VerticalReflection { offset }) => offset,
                Some(Symmetry::HalfTurn { center }) => center.u,
                _ => {
                    debug_assert!(false, "group is missing its {kind}");
                    e.u_min
                }
            };
            first_at_or_after(origin, half, e.u_min - self.epsilon)
        };

        let (u0, width, v_lo) = match classification.group() {
            FriezeGroup::P1 => (e.u_min, self.period, e.v_min),
            FriezeGroup::P11g => (e.u_min, half, e.v_min),
            FriezeGroup::P1m1 => (first(SymmetryKind::VerticalReflection), half, e.v_min),
            FriezeGroup::P2 => (first(SymmetryKind::HalfTurn), half, e.v_min),
            FriezeGroup::P11m => (e.u_min, self.period, midline),
            FriezeGroup::P2mg | FriezeGroup::P2mm => {
                (first(SymmetryKind::VerticalReflection), half, midline)
            }
        };
        vec![
            self.world(u0, v_lo),
            self.world(u0 + width, v_lo),
            self.world(u0 + width, e.v_max),
            self.world(u0, e.v_max),
        ]
    }
}

// Smallest `origin + k * step` (integer k) that is not below `bound`
fn first_at_or_after(origin: f64, step: f64, bound: f64) -> f64 {
    ((bound - origin) / step).ceil().mul_add(step, origin)
}
