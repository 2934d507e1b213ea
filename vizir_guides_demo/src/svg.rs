// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `vizir_guides_demo`.

use kurbo::{Rect, Vec2};
use peniko::Brush;
use vizir_guides::{CompositeGuideBox, GuideItem, StrokeStyle, TextAnchor};

/// Margin around the guide area.
const PAD: f64 = 10.0;

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    items: Vec<GuideItem>,
    view_box: Option<Rect>,
    outlines: Vec<Rect>,
}

impl SvgScene {
    /// Adds a packed guide area, with dashed outlines around each child box.
    pub(crate) fn add_area(&mut self, area: &CompositeGuideBox) {
        let origin = Vec2::new(PAD, PAD);
        self.items
            .extend(area.items().iter().map(|item| item.translated(origin)));
        self.outlines
            .extend(area.child_rects().into_iter().map(|r| r + origin));
        self.view_box = Some(Rect::new(
            0.0,
            0.0,
            area.size.width + 2.0 * PAD,
            area.size.height + 2.0 * PAD,
        ));
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        for r in &self.outlines {
            out.push_str(&format!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#cccccc" stroke-dasharray="2 2"/>"##,
                r.x0,
                r.y0,
                r.width(),
                r.height(),
            ));
            out.push('\n');
        }

        for item in &self.items {
            match item {
                GuideItem::Rect { rect, fill, stroke } => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", fill);
                    if let Some(stroke) = stroke {
                        write_stroke_attrs(&mut out, stroke);
                    }
                    out.push_str("/>\n");
                }
                GuideItem::Path { path, fill, stroke } => {
                    let d = path.to_svg();
                    out.push_str(&format!(r#"<path d="{d}""#));
                    match fill {
                        Some(fill) => write_paint_attr(&mut out, "fill", fill),
                        None => out.push_str(r#" fill="none""#),
                    }
                    if let Some(stroke) = stroke {
                        write_stroke_attrs(&mut out, stroke);
                    }
                    out.push_str("/>\n");
                }
                GuideItem::Text {
                    pos,
                    text,
                    font_size,
                    anchor,
                    fill,
                } => {
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="middle""#,
                        pos.x, pos.y, font_size
                    ));
                    out.push_str(match anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", fill);
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_stroke_attrs(out: &mut String, stroke: &StrokeStyle) {
    if stroke.stroke_width <= 0.0 {
        return;
    }
    write_paint_attr(out, "stroke", &stroke.brush);
    out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
    if !stroke.dash.is_empty() {
        let dash: Vec<String> = stroke.dash.iter().map(f64::to_string).collect();
        out.push_str(&format!(r#" stroke-dasharray="{}""#, dash.join(" ")));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
