// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guide assembly demos for `vizir_guides`.
//!
//! Each demo builds a small plot description, assembles its guide area and writes it as an
//! SVG file into the current directory. Set `RUST_LOG=vizir_guides=debug` to see the
//! pipeline's trace output.
mod svg;

use std::error::Error;

use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vizir_guides::{
    AesValue, Aesthetic, Direction, Geom, Guide, GuideRegistry, GuideSpec, Guides,
    HeuristicTextMeasurer, Layer, LegendGuide, Linetype, Plot, Scale, Symbol, Theme,
    colorbar_plain, legend_row,
};

type DemoResult = Result<Plot, Box<dyn Error>>;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vizir_guides_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut registry = GuideRegistry::default();
    registry.register("legend_row", legend_row);
    registry.register("colorbar_plain", colorbar_plain);

    let demos: [(&str, fn() -> DemoResult); 5] = [
        ("merged_color_fill", merged_color_fill),
        ("ordered_legends", ordered_legends),
        ("bottom_horizontal", bottom_horizontal),
        ("colorbars", colorbars),
        ("line_types", line_types),
    ];

    for (name, build) in demos {
        let mut plot = build()?;
        let Some(area) = plot.build_guides_with(&registry, &HeuristicTextMeasurer)? else {
            tracing::warn!(demo = name, "no guides produced");
            continue;
        };
        let mut scene = svg::SvgScene::default();
        scene.add_area(&area);
        let path = format!("vizir_guides_demo_{name}.svg");
        std::fs::write(&path, scene.to_svg_string())?;
        tracing::info!(
            demo = name,
            guides = area.children.len(),
            width = area.size.width,
            height = area.size.height,
            "wrote {path}"
        );
    }
    Ok(())
}

fn cyl_scale(aesthetic: Aesthetic) -> Scale {
    Scale::discrete(aesthetic).with_levels([
        ("4", AesValue::Color(Color::from_rgb8(0x1b, 0x9e, 0x77))),
        ("6", AesValue::Color(Color::from_rgb8(0xd9, 0x5f, 0x02))),
        ("8", AesValue::Color(Color::from_rgb8(0x75, 0x70, 0xb3))),
    ])
}

/// `color` and `fill` mapped from one variable collapse into a single legend whose keys
/// show both the point and the bar glyph.
fn merged_color_fill() -> DemoResult {
    Ok(Plot::new()
        .with_label(Aesthetic::Color, "factor(cyl)")
        .with_label(Aesthetic::Fill, "factor(cyl)")
        .with_scale(cyl_scale(Aesthetic::Color))
        .with_scale(cyl_scale(Aesthetic::Fill))
        .with_layer(
            Layer::new(Geom::Rect)
                .with_mapping(Aesthetic::Fill)
                .with_param(Aesthetic::Alpha, AesValue::Alpha(0.35)),
        )
        .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color)))
}

/// Three legends, with explicit `order` on two of them; the unordered one goes last.
fn ordered_legends() -> DemoResult {
    let shapes = Scale::discrete(Aesthetic::Shape)
        .with_name("gear")
        .with_levels([
            ("3", AesValue::Shape(Symbol::Circle)),
            ("4", AesValue::Shape(Symbol::Triangle)),
            ("5", AesValue::Shape(Symbol::Square)),
        ])
        .with_guide(Guide::legend().with_order(2));
    let sizes = Scale::discrete(Aesthetic::Size)
        .with_name("carb")
        .with_levels([
            ("1", AesValue::Size(3.0)),
            ("2", AesValue::Size(6.0)),
            ("4", AesValue::Size(9.0)),
            ("8", AesValue::Size(12.0)),
        ])
        .with_guide(Guide::legend().with_order(1));

    Ok(Plot::new()
        .with_label(Aesthetic::Color, "cyl")
        .with_scale(cyl_scale(Aesthetic::Color))
        .with_scale(shapes)
        .with_scale(sizes)
        .with_layer(
            Layer::new(Geom::Point)
                .with_mapping(Aesthetic::Color)
                .with_mapping(Aesthetic::Shape)
                .with_mapping(Aesthetic::Size),
        ))
}

/// Legends below the panel: horizontal keys, boxes side by side and centered.
fn bottom_horizontal() -> DemoResult {
    let theme = Theme::default()
        .with_param("legend_position", "bottom")?
        .with_param("legend_box", "horizontal")?;
    let overrides = Guides::from_pairs([
        ("colour", GuideSpec::from(Guide::legend().with_title("Cylinders"))),
        ("shape", GuideSpec::named("legend_row")),
    ]);
    Ok(ordered_legends()?
        .with_theme(theme)
        .with_guides(&overrides))
}

/// A continuous fill scale with the default colorbar next to a plain horizontal one.
fn colorbars() -> DemoResult {
    let density = Scale::continuous(Aesthetic::Fill)
        .with_name("density")
        .with_break(0.0, "0.00", AesValue::Color(css::NAVY))
        .with_break(0.02, "0.02", AesValue::Color(css::TEAL))
        .with_break(0.04, "0.04", AesValue::Color(css::GOLD));
    let depth = Scale::continuous(Aesthetic::Color)
        .with_name("depth")
        .with_limits(0.0, 100.0)
        .with_break(0.0, "0", AesValue::Color(css::BLACK))
        .with_break(50.0, "50", AesValue::Color(css::CRIMSON))
        .with_break(100.0, "100", AesValue::Color(css::WHITE))
        .with_guide(colorbar_plain().with_direction(Direction::Horizontal));

    Ok(Plot::new()
        .with_scale(density)
        .with_scale(depth)
        .with_layer(Layer::new(Geom::Rect).with_mapping(Aesthetic::Fill))
        .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color)))
}

/// Line keys with dash patterns, laid out in two columns.
fn line_types() -> DemoResult {
    let linetypes = Scale::discrete(Aesthetic::Linetype)
        .with_name("treatment")
        .with_levels([
            ("control", AesValue::Linetype(Linetype::Solid)),
            ("low dose", AesValue::Linetype(Linetype::Dashed)),
            ("high dose", AesValue::Linetype(Linetype::Dotted)),
            ("washout", AesValue::Linetype(Linetype::DotDash)),
        ])
        .with_guide(Guide::from(LegendGuide::default().with_ncol(2)));

    Ok(Plot::new().with_scale(linetypes).with_layer(
        Layer::new(Geom::Line)
            .with_mapping(Aesthetic::Linetype)
            .with_param(Aesthetic::Size, AesValue::Size(1.5)),
    ))
}
