// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end guide building scenarios.

use peniko::color::palette::css;
use vizir_guides::{
    AesValue, Aesthetic, ColorbarGuide, Direction, Geom, Guide, GuideError, GuideItem,
    GuideRegistry, GuideSpec, Guides, HeuristicTextMeasurer, Justification, Layer, LegendBox,
    LegendPosition, Plot, Scale, Symbol, Theme, Title,
};

fn cyl_levels(aesthetic: Aesthetic) -> Scale {
    Scale::discrete(aesthetic).with_levels([
        ("4", AesValue::Color(css::RED)),
        ("6", AesValue::Color(css::GREEN)),
        ("8", AesValue::Color(css::BLUE)),
    ])
}

fn shape_levels() -> Scale {
    Scale::discrete(Aesthetic::Shape).with_levels([
        ("3", AesValue::Shape(Symbol::Circle)),
        ("4", AesValue::Shape(Symbol::Triangle)),
        ("5", AesValue::Shape(Symbol::Square)),
    ])
}

fn mtcars_like() -> Plot {
    Plot::new()
        .with_label(Aesthetic::Color, "factor(cyl)")
        .with_label(Aesthetic::Fill, "factor(cyl)")
        .with_label(Aesthetic::Shape, "gear")
        .with_scale(cyl_levels(Aesthetic::Color))
        .with_scale(cyl_levels(Aesthetic::Fill))
        .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color))
        .with_layer(
            Layer::new(Geom::Rect)
                .with_mapping(Aesthetic::Fill)
                .with_param(Aesthetic::Alpha, AesValue::Alpha(0.4)),
        )
}

#[test]
fn color_and_fill_from_one_variable_merge_into_one_legend() {
    let mut plot = mtcars_like();
    let guides = Guides::new();
    let registry = GuideRegistry::default();
    plot.theme.params = plot.theme.params.with_defaults();

    let trained = guides.train(&plot, &registry).expect("valid guides");
    assert_eq!(trained.len(), 2);
    assert_eq!(trained[0].hash(), trained[1].hash());

    let merged = vizir_guides::merge(trained);
    assert_eq!(merged.len(), 1);
    let with_geoms = vizir_guides::create_geoms(merged, &plot);
    let Guide::Legend(legend) = &with_geoms[0] else {
        panic!("expected a legend");
    };
    assert_eq!(legend.keys.len(), 3);
    // Both the point layer (color) and the rect layer (fill) contribute key glyphs.
    assert_eq!(legend.glyphs.len(), 2);
    assert_eq!(legend.glyphs[0].styles[1].color, Some(css::GREEN));
    assert_eq!(legend.glyphs[1].styles[1].fill, Some(css::GREEN));
    assert_eq!(legend.glyphs[1].styles[1].alpha, Some(0.4));

    let area = plot.build_guides().expect("valid").expect("one legend");
    assert_eq!(area.children.len(), 1);
}

#[test]
fn bottom_position_resolves_horizontal_centered_layout() {
    let mut plot = mtcars_like();
    plot.theme.params.legend_position = Some(LegendPosition::Bottom);
    let area = plot.build_guides().expect("valid").expect("one legend");

    let params = &plot.theme.params;
    assert_eq!(params.legend_direction, Some(Direction::Horizontal));
    assert_eq!(params.legend_box_just, Some(Justification::Center));
    assert_eq!(area.align, Justification::Center);
}

#[test]
fn empty_plot_builds_nothing_but_fills_theme() {
    let mut plot = Plot::new();
    assert_eq!(Guides::new().build(&mut plot), Ok(None));
    let params = &plot.theme.params;
    assert_eq!(params.legend_box, Some(LegendBox::Vertical));
    assert_eq!(params.legend_key_width, params.legend_key_size);
    assert_eq!(params.legend_key_height, params.legend_key_size);
    assert_eq!(params.legend_position, Some(LegendPosition::Right));
    assert_eq!(params.legend_direction, Some(Direction::Vertical));
    assert_eq!(params.legend_box_just, Some(Justification::Left));
}

#[test]
fn disabled_scale_guides_produce_nothing() {
    let mut plot = Plot::new()
        .with_scale(cyl_levels(Aesthetic::Color).without_guide())
        .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color));
    assert_eq!(plot.build_guides(), Ok(None));

    let mut plot = Plot::new()
        .with_scale(cyl_levels(Aesthetic::Color))
        .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color))
        .with_guides(&Guides::from_pairs([("colour", GuideSpec::Disabled)]));
    assert_eq!(plot.build_guides(), Ok(None));
}

#[test]
fn plot_overrides_apply_through_build_guides() {
    let mut plot = Plot::new()
        .with_scale(cyl_levels(Aesthetic::Color).without_guide())
        .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color))
        .with_guides(&Guides::new().with(Aesthetic::Color, Guide::legend().with_title("Cyl")));
    let area = plot.build_guides().expect("valid").expect("override enables legend");
    let titled = area.items().into_iter().any(|item| {
        matches!(item, GuideItem::Text { ref text, .. } if text == "Cyl")
    });
    assert!(titled);
    // Overrides survive the build.
    assert_eq!(plot.guides.len(), 1);
}

#[test]
fn order_sorts_boxes_and_unordered_guides_go_last() {
    let mut plot = Plot::new()
        .with_label(Aesthetic::Color, "cyl")
        .with_label(Aesthetic::Shape, "gear")
        .with_label(Aesthetic::Size, "wt")
        .with_scale(cyl_levels(Aesthetic::Color))
        .with_scale(shape_levels().with_guide(Guide::legend().with_order(2)))
        .with_scale(
            Scale::discrete(Aesthetic::Size)
                .with_levels([("1", AesValue::Size(2.0)), ("2", AesValue::Size(4.0))])
                .with_guide(Guide::legend().with_order(1)),
        )
        .with_layer(
            Layer::new(Geom::Point)
                .with_mapping(Aesthetic::Color)
                .with_mapping(Aesthetic::Shape)
                .with_mapping(Aesthetic::Size),
        );
    let area = plot.build_guides().expect("valid").expect("three legends");
    let titles: Vec<String> = area
        .children
        .iter()
        .filter_map(|child| match child.guide.items.first() {
            Some(GuideItem::Text { text, .. }) => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(titles, ["wt", "gear", "cyl"]);

    // Boxes are stacked with the fixed separation.
    let rects = area.child_rects();
    assert!((rects[1].y0 - rects[0].y1 - 20.0).abs() < 1e-9);
    assert!((rects[2].y0 - rects[1].y1 - 20.0).abs() < 1e-9);
}

#[test]
fn out_of_range_order_fails_the_build() {
    for order in [100, -1] {
        let mut plot = Plot::new()
            .with_scale(cyl_levels(Aesthetic::Color).with_guide(Guide::legend().with_order(order)))
            .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color));
        assert_eq!(
            plot.build_guides(),
            Err(GuideError::OrderOutOfRange(order))
        );
    }
}

#[test]
fn legend_box_selects_the_packer() {
    let base = Plot::new()
        .with_label(Aesthetic::Color, "cyl")
        .with_label(Aesthetic::Shape, "gear")
        .with_scale(cyl_levels(Aesthetic::Color))
        .with_scale(shape_levels())
        .with_layer(
            Layer::new(Geom::Point)
                .with_mapping(Aesthetic::Color)
                .with_mapping(Aesthetic::Shape),
        );

    let mut vertical = base.clone();
    let area = vertical.build_guides().expect("valid").expect("two legends");
    assert_eq!(area.direction, LegendBox::Vertical);
    assert_eq!(area.sep, 20.0);
    assert_eq!(area.pad, 0.0);

    let theme = Theme::default()
        .with_param("legend_box", "horizontal")
        .expect("valid legend_box");
    let mut horizontal = base.with_theme(theme);
    let area = horizontal.build_guides().expect("valid").expect("two legends");
    assert_eq!(area.direction, LegendBox::Horizontal);
    let rects = area.child_rects();
    assert!((rects[1].x0 - rects[0].x1 - 20.0).abs() < 1e-9);

    assert_eq!(
        Theme::default().with_param("legend_box", "diagonal"),
        Err(GuideError::InvalidLegendBox(String::from("diagonal")))
    );
}

#[test]
fn continuous_color_scale_gets_a_colorbar() {
    let mut plot = Plot::new()
        .with_label(Aesthetic::Fill, "density")
        .with_scale(
            Scale::continuous(Aesthetic::Fill)
                .with_break(0.0, "0", AesValue::Color(css::NAVY))
                .with_break(0.5, "0.5", AesValue::Color(css::TEAL))
                .with_break(1.0, "1", AesValue::Color(css::YELLOW)),
        )
        .with_layer(Layer::new(Geom::Rect).with_mapping(Aesthetic::Fill));
    let gdefs = Guides::new()
        .train(&plot, &GuideRegistry::default())
        .expect("valid");
    assert!(matches!(gdefs[0], Guide::Colorbar(_)));
    assert_eq!(gdefs[0].title(), &Title::Text(String::from("density")));

    let area = plot.build_guides().expect("valid").expect("one colorbar");
    assert_eq!(area.children.len(), 1);
}

#[test]
fn named_guides_resolve_through_a_custom_registry() {
    let mut registry = GuideRegistry::default();
    registry.register("colorbar_plain", vizir_guides::colorbar_plain);
    let mut plot = Plot::new()
        .with_scale(
            Scale::continuous(Aesthetic::Color)
                .with_break(0.0, "lo", AesValue::Color(css::BLACK))
                .with_break(1.0, "hi", AesValue::Color(css::WHITE))
                .with_guide("colorbar_plain"),
        )
        .with_layer(Layer::new(Geom::Line).with_mapping(Aesthetic::Color));

    assert_eq!(
        plot.build_guides(),
        Err(GuideError::UnknownGuide(String::from("colorbar_plain")))
    );
    let area = plot
        .build_guides_with(&registry, &HeuristicTextMeasurer)
        .expect("registered")
        .expect("one colorbar");
    // No tick marks: only bar slices and text.
    assert!(
        area.items()
            .iter()
            .all(|item| !matches!(item, GuideItem::Path { .. }))
    );
}

#[test]
fn user_configured_colorbar_options_survive_training() {
    let guide: Guide = ColorbarGuide::default().with_nbin(5).into();
    let plot = Plot::new().with_scale(
        Scale::continuous(Aesthetic::Color)
            .with_break(0.0, "0", AesValue::Color(css::BLACK))
            .with_break(1.0, "1", AesValue::Color(css::WHITE))
            .with_guide(guide),
    );
    let gdefs = Guides::new()
        .train(&plot, &GuideRegistry::default())
        .expect("valid");
    let Guide::Colorbar(bar) = &gdefs[0] else {
        panic!("expected a colorbar");
    };
    assert_eq!(bar.bar.len(), 5);
    assert_eq!(bar.common.title, Title::Text(String::from("color")));
}

#[test]
fn shared_colorbar_survives_when_only_the_fill_layer_shows() {
    let ramp = |aesthetic| {
        Scale::continuous(aesthetic)
            .with_name("z")
            .with_break(0.0, "0", AesValue::Color(css::NAVY))
            .with_break(1.0, "1", AesValue::Color(css::YELLOW))
    };
    let mut plot = Plot::new()
        .with_scale(ramp(Aesthetic::Color))
        .with_scale(ramp(Aesthetic::Fill))
        .with_layer(
            Layer::new(Geom::Point)
                .with_mapping(Aesthetic::Color)
                .with_show_legend(false),
        )
        .with_layer(Layer::new(Geom::Rect).with_mapping(Aesthetic::Fill));

    let gdefs = Guides::new()
        .train(&plot, &GuideRegistry::default())
        .expect("valid");
    assert_eq!(gdefs.len(), 2);
    let merged = vizir_guides::merge(gdefs);
    assert_eq!(merged.len(), 1);
    let Guide::Colorbar(bar) = &merged[0] else {
        panic!("expected a colorbar");
    };
    assert_eq!(bar.aesthetics.as_slice(), &[Aesthetic::Color, Aesthetic::Fill]);

    let area = plot.build_guides().expect("valid").expect("merged colorbar kept");
    assert_eq!(area.children.len(), 1);
}
