use deck::{build_slides, layout_slide, tokenize, Config, LayoutConfig, SlideElement};

const DOCUMENT: &str = r#"# Split

first paragraph

| A | B |
| - | - |
| 1 | 2 |

---

![chart](chart.png)

!shape[ellipse]({"h":0.5})
"#;

#[test]
fn test_columns_stay_inside_canvas() {
    let model = build_slides(&tokenize(DOCUMENT));
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);

    assert_eq!(layout.elements.len(), 4);
    for placed in &layout.elements {
        assert!(placed.x >= config.margin);
        assert!(placed.x + placed.width <= config.canvas_width - config.margin + 1);
        assert!(placed.y >= config.body_top);
    }
}

#[test]
fn test_partition_preserves_element_order() {
    let model = build_slides(&tokenize(DOCUMENT));
    let layout = layout_slide(&model.slides[0], &LayoutConfig::default());

    // Column 1 holds the paragraph and the table, column 2 the image and shape.
    assert!(matches!(
        layout.elements[0].element,
        SlideElement::TextBlock { .. }
    ));
    assert!(matches!(
        layout.elements[1].element,
        SlideElement::Table { .. }
    ));
    assert!(matches!(
        layout.elements[2].element,
        SlideElement::Image { .. }
    ));
    assert!(matches!(
        layout.elements[3].element,
        SlideElement::Shape { .. }
    ));
    assert_eq!(layout.elements[0].x, layout.elements[1].x);
    assert_eq!(layout.elements[2].x, layout.elements[3].x);
    assert!(layout.elements[0].x < layout.elements[2].x);
}

#[test]
fn test_table_height_grows_with_rows() {
    let small = build_slides(&tokenize("# S\n\n| A |\n| - |\n| 1 |\n"));
    let large = build_slides(&tokenize("# L\n\n| A |\n| - |\n| 1 |\n| 2 |\n| 3 |\n"));
    let config = LayoutConfig::default();

    let small_layout = layout_slide(&small.slides[0], &config);
    let large_layout = layout_slide(&large.slides[0], &config);
    assert!(large_layout.elements[0].height > small_layout.elements[0].height);
}

#[test]
fn test_text_height_grows_with_hard_breaks() {
    let one = build_slides(&tokenize("# S\n\nsingle line\n"));
    let three = build_slides(&tokenize("# S\n\nline one\\\nline two\\\nline three\n"));
    let config = LayoutConfig::default();

    let one_layout = layout_slide(&one.slides[0], &config);
    let three_layout = layout_slide(&three.slides[0], &config);
    assert!(three_layout.elements[0].height > one_layout.elements[0].height);
}

#[test]
fn test_aspect_ratio_changes_canvas() {
    let config = Config::default();
    let wide = config.get_layout_config(Some("16:9"));
    let tall = config.get_layout_config(Some("4:3"));
    assert_eq!(wide.canvas_width, tall.canvas_width);
    assert!(tall.canvas_height > wide.canvas_height);
}
