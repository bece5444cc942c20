use super::*;
use crate::runs::LinkRef;
use crate::tokens::InlineToken;

fn plain(text: &str) -> InlineToken {
    InlineToken::PlainText {
        text: text.to_string(),
        children: Vec::new(),
    }
}

fn build(markdown: &str) -> DocumentModel {
    build_slides(&tokenize(markdown))
}

#[test]
fn test_resolve_runs_style_union() {
    // **bold and [a link](x) here**
    let tree = vec![InlineToken::Bold(vec![
        plain("bold and "),
        InlineToken::Hyperlink {
            url: "x".to_string(),
            title: None,
            children: vec![plain("a link")],
        },
        plain(" here"),
    ])];

    let runs = resolve_runs(&tree, &RunStyle::default());
    assert_eq!(runs.len(), 3);

    assert!(runs.iter().all(|r| r.style.bold));
    assert!(runs[0].style.hyperlink.is_none());
    assert_eq!(
        runs[1].style.hyperlink,
        Some(LinkRef {
            url: "x".to_string(),
            tooltip: "x".to_string(),
        })
    );
    assert!(runs[2].style.hyperlink.is_none());

    let text: String = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(text, "bold and a link here");
}

#[test]
fn test_resolve_runs_code_span_padding() {
    let runs = resolve_runs(
        &[InlineToken::CodeSpan("let x = 1;".to_string())],
        &RunStyle::default(),
    );
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, " let x = 1; ");
    assert!(runs[0].style.monospace);
}

#[test]
fn test_resolve_runs_code_span_inherits_ancestor_flags() {
    let tree = vec![InlineToken::Italic(vec![InlineToken::CodeSpan(
        "x".to_string(),
    )])];
    let runs = resolve_runs(&tree, &RunStyle::default());
    assert!(runs[0].style.italic);
    assert!(runs[0].style.monospace);
}

#[test]
fn test_resolve_runs_nested_text_subtree_wins() {
    let tree = vec![InlineToken::PlainText {
        text: "ignored".to_string(),
        children: vec![InlineToken::Bold(vec![plain("kept")])],
    }];
    let runs = resolve_runs(&tree, &RunStyle::default());
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "kept");
    assert!(runs[0].style.bold);
}

#[test]
fn test_resolve_runs_other_fallback_is_verbatim() {
    let tree = vec![
        InlineToken::Other {
            raw: "<kbd>Esc</kbd>".to_string(),
        },
        InlineToken::Other { raw: String::new() },
    ];
    let runs = resolve_runs(&tree, &RunStyle::default());
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "<kbd>Esc</kbd>");
    assert_eq!(runs[0].style, RunStyle::default());
}

#[test]
fn test_slide_per_depth_one_heading() {
    let model = build("# One\n\nfirst\n\n# Two\n\nsecond\n\n# Three\n");
    assert_eq!(model.slides.len(), 3);
    assert_eq!(model.slides[0].title, "One");
    assert_eq!(model.slides[1].title, "Two");
    assert_eq!(model.slides[2].title, "Three");
    assert!(model.slides[2].elements.is_empty());
}

#[test]
fn test_content_before_first_heading_is_dropped() {
    let model = build("orphan paragraph\n\n- orphan item\n\n# One\n\nkept\n");
    assert_eq!(model.slides.len(), 1);
    assert_eq!(model.slides[0].elements.len(), 1);
}

#[test]
fn test_deeper_headings_do_not_start_slides() {
    let model = build("# One\n\n## Sub\n\n### Deeper\n\ntext\n");
    assert_eq!(model.slides.len(), 1);
    // Deeper headings also produce no elements.
    assert_eq!(model.slides[0].elements.len(), 1);
}

#[test]
fn test_note_paragraph_sets_notes() {
    let model = build("# One\n\n> Note: remember timeline\n");
    assert_eq!(
        model.slides[0].notes,
        Some("remember timeline".to_string())
    );
    assert!(model.slides[0].elements.is_empty());
}

#[test]
fn test_last_note_wins() {
    let model = build("# One\n\n> Note: first\n\n> Note: second\n");
    assert_eq!(model.slides[0].notes, Some("second".to_string()));
}

#[test]
fn test_standalone_image_paragraph() {
    let model = build("# One\n\n![diagram](assets/arch.png)\n");
    assert_eq!(
        model.slides[0].elements,
        vec![SlideElement::Image {
            href: "assets/arch.png".to_string(),
            alt: "diagram".to_string(),
        }]
    );
}

#[test]
fn test_inline_image_text_is_not_lost() {
    let model = build("# One\n\nsee ![pic](a.png) here\n");
    let SlideElement::TextBlock { runs } = &model.slides[0].elements[0] else {
        panic!("expected a text block");
    };
    let text: String = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(text, "see ![pic](a.png) here");
}

#[test]
fn test_shape_paragraph() {
    let model = build(
        "# One\n\n!shape[rect]({\"w\":2,\"h\":1,\"fill\":{\"color\":\"FF0000\"}})\n",
    );
    assert!(model.diagnostics.is_empty());
    let SlideElement::Shape { kind, options } = &model.slides[0].elements[0] else {
        panic!("expected a shape");
    };
    assert_eq!(*kind, ShapeKind::Rectangle);
    assert_eq!(options["w"], 2);
    assert_eq!(options["h"], 1);
    assert_eq!(options["fill"]["color"], "FF0000");
}

#[test]
fn test_unknown_shape_name_is_a_diagnostic() {
    let model = build("# One\n\n!shape[hexagon]({})\n");
    assert!(model.slides[0].elements.is_empty());
    assert_eq!(model.diagnostics.len(), 1);
    assert!(model.diagnostics[0].contains("hexagon"));
}

#[test]
fn test_malformed_shape_options_is_a_diagnostic() {
    let model = build("# One\n\n!shape[rect]({broken)\n");
    assert!(model.slides[0].elements.is_empty());
    assert_eq!(model.diagnostics.len(), 1);
}

#[test]
fn test_list_items_become_separate_bulleted_blocks() {
    let model = build("# One\n\n- alpha\n- **beta**\n");
    let elements = &model.slides[0].elements;
    assert_eq!(elements.len(), 2);
    for element in elements {
        let SlideElement::TextBlock { runs } = element else {
            panic!("expected a text block");
        };
        assert!(runs[0].style.bullet);
    }
    let SlideElement::TextBlock { runs } = &elements[1] else {
        panic!("expected a text block");
    };
    assert!(runs[0].style.bold);
}

#[test]
fn test_task_items_get_checkbox_glyphs() {
    let model = build("# One\n\n- [x] shipped\n- [ ] pending\n");
    let elements = &model.slides[0].elements;
    let SlideElement::TextBlock { runs } = &elements[0] else {
        panic!("expected a text block");
    };
    assert_eq!(runs[0].text, "\u{2611} shipped");
    assert!(!runs[0].style.bullet);
    let SlideElement::TextBlock { runs } = &elements[1] else {
        panic!("expected a text block");
    };
    assert_eq!(runs[0].text, "\u{2610} pending");
}

#[test]
fn test_table_extraction() {
    let model = build("# One\n\n| A | B |\n| - | - |\n| 1 | 2 |\n");
    assert_eq!(
        model.slides[0].elements,
        vec![SlideElement::Table {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string()]],
        }]
    );
}

#[test]
fn test_horizontal_rule_becomes_column_break() {
    let model = build("# One\n\nleft\n\n---\n\nright\n");
    assert_eq!(model.slides[0].elements.len(), 3);
    assert_eq!(model.slides[0].elements[1], SlideElement::ColumnBreak);
}

#[test]
fn test_layout_single_column_full_width() {
    let model = build("# One\n\nfirst\n\nsecond\n");
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);

    assert_eq!(layout.elements.len(), 2);
    let full_width = config.canvas_width - 2 * config.margin;
    for placed in &layout.elements {
        assert_eq!(placed.x, config.margin);
        assert_eq!(placed.width, full_width);
    }
    assert!(layout.elements[0].y < layout.elements[1].y);
}

#[test]
fn test_layout_two_columns() {
    let model = build("# One\n\na\n\nb\n\n---\n\nc\n");
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);

    assert_eq!(layout.elements.len(), 3);
    let column_width = (config.canvas_width - 2 * config.margin - config.gutter) / 2;
    // a and b stack in column 1
    assert_eq!(layout.elements[0].x, config.margin);
    assert_eq!(layout.elements[1].x, config.margin);
    assert!(layout.elements[0].y < layout.elements[1].y);
    // c starts at the top of column 2
    assert_eq!(
        layout.elements[2].x,
        config.margin + column_width + config.gutter
    );
    assert_eq!(layout.elements[2].y, config.body_top);
}

#[test]
fn test_later_column_breaks_merge_into_column_two() {
    let model = build("# One\n\na\n\n---\n\nb\n\n---\n\nc\n");
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);

    assert_eq!(layout.elements.len(), 3);
    assert_eq!(layout.elements[1].x, layout.elements[2].x);
    assert!(layout.elements[1].y < layout.elements[2].y);
}

#[test]
fn test_column_breaks_are_never_placed() {
    let model = build("# One\n\n---\n\n---\n");
    let layout = layout_slide(&model.slides[0], &LayoutConfig::default());
    assert!(layout.elements.is_empty());
}

#[test]
fn test_layout_is_idempotent() {
    let model = build("# One\n\ntext\n\n![d](x.png)\n\n---\n\n| A |\n| - |\n| 1 |\n");
    let config = LayoutConfig::default();
    let first = layout_slide(&model.slides[0], &config);
    let second = layout_slide(&model.slides[0], &config);
    assert_eq!(first, second);
}

#[test]
fn test_layout_truncates_overflowing_column() {
    let markdown = format!(
        "# One\n\n{}",
        (0..10)
            .map(|i| format!("paragraph {}\n", i))
            .collect::<Vec<String>>()
            .join("\n")
    );
    let model = build(&markdown);
    assert_eq!(model.slides[0].elements.len(), 10);

    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);
    assert!(layout.elements.len() < 10);
    let bottom = config.canvas_height - config.bottom_margin;
    for placed in &layout.elements {
        assert!(placed.y < bottom);
    }
}

#[test]
fn test_shape_size_override_wins_but_origin_does_not() {
    let model = build(
        "# One\n\n!shape[oval]({\"w\":2,\"h\":1,\"x\":99,\"y\":99})\n",
    );
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);

    let placed = &layout.elements[0];
    assert_eq!(placed.width, 2 * layout::EMU_PER_INCH);
    assert_eq!(placed.height, layout::EMU_PER_INCH);
    // Author-supplied coordinates never override the column origin.
    assert_eq!(placed.x, config.margin);
    assert_eq!(placed.y, config.body_top);
}

#[test]
fn test_shape_default_height_without_options() {
    let model = build("# One\n\n!shape[triangle]({})\n");
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);
    assert_eq!(layout.elements[0].height, config.shape_default_height);
}

#[test]
fn test_title_band_is_fixed() {
    let model = build("# One\n\nx\n\n---\n\ny\n");
    let config = LayoutConfig::default();
    let layout = layout_slide(&model.slides[0], &config);
    assert_eq!(layout.title, "One");
    assert_eq!(layout.title_box.x, config.margin);
    assert_eq!(layout.title_box.y, config.title_top);
}
