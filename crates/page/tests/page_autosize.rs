use autosize::{
    Dispatch, HEIGHT_NAMESPACE, HeightOverrides, MAX_PADDING_COUNT, Quirks, StyleSource,
    WIDTH_NAMESPACE, WidthOverrides, mirror,
};
use core_types::EventKind;
use page::{EngineProfile, Page};

// 13.333px controls: sans-serif advances 0.45em, monospace 0.6em, lines 1.2em.
const INPUT_ADVANCE: f32 = 0.45 * 13.333;
const AREA_ADVANCE: f32 = 0.6 * 13.333;
const LINE: f32 = 1.2 * 13.333;

fn assert_approx_eq(got: f32, want: f32) {
    assert!((got - want).abs() < 0.05, "got {got}, want {want}");
}

fn inline_px(page: &Page, id: page::NodeId, name: &str) -> f32 {
    page.host()
        .document()
        .style_property(id, name)
        .and_then(|v| v.strip_suffix("px"))
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("no px `{name}` on node {id}"))
}

#[test]
fn hello_is_measured_with_one_padding_character() {
    let mut page = Page::new(EngineProfile::modern());
    let input = page.add_input("hello").expect("input");
    page.apply_auto_width(&[input], WidthOverrides::default());
    // "helloW"
    assert_approx_eq(page.width(input), 6.0 * INPUT_ADVANCE);
}

#[test]
fn padding_count_overrides_and_clamps() {
    let mut page = Page::new(EngineProfile::modern());
    let empty = page.add_input("").expect("input");
    let plain = page.add_input("abc").expect("input");
    page.apply_auto_width(
        &[empty],
        WidthOverrides {
            padding_chars: Some(3),
        },
    );
    page.apply_auto_width(
        &[plain],
        WidthOverrides {
            padding_chars: Some(-2),
        },
    );
    assert_approx_eq(page.width(empty), 3.0 * INPUT_ADVANCE);
    assert_approx_eq(page.width(plain), 3.0 * INPUT_ADVANCE);
}

#[test]
fn huge_padding_counts_are_capped_not_fatal() {
    let mut page = Page::new(EngineProfile::modern());
    let input = page.add_input("").expect("input");
    let area = page.add_textarea("").expect("textarea");
    page.apply_auto_width(
        &[input],
        WidthOverrides {
            padding_chars: Some(i64::MAX),
        },
    );
    page.apply_auto_height(
        &[area],
        HeightOverrides {
            padding_lines: Some(i64::MAX),
            ..HeightOverrides::default()
        },
    );

    let want = MAX_PADDING_COUNT as f32 * INPUT_ADVANCE;
    assert!((page.width(input) - want).abs() < 1.0, "got {}", page.width(input));
    // MAX_PADDING_COUNT blank lines plus the placeholder line
    let want = (MAX_PADDING_COUNT + 1) as f32 * LINE;
    assert!((page.height(area) - want).abs() < 1.0, "got {}", page.height(area));
    assert_eq!(page.host().live_probes(), 0);
}

#[test]
fn width_never_shrinks_while_typing_appends() {
    let mut page = Page::new(EngineProfile::modern());
    let input = page.add_input("").expect("input");
    page.apply_auto_width(&[input], WidthOverrides::default());
    let mut last = page.width(input);
    for c in "the quick  brown fox".chars() {
        page.type_text(input, &c.to_string()).expect("type");
        let now = page.width(input);
        assert!(now >= last, "width went from {last} to {now} after {c:?}");
        last = now;
    }
}

#[test]
fn height_never_shrinks_as_lines_are_added() {
    let mut page = Page::new(EngineProfile::modern());
    let area = page.add_textarea("").expect("textarea");
    page.apply_auto_height(&[area], HeightOverrides::default());
    let mut last = page.height(area);
    for chunk in ["first", "\n", "second line that is long enough to wrap", "\n", "\n"] {
        page.type_text(area, chunk).expect("type");
        let now = page.height(area);
        assert!(now >= last, "height went from {last} to {now} after {chunk:?}");
        last = now;
    }
}

#[test]
fn trailing_newline_keeps_its_line() {
    let mut page = Page::new(EngineProfile::modern());
    let open = page.add_textarea("line1\nline2\n").expect("textarea");
    let closed = page.add_textarea("line1\nline2").expect("textarea");
    page.apply_auto_height(&[open, closed], HeightOverrides::default());
    assert_approx_eq(page.height(open), 3.0 * LINE);
    assert_approx_eq(page.height(closed), 2.0 * LINE);
}

#[test]
fn padding_lines_add_blank_lines() {
    let mut page = Page::new(EngineProfile::modern());
    let area = page.add_textarea("a").expect("textarea");
    page.apply_auto_height(
        &[area],
        HeightOverrides {
            padding_lines: Some(1),
            ..HeightOverrides::default()
        },
    );
    assert_approx_eq(page.height(area), 2.0 * LINE);
}

#[test]
fn sized_text_area_shows_no_scrollbar() {
    let mut page = Page::new(EngineProfile::modern());
    let area = page
        .add_textarea("one\ntwo\nthree\nfour\nfive")
        .expect("textarea");
    page.apply_auto_height(&[area], HeightOverrides::default());
    let layout = page.layout(area).expect("layout");
    assert!(!layout.vertical_scrollbar);
    assert_approx_eq(layout.content_height, layout.scroll_height);
}

#[test]
fn probes_never_leak_and_never_show() {
    for profile in [EngineProfile::modern(), EngineProfile::legacy()] {
        let mut page = Page::new(profile);
        let input = page.add_input("abc").expect("input");
        let area = page.add_textarea("abc\n").expect("textarea");
        page.apply_auto_width(&[input], WidthOverrides::default());
        page.apply_auto_height(&[area], HeightOverrides::default());
        page.type_text(input, "def").expect("type");
        page.type_text(area, "\nghi").expect("type");
        page.change(area);
        page.run_until_idle();

        let stats = page.stats();
        assert!(stats.created > 0);
        assert_eq!(stats.created, stats.discarded);
        assert_eq!(page.host().live_probes(), 0);
        assert!(stats.layout_reads > 0);
        assert_eq!(stats.visible_reads, 0);
        // only the two controls remain under the body
        let body = page.host().document().body();
        assert_eq!(page.host().document().children(body), &[input, area]);
    }
}

#[test]
fn long_typing_sessions_keep_the_document_small() {
    for profile in [EngineProfile::modern(), EngineProfile::legacy()] {
        let mut page = Page::new(profile);
        let input = page.add_input("").expect("input");
        let area = page.add_textarea("").expect("textarea");
        page.apply_auto_width(&[input], WidthOverrides::default());
        page.apply_auto_height(&[area], HeightOverrides::default());
        let slots_after_bind = page.host().document().slot_count();

        for i in 0..500 {
            let c = if i % 40 == 39 { '\n' } else { 'a' };
            page.type_text(area, &c.to_string()).expect("type");
            page.type_text(input, "b").expect("type");
            page.run_until_idle();
        }

        let doc = page.host().document();
        assert!(page.stats().created >= 1000);
        assert_eq!(page.host().live_probes(), 0);
        // root, body and the two controls
        assert_eq!(doc.live_count(), 4);
        assert_eq!(doc.slot_count(), slots_after_bind);
    }
}

#[test]
fn quirk_detection_runs_once_per_page() {
    let mut page = Page::new(EngineProfile::modern());
    let a = page.add_textarea("a").expect("textarea");
    let b = page.add_textarea("b").expect("textarea");
    assert_eq!(page.quirks(), None);

    page.apply_auto_height(&[a], HeightOverrides::default());
    assert_eq!(page.quirks(), Some(Quirks::default()));
    // detection probe plus one measurement
    assert_eq!(page.stats().created, 2);

    page.apply_auto_height(&[b], HeightOverrides::default());
    page.type_text(a, "x").expect("type");
    assert_eq!(page.stats().created, 4);
}

#[test]
fn width_sizing_never_detects_quirks() {
    let mut page = Page::new(EngineProfile::legacy());
    let input = page.add_input("abc").expect("input");
    page.apply_auto_width(&[input], WidthOverrides::default());
    assert_eq!(page.quirks(), None);
}

#[test]
fn legacy_engine_reports_the_scrollbar_defect() {
    let mut page = Page::new(EngineProfile::legacy());
    let area = page.add_textarea("a").expect("textarea");
    page.apply_auto_height(&[area], HeightOverrides::default());
    assert_eq!(
        page.quirks(),
        Some(Quirks {
            scrollbar_allowance_bug: true
        })
    );
}

#[test]
fn legacy_height_follows_the_text_area_wrapping() {
    // 22 monospace characters need 176px: they fit 177px but not the 175px
    // a legacy text area actually wraps at.
    let mut page = Page::new(EngineProfile::legacy());
    let area = page.add_textarea(&"a".repeat(22)).expect("textarea");
    page.set_style(area, "width", "177px").expect("style");
    page.apply_auto_height(&[area], HeightOverrides::default());

    assert_approx_eq(page.height(area), 2.0 * LINE);
    let layout = page.layout(area).expect("layout");
    assert_eq!(layout.lines.len(), 2);
    assert!(!layout.vertical_scrollbar);
    assert!(22.0 * AREA_ADVANCE > 175.0);
}

#[test]
fn throwing_style_property_is_skipped() {
    let mut page = Page::new(EngineProfile::legacy());
    let area = page.add_textarea("abc").expect("textarea");
    let snapshot = mirror::capture(page.host(), &area);
    assert_eq!(snapshot.source(), Some(StyleSource::Current));
    assert_eq!(snapshot.get("font-feature-settings"), None);
    assert_eq!(snapshot.get("font-size"), Some("13.333px"));
    assert_eq!(snapshot.get("font-family"), Some("monospace"));

    page.apply_auto_height(&[area], HeightOverrides::default());
    assert_approx_eq(page.height(area), LINE);
}

#[test]
fn border_box_targets_get_padding_and_border_added() {
    let mut page = Page::new(EngineProfile::modern());
    let input = page.add_input("hello").expect("input");
    page.set_style(input, "box-sizing", "border-box").expect("style");
    page.apply_auto_width(&[input], WidthOverrides::default());

    assert_approx_eq(page.width(input), 6.0 * INPUT_ADVANCE);
    // padding 1px 2px, border 2px
    assert_approx_eq(inline_px(&page, input, "width"), 6.0 * INPUT_ADVANCE + 8.0);
}

#[test]
fn single_read_takes_one_probe_height() {
    let mut page = Page::new(EngineProfile::modern());
    let warm = page.add_textarea("a").expect("textarea");
    let twice = page.add_textarea("a").expect("textarea");
    let once = page.add_textarea("a").expect("textarea");
    page.apply_auto_height(&[warm], HeightOverrides::default());

    let before = page.stats().layout_reads;
    page.apply_auto_height(&[twice], HeightOverrides::default());
    assert_eq!(page.stats().layout_reads - before, 2);

    let before = page.stats().layout_reads;
    page.apply_auto_height(
        &[once],
        HeightOverrides {
            double_read: Some(false),
            ..HeightOverrides::default()
        },
    );
    assert_eq!(page.stats().layout_reads - before, 1);
    assert_approx_eq(page.height(once), page.height(twice));
}

#[test]
fn rebinding_fires_one_handler() {
    let mut page = Page::new(EngineProfile::modern());
    let input = page.add_input("x").expect("input");
    page.apply_auto_width(&[input], WidthOverrides::default());
    page.apply_auto_width(&[input], WidthOverrides::default());
    assert_eq!(page.host().document().listeners(input).len(), 1);

    let outcome = page.dispatch(input, EventKind::Input);
    assert_eq!(outcome.len(), 1);
    assert!(matches!(outcome[0], Dispatch::Measured(_)));
}

#[test]
fn width_and_height_bindings_coexist() {
    let mut page = Page::new(EngineProfile::modern());
    let area = page.add_textarea("abc").expect("textarea");
    page.apply_auto_width(&[area], WidthOverrides::default());
    page.apply_auto_height(&[area], HeightOverrides::default());
    assert_eq!(page.dispatch(area, EventKind::Input).len(), 2);

    assert!(page.unbind(area, WIDTH_NAMESPACE));
    assert_eq!(page.dispatch(area, EventKind::Input).len(), 1);
    assert!(page.unbind(area, HEIGHT_NAMESPACE));
    assert!(page.dispatch(area, EventKind::Input).is_empty());
}

#[test]
fn legacy_events_wait_for_the_tick() {
    let mut page = Page::new(EngineProfile::legacy());
    let input = page.add_input("").expect("input");
    page.apply_auto_width(&[input], WidthOverrides::default());
    let before = page.width(input);

    page.type_text(input, "abcd").expect("type");
    assert_approx_eq(page.width(input), before);
    assert!(page.sizer().has_pending());

    assert_eq!(page.run_until_idle(), 1);
    assert_approx_eq(page.width(input), 5.0 * INPUT_ADVANCE);
}

#[test]
fn legacy_engines_never_subscribe_to_input() {
    let mut page = Page::new(EngineProfile::legacy());
    let input = page.add_input("").expect("input");
    page.apply_auto_width(&[input], WidthOverrides::default());
    assert!(page.dispatch(input, EventKind::Input).is_empty());
    assert_eq!(page.change(input), vec![Dispatch::Deferred]);
}

#[test]
fn removed_target_fails_quietly() {
    let mut page = Page::new(EngineProfile::modern());
    let input = page.add_input("abc").expect("input");
    let tokens = page.apply_auto_width(&[input], WidthOverrides::default());
    page.host_mut().document_mut().remove(input).expect("remove");

    assert_eq!(page.notify(tokens[0], EventKind::Input), Dispatch::Failed);
    assert_eq!(page.stats().created, page.stats().discarded);
    assert_eq!(page.host().live_probes(), 0);
}
