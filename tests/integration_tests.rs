//! End-to-end tests for the snippet pipeline

use code_snippet::{
    render_png, render_snippet, Error, Input, Palette, RenderConfig, RenderOptions, Rendered,
    SyntectTokenizer,
};

fn render(text: &str, name: &str, range: Option<&str>) -> Result<Rendered, Error> {
    let options = RenderOptions {
        line_range: range.map(str::to_string),
        copy_to_clipboard: false,
    };
    render_png(
        &Input::new(text, name),
        &options,
        &RenderConfig::default(),
        &SyntectTokenizer::new(),
        &Palette::default(),
    )
}

fn numbered(lines: usize) -> String {
    (1..=lines).map(|n| format!("let x{} = {};", n, n)).collect::<Vec<_>>().join("\n")
}

#[test]
fn range_excerpt_sizes_canvas_for_selected_lines() {
    let rendered = render("a\nb\nc\n", "abc.txt", Some("2-3")).unwrap();
    assert_eq!(rendered.start_line, 2);
    assert_eq!(rendered.line_count, 2);
    assert_eq!(rendered.screenshot.height, (2.0 * 24.0 * 1.5 + 3.0 * 40.0) as u32);
    assert!(rendered.screenshot.width >= 600);
}

#[test]
fn full_render_equals_explicit_full_range() {
    let text = numbered(12);
    let whole = render(&text, "x.rs", None).unwrap();
    let ranged = render(&text, "x.rs", Some("1-12")).unwrap();
    assert_eq!(whole.screenshot.png_data, ranged.screenshot.png_data);
}

#[test]
fn clamped_ranges_render_identically() {
    let text = numbered(10);
    let a = render(&text, "x.rs", Some("0-5")).unwrap();
    let b = render(&text, "x.rs", Some("1-5")).unwrap();
    assert_eq!(a.screenshot.png_data, b.screenshot.png_data);

    let c = render(&text, "x.rs", Some("8-100")).unwrap();
    let d = render(&text, "x.rs", Some("8-10")).unwrap();
    assert_eq!(c.screenshot.png_data, d.screenshot.png_data);
}

#[test]
fn range_errors_surface_from_pipeline() {
    let text = numbered(10);
    assert!(matches!(render(&text, "x.rs", Some("5-3")), Err(Error::Range { .. })));
    assert!(matches!(render(&text, "x.rs", Some("abc-5")), Err(Error::Format(_))));
    assert!(matches!(render(&text, "x.rs", Some("5")), Err(Error::Format(_))));
}

#[test]
fn extra_line_adds_one_line_height() {
    let a = render(&numbered(30), "x.rs", None).unwrap();
    let b = render(&numbered(31), "x.rs", None).unwrap();
    assert_eq!(b.screenshot.height - a.screenshot.height, 36);
    assert_eq!(b.layout.image_height - a.layout.image_height, 36);
}

#[test]
fn gutter_widens_with_extra_digit() {
    let nine = render(&numbered(9), "x.rs", None).unwrap();
    let ninety_nine = render(&numbered(99), "x.rs", None).unwrap();
    assert!(nine.layout.gutter_width < ninety_nine.layout.gutter_width);
}

#[test]
fn long_lines_grow_the_canvas() {
    let short = render("x", "x.rs", None).unwrap();
    let long = render(&"x".repeat(120), "x.rs", None).unwrap();
    assert_eq!(short.screenshot.width, 600);
    assert!(long.screenshot.width > 600);
    assert_eq!(
        long.layout.image_width,
        (40.0 + long.layout.gutter_width + long.layout.max_line_width + 40.0) as u32
    );
}

#[test]
fn background_and_window_controls_are_painted() {
    let rendered = render("fn main() {}\n", "main.rs", None).unwrap();
    let img = image::load_from_memory(&rendered.screenshot.png_data)
        .expect("decode")
        .to_rgba8();

    assert_eq!((img.width(), img.height()), (rendered.screenshot.width, rendered.screenshot.height));
    let corner = img.get_pixel(img.width() - 1, img.height() - 1).0;
    assert_eq!(corner, [0x28, 0x2a, 0x36, 255]);
    assert_eq!(img.get_pixel(30, 30).0, [0xff, 0x5f, 0x56, 255]);
    assert_eq!(img.get_pixel(55, 30).0, [0xff, 0xbd, 0x2e, 255]);
    assert_eq!(img.get_pixel(80, 30).0, [0x27, 0xc9, 0x3f, 255]);

    // some code pixels differ from the background on the first text row
    let code_row_lit = (0..img.width())
        .flat_map(|x| (60..85).map(move |y| (x, y)))
        .any(|(x, y)| img.get_pixel(x, y).0 != corner);
    assert!(code_row_lit, "expected text on the first line");
}

#[test]
fn render_snippet_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig {
        output_path: dir.path().join("snippet.png"),
        ..Default::default()
    };

    let result = render_snippet(
        &Input::new("print('hi')\n", "hello.py"),
        &RenderOptions::default(),
        &config,
    )
    .unwrap();

    assert!(!result.delivery.copied);
    assert_eq!(result.delivery.saved_to.as_deref(), Some(config.output_path.as_path()));
    let on_disk = std::fs::read(&config.output_path).unwrap();
    assert_eq!(on_disk, result.screenshot.png_data);
}

#[test]
fn unknown_theme_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig {
        theme: "no-such-theme".into(),
        output_path: dir.path().join("out.png"),
        ..Default::default()
    };
    let result = render_snippet(&Input::new("x := 1\n", "Stdin"), &RenderOptions::default(), &config).unwrap();
    assert!(config.output_path.exists());
    assert!(result.screenshot.png_data.len() > 100);
}
