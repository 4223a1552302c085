use code_snippet::{render_png, Input, Palette, RenderConfig, RenderOptions, SyntectTokenizer};

#[test]
fn smoke_render_png() {
    let input = Input::new("package main\n\nfunc main() {}\n", "main.go");
    let rendered = render_png(
        &input,
        &RenderOptions::default(),
        &RenderConfig::default(),
        &SyntectTokenizer::new(),
        &Palette::default(),
    )
    .expect("render");

    assert_eq!(rendered.line_count, 3);
    assert_eq!(rendered.start_line, 1);
    assert_eq!(rendered.screenshot.width, 600);
    assert_eq!(rendered.screenshot.height, (3.0 * 36.0 + 120.0) as u32);
    assert_eq!(&rendered.screenshot.png_data[0..8], b"\x89PNG\r\n\x1a\n");
}
