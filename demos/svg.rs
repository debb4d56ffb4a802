use std::io::Read;

use glbarcode::{encode, Layout, Symbology};

fn main() {
    let symbology: Symbology = match std::env::args().nth(1) {
        Some(id) => id.parse().unwrap(),
        None => Symbology::Any,
    };
    let mut msg = Vec::new();
    if atty::isnt(atty::Stream::Stdin) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut msg).unwrap();
    }
    while msg.last() == Some(&b'\n') {
        msg.pop();
    }
    let code = encode(symbology, &msg).unwrap();
    let geometry = Layout::new().scale(2.0).margin(10).resolve(&code);
    let width = geometry.width + 2 * geometry.margin;
    let height = geometry.height + 2 * geometry.margin;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}"><path d=""#,
        width, height,
    );
    for bar in &geometry.bars {
        // SVG y grows downwards
        let top = height as f64 - bar.y - bar.height;
        svg += &format!(
            "M{:.2} {:.2}h{:.2}v{:.2}h-{:.2}z",
            bar.x, top, bar.width, bar.height, bar.width
        );
    }
    svg += r#""/>"#;
    for glyph in &geometry.glyphs {
        svg += &format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="Helvetica" font-size="{:.2}">{}</text>"#,
            glyph.x,
            height as f64 - glyph.y,
            glyph.size,
            glyph.ch
        );
    }
    svg += "</svg>";
    println!("{}", svg);
}
