#![allow(dead_code)]

use svgr::{Document, DrawCall, Point, Recorder};

/// Wrap shape elements in an `<svg>` root of the given size and parse it
pub fn parse_body(width: u32, height: u32, body: &str) -> svgr::Result<Document> {
    let xml = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">{body}</svg>"#
    );
    Document::parse(&xml)
}

/// Render into a recorder and return the calls in paint order
pub fn record(doc: &Document) -> Vec<DrawCall> {
    let mut rec = Recorder::new();
    doc.render(&mut rec);
    rec.into_calls()
}

/// One line per draw call, coordinates rounded to pixels
pub fn trace(calls: &[DrawCall]) -> String {
    calls
        .iter()
        .map(|call| match call {
            DrawCall::Ellipse {
                center,
                radii,
                color,
            } => format!(
                "ellipse center={} radii={} {}",
                px(*center),
                px(*radii),
                color.to_hex()
            ),
            DrawCall::Line { from, to, color } => {
                format!("line {} -> {} {}", px(*from), px(*to), color.to_hex())
            }
            DrawCall::Polygon { points, color } => format!(
                "polygon [{}] {}",
                points.iter().map(|p| px(*p)).collect::<Vec<_>>().join(" "),
                color.to_hex()
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn px(p: Point) -> String {
    let (x, y) = p.to_pixel();
    format!("({x}, {y})")
}

pub fn assert_points_close(actual: &[Point], expected: &[Point]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.approx_eq(*e, 1e-6), "{a:?} != {e:?}");
    }
}
