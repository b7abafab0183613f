mod test_helpers;

use svgr::{Color, DrawCall, Geometry, Point, ShapeKind, SvgError};
use test_helpers::{assert_points_close, parse_body, record, trace};

const RED: Color = Color::rgb(255, 0, 0);

#[test]
fn circle_round_trip() {
    let doc = parse_body(100, 100, r##"<circle cx="50" cy="50" r="20" fill="#ff0000"/>"##).unwrap();

    assert_eq!(doc.roots().len(), 1);
    let shape = doc.shape(doc.roots()[0]);
    assert_eq!(shape.kind(), ShapeKind::Circle);
    let Geometry::Circle(circle) = shape.geometry() else {
        panic!("expected a circle, got {:?}", shape.geometry());
    };
    assert_eq!(circle.center, Point::new(50.0, 50.0));
    assert_eq!(circle.radius, Point::new(20.0, 20.0));

    assert_eq!(
        record(&doc),
        vec![DrawCall::Ellipse {
            center: Point::new(50.0, 50.0),
            radii: Point::new(20.0, 20.0),
            color: RED,
        }]
    );
}

#[test]
fn rect_rotation_pivots_on_document_origin() {
    let doc = parse_body(
        50,
        50,
        r#"<rect x="10" y="0" width="10" height="5" fill="red" transform="rotate(90)" transform_origin="0 0"/>"#,
    )
    .unwrap();

    let expected: Vec<Point> = [(10.0, 0.0), (19.0, 0.0), (19.0, 4.0), (10.0, 4.0)]
        .into_iter()
        .map(|(x, y)| Point::new(x, y).rotate(Point::ORIGIN, 90.0))
        .collect();
    let actual = doc.arena().coords(doc.roots()[0]);
    assert_points_close(&actual, &expected);
    assert_points_close(
        &actual,
        &[
            Point::new(0.0, 10.0),
            Point::new(0.0, 19.0),
            Point::new(-4.0, 19.0),
            Point::new(-4.0, 10.0),
        ],
    );
}

#[test]
fn rotation_without_origin_uses_document_origin() {
    let doc = parse_body(
        50,
        50,
        r#"<circle cx="10" cy="0" r="1" fill="red" transform="rotate(180)"/>"#,
    )
    .unwrap();
    let coords = doc.arena().coords(doc.roots()[0]);
    assert_points_close(&coords, &[Point::new(-10.0, 0.0), Point::new(1.0, 1.0)]);
}

#[test]
fn explicit_origin_drives_scale() {
    let doc = parse_body(
        50,
        50,
        r#"<ellipse cx="10" cy="10" rx="3" ry="2" fill="red" transform="scale(2)" transform_origin="5 5"/>"#,
    )
    .unwrap();
    assert_eq!(
        doc.arena().coords(doc.roots()[0]),
        vec![Point::new(15.0, 15.0), Point::new(6.0, 4.0)]
    );
}

#[test]
fn negative_scale_mirrors() {
    let doc = parse_body(
        50,
        50,
        r#"<line x1="1" y1="2" x2="3" y2="4" stroke="black" transform="scale(-1)"/>"#,
    )
    .unwrap();
    assert_eq!(
        doc.arena().coords(doc.roots()[0]),
        vec![Point::new(-1.0, -2.0), Point::new(-3.0, -4.0)]
    );
}

#[test]
fn group_transform_applies_after_child_transforms() {
    let doc = parse_body(
        50,
        50,
        r#"<g transform="scale(2)">
             <circle cx="5" cy="5" r="1" fill="red" transform="translate(1 1)"/>
           </g>"#,
    )
    .unwrap();
    let group = doc.roots()[0];
    assert_eq!(
        doc.arena().coords(group),
        vec![Point::new(12.0, 12.0), Point::new(2.0, 2.0)]
    );
}

#[test]
fn children_do_not_inherit_group_origin() {
    let doc = parse_body(
        50,
        50,
        r#"<g id="outer" transform_origin="10 10">
             <circle id="c" cx="5" cy="5" r="1" fill="red" transform="scale(2)"/>
           </g>"#,
    )
    .unwrap();
    let c = doc.find("c").unwrap();
    assert_eq!(
        doc.arena().coords(c),
        vec![Point::new(10.0, 10.0), Point::new(2.0, 2.0)]
    );
    // The group's id stays on the group.
    assert_eq!(doc.shape(c).id(), Some("c"));
}

#[test]
fn nested_groups_fan_out_recursively() {
    let doc = parse_body(
        50,
        50,
        r#"<g transform="translate(5 0)">
             <g transform="translate(0 7)">
               <polygon id="p" points="0,0 2,0 1,1" fill="red"/>
             </g>
             <polyline id="l" points="1,1 2,2" fill="red"/>
           </g>"#,
    )
    .unwrap();
    assert_eq!(
        doc.arena().coords(doc.find("p").unwrap()),
        vec![Point::new(5.0, 7.0), Point::new(7.0, 7.0), Point::new(6.0, 8.0)]
    );
    assert_eq!(
        doc.arena().coords(doc.find("l").unwrap()),
        vec![Point::new(6.0, 1.0), Point::new(7.0, 2.0)]
    );
}

#[test]
fn single_point_polyline_draws_nothing() {
    let doc = parse_body(10, 10, r#"<polyline points="3,3" fill="red"/>"#).unwrap();
    assert_eq!(doc.roots().len(), 1);
    assert!(record(&doc).is_empty());
}

#[test]
fn errors_inside_groups_abort_the_document() {
    let err = parse_body(
        10,
        10,
        r#"<g><g><circle cx="a" cy="1" r="1" fill="red"/></g></g>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SvgError::InvalidAttribute { element: "circle", attr: "cx", ref value } if value == "a"
    ));
}

#[test]
fn unknown_color_is_reported_with_context() {
    let err = parse_body(10, 10, r#"<rect x="0" y="0" width="1" height="1" fill="blurple"/>"#)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown color 'blurple' in attribute 'fill' on element 'rect'"
    );
}

#[test]
fn malformed_point_names_the_pair() {
    let err = parse_body(10, 10, r#"<polygon points="0,0 3;4 5,5" fill="red"/>"#).unwrap_err();
    assert!(matches!(
        err,
        SvgError::InvalidPoint { element: "polygon", ref pair } if pair == "3;4"
    ));
}

#[test]
fn paint_order_follows_document_and_nesting() {
    let doc = parse_body(
        200,
        100,
        r##"<rect x="0" y="0" width="200" height="100" fill="white"/>
            <g id="scene" transform="translate(10 5)">
              <circle cx="50" cy="50" r="20" fill="#ff0000"/>
              <polyline points="0,0 10,0 10,10" fill="blue" transform="scale(2)"/>
              <g transform="rotate(90)" transform_origin="100 50">
                <line x1="100" y1="50" x2="120" y2="50" stroke="green"/>
              </g>
            </g>
            <polygon points="1,1 5,1 3,4" fill="black"/>"##,
    )
    .unwrap();

    insta::assert_snapshot!(trace(&record(&doc)), @r"
    polygon [(0, 0) (199, 0) (199, 99) (0, 99)] #ffffff
    ellipse center=(60, 55) radii=(20, 20) #ff0000
    line (10, 5) -> (30, 5) #0000ff
    line (30, 5) -> (30, 25) #0000ff
    line (110, 55) -> (110, 75) #008000
    polygon [(1, 1) (5, 1) (3, 4)] #000000
    ");
}
