use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};
use serde_json::{json, Value};
use svgr::{Document, Geometry, Point, Shape, ShapeId};

use crate::utils::file as file_utils;
use crate::OutputFormat;

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let content = file_utils::load_svg_file(file)?;
    let doc = Document::parse(&content).with_context(|| format!("Failed to parse {:?}", file))?;

    match format {
        OutputFormat::Text => output_text(&doc),
        OutputFormat::Json => output_json(&doc),
    }
}

/// One line of geometry for the shape table
pub fn describe(shape: &Shape) -> String {
    let fmt = |p: &Point| format!("({}, {})", p.x, p.y);
    match shape.geometry() {
        Geometry::Ellipse(e) => format!("center {} radii {}", fmt(&e.center), fmt(&e.radius)),
        Geometry::Circle(e) => format!("center {} r {}", fmt(&e.center), e.radius.x),
        Geometry::Line(l) => format!("{} -> {}", fmt(&l.start), fmt(&l.end)),
        Geometry::Polyline(p) => format!("{} points", p.points.len()),
        Geometry::Polygon(p) | Geometry::Rect(p) => format!("{} vertices", p.points.len()),
        Geometry::Group(g) => format!("{} children", g.children.len()),
    }
}

fn output_text(doc: &Document) -> Result<()> {
    println!("{}", "Document Summary".bold());

    let mut summary_table = Table::new();
    summary_table.load_preset(UTF8_FULL_CONDENSED);
    summary_table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    summary_table.add_row(vec![
        Cell::new("Canvas").fg(Color::Cyan),
        Cell::new(format!("{} x {}", doc.width(), doc.height())),
    ]);
    summary_table.add_row(vec![
        Cell::new("Top-level Shapes").fg(Color::Cyan),
        Cell::new(doc.roots().len().to_string()),
    ]);
    summary_table.add_row(vec![
        Cell::new("Total Shapes").fg(Color::Cyan),
        Cell::new(doc.arena().len().to_string()),
    ]);

    println!("{summary_table}");

    if doc.roots().is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Shapes".bold());

    let mut shape_table = Table::new();
    shape_table.load_preset(UTF8_FULL_CONDENSED);
    shape_table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    shape_table.set_header(vec![
        Cell::new("Kind"),
        Cell::new("Id"),
        Cell::new("Color"),
        Cell::new("Geometry"),
    ]);

    doc.walk(|_, shape, depth| {
        let kind = format!("{}{}", "  ".repeat(depth), shape.kind().as_str());
        let kind_cell = match shape.geometry() {
            Geometry::Group(_) => Cell::new(kind).fg(Color::Grey),
            _ => Cell::new(kind),
        };
        let color = shape
            .geometry()
            .color()
            .map(|c| c.to_string())
            .unwrap_or_default();

        shape_table.add_row(vec![
            kind_cell,
            Cell::new(shape.id().unwrap_or("")),
            Cell::new(color),
            Cell::new(describe(shape)),
        ]);
    });

    println!("{shape_table}");
    Ok(())
}

/// Nested JSON tree for `id`
pub fn shape_json(doc: &Document, id: ShapeId) -> Value {
    let shape = doc.shape(id);
    let mut node = json!({
        "kind": shape.kind(),
        "id": shape.id(),
    });

    match shape.geometry() {
        Geometry::Group(group) => {
            node["children"] = group
                .children
                .iter()
                .map(|&child| shape_json(doc, child))
                .collect();
        }
        geometry => {
            node["color"] = json!(geometry.color().map(|c| c.to_hex()));
            node["coords"] = json!(doc.arena().coords(id));
        }
    }
    node
}

fn output_json(doc: &Document) -> Result<()> {
    let shapes: Vec<Value> = doc.roots().iter().map(|&id| shape_json(doc, id)).collect();
    let info = json!({
        "width": doc.width(),
        "height": doc.height(),
        "shape_count": doc.arena().len(),
        "shapes": shapes,
    });

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
