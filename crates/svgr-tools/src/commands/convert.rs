use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use svgr::Document;

use crate::utils::file as file_utils;

pub fn execute(inputs: &[PathBuf], output: Option<&Path>) -> Result<()> {
    if output.is_some() && inputs.len() != 1 {
        bail!("--output can only be used with a single input");
    }

    let jobs: Vec<(&Path, PathBuf)> = inputs
        .iter()
        .map(|input| {
            let png = output.map_or_else(|| default_output(input), Path::to_path_buf);
            (input.as_path(), png)
        })
        .collect();

    let mut seen = HashSet::new();
    for (input, png) in &jobs {
        if !seen.insert(png) {
            bail!(
                "{} would overwrite {}, which another input also writes",
                input.display(),
                png.display()
            );
        }
    }

    // Documents are independent; results come back in input order.
    let results: Vec<Result<()>> = jobs
        .par_iter()
        .map(|(input, png)| convert_one(input, png))
        .collect();

    let mut failed = 0;
    for ((input, png), result) in jobs.iter().zip(results) {
        match result {
            Ok(()) => println!("{} {} -> {}", "✓".green(), input.display(), png.display()),
            Err(err) => {
                failed += 1;
                eprintln!("{} {}: {:#}", "✗".red(), input.display(), err);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} documents failed to convert", jobs.len());
    }
    Ok(())
}

/// `drawing.svg`, `drawing.svgz` and `drawing.svg.gz` all map to `drawing.png`.
pub fn default_output(input: &Path) -> PathBuf {
    let base = if input.extension().and_then(|s| s.to_str()) == Some("gz") {
        input.with_extension("")
    } else {
        input.to_path_buf()
    };
    base.with_extension("png")
}

fn convert_one(input: &Path, png: &Path) -> Result<()> {
    let xml = file_utils::load_svg_file(input)?;
    let doc = Document::parse(&xml).with_context(|| format!("Failed to parse {:?}", input))?;
    log::debug!(
        "Rasterizing {:?} ({}x{}, {} shapes)",
        input,
        doc.width(),
        doc.height(),
        doc.arena().len()
    );
    doc.save_png(png)
        .with_context(|| format!("Failed to write {:?}", png))
}
