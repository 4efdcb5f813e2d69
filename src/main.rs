// src/main.rs

mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use image_edges::image_processing::{load_image, show_side_by_side, write_edge_map};
use image_edges::output::resolve_output_path;
use image_edges::{detect_edges, EdgeMethod};
use log::{error, info};
use opencv::prelude::*;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // reject unknown methods before touching any file
    let method = match args.method.parse::<EdgeMethod>() {
        Ok(method) => method,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let output = resolve_output_path(&args.input, Some(args.output.as_str()))
        .context("Could not determine the output file")?;

    // Read image
    let image = match load_image(&args.input) {
        Ok(image) => image,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let edges = detect_edges(&image, method)
        .with_context(|| format!("Edge detection with {} failed on {}", method, args.input))?;
    info!("Edge map: {}x{}", edges.cols(), edges.rows());

    if args.no_display {
        info!("Display disabled");
    } else {
        show_side_by_side(&image, &edges).context("Could not display the result")?;
    }

    write_edge_map(&output, &edges).with_context(|| format!("Could not save edges to {}", output))?;

    info!("Done ({} channel(s) in, {} out)", image.channels(), edges.channels());
    Ok(())
}
