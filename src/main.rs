// Copyright 2020-2021 bd_
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions: The above copyright
// notice and this permission notice shall be included in all copies or
// substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

#![allow(dead_code)]

mod archive;
mod catalog;
mod config;
mod images;
mod loader;
mod model;
mod pipeline;
mod render_prims;

use anyhow::{bail, Context, Result};

use chrono::NaiveDate;

use std::path::Path;

use model::{BatchRequest, EventRecord, SpecialOccasionRequest};

use tracing::info;

use clap::Parser;

#[derive(Parser)]
#[clap(version = "1.0", author = "bd_ <bdunderscore@fushizen.net>")]
struct Opts {
    /// Location catalog: REST endpoint URL or local JSON file
    #[clap(short, long)]
    catalog: String,

    /// Batch request JSON file: summary plus per-event images, zipped
    #[clap(short, long)]
    batch: Option<String>,

    /// Special-occasion request JSON file: one standalone image
    #[clap(short, long)]
    special: Option<String>,

    /// Base directory or URL the background art is resolved against
    #[clap(short, long)]
    assets: String,

    /// Directory generated files are written to
    #[clap(short, long, default_value = ".")]
    output_dir: String,

    /// Render a built-in sample batch instead of reading --batch
    #[clap(long, conflicts_with = "batch")]
    sample_data: bool,
}

fn sample_batch() -> BatchRequest {
    BatchRequest {
        month: 5,
        year: 2025,
        events: vec![EventRecord {
            day: NaiveDate::from_ymd_opt(2025, 6, 10),
            start_time: "5:00 PM".into(),
            end_time: "8:00 PM".into(),
            location: Some(1),
            address: String::new(),
            description: String::new(),
        }],
    }
}

fn read_request<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("Opening request file {:?}", path))?;
    let f = std::io::BufReader::new(f);

    serde_json::from_reader(f).with_context(|| format!("Parsing request file {:?}", path))
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    tracing_subscriber::fmt::init();
    info!("Starting social image generation");

    let catalog = catalog::load_catalog(&opts.catalog)?;
    info!("Catalog loaded: {} locations", catalog.len());

    let assets = loader::Assets::new(opts.assets.clone());
    let output_dir = Path::new(&opts.output_dir);

    let batch = if opts.sample_data {
        Some(sample_batch())
    } else if let Some(path) = &opts.batch {
        Some(read_request(path)?)
    } else {
        None
    };

    let mut ran = false;

    if let Some(batch) = &batch {
        let data = pipeline::generate_batch(batch, &catalog, &assets)?;
        let path = pipeline::download(output_dir, &pipeline::batch_archive_name(), &data)?;
        info!("Wrote archive {:?}", path);
        ran = true;
    }

    if let Some(path) = &opts.special {
        let request: SpecialOccasionRequest = read_request(path)?;
        match images::render_special_image(&request, &catalog, &assets)? {
            Some(image) => {
                let path = pipeline::download(output_dir, &image.name, &image.data)?;
                info!("Wrote image {:?}", path);
            }
            None => info!("Special-occasion location not in catalog; nothing to render"),
        }
        ran = true;
    }

    if !ran {
        bail!("Nothing to do: pass --batch, --special, or --sample-data");
    }

    Ok(())
}
