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

//! Background art loading. Sources are either http(s) URLs (fetched with a
//! hard timeout so a stalled asset fails the render instead of hanging it)
//! or filesystem paths. No caching; each render loads its own copy.

use anyhow::{Context, Result};

use std::path::Path;
use std::time::Duration;

use crate::config::LOAD_TIMEOUT_SECS;

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolves backend-relative art references (e.g. "/manage/images/x.png")
/// against a base directory or URL.
#[derive(Clone, Debug)]
pub struct Assets {
    base: String,
}

impl Assets {
    pub fn new(base: impl Into<String>) -> Self {
        Assets { base: base.into() }
    }

    pub fn resolve(&self, reference: &str) -> String {
        if is_remote(reference) {
            return reference.to_string();
        }

        if is_remote(&self.base) {
            return format!(
                "{}/{}",
                self.base.trim_end_matches('/'),
                reference.trim_start_matches('/')
            );
        }

        // Backend refs carry a leading slash ("/manage/images/...") but
        // still live under the art directory. An absolute path passes
        // through only when it actually exists on disk.
        let path = Path::new(reference);
        if path.is_absolute() && path.exists() {
            return reference.to_string();
        }

        Path::new(&self.base)
            .join(reference.trim_start_matches('/'))
            .to_string_lossy()
            .into_owned()
    }
}

/// Loads and decodes a PNG resource into a drawable bitmap.
pub fn load_bitmap(source: &str) -> Result<cairo::ImageSurface> {
    if is_remote(source) {
        fetch_png_surface(source)
    } else {
        load_png_surface(source)
    }
}

fn fetch_png_surface(url: &str) -> Result<cairo::ImageSurface> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(LOAD_TIMEOUT_SECS))
        .build()?;

    let data = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .with_context(|| format!("Fetching background image {:?}", url))?
        .bytes()?;

    let mut reader = std::io::Cursor::new(&data[..]);
    cairo::ImageSurface::create_from_png(&mut reader).map_err(Into::into)
}

fn load_png_surface(png_filename: &str) -> Result<cairo::ImageSurface> {
    let f = std::fs::File::open(png_filename)
        .context(format!("Loading PNG file {:?}", png_filename))?;
    let mut f = std::io::BufReader::new(f);

    cairo::ImageSurface::create_from_png(&mut f).map_err(Into::into)
}
