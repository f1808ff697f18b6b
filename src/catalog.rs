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

//! Location catalog retrieval. The catalog is owned by the backend; this
//! module only fetches and parses it, either from the REST endpoint or from
//! a local JSON dump of the same wire format.

use anyhow::{Context, Result};
use thiserror::Error;

use std::path::Path;

use crate::loader::is_remote;
use crate::model::{Location, LocationCatalog};

use tracing::info;

#[derive(Error, Debug)]
enum CatalogFetchError {
    #[error("Catalog failed to parse: {0}")]
    ParseError(serde_json::Error),
}

/// Loads the catalog from an http(s) endpoint or a local file path.
pub fn load_catalog(source: &str) -> Result<LocationCatalog> {
    if is_remote(source) {
        fetch_catalog(source)
    } else {
        read_catalog(Path::new(source))
    }
}

#[tracing::instrument]
fn fetch_catalog(url: &str) -> Result<LocationCatalog> {
    info!("Fetching location catalog...");

    let locations: Vec<Location> = reqwest::blocking::get(url)?
        .error_for_status()?
        .json()
        .with_context(|| format!("Parsing catalog response from {:?}", url))?;

    Ok(LocationCatalog::new(locations))
}

fn read_catalog(path: &Path) -> Result<LocationCatalog> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("Opening catalog file {:?}", path))?;
    let f = std::io::BufReader::new(f);

    let locations: Vec<Location> =
        serde_json::from_reader(f).map_err(|e| CatalogFetchError::ParseError(e))?;

    Ok(LocationCatalog::new(locations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_a_catalog_dump() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br##"[
                {
                    "id": 1,
                    "name": "Boulder Barn",
                    "mainImageName": "Boulder Barn",
                    "individualImageName": "BOULDER\nBARN",
                    "backgroundImagePath": "/manage/images/barn-bg.png",
                    "color": "#7374B7",
                    "address": "1 Crag Way",
                    "startTime": "5:00 PM",
                    "endTime": "8:00 PM",
                    "description": "Monthly meetup"
                }
            ]"##,
        )
        .unwrap();

        let catalog = load_catalog(file.path().to_str().unwrap()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).map(|l| l.name.as_str()), Some("Boulder Barn"));
    }

    #[test]
    fn empty_list_is_a_valid_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();

        let catalog = load_catalog(file.path().to_str().unwrap()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        assert!(load_catalog(file.path().to_str().unwrap()).is_err());
    }
}
