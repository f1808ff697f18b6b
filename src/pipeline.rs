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

//! Batch orchestration: sort, render, sequence, package, write.

use anyhow::{bail, Context, Result};

use chrono::Utc;
use itertools::Itertools;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::config::MAX_BATCH_EVENTS;
use crate::images::{render_event_image, render_main_image};
use crate::loader::Assets;
use crate::model::{BatchRequest, EventRecord, LocationCatalog};

use tracing::{info, span, Level};

/// Runs the full batch pipeline and returns the finished archive bytes.
///
/// Events are ordered strictly ascending by date (undated records first) and
/// numbered by their 1-based sorted position; records whose location cannot
/// be resolved keep their slot in the numbering but contribute no image.
/// The summary image is always first in the archive.
pub fn generate_batch(
    batch: &BatchRequest,
    catalog: &LocationCatalog,
    assets: &Assets,
) -> Result<Vec<u8>> {
    if batch.events.len() > MAX_BATCH_EVENTS {
        bail!(
            "Batch contains {} events; at most {} are supported",
            batch.events.len(),
            MAX_BATCH_EVENTS
        );
    }

    let span = span!(Level::INFO, "generate_batch");
    let _enter = span.enter();

    info!("Rendering summary image");
    let mut images = vec![render_main_image(batch, catalog, assets)?];

    let ordered: Vec<&EventRecord> = batch
        .events
        .iter()
        .sorted_by_key(|event| event.sort_stamp())
        .collect();

    for (index, event) in ordered.iter().enumerate() {
        let sequence = index + 1;
        match render_event_image(sequence, event, catalog, assets)? {
            Some(image) => {
                info!("Rendered event image {:?}", image.name);
                images.push(image);
            }
            None => info!("Event {} skipped: unresolved location", sequence),
        }
    }

    info!("Packaging {} images", images.len());
    archive::pack(&images)
}

/// Archive filename for a batch run. The timestamp is captured at trigger
/// time, so repeated runs in one session never collide.
pub fn batch_archive_name() -> String {
    format!("SocialImages-{}.zip", Utc::now().timestamp_millis())
}

/// Materializes a finished blob as a file the user can pick up.
pub fn download(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf> {
    let path = dir.join(filename);

    let f = std::fs::File::create(&path)
        .with_context(|| format!("Creating output file {:?}", path))?;
    let mut f = std::io::BufWriter::new(f);
    f.write_all(data)?;
    f.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, MAIN_IMAGE_BG, SPECIAL_IMAGE_BG};
    use crate::images::render_special_image;
    use crate::model::{Location, SpecialOccasionRequest};
    use crate::render_prims::Canvas;

    use chrono::NaiveDate;
    use std::io::{Cursor, Read};
    use tempfile::TempDir;

    fn write_test_bg(dir: &Path, name: &str) {
        // Backgrounds can be any size; they are drawn at the origin.
        let canvas = Canvas::new(32, 40).unwrap();
        let data = canvas.into_png().unwrap();
        std::fs::write(dir.join(name), data).unwrap();
    }

    fn location(id: u32, name: &str, bg: &str) -> Location {
        Location {
            id,
            name: name.into(),
            main_image_name: name.into(),
            individual_image_name: name.to_uppercase(),
            background_image_path: bg.into(),
            color: "#7374B7".into(),
            address: "1 Crag Way\nBasalt, CO".into(),
            start_time: "5:00 PM".into(),
            end_time: "8:00 PM".into(),
            description: "Come climb with us".into(),
        }
    }

    fn event(day: Option<NaiveDate>, location: u32) -> EventRecord {
        EventRecord {
            day,
            start_time: "5:00 PM".into(),
            end_time: "8:00 PM".into(),
            location: Some(location),
            address: String::new(),
            description: String::new(),
        }
    }

    fn fixture() -> (TempDir, LocationCatalog, Assets) {
        let dir = tempfile::tempdir().unwrap();
        for name in &["bg-a.png", "bg-b.png", MAIN_IMAGE_BG, SPECIAL_IMAGE_BG] {
            write_test_bg(dir.path(), name);
        }

        let catalog = LocationCatalog::new(vec![
            location(1, "Cliffhangers", "bg-a.png"),
            location(2, "Boulder Barn", "bg-b.png"),
        ]);
        let assets = Assets::new(dir.path().to_string_lossy().into_owned());

        (dir, catalog, assets)
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        Some(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn entry_names(archive: &[u8]) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn entry_data(archive: &[u8], name: &str) -> Vec<u8> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        let mut entry = zip.by_name(name).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        data
    }

    fn png_dimensions(data: &[u8]) -> (u32, u32) {
        let decoder = png::Decoder::new(data);
        let (info, _reader) = decoder.read_info().unwrap();
        (info.width, info.height)
    }

    #[test]
    fn batch_orders_and_numbers_by_date() {
        // Input order is the reverse of date order.
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![
                event(day(2025, 6, 10), 1),
                event(day(2025, 6, 3), 2),
            ],
        };

        let data = generate_batch(&batch, &catalog, &assets).unwrap();
        assert_eq!(
            entry_names(&data),
            vec![
                "0 - Main Image.png",
                "1 - Boulder Barn.png",
                "2 - Cliffhangers.png",
            ]
        );
    }

    #[test]
    fn unresolved_location_is_excluded_not_fatal() {
        // The later event references a location the catalog does not
        // contain.
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![
                event(day(2025, 6, 10), 99),
                event(day(2025, 6, 3), 2),
            ],
        };

        let data = generate_batch(&batch, &catalog, &assets).unwrap();
        assert_eq!(
            entry_names(&data),
            vec!["0 - Main Image.png", "1 - Boulder Barn.png"]
        );
    }

    #[test]
    fn skipped_event_leaves_a_hole_in_the_numbering() {
        // The unresolved event sorts first; its successor keeps the index
        // of its sorted position instead of being renumbered.
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![
                event(day(2025, 6, 10), 2),
                event(day(2025, 6, 3), 99),
            ],
        };

        let data = generate_batch(&batch, &catalog, &assets).unwrap();
        assert_eq!(
            entry_names(&data),
            vec!["0 - Main Image.png", "2 - Boulder Barn.png"]
        );
    }

    #[test]
    fn empty_batch_still_produces_the_summary() {
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![],
        };

        let data = generate_batch(&batch, &catalog, &assets).unwrap();
        assert_eq!(entry_names(&data), vec!["0 - Main Image.png"]);
    }

    #[test]
    fn undated_events_sort_first() {
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![
                event(day(2025, 6, 3), 2),
                event(None, 1),
            ],
        };

        let data = generate_batch(&batch, &catalog, &assets).unwrap();
        assert_eq!(
            entry_names(&data),
            vec![
                "0 - Main Image.png",
                "1 - Cliffhangers.png",
                "2 - Boulder Barn.png",
            ]
        );
    }

    #[test]
    fn every_rendered_canvas_is_full_size() {
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![event(day(2025, 6, 3), 2)],
        };

        let data = generate_batch(&batch, &catalog, &assets).unwrap();
        for name in entry_names(&data) {
            assert_eq!(
                png_dimensions(&entry_data(&data, &name)),
                (CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32),
                "wrong dimensions for {:?}",
                name
            );
        }
    }

    #[test]
    fn identical_batches_produce_identical_archives() {
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![event(day(2025, 6, 3), 2), event(day(2025, 6, 10), 1)],
        };

        let first = generate_batch(&batch, &catalog, &assets).unwrap();
        let second = generate_batch(&batch, &catalog, &assets).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let (_dir, catalog, assets) = fixture();
        let batch = BatchRequest {
            month: 5,
            year: 2025,
            events: vec![event(day(2025, 6, 3), 2); MAX_BATCH_EVENTS + 1],
        };

        assert!(generate_batch(&batch, &catalog, &assets).is_err());
    }

    #[test]
    fn special_occasion_single_file_naming() {
        let (_dir, catalog, assets) = fixture();
        let request = SpecialOccasionRequest {
            day: day(2025, 6, 21),
            start_time: "5:00 PM".into(),
            end_time: "8:00 PM".into(),
            when_description: "Doors at 4:30".into(),
            location: Some(1),
            cost: "Free!\nDonations welcome".into(),
        };

        let image = render_special_image(&request, &catalog, &assets)
            .unwrap()
            .expect("location resolves");
        assert_eq!(image.name, "QTBIPOC - 2025-06-21.png");
        assert_eq!(
            png_dimensions(&image.data),
            (CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32)
        );

        let unresolved = SpecialOccasionRequest {
            location: Some(99),
            ..request
        };
        assert!(render_special_image(&unresolved, &catalog, &assets)
            .unwrap()
            .is_none());
    }

    #[test]
    fn download_writes_the_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = download(dir.path(), "SocialImages-test.zip", b"payload").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    }
}
