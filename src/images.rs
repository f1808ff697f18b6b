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

//! The three image renderers. Each allocates its own canvas, so renders are
//! independent; draw order within a renderer matters (later draws overlay
//! earlier ones) and must not be reordered.

use anyhow::Result;

use chrono::{Datelike, Local, NaiveDate};
use itertools::Itertools;

use crate::config::*;
use crate::loader::{load_bitmap, Assets};
use crate::model::{
    BatchRequest, EventRecord, LocationCatalog, RenderedImage, SpecialOccasionRequest,
};
use crate::render_prims::{parse_hex_color, Canvas};

use tracing::debug;

fn ordinal_day(day: u32) -> String {
    let suffix = match day {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };

    format!("{}{}", day, suffix)
}

/// "Tuesday, June 10th"
pub fn format_long_date(day: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        day.format("%A"),
        day.format("%B"),
        ordinal_day(day.day())
    )
}

/// "June 2025" from a zero-based month index and a year.
pub fn format_month_banner(month: u32, year: i32) -> Result<String> {
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month/year: {}/{}", month, year))?;

    Ok(first.format("%B %Y").to_string())
}

/// Two-line date chip text: "TUE\n6/10".
pub fn format_date_chip(day: NaiveDate) -> String {
    format!(
        "{}\n{}",
        day.format("%a").to_string().to_uppercase(),
        day.format("%-m/%-d")
    )
}

pub fn format_time_range(start: &str, end: &str) -> String {
    format!("{} - {}", start, end)
}

/// "2025-06-10", used in the special-occasion filename.
pub fn format_file_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Renders one per-event image. `sequence` is the record's 1-based position
/// in the date-sorted batch and is embedded in the filename. An unresolvable
/// location reference is not an error; it yields no image.
pub fn render_event_image(
    sequence: usize,
    event: &EventRecord,
    catalog: &LocationCatalog,
    assets: &Assets,
) -> Result<Option<RenderedImage>> {
    let location = match event.location_ref().and_then(|id| catalog.get(id)) {
        Some(location) => location,
        None => {
            debug!("Event {} has no resolvable location; skipping", sequence);
            return Ok(None);
        }
    };

    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;

    let background = load_bitmap(&assets.resolve(&location.background_image_path))?;
    canvas.draw_bitmap(&background);

    // Header in the venue's theme color
    canvas.set_fill(parse_hex_color(&location.color)?);
    canvas.set_font(FONT_EVENT_HEADER);
    canvas.fill_multiline(
        &location.individual_image_name.to_uppercase(),
        EVENT_HEADER_LINE_HEIGHT,
        EVENT_TEXT_LEFT,
        EVENT_HEADER_BASELINE,
    )?;

    // Date and time range
    canvas.set_fill(RGB_BODY);
    canvas.set_font(FONT_EVENT_DATE);
    if let Some(day) = event.day {
        canvas.fill_text(&format_long_date(day), EVENT_TEXT_LEFT, EVENT_DATE_BASELINE)?;
    }
    canvas.fill_text(
        &format_time_range(&event.start_time, &event.end_time),
        EVENT_TEXT_LEFT,
        EVENT_TIME_BASELINE,
    )?;

    // Address and description, with catalog fallbacks
    canvas.set_font(FONT_EVENT_ADDRESS);
    canvas.fill_multiline(
        event.address_or(location),
        EVENT_ADDRESS_LINE_HEIGHT,
        EVENT_TEXT_LEFT,
        EVENT_ADDRESS_TOP,
    )?;

    canvas.set_font(FONT_EVENT_DESC);
    canvas.fill_multiline(
        event.description_or(location),
        EVENT_DESC_LINE_HEIGHT,
        EVENT_TEXT_LEFT,
        EVENT_DESC_TOP,
    )?;

    Ok(Some(RenderedImage {
        name: format!("{} - {}.png", sequence, location.name),
        data: canvas.into_png()?,
    }))
}

/// Renders the batch summary image: month/year badge, title, and one row
/// band per event in ascending date order. Rows whose location cannot be
/// resolved are left blank but still consume their band.
pub fn render_main_image(
    batch: &BatchRequest,
    catalog: &LocationCatalog,
    assets: &Assets,
) -> Result<RenderedImage> {
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;

    let background = load_bitmap(&assets.resolve(MAIN_IMAGE_BG))?;
    canvas.draw_bitmap(&background);

    let center = CANVAS_WIDTH as f64 / 2.0;

    // Month/year badge, sized to the measured banner width
    canvas.set_font(FONT_BADGE);
    let banner = format_month_banner(batch.month, batch.year)?;
    let banner_width = canvas.measure_text(&banner)?;
    let badge_width = banner_width + BADGE_PAD * 2.0;

    canvas.rounded_rect(
        center - badge_width / 2.0,
        BADGE_TOP,
        badge_width,
        BADGE_HEIGHT,
        BADGE_RADIUS,
        RGB_ACCENT,
        None,
    );
    canvas.set_fill(RGB_WHITE);
    canvas.fill_text(&banner, center - banner_width / 2.0, BADGE_TEXT_BASELINE)?;

    // Title
    canvas.set_font(FONT_TITLE);
    canvas.set_fill(RGB_ACCENT);
    let title_width = canvas.measure_text(MAIN_TITLE)?;
    canvas.fill_text(MAIN_TITLE, center - title_width / 2.0, TITLE_BASELINE)?;

    // Event rows
    let ordered: Vec<&EventRecord> = batch
        .events
        .iter()
        .sorted_by_key(|event| event.sort_stamp())
        .collect();

    if !ordered.is_empty() {
        let row_height = (CANVAS_HEIGHT as f64 - ROW_AREA_RESERVED) / ordered.len() as f64;
        let card_offset = row_height / 2.0 - ROW_CARD_HEIGHT / 2.0;

        for (index, event) in ordered.iter().enumerate() {
            let location = match event.location_ref().and_then(|id| catalog.get(id)) {
                Some(location) => location,
                // The band stays reserved; see DESIGN.md
                None => continue,
            };

            let card_top = ROW_TOP + row_height * index as f64 + card_offset;

            canvas.rounded_rect(
                ROW_CARD_LEFT,
                card_top,
                ROW_CARD_WIDTH,
                ROW_CARD_HEIGHT,
                ROW_CARD_RADIUS,
                RGB_WHITE,
                Some((RGB_ACCENT, ROW_CARD_STROKE)),
            );

            canvas.set_fill(RGB_ACCENT);
            if let Some(day) = event.day {
                canvas.set_font(FONT_ROW_DATE);
                canvas.fill_multiline_centered(
                    &format_date_chip(day),
                    ROW_CHIP_LINE_HEIGHT,
                    ROW_CHIP_LEFT,
                    card_top + ROW_CHIP_BASELINE,
                    ROW_CHIP_WIDTH,
                )?;
            }

            canvas.set_font(FONT_ROW_NAME);
            canvas.fill_text(
                &location.main_image_name,
                ROW_TEXT_LEFT,
                card_top + ROW_NAME_BASELINE,
            )?;

            canvas.set_font(FONT_ROW_TIME);
            canvas.fill_text(
                &format_time_range(&event.start_time, &event.end_time),
                ROW_TEXT_LEFT,
                card_top + ROW_TIME_BASELINE,
            )?;
        }
    }

    Ok(RenderedImage {
        name: MAIN_IMAGE_NAME.to_string(),
        data: canvas.into_png()?,
    })
}

/// Renders the standalone special-occasion image. Not part of the batch
/// archive; the caller writes it out directly.
pub fn render_special_image(
    request: &SpecialOccasionRequest,
    catalog: &LocationCatalog,
    assets: &Assets,
) -> Result<Option<RenderedImage>> {
    let location = match request.location_ref().and_then(|id| catalog.get(id)) {
        Some(location) => location,
        None => {
            debug!("Special-occasion request has no resolvable location; skipping");
            return Ok(None);
        }
    };

    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;

    let background = load_bitmap(&assets.resolve(SPECIAL_IMAGE_BG))?;
    canvas.draw_bitmap(&background);

    canvas.set_font(FONT_SPECIAL);
    canvas.set_fill(RGB_SPECIAL_TEXT);

    let day = request.day.unwrap_or_else(|| Local::now().date_naive());

    let when = format!(
        "{}\n{}\n{}",
        format_long_date(day),
        format_time_range(&request.start_time, &request.end_time),
        request.when_description
    );
    canvas.fill_multiline(&when, SPECIAL_LINE_HEIGHT, SPECIAL_TEXT_LEFT, SPECIAL_WHEN_TOP)?;

    let where_text = format!("{}\n{}", location.name, location.address);
    canvas.fill_multiline(
        &where_text,
        SPECIAL_LINE_HEIGHT,
        SPECIAL_TEXT_LEFT,
        SPECIAL_WHERE_TOP,
    )?;

    canvas.fill_multiline(
        &request.cost,
        SPECIAL_LINE_HEIGHT,
        SPECIAL_TEXT_LEFT,
        SPECIAL_COST_TOP,
    )?;

    Ok(Some(RenderedImage {
        name: format!("QTBIPOC - {}.png", format_file_date(day)),
        data: canvas.into_png()?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_day(1), "1st");
        assert_eq!(ordinal_day(2), "2nd");
        assert_eq!(ordinal_day(3), "3rd");
        assert_eq!(ordinal_day(4), "4th");
        assert_eq!(ordinal_day(11), "11th");
        assert_eq!(ordinal_day(12), "12th");
        assert_eq!(ordinal_day(13), "13th");
        assert_eq!(ordinal_day(21), "21st");
        assert_eq!(ordinal_day(22), "22nd");
        assert_eq!(ordinal_day(23), "23rd");
        assert_eq!(ordinal_day(31), "31st");
    }

    #[test]
    fn long_date_format() {
        assert_eq!(format_long_date(date(2025, 6, 10)), "Tuesday, June 10th");
        assert_eq!(format_long_date(date(2025, 3, 1)), "Saturday, March 1st");
    }

    #[test]
    fn month_banner_is_zero_indexed() {
        assert_eq!(format_month_banner(5, 2025).unwrap(), "June 2025");
        assert_eq!(format_month_banner(0, 2026).unwrap(), "January 2026");
        assert_eq!(format_month_banner(11, 2025).unwrap(), "December 2025");
        assert!(format_month_banner(12, 2025).is_err());
    }

    #[test]
    fn date_chip_format() {
        assert_eq!(format_date_chip(date(2025, 6, 10)), "TUE\n6/10");
        assert_eq!(format_date_chip(date(2025, 11, 2)), "SUN\n11/2");
    }

    #[test]
    fn time_range_and_file_date() {
        assert_eq!(format_time_range("5:00 PM", "8:00 PM"), "5:00 PM - 8:00 PM");
        assert_eq!(format_file_date(date(2025, 6, 3)), "2025-06-03");
    }
}
