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

//! Presentation constants. Every origin/line-height below is calibrated to
//! the fixed 4500x5625 output canvas; none are computed from content.

use crate::render_prims::{rgb, RGBInt};

pub const CANVAS_WIDTH: i32 = 4500;
pub const CANVAS_HEIGHT: i32 = 5625;

/// Upper bound on batch form rows.
pub const MAX_BATCH_EVENTS: usize = 7;

/// Background art fetches fail rather than hang.
pub const LOAD_TIMEOUT_SECS: u64 = 30;

pub const MAIN_IMAGE_BG: &str = "main-image-bg.png";
pub const SPECIAL_IMAGE_BG: &str = "qtbipoc-bg.png";

pub const MAIN_IMAGE_NAME: &str = "0 - Main Image.png";
pub const MAIN_TITLE: &str = "CLIMBING EVENTS";

pub const RGB_ACCENT: RGBInt = rgb(0x7374B7);
pub const RGB_WHITE: RGBInt = rgb(0xFFFFFF);
pub const RGB_BODY: RGBInt = rgb(0x000000);
pub const RGB_SPECIAL_TEXT: RGBInt = rgb(0x595959);

// Per-event image
pub const EVENT_TEXT_LEFT: f64 = 269.0;
pub const EVENT_HEADER_BASELINE: f64 = 547.0;
pub const EVENT_HEADER_LINE_HEIGHT: f64 = 395.0;
pub const EVENT_DATE_BASELINE: f64 = 1704.0;
pub const EVENT_TIME_BASELINE: f64 = 1879.0;
pub const EVENT_ADDRESS_TOP: f64 = 2223.0;
pub const EVENT_ADDRESS_LINE_HEIGHT: f64 = 120.0;
pub const EVENT_DESC_TOP: f64 = 2710.0;
pub const EVENT_DESC_LINE_HEIGHT: f64 = 117.0;

// Summary (main) image: month/year badge and title
pub const BADGE_PAD: f64 = 172.0;
pub const BADGE_TOP: f64 = 331.0;
pub const BADGE_HEIGHT: f64 = 318.0;
pub const BADGE_RADIUS: f64 = 159.0;
pub const BADGE_TEXT_BASELINE: f64 = 547.0;
pub const TITLE_BASELINE: f64 = 1068.0;

// Summary image: event rows. Row bands divide the canvas height minus the
// header reservation evenly by the event count.
pub const ROW_AREA_RESERVED: f64 = 2469.0;
pub const ROW_TOP: f64 = 1399.0;
pub const ROW_CARD_LEFT: f64 = 1346.0;
pub const ROW_CARD_WIDTH: f64 = 2266.0;
pub const ROW_CARD_HEIGHT: f64 = 366.0;
pub const ROW_CARD_RADIUS: f64 = 183.0;
pub const ROW_CARD_STROKE: f64 = 8.0;
pub const ROW_CHIP_LEFT: f64 = 743.0;
pub const ROW_CHIP_WIDTH: f64 = 603.0;
pub const ROW_CHIP_LINE_HEIGHT: f64 = 179.0;
// Offsets below are relative to the card top.
pub const ROW_CHIP_BASELINE: f64 = 143.0;
pub const ROW_TEXT_LEFT: f64 = 1460.0;
pub const ROW_NAME_BASELINE: f64 = 170.0;
pub const ROW_TIME_BASELINE: f64 = 303.0;

// Special-occasion image
pub const SPECIAL_TEXT_LEFT: f64 = 1207.0;
pub const SPECIAL_LINE_HEIGHT: f64 = 235.0;
pub const SPECIAL_WHEN_TOP: f64 = 1769.0;
pub const SPECIAL_WHERE_TOP: f64 = 2955.0;
pub const SPECIAL_COST_TOP: f64 = 4142.0;

pub const FONT_EVENT_HEADER: &str = "Poppins Bold 327px";
pub const FONT_EVENT_DATE: &str = "Poppins Bold 146px";
pub const FONT_EVENT_ADDRESS: &str = "Poppins Medium 106px";
pub const FONT_EVENT_DESC: &str = "Poppins 106px";
pub const FONT_BADGE: &str = "Poppins Bold 147px";
pub const FONT_TITLE: &str = "Poppins Bold 333px";
pub const FONT_ROW_DATE: &str = "Poppins Bold 150px";
pub const FONT_ROW_NAME: &str = "Poppins Bold 133px";
pub const FONT_ROW_TIME: &str = "Poppins Medium 99px";
pub const FONT_SPECIAL: &str = "Arial Bold 195px";
