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

//! Low-level drawing surface and text layout primitives.
//!
//! The [`Canvas`] mirrors the 2D-canvas drawing model the layouts were
//! calibrated against: a mutable current font and fill color, text drawn with
//! its baseline at the given y, multi-line text pre-segmented on `\n` at a
//! fixed line height (no wrapping).

use anyhow::Result;
use thiserror::Error;

use pango::FontDescription;

use std::f64::consts::PI;

pub type RGBInt = (u8, u8, u8);

pub const fn rgb(col: u32) -> RGBInt {
    let r = (col >> 16) as u8;
    let g = (col >> 8) as u8;
    let b = col as u8;

    (r, g, b)
}

const PANGO_SCALE: f64 = 1024.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cairo error: {0}")]
    CairoError(cairo::Status),
    #[error("Invalid color literal: {0:?}")]
    BadColor(String),
}

impl From<cairo::Status> for RenderError {
    fn from(s: cairo::Status) -> Self {
        RenderError::CairoError(s)
    }
}

pub(crate) fn convert_err<E>(err: E) -> anyhow::Error
where
    RenderError: From<E>,
{
    RenderError::from(err).into()
}

#[derive(Clone, Copy, Debug)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl From<RGBInt> for Color {
    fn from(rgb: RGBInt) -> Self {
        Color {
            r: (rgb.0 as f64 * (1.0 / 255.0)),
            g: (rgb.1 as f64 * (1.0 / 255.0)),
            b: (rgb.2 as f64 * (1.0 / 255.0)),
        }
    }
}

/// Parses a backend color literal of the form "#RRGGBB".
pub fn parse_hex_color(literal: &str) -> Result<RGBInt> {
    let digits = literal.strip_prefix('#').unwrap_or(literal);
    if digits.len() != 6 {
        return Err(RenderError::BadColor(literal.into()).into());
    }

    u32::from_str_radix(digits, 16)
        .map(rgb)
        .map_err(|_| RenderError::BadColor(literal.into()).into())
}

/// A fixed-size drawing surface with canvas-style font/fill state.
pub struct Canvas {
    surface: cairo::ImageSurface,
    cr: cairo::Context,
    font: FontDescription,
    fill: Color,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Result<Canvas> {
        let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height)
            .map_err(convert_err)?;
        let cr = cairo::Context::new(&surface);

        Ok(Canvas {
            surface,
            cr,
            font: FontDescription::new(),
            fill: rgb(0x000000).into(),
        })
    }

    /// Sets the current font from a pango description string.
    pub fn set_font(&mut self, description: &str) {
        self.font = FontDescription::from_string(description);
    }

    pub fn set_fill(&mut self, color: RGBInt) {
        self.fill = color.into();
    }

    /// Paints a decoded bitmap at the top-left corner, under anything drawn
    /// afterwards.
    pub fn draw_bitmap(&self, bitmap: &cairo::ImageSurface) {
        self.cr.save();
        self.cr.set_source_surface(bitmap, 0.0, 0.0);
        self.cr.paint();
        self.cr.restore();
    }

    fn line_layout(&self, text: &str) -> Result<pango::Layout> {
        // No width, no wrap mode: a layout is always a single line measured
        // at its natural extent.
        let layout = pangocairo::create_layout(&self.cr)
            .ok_or_else(|| anyhow::anyhow!("Failed to create pango layout"))?;

        layout.set_font_description(Some(&self.font));
        layout.set_text(text);

        Ok(layout)
    }

    /// Rendered width of a single line in the current font, in pixels.
    pub fn measure_text(&self, text: &str) -> Result<f64> {
        let layout = self.line_layout(text)?;
        Ok(layout.get_size().0 as f64 / PANGO_SCALE)
    }

    /// Draws one line of text with its baseline at `y`.
    pub fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<()> {
        let layout = self.line_layout(text)?;
        let baseline = layout
            .get_iter()
            .map(|mut iter| iter.get_baseline() as f64 / PANGO_SCALE)
            .unwrap_or(0.0);

        self.cr.save();
        self.cr.set_source_rgb(self.fill.r, self.fill.g, self.fill.b);
        self.cr.move_to(x, y - baseline);
        pangocairo::show_layout(&self.cr, &layout);
        self.cr.restore();

        Ok(())
    }

    /// Draws text pre-segmented on `\n`, line `i` at `y + i * line_height`,
    /// left-aligned at `x`.
    pub fn fill_multiline(&self, text: &str, line_height: f64, x: f64, y: f64) -> Result<()> {
        for (index, line) in text.split('\n').enumerate() {
            self.fill_text(line, x, y + line_height * index as f64)?;
        }

        Ok(())
    }

    /// Like [`fill_multiline`](Canvas::fill_multiline), but each line is
    /// independently centered within `width` (lines of different lengths do
    /// not share a left edge).
    pub fn fill_multiline_centered(
        &self,
        text: &str,
        line_height: f64,
        x: f64,
        y: f64,
        width: f64,
    ) -> Result<()> {
        for (index, line) in text.split('\n').enumerate() {
            let line_width = self.measure_text(line)?;
            self.fill_text(
                line,
                x + (width / 2.0 - line_width / 2.0),
                y + line_height * index as f64,
            )?;
        }

        Ok(())
    }

    /// Fills (and optionally strokes) a rounded rectangle.
    pub fn rounded_rect(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        fill: RGBInt,
        stroke: Option<(RGBInt, f64)>,
    ) {
        let cr = &self.cr;
        cr.save();
        cr.new_path();
        cr.arc(x + w - radius, y + radius, radius, -PI / 2.0, 0.0);
        cr.arc(x + w - radius, y + h - radius, radius, 0.0, PI / 2.0);
        cr.arc(x + radius, y + h - radius, radius, PI / 2.0, PI);
        cr.arc(x + radius, y + radius, radius, PI, 1.5 * PI);
        cr.close_path();

        let fill: Color = fill.into();
        cr.set_source_rgb(fill.r, fill.g, fill.b);

        match stroke {
            Some((color, line_width)) => {
                cr.fill_preserve();
                let color: Color = color.into();
                cr.set_source_rgb(color.r, color.g, color.b);
                cr.set_line_width(line_width);
                cr.stroke();
            }
            None => cr.fill(),
        }

        cr.restore();
    }

    /// Finalizes the surface and encodes it as PNG. Consumes the canvas; the
    /// context must be dropped before the surface data is read back.
    pub fn into_png(self) -> Result<Vec<u8>> {
        let Canvas { surface, cr, .. } = self;
        std::mem::drop(cr);
        surface.flush();

        let mut data = Vec::new();
        surface.write_to_png(&mut data)?;

        Ok(data)
    }
}
