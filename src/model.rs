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

use chrono::NaiveDate;
use serde::Deserialize;

/// A venue record as served by the backend. Carries the per-venue theme
/// (header color, background art, display-name variants) along with the
/// canonical schedule/address/description text the form defaults from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub main_image_name: String,
    /// May contain embedded newlines; rendered as the multi-line header of
    /// the per-event image.
    pub individual_image_name: String,
    pub background_image_path: String,
    /// Hex color literal, e.g. "#7374B7".
    pub color: String,
    pub address: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

/// Read-only lookup over the fetched location list. Passed by reference to
/// every renderer; an empty catalog is valid and simply resolves nothing.
#[derive(Clone, Debug, Default)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    pub fn new(locations: Vec<Location>) -> Self {
        LocationCatalog { locations }
    }

    pub fn get(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// One calendar occurrence from the batch form. Address and description
/// default from the referenced location when left empty.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub day: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<u32>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

impl EventRecord {
    /// The location reference, with zero normalized to "unset".
    pub fn location_ref(&self) -> Option<u32> {
        match self.location {
            Some(0) | None => None,
            other => other,
        }
    }

    /// Batch ordering key: midnight of the event day as a unix timestamp,
    /// with undated records keyed to the epoch so they sort first.
    pub fn sort_stamp(&self) -> i64 {
        self.day
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0)
    }

    pub fn address_or<'a>(&'a self, location: &'a Location) -> &'a str {
        if self.address.is_empty() {
            &location.address
        } else {
            &self.address
        }
    }

    pub fn description_or<'a>(&'a self, location: &'a Location) -> &'a str {
        if self.description.is_empty() {
            &location.description
        } else {
            &self.description
        }
    }
}

/// One batch-pipeline invocation: a target month plus the event rows.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Zero-based month (0 = January), as sent by the form.
    pub month: u32,
    pub year: i32,
    pub events: Vec<EventRecord>,
}

/// The single-image QTBIPOC variant; never archived.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOccasionRequest {
    #[serde(default)]
    pub day: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    pub when_description: String,
    #[serde(default)]
    pub location: Option<u32>,
    pub cost: String,
}

impl SpecialOccasionRequest {
    pub fn location_ref(&self) -> Option<u32> {
        match self.location {
            Some(0) | None => None,
            other => other,
        }
    }
}

/// A finished render: suggested filename plus encoded PNG bytes. Exists only
/// for the duration of a pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedImage {
    pub name: String,
    pub data: Vec<u8>,
}
