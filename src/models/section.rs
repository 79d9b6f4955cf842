//! Section record and its feed/table conversions.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Sentinel for fields the source leaves blank.
const UNKNOWN: &str = "-";

/// One scheduled course section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Course code (branch prefix + number, e.g. "MAT 101")
    pub course_code: String,

    /// Branch lookup id; stamped by the fetcher when the feed omits it
    pub branch_id: u32,

    /// Section reference (CRN), 0 if unparsable
    pub section_reference: u32,

    /// Course title
    pub title: String,

    /// Instructor display name (may be empty)
    pub instructor: String,

    /// Room name
    pub room: String,

    /// Building code
    pub building: String,

    /// Localized weekday label
    pub weekday: String,

    /// Start time, "-" when unknown
    pub start_time: String,

    /// End time, "-" when unknown
    pub end_time: String,

    /// Seat capacity, 0 when missing or non-numeric
    pub capacity: u32,

    /// Enrolled count, 0 when missing or non-numeric
    pub enrolled: u32,

    /// Reservation note (opaque passthrough)
    pub reservation: String,

    /// Program list (opaque passthrough)
    pub programs: String,

    /// Prerequisite notes (opaque passthrough)
    pub prerequisite: String,

    /// Class prerequisite notes (opaque passthrough)
    pub class_prerequisite: String,
}

/// Wire shape of one section object in the structured feed.
///
/// String identity fields are required; everything else degrades
/// per-field instead of failing the record.
#[derive(Debug, Deserialize)]
struct FeedSection {
    #[serde(rename = "dersKodu")]
    course_code: String,

    #[serde(rename = "dersAdi")]
    title: String,

    #[serde(rename = "dersBransKoduId", default, deserialize_with = "lenient_count")]
    branch_id: u32,

    #[serde(rename = "crn", default, deserialize_with = "lenient_count")]
    section_reference: u32,

    #[serde(rename = "adSoyad", default)]
    instructor: String,

    #[serde(rename = "mekanAdi", default)]
    room: String,

    #[serde(rename = "binaKodu", default)]
    building: String,

    #[serde(rename = "gunAdiTR", default)]
    weekday: String,

    #[serde(rename = "baslangicSaati", default = "dash")]
    start_time: String,

    #[serde(rename = "bitisSaati", default = "dash")]
    end_time: String,

    #[serde(rename = "kontenjan", default, deserialize_with = "lenient_count")]
    capacity: u32,

    #[serde(rename = "ogrenciSayisi", default, deserialize_with = "lenient_count")]
    enrolled: u32,

    #[serde(rename = "rezervasyon", default = "dash")]
    reservation: String,

    #[serde(rename = "sinifProgram", default = "dash")]
    programs: String,

    #[serde(rename = "onSart", default = "dash")]
    prerequisite: String,

    #[serde(rename = "sinifOnsart", default = "dash")]
    class_prerequisite: String,
}

fn dash() -> String {
    UNKNOWN.to_string()
}

/// Accept a count as a JSON number or a digit string; anything else is 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => u32::try_from(n).unwrap_or(0),
        Raw::Text(s) => parse_count(&s),
        Raw::Other(_) => 0,
    })
}

/// Parse a non-negative count, defaulting to 0 on anything unparsable.
fn parse_count(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

impl Section {
    /// Convert one structured-feed object into a section.
    ///
    /// Returns `None` when the value is not a mapping or an identity
    /// field is missing; the caller skips such records and continues.
    pub fn from_feed_value(value: &Value) -> Option<Self> {
        let feed: FeedSection = serde_json::from_value(value.clone()).ok()?;
        Some(Self {
            course_code: feed.course_code,
            branch_id: feed.branch_id,
            section_reference: feed.section_reference,
            title: feed.title,
            instructor: feed.instructor,
            room: feed.room,
            building: feed.building,
            weekday: feed.weekday,
            start_time: feed.start_time,
            end_time: feed.end_time,
            capacity: feed.capacity,
            enrolled: feed.enrolled,
            reservation: feed.reservation,
            programs: feed.programs,
            prerequisite: feed.prerequisite,
            class_prerequisite: feed.class_prerequisite,
        })
    }

    /// Convert one markup table row into a section.
    ///
    /// Cells are positional; the caller guarantees at least 11 of them.
    /// Trailing descriptive cells default to "-" when absent.
    pub fn from_table_cells(cells: &[String], branch_id: u32) -> Self {
        let cell = |idx: usize| -> &str { cells.get(idx).map_or(UNKNOWN, String::as_str) };
        let (start_time, end_time) = split_time_range(cell(7));

        Self {
            course_code: cell(1).to_string(),
            branch_id,
            section_reference: parse_count(cell(0)),
            title: cell(2).to_string(),
            // The source reuses the teaching-method slot for the instructor display.
            instructor: cell(3).to_string(),
            room: cell(8).to_string(),
            building: cell(5).to_string(),
            weekday: cell(6).to_string(),
            start_time,
            end_time,
            capacity: parse_count(cell(9)),
            enrolled: parse_count(cell(10)),
            reservation: cell(11).to_string(),
            programs: cell(12).to_string(),
            prerequisite: cell(13).to_string(),
            class_prerequisite: cell(14).to_string(),
        }
    }
}

/// Split a "start/end" time cell; no slash means both ends are unknown.
fn split_time_range(raw: &str) -> (String, String) {
    match raw.split_once('/') {
        Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    }
}
