//! Schedule feed parsing.
//!
//! Two entry points selected by the fetcher: `parse_feed` for the
//! structured JSON body, `parse_table` for the markup fallback. Neither
//! is allowed to panic past its boundary; the fallback path degrades to
//! an empty snapshot instead of erroring.

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{ScheduleSnapshot, Section};
use crate::utils::normalize_ws;

/// Minimum cells a table row needs to be interpreted as a section.
const MIN_ROW_CELLS: usize = 11;

/// Envelope of the structured schedule feed.
#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(rename = "dersProgramList")]
    sections: Vec<Value>,

    #[serde(rename = "guncellenmeSaati")]
    updated_at: String,
}

/// Parse the structured feed body.
///
/// Fails closed: a body that is not JSON or misses an envelope key is a
/// `Parse` error, so the caller can decide to fall back. Malformed
/// entries inside the course list are skipped, not fatal.
pub fn parse_feed(body: &str, branch_id: u32) -> Result<ScheduleSnapshot> {
    let envelope: FeedEnvelope =
        serde_json::from_str(body).map_err(|e| AppError::parse(format!("feed envelope: {e}")))?;

    let mut sections = Vec::with_capacity(envelope.sections.len());
    for value in &envelope.sections {
        let Some(mut section) = Section::from_feed_value(value) else {
            continue;
        };
        if section.branch_id == 0 {
            section.branch_id = branch_id;
        }
        sections.push(section);
    }

    Ok(ScheduleSnapshot::new(sections, envelope.updated_at))
}

/// Parse the markup fallback document.
///
/// Never errors: a missing table or body yields an empty snapshot (the
/// feed-format-changed / empty-branch degradation path), and any
/// unexpected internal fault degrades the same way, logged.
pub fn parse_table(body: &str, branch_id: u32) -> ScheduleSnapshot {
    match try_parse_table(body, branch_id) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            log::warn!("table parse degraded to empty for branch {branch_id}: {error}");
            ScheduleSnapshot::empty()
        }
    }
}

fn try_parse_table(body: &str, branch_id: u32) -> Result<ScheduleSnapshot> {
    let document = Html::parse_document(body);
    let row_sel = parse_selector("table#dersProgramContainer > tbody > tr")?;
    let cell_sel = parse_selector("td")?;

    let mut sections = Vec::new();
    for row in document.select(&row_sel) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|cell| normalize_ws(&cell.text().collect::<String>()))
            .collect();

        // Header rows and truncated rows are omitted, not errors.
        if cells.len() < MIN_ROW_CELLS {
            continue;
        }
        sections.push(Section::from_table_cells(&cells, branch_id));
    }

    // The fallback document never carries an update timestamp.
    Ok(ScheduleSnapshot::new(sections, ""))
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::parse(format!("selector '{selector}': {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_body(enrolled: u32) -> String {
        format!(
            r#"{{
                "dersProgramList": [
                    {{
                        "crn": "21534",
                        "dersKodu": "MAT 101",
                        "dersBransKoduId": 26,
                        "dersAdi": "Matematik I",
                        "adSoyad": "A. Hoca",
                        "mekanAdi": "D-201",
                        "gunAdiTR": "Pazartesi",
                        "baslangicSaati": "08:30",
                        "bitisSaati": "10:30",
                        "binaKodu": "MED",
                        "kontenjan": 30,
                        "ogrenciSayisi": {enrolled}
                    }}
                ],
                "guncellenmeSaati": "12:00"
            }}"#
        )
    }

    fn table_row(cell_count: usize, crn: u32) -> String {
        let mut row = String::from("<tr>");
        for idx in 0..cell_count {
            if idx == 0 {
                row.push_str(&format!("<td>{crn}</td>"));
            } else {
                row.push_str(&format!("<td>cell {idx}</td>"));
            }
        }
        row.push_str("</tr>");
        row
    }

    fn table_body(rows: &[String]) -> String {
        format!(
            "<html><body><table id=\"dersProgramContainer\">\
             <thead><tr><th>CRN</th><th>Kod</th></tr></thead>\
             <tbody>{}</tbody></table></body></html>",
            rows.join("")
        )
    }

    #[test]
    fn feed_parses_one_record_per_section() {
        let snapshot = parse_feed(&feed_body(29), 26).unwrap();
        assert_eq!(snapshot.sections.len(), 1);
        assert_eq!(snapshot.updated_at, "12:00");
        assert_eq!(snapshot.sections[0].course_code, "MAT 101");
        assert_eq!(snapshot.sections[0].enrolled, 29);
    }

    #[test]
    fn feed_rejects_missing_timestamp() {
        let body = r#"{ "dersProgramList": [] }"#;
        assert!(matches!(parse_feed(body, 26), Err(AppError::Parse(_))));
    }

    #[test]
    fn feed_rejects_non_array_course_list() {
        let body = r#"{ "dersProgramList": "none", "guncellenmeSaati": "12:00" }"#;
        assert!(matches!(parse_feed(body, 26), Err(AppError::Parse(_))));
    }

    #[test]
    fn feed_rejects_markup_body() {
        let body = "<html><body>Ders Programı</body></html>";
        assert!(matches!(parse_feed(body, 26), Err(AppError::Parse(_))));
    }

    #[test]
    fn feed_skips_malformed_entries() {
        let body = r#"{
            "dersProgramList": [
                { "dersKodu": "MAT 101", "dersAdi": "Matematik I" },
                42,
                { "dersAdi": "Kodu eksik" }
            ],
            "guncellenmeSaati": ""
        }"#;

        let snapshot = parse_feed(body, 26).unwrap();
        assert_eq!(snapshot.sections.len(), 1);
        assert_eq!(snapshot.sections[0].course_code, "MAT 101");
    }

    #[test]
    fn feed_stamps_branch_when_omitted() {
        let body = r#"{
            "dersProgramList": [
                { "dersKodu": "MAT 101", "dersAdi": "Matematik I" }
            ],
            "guncellenmeSaati": ""
        }"#;

        let snapshot = parse_feed(body, 26).unwrap();
        assert_eq!(snapshot.sections[0].branch_id, 26);
    }

    #[test]
    fn feed_keeps_branch_when_present() {
        let snapshot = parse_feed(&feed_body(29), 99).unwrap();
        assert_eq!(snapshot.sections[0].branch_id, 26);
    }

    #[test]
    fn table_skips_short_rows() {
        let rows: Vec<String> = (0..10)
            .map(|i| {
                let cell_count = if i == 3 { 9 } else { 11 };
                table_row(cell_count, 1000 + i)
            })
            .collect();

        let snapshot = parse_table(&table_body(&rows), 26);
        assert_eq!(snapshot.sections.len(), 9);
        assert!(snapshot.sections.iter().all(|s| s.section_reference != 1003));
    }

    #[test]
    fn table_stamps_branch_on_every_record() {
        let rows = vec![table_row(11, 1), table_row(12, 2)];
        let snapshot = parse_table(&table_body(&rows), 196);
        assert_eq!(snapshot.sections.len(), 2);
        assert!(snapshot.sections.iter().all(|s| s.branch_id == 196));
    }

    #[test]
    fn table_missing_yields_empty_snapshot() {
        let snapshot = parse_table("<html><body><p>bakım</p></body></html>", 26);
        assert_eq!(snapshot, ScheduleSnapshot::empty());
    }

    #[test]
    fn table_with_no_data_rows_yields_empty_snapshot() {
        let snapshot = parse_table(&table_body(&[]), 26);
        assert!(snapshot.sections.is_empty());
        assert_eq!(snapshot.updated_at, "");
    }

    #[test]
    fn table_cell_text_is_whitespace_normalized() {
        let mut row = String::from("<tr>");
        row.push_str("<td> 21534 </td><td>EHB\r\n313E</td>");
        for _ in 2..11 {
            row.push_str("<td>x</td>");
        }
        row.push_str("</tr>");

        let snapshot = parse_table(&table_body(&[row]), 196);
        assert_eq!(snapshot.sections[0].section_reference, 21534);
        assert_eq!(snapshot.sections[0].course_code, "EHB 313E");
    }
}
