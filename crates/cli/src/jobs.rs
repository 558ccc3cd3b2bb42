//! Built-in bulk-edit jobs.

use bookmend_core::id_from_key;
use bookmend_harness::{BulkJob, DumpRow, PlannedChange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const EDITION_TYPE: &str = "/type/edition";

/// Typed view of an edition document.
///
/// Recognized fields are listed explicitly; everything else lands in
/// `rest` and round-trips unchanged through a persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EditionDoc {
    key: String,
    #[serde(rename = "type")]
    kind: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TypeRef {
    key: String,
}

fn needs_trim(title: &str) -> bool {
    title.trim() != title
}

/// Strips leading and trailing whitespace from edition titles.
pub struct TrimTitlesJob;

impl BulkJob for TrimTitlesJob {
    fn name(&self) -> &str {
        "trim_titles"
    }

    fn comment(&self) -> &str {
        "trim whitespace"
    }

    fn candidate(&self, row: &DumpRow) -> Option<String> {
        if row.record["type"]["key"] != EDITION_TYPE {
            return None;
        }
        let title = row.record["title"].as_str()?;
        if !needs_trim(title) {
            return None;
        }
        let key = row.record["key"].as_str()?;
        id_from_key(key).map(str::to_string)
    }

    fn plan(&self, _id: &str, live: &Value) -> Option<PlannedChange> {
        let doc: EditionDoc = serde_json::from_value(live.clone()).ok()?;
        // Deleted or retyped records have fallen out of scope.
        if doc.kind.key != EDITION_TYPE {
            return None;
        }
        let title = doc.title.as_deref()?;
        if !needs_trim(title) {
            return None;
        }

        let old_value = title.to_string();
        let new_value = title.trim().to_string();
        let mut corrected = doc;
        corrected.title = Some(new_value.clone());
        let record = serde_json::to_value(&corrected).ok()?;

        Some(PlannedChange {
            old_value,
            new_value,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmend_harness::decode_row;
    use serde_json::json;

    fn row(record: &Value) -> DumpRow {
        let line = format!("t\tk\t1\t2020-01-01\t{record}");
        decode_row(&line, '\t').unwrap()
    }

    #[test]
    fn test_candidate_matches_padded_edition_title() {
        let record = json!({
            "key": "/books/OL1M",
            "type": {"key": "/type/edition"},
            "title": " A Book ",
        });
        assert_eq!(
            TrimTitlesJob.candidate(&row(&record)),
            Some("OL1M".to_string())
        );
    }

    #[test]
    fn test_candidate_skips_clean_titles_and_other_types() {
        let clean = json!({
            "key": "/books/OL1M",
            "type": {"key": "/type/edition"},
            "title": "A Book",
        });
        assert_eq!(TrimTitlesJob.candidate(&row(&clean)), None);

        let wrong_type = json!({
            "key": "/works/OL2W",
            "type": {"key": "/type/work"},
            "title": " A Work ",
        });
        assert_eq!(TrimTitlesJob.candidate(&row(&wrong_type)), None);

        let no_title = json!({
            "key": "/books/OL3M",
            "type": {"key": "/type/edition"},
        });
        assert_eq!(TrimTitlesJob.candidate(&row(&no_title)), None);
    }

    #[test]
    fn test_plan_trims_and_keeps_unrecognized_fields() {
        let live = json!({
            "key": "/books/OL1M",
            "type": {"key": "/type/edition"},
            "title": " A Book\t",
            "publishers": ["Somewhere Press"],
            "number_of_pages": 123,
        });

        let change = TrimTitlesJob.plan("OL1M", &live).unwrap();
        assert_eq!(change.old_value, " A Book\t");
        assert_eq!(change.new_value, "A Book");
        assert_eq!(change.record["title"], "A Book");
        // Fields outside the typed view survive the round trip.
        assert_eq!(change.record["publishers"][0], "Somewhere Press");
        assert_eq!(change.record["number_of_pages"], 123);
    }

    #[test]
    fn test_plan_skips_already_fixed_title() {
        let live = json!({
            "key": "/books/OL1M",
            "type": {"key": "/type/edition"},
            "title": "A Book",
        });
        assert!(TrimTitlesJob.plan("OL1M", &live).is_none());
    }

    #[test]
    fn test_plan_skips_deleted_record() {
        let live = json!({
            "key": "/books/OL1M",
            "type": {"key": "/type/delete"},
        });
        assert!(TrimTitlesJob.plan("OL1M", &live).is_none());
    }
}
