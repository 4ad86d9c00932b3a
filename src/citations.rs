use std::collections::HashSet;

use crate::models::{CitationRecord, ResponseContext};

pub const SEARCH_RESULTS_TITLE: &str = "Search results";

pub fn dedupe_citations(records: Vec<CitationRecord>) -> Vec<CitationRecord> {
    let mut seen_doc_ids = HashSet::new();
    let mut deduped = Vec::with_capacity(records.len());

    for record in records {
        if seen_doc_ids.insert(record.doc_id) {
            deduped.push(record);
        }
    }

    deduped
}

pub fn citation_records(context: &ResponseContext) -> Vec<CitationRecord> {
    let Some(thought) = context
        .thoughts
        .iter()
        .find(|thought| thought.title == SEARCH_RESULTS_TITLE)
    else {
        return vec![];
    };

    let Some(entries) = thought.description.as_array() else {
        return vec![];
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match CitationRecord::from_value(entry) {
            Some(record) => records.push(record),
            None => tracing::warn!("skipping malformed citation record: {entry}"),
        }
    }

    records
}
