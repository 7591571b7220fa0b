//! Plain-text rendering of a plant record.

use crate::knowledge::PlantRecord;
use std::fmt::Write as _;

/// Format a record as an aligned multi-line block.
pub fn format_record(record: &PlantRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", record.display_name());
    let _ = writeln!(out, "{}", "=".repeat(record.display_name().chars().count().max(1)));
    let _ = writeln!(out, "  {:<10}{}", "Species:", record.species());
    let _ = writeln!(out, "  {:<10}{}", "Title:", record.title());
    let _ = writeln!(out, "  {:<10}{}", "Order:", record.order());
    let _ = writeln!(out, "  {:<10}{}", "Family:", record.family());
    let _ = writeln!(out, "  {:<10}{}", "Genus:", record.genus());
    if let Some(url) = record.reference_url() {
        let _ = writeln!(out, "  {:<10}{url}", "More:");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.description());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{Summary, Taxonomy};

    #[test]
    fn test_format_record_with_placeholders() {
        let record = PlantRecord::fuse("ti", Summary::default(), Taxonomy::unavailable());
        let text = format_record(&record);

        assert!(text.starts_with("Unknown Common Name\n"));
        assert!(text.contains("Order:    N/A"));
        assert!(text.contains("Species:  ti"));
        assert!(!text.contains("More:"));
        assert!(text.trim_end().ends_with("No description available."));
    }

    #[test]
    fn test_format_record_with_link() {
        let summary = Summary {
            page_url: Some("https://en.wikipedia.org/wiki/Hedera_helix".to_string()),
            ..Summary::default()
        };
        let record = PlantRecord::fuse("ivy tree", summary, Taxonomy::unavailable());
        assert!(format_record(&record).contains("More:     https://en.wikipedia.org/wiki/Hedera_helix"));
    }
}
