use std::time::SystemTime;

use indexmap::IndexMap;

/// Per-part aggregation state: revision labels per folder plus the running
/// latest-location record.
#[derive(Debug, Clone)]
pub struct PartRecord {
    /// folder -> distinct revision labels, in insertion order.
    pub revisions: IndexMap<String, Vec<String>>,
    pub latest_modified: SystemTime,
    pub latest_folder: String,
}

/// Everything one run aggregates: column order plus one record per part
/// number, both in first-seen order.
#[derive(Debug, Default)]
pub struct RevisionLog {
    pub columns: Vec<String>,
    pub parts: IndexMap<String, PartRecord>,
}

impl RevisionLog {
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            parts: IndexMap::new(),
        }
    }

    /// Fold one (part, folder, label, mtime) observation into the log. The
    /// first observation for a part always becomes its latest location;
    /// later ones replace it only when strictly newer.
    pub fn record(&mut self, part: String, folder: String, label: String, modified: SystemTime) {
        match self.parts.get_mut(&part) {
            Some(record) => {
                if modified > record.latest_modified {
                    record.latest_modified = modified;
                    record.latest_folder = folder.clone();
                }
                let labels = record.revisions.entry(folder).or_default();
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            None => {
                let mut revisions = IndexMap::new();
                revisions.insert(folder.clone(), vec![label]);
                self.parts.insert(
                    part,
                    PartRecord {
                        revisions,
                        latest_modified: modified,
                        latest_folder: folder,
                    },
                );
            }
        }
    }

    /// Render to the output-format-independent table: header row plus one row
    /// per part with comma-joined revision cells and the latest-location cell
    /// flagged for highlighting.
    pub fn to_table(&self) -> ReportTable {
        let mut headers = Vec::with_capacity(self.columns.len() + 1);
        headers.push("Part Number".to_string());
        headers.extend(self.columns.iter().cloned());

        let rows = self
            .parts
            .iter()
            .map(|(part, record)| {
                let cells = self
                    .columns
                    .iter()
                    .map(|column| ReportCell {
                        value: record
                            .revisions
                            .get(column)
                            .map(|labels| labels.join(", "))
                            .unwrap_or_default(),
                        highlighted: record.latest_folder == *column,
                    })
                    .collect();

                ReportRow {
                    part_number: part.clone(),
                    cells,
                }
            })
            .collect();

        ReportTable { headers, rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub part_number: String,
    pub cells: Vec<ReportCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCell {
    pub value: String,
    pub highlighted: bool,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn t(seconds: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(seconds)
    }

    #[test]
    fn identical_labels_deduplicate_and_distinct_ones_join_in_order() {
        let mut log = RevisionLog::with_columns(vec!["a".into()]);
        log.record("111".into(), "a".into(), "A.02".into(), t(10));
        log.record("111".into(), "a".into(), "A.02".into(), t(11));
        log.record("111".into(), "a".into(), "B.03".into(), t(12));

        let table = log.to_table();
        assert_eq!(table.rows[0].cells[0].value, "A.02, B.03");
    }

    #[test]
    fn first_observation_always_sets_the_latest_location() {
        let mut log = RevisionLog::with_columns(vec!["a".into()]);
        log.record("111".into(), "a".into(), "A.01".into(), t(100));
        assert_eq!(log.parts["111"].latest_folder, "a");
        assert_eq!(log.parts["111"].latest_modified, t(100));
    }

    #[test]
    fn newer_observation_replaces_the_latest_and_older_does_not() {
        let mut log = RevisionLog::with_columns(vec!["a".into(), "b".into()]);
        log.record("111".into(), "a".into(), "A.01".into(), t(100));
        log.record("111".into(), "b".into(), "A.02".into(), t(200));
        assert_eq!(log.parts["111"].latest_folder, "b");

        log.record("111".into(), "a".into(), "A.03".into(), t(150));
        assert_eq!(log.parts["111"].latest_folder, "b");
    }

    #[test]
    fn at_most_one_cell_per_row_is_highlighted() {
        let mut log = RevisionLog::with_columns(vec!["a".into(), "b".into(), "c".into()]);
        log.record("111".into(), "a".into(), "A.01".into(), t(1));
        log.record("111".into(), "b".into(), "A.02".into(), t(2));
        log.record("111".into(), "c".into(), "A.03".into(), t(3));

        let row = &log.to_table().rows[0];
        let highlighted: Vec<usize> = row
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.highlighted)
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(highlighted, vec![2]);
    }

    #[test]
    fn folders_without_revisions_render_blank_cells() {
        let mut log = RevisionLog::with_columns(vec!["a".into(), "b".into()]);
        log.record("111".into(), "b".into(), "A.01".into(), t(1));

        let row = &log.to_table().rows[0];
        assert_eq!(row.cells[0].value, "");
        assert!(!row.cells[0].highlighted);
        assert_eq!(row.cells[1].value, "A.01");
        assert!(row.cells[1].highlighted);
    }

    #[test]
    fn end_to_end_two_folder_example() {
        let mut log = RevisionLog::with_columns(vec!["A".into(), "B".into()]);
        log.record("1111111111".into(), "A".into(), "A.01".into(), t(100));
        log.record("1111111111".into(), "B".into(), "A.02".into(), t(200));

        let table = log.to_table();
        assert_eq!(table.headers, vec!["Part Number", "A", "B"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].part_number, "1111111111");
        assert_eq!(table.rows[0].cells[0].value, "A.01");
        assert!(!table.rows[0].cells[0].highlighted);
        assert_eq!(table.rows[0].cells[1].value, "A.02");
        assert!(table.rows[0].cells[1].highlighted);
    }

    #[test]
    fn parts_keep_first_seen_row_order() {
        let mut log = RevisionLog::with_columns(vec!["a".into()]);
        log.record("222".into(), "a".into(), "A.01".into(), t(1));
        log.record("111".into(), "a".into(), "A.01".into(), t(2));

        let table = log.to_table();
        assert_eq!(table.rows[0].part_number, "222");
        assert_eq!(table.rows[1].part_number, "111");
    }
}
