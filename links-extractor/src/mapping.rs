//! Activity classification, program lookup and the combined link set

use std::collections::HashMap;

use crate::records::{
    Activity, LINK_ACTIVITY_LABEL, LinkMapping, LinkRecord, Program, SQL_ACTIVITY_LABEL,
    SqlMapping,
};

/// Activity TYPE values the link pipeline cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Link,
    Sql,
}

impl ActivityKind {
    /// Classify a raw TYPE cell (trimmed, case-insensitive)
    pub fn classify(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "LINK" => Some(ActivityKind::Link),
            "SQL" => Some(ActivityKind::Sql),
            _ => None,
        }
    }
}

/// Split activities into LINK and SQL subsets, keeping input order
///
/// Activities of any other TYPE are left out of both, as are activities with
/// a blank ACTIVITY.
pub fn partition(activities: &[Activity]) -> (Vec<&Activity>, Vec<&Activity>) {
    let mut link = Vec::new();
    let mut sql = Vec::new();

    for activity in activities {
        if activity.activity.trim().is_empty() {
            log::warn!(
                "Skipping activity with blank ACTIVITY (TYPE '{}', SOURCE '{}')",
                activity.kind,
                activity.source
            );
            continue;
        }
        match ActivityKind::classify(&activity.kind) {
            Some(ActivityKind::Link) => link.push(activity),
            Some(ActivityKind::Sql) => sql.push(activity),
            None => {}
        }
    }

    (link, sql)
}

/// PGM LINK -> PGM ID; a repeated PGM LINK keeps its last PGM ID
pub fn program_index(programs: &[Program]) -> HashMap<&str, &str> {
    let mut index = HashMap::with_capacity(programs.len());
    for program in programs {
        index.insert(program.link.as_str(), program.id.as_str());
    }
    index
}

/// Resolve each LINK activity's trimmed SOURCE to a program id
pub fn link_mappings(link: &[&Activity], index: &HashMap<&str, &str>) -> Vec<LinkMapping> {
    link.iter()
        .map(|a| {
            let source = a.source.trim();
            LinkMapping {
                activity: a.activity.clone(),
                kind: a.kind.clone(),
                source: source.to_string(),
                pgm_id: index.get(source).map(|id| id.to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

pub fn sql_mappings(sql: &[&Activity]) -> Vec<SqlMapping> {
    sql.iter()
        .map(|a| SqlMapping {
            activity: a.activity.clone(),
            kind: a.kind.clone(),
            source: a.source.trim().to_string(),
            descr: a.descr.clone(),
        })
        .collect()
}

/// All LINK rows, then all SQL rows (PGMID taken from SOURCE), relabeled
pub fn combine_links(link: &[LinkMapping], sql: &[SqlMapping]) -> Vec<LinkRecord> {
    let link_rows = link.iter().map(|m| LinkRecord {
        activity: m.activity.clone(),
        kind: LINK_ACTIVITY_LABEL.to_string(),
        pgm_id: m.pgm_id.clone(),
    });

    let sql_rows = sql.iter().map(|m| LinkRecord {
        activity: m.activity.clone(),
        kind: SQL_ACTIVITY_LABEL.to_string(),
        pgm_id: m.source.clone(),
    });

    link_rows.chain(sql_rows).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str, kind: &str, source: &str) -> Activity {
        Activity {
            activity: name.to_string(),
            kind: kind.to_string(),
            source: source.to_string(),
            descr: format!("{name} descr"),
        }
    }

    fn program(link: &str, id: &str) -> Program {
        Program {
            link: link.to_string(),
            id: id.to_string(),
            descr: String::new(),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(ActivityKind::classify("LINK"), Some(ActivityKind::Link));
        assert_eq!(ActivityKind::classify(" link "), Some(ActivityKind::Link));
        assert_eq!(ActivityKind::classify("Sql"), Some(ActivityKind::Sql));
        assert_eq!(ActivityKind::classify("TRAN"), None);
        assert_eq!(ActivityKind::classify(""), None);
    }

    #[test]
    fn test_partition_keeps_order() {
        let activities = vec![
            activity("A1", "LINK", "S1"),
            activity("A2", "SQL", "T1"),
            activity("A3", "OTHER", "X"),
            activity("A4", " Link", "S2"),
            activity("A5", "sql ", "T2"),
        ];

        let (link, sql) = partition(&activities);
        let names = |v: &[&Activity]| v.iter().map(|a| a.activity.clone()).collect::<Vec<_>>();
        assert_eq!(names(&link), vec!["A1", "A4"]);
        assert_eq!(names(&sql), vec!["A2", "A5"]);
    }

    #[test]
    fn test_partition_skips_blank_activity() {
        let activities = vec![
            activity("", "LINK", "S1"),
            activity("  ", "SQL", "T1"),
            activity("A1", "LINK", "S2"),
        ];

        let (link, sql) = partition(&activities);
        assert_eq!(link.len(), 1);
        assert_eq!(link[0].activity, "A1");
        assert!(sql.is_empty());
    }

    #[test]
    fn test_program_index_last_wins() {
        let programs = vec![program("L1", "P1"), program("L2", "P2"), program("L1", "P3")];
        let index = program_index(&programs);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("L1"), Some(&"P3"));
    }

    #[test]
    fn test_link_mappings_trim_and_lookup() {
        let activities = vec![
            activity("A1", "LINK", "  L1 "),
            activity("A2", "LINK", "UNKNOWN"),
        ];
        let programs = vec![program("L1", "PGM123")];
        let index = program_index(&programs);

        let refs: Vec<&Activity> = activities.iter().collect();
        let mappings = link_mappings(&refs, &index);

        assert_eq!(mappings[0].source, "L1");
        assert_eq!(mappings[0].pgm_id, "PGM123");
        assert!(mappings[0].is_matched());
        assert_eq!(mappings[1].pgm_id, "");
        assert!(!mappings[1].is_matched());
        // TYPE stays as written in the sheet
        assert_eq!(mappings[0].kind, "LINK");
    }

    #[test]
    fn test_combine_links() {
        let activities = vec![
            activity("S1", "SQL", " TBL_A "),
            activity("L1", "LINK", "K1"),
            activity("L2", "LINK", "K2"),
        ];
        let programs = vec![program("K1", "P1")];
        let index = program_index(&programs);

        let (link, sql) = partition(&activities);
        let combined = combine_links(&link_mappings(&link, &index), &sql_mappings(&sql));

        let rows: Vec<(&str, &str, &str)> = combined
            .iter()
            .map(|r| (r.activity.as_str(), r.kind.as_str(), r.pgm_id.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("L1", LINK_ACTIVITY_LABEL, "P1"),
                ("L2", LINK_ACTIVITY_LABEL, ""),
                ("S1", SQL_ACTIVITY_LABEL, "TBL_A"),
            ]
        );
    }
}
