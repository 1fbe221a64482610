use crate::types::responses::LookupStats;
use crate::types::{Reputation, ScanRow};

/// Tally scanned rows into the four reputation buckets and the suspicious split.
///
/// Unknown or missing labels count as `none`; a missing suspicious flag counts as `no`.
pub fn aggregate(rows: &[ScanRow]) -> LookupStats {
    let mut stats = LookupStats::default();

    for row in rows {
        let reputation = row
            .reputation
            .as_deref()
            .map(Reputation::from_label)
            .unwrap_or_default();

        let bucket = match reputation {
            Reputation::High => &mut stats.rep_counts.high,
            Reputation::Medium => &mut stats.rep_counts.medium,
            Reputation::Low => &mut stats.rep_counts.low,
            Reputation::None => &mut stats.rep_counts.none,
        };
        *bucket += 1;

        if row.suspicious.unwrap_or(false) {
            stats.suspicious.yes += 1;
        } else {
            stats.suspicious.no += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::responses::{RepCounts, SuspiciousCounts};

    #[test]
    fn test_unknown_labels_count_as_none() {
        let rows = vec![
            ScanRow::new(Some("high"), true),
            ScanRow::new(Some("high"), false),
            ScanRow::new(Some("bogus"), false),
        ];

        let stats = aggregate(&rows);
        assert_eq!(
            stats.rep_counts,
            RepCounts {
                high: 2,
                medium: 0,
                low: 0,
                none: 1
            }
        );
        assert_eq!(stats.suspicious, SuspiciousCounts { yes: 1, no: 2 });
    }

    #[test]
    fn test_missing_fields() {
        let rows = vec![
            ScanRow::default(),
            ScanRow::new(Some("medium"), true),
            ScanRow::new(Some("low"), false),
        ];

        let stats = aggregate(&rows);
        assert_eq!(stats.rep_counts.none, 1);
        assert_eq!(stats.rep_counts.medium, 1);
        assert_eq!(stats.rep_counts.low, 1);
        assert_eq!(stats.suspicious, SuspiciousCounts { yes: 1, no: 2 });
    }

    #[test]
    fn test_empty_table() {
        let stats = aggregate(&[]);
        assert_eq!(stats, LookupStats::default());

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["repCounts"]["none"], 0);
        assert_eq!(json["suspicious"]["yes"], 0);
    }
}
