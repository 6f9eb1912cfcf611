//! Executed count history

use serde::{Deserialize, Serialize};

use crate::models::CountRecord;

/// Counts of OK and discrepant records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub total: usize,
    pub ok: usize,
    pub with_discrepancies: usize,
}

pub fn summarize_records(records: &[CountRecord]) -> RecordSummary {
    let ok = records.iter().filter(|r| r.is_ok()).count();
    RecordSummary {
        total: records.len(),
        ok,
        with_discrepancies: records.len() - ok,
    }
}

/// Newest execution first; unparseable dates sink to the end
pub fn sort_newest_first(records: &mut [CountRecord]) {
    records.sort_by(|a, b| b.executed_on().cmp(&a.executed_on()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountDetail;

    fn record(id: i64, date: &str, diffs: &[i64]) -> CountRecord {
        CountRecord {
            id,
            bodega_id: Some(1),
            bodega_nombre: "Principal".into(),
            responsable: "Luis".into(),
            fecha_ejecucion: date.into(),
            detalles: diffs
                .iter()
                .map(|d| CountDetail {
                    producto_id: None,
                    producto_nombre: String::new(),
                    cantidad_manual: 0,
                    cantidad_sistema: 0,
                    diferencia: *d,
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary() {
        let records = [
            record(1, "2024-01-01", &[0, 0]),
            record(2, "2024-01-02", &[1, -1]),
            record(3, "2024-01-03", &[3]),
            record(4, "2024-01-04", &[]),
        ];
        let s = summarize_records(&records);
        assert_eq!(
            s,
            RecordSummary {
                total: 4,
                ok: 3,
                with_discrepancies: 1
            }
        );
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records = vec![
            record(1, "2024-01-01 08:00:00", &[]),
            record(2, "garbage", &[]),
            record(3, "2024-03-01 08:00:00", &[]),
        ];
        sort_newest_first(&mut records);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
