use qms_model::{Area, AssignmentRecord, NewAssignment, OperatorId, ProductionDate, StationId};

use crate::error::Result;

/// Storage port for operator deployments.
///
/// Records are append-only and kept in insertion order. The two lookups
/// return the record with the latest date strictly before `date`; when
/// several records share that date, the one appended last wins.
pub trait AssignmentStore {
    /// Mint an id and timestamp for `entry` and persist it.
    ///
    /// The write is durable before this returns.
    fn append(&mut self, entry: NewAssignment) -> Result<AssignmentRecord>;

    /// All records in insertion order.
    fn query_all(&self) -> &[AssignmentRecord];

    /// Most recent deployment at `station` in `area` before `date`, any shift.
    fn find_latest_before(
        &self,
        area: Area,
        station: &StationId,
        date: ProductionDate,
    ) -> Option<&AssignmentRecord> {
        let found = latest_before(self.query_all(), date, |record| {
            record.area == area && &record.station == station
        });
        tracing::debug!(
            area = %area,
            station = %station,
            date = %date,
            hit = found.map(|record| record.id.as_str()),
            "station lookup"
        );
        found
    }

    /// Most recent deployment of `operator_id`, in any area, before `date`.
    fn find_latest_before_by_operator(
        &self,
        operator_id: &OperatorId,
        date: ProductionDate,
    ) -> Option<&AssignmentRecord> {
        let found = latest_before(self.query_all(), date, |record| {
            &record.operator_id == operator_id
        });
        tracing::debug!(
            operator = %operator_id,
            date = %date,
            hit = found.map(|record| record.id.as_str()),
            "operator lookup"
        );
        found
    }

    /// Every deployment at a station, newest date first.
    fn station_history(&self, area: Area, station: &StationId) -> Vec<&AssignmentRecord> {
        newest_first(
            self.query_all()
                .iter()
                .filter(|record| record.area == area && &record.station == station),
        )
    }

    /// Every deployment of an operator, newest date first.
    fn operator_history(&self, operator_id: &OperatorId) -> Vec<&AssignmentRecord> {
        newest_first(
            self.query_all()
                .iter()
                .filter(|record| &record.operator_id == operator_id),
        )
    }
}

fn latest_before(
    records: &[AssignmentRecord],
    date: ProductionDate,
    matches: impl Fn(&AssignmentRecord) -> bool,
) -> Option<&AssignmentRecord> {
    // `max_by_key` keeps the last of equal maxima.
    records
        .iter()
        .filter(|record| record.date < date && matches(record))
        .max_by_key(|record| record.date)
}

fn newest_first<'a>(
    records: impl Iterator<Item = &'a AssignmentRecord>,
) -> Vec<&'a AssignmentRecord> {
    let mut history: Vec<_> = records.collect();
    // Stable sort, then reverse: later appends come first within a date.
    history.sort_by_key(|record| record.date);
    history.reverse();
    history
}
