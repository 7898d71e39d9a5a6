use qms_model::{
    Area, AssignmentDraft, AssignmentRecord, OperatorId, ProductionDate, Shift, StationId,
};
use qms_store::AssignmentStore;

use crate::error::{CoreError, Result};
use crate::rotation::{RotationAlert, evaluate};

/// A persisted deployment and the alert that was in force when it was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub record: AssignmentRecord,
    pub alert: RotationAlert,
}

/// Keeps the rotation alert in step with a deployment form being edited.
///
/// Changing the date, shift, area, station or operator id re-evaluates the
/// draft against the store. The operator name and station label do not
/// affect the alert and leave it untouched.
#[derive(Debug, Clone)]
pub struct DraftMonitor {
    draft: AssignmentDraft,
    alert: RotationAlert,
}

impl DraftMonitor {
    /// Blank form for `date`.
    pub fn new(date: ProductionDate) -> Self {
        Self {
            draft: AssignmentDraft::new(date),
            alert: RotationAlert::Clear,
        }
    }

    /// Start from an existing draft and evaluate it once.
    pub fn from_draft<S: AssignmentStore + ?Sized>(draft: AssignmentDraft, store: &S) -> Self {
        let alert = evaluate(&draft, store);
        Self { draft, alert }
    }

    pub fn draft(&self) -> &AssignmentDraft {
        &self.draft
    }

    pub fn alert(&self) -> &RotationAlert {
        &self.alert
    }

    pub fn set_date<S: AssignmentStore + ?Sized>(
        &mut self,
        store: &S,
        date: ProductionDate,
    ) -> &RotationAlert {
        self.draft.date = date;
        self.refresh(store)
    }

    pub fn set_shift<S: AssignmentStore + ?Sized>(
        &mut self,
        store: &S,
        shift: Shift,
    ) -> &RotationAlert {
        self.draft.shift = shift;
        self.refresh(store)
    }

    /// Switch area. The station goes back to bench 1 and any label override
    /// is dropped, since bench numbers differ between areas.
    pub fn set_area<S: AssignmentStore + ?Sized>(&mut self, store: &S, area: Area) -> &RotationAlert {
        self.draft.area = area;
        self.draft.station = StationId::new("1").ok();
        self.draft.station_label = None;
        self.refresh(store)
    }

    pub fn set_station<S: AssignmentStore + ?Sized>(
        &mut self,
        store: &S,
        station: Option<StationId>,
    ) -> &RotationAlert {
        self.draft.station = station;
        self.refresh(store)
    }

    pub fn set_operator_id<S: AssignmentStore + ?Sized>(
        &mut self,
        store: &S,
        operator_id: Option<OperatorId>,
    ) -> &RotationAlert {
        self.draft.operator_id = operator_id;
        self.refresh(store)
    }

    pub fn set_operator_name(&mut self, name: impl Into<String>) {
        self.draft.operator_name = name.into();
    }

    pub fn set_station_label(&mut self, label: Option<String>) {
        self.draft.station_label = label;
    }

    /// Validate and append the draft, then reset to a blank form for the
    /// same date.
    ///
    /// The alert is recomputed first so it reflects the store as of now,
    /// not as of the last edit. On error the draft is kept for correction.
    pub fn submit<S: AssignmentStore + ?Sized>(&mut self, store: &mut S) -> Result<Submission> {
        let alert = evaluate(&self.draft, &*store);
        self.alert = alert.clone();
        let entry = self
            .draft
            .to_new_assignment()
            .map_err(CoreError::Incomplete)?;
        let record = store.append(entry)?;
        if let Some(message) = alert.message() {
            tracing::info!(id = %record.id, %message, "assignment saved with alert");
        }
        *self = Self::new(self.draft.date);
        Ok(Submission { record, alert })
    }

    fn refresh<S: AssignmentStore + ?Sized>(&mut self, store: &S) -> &RotationAlert {
        self.alert = evaluate(&self.draft, store);
        &self.alert
    }
}
