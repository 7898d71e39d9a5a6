//! Manpower-change and movement detection for operator deployments.

use qms_model::{Area, AssignmentDraft, OperatorId, ProductionDate};
use qms_store::AssignmentStore;
use serde::{Deserialize, Serialize};

/// Notice raised while a deployment form is being filled.
///
/// Serialized as a union tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RotationAlert {
    #[serde(rename = "none")]
    Clear,
    /// Someone else held this station on the most recent earlier date.
    StationChanged {
        prior_operator_name: String,
        prior_operator_id: OperatorId,
        prior_date: ProductionDate,
    },
    /// The operator's most recent earlier deployment was in another area.
    Movement {
        prior_area: Area,
        prior_area_label: String,
        prior_date: ProductionDate,
    },
}

impl RotationAlert {
    pub fn is_clear(&self) -> bool {
        matches!(self, RotationAlert::Clear)
    }

    /// Text shown to the submitter, or `None` when there is nothing to show.
    pub fn message(&self) -> Option<String> {
        match self {
            RotationAlert::Clear => None,
            RotationAlert::StationChanged {
                prior_operator_name,
                prior_operator_id,
                ..
            } => Some(format!(
                "Manpower changed! Previously this station was handled by {prior_operator_name} ({prior_operator_id})."
            )),
            RotationAlert::Movement {
                prior_area_label, ..
            } => Some(format!(
                "Movement detected! This operator was previously seated in {prior_area_label}."
            )),
        }
    }
}

/// Compare a draft against deployment history.
///
/// The station check runs first and short-circuits; the operator check only
/// runs when the station is unchanged or has no history. Drafts whose
/// operator id is shorter than [`OperatorId::MIN_LOOKUP_LEN`], or that have
/// no station, are never looked up.
pub fn evaluate<S>(draft: &AssignmentDraft, store: &S) -> RotationAlert
where
    S: AssignmentStore + ?Sized,
{
    let (Some(operator_id), Some(station)) = (&draft.operator_id, &draft.station) else {
        return RotationAlert::Clear;
    };
    if !operator_id.is_lookup_eligible() {
        return RotationAlert::Clear;
    }

    if let Some(prior) = store.find_latest_before(draft.area, station, draft.date)
        && &prior.operator_id != operator_id
    {
        tracing::warn!(
            area = %draft.area,
            station = %station,
            operator = %operator_id,
            prior_operator = %prior.operator_id,
            prior_date = %prior.date,
            "manpower changed at station"
        );
        return RotationAlert::StationChanged {
            prior_operator_name: prior.operator_name.clone(),
            prior_operator_id: prior.operator_id.clone(),
            prior_date: prior.date,
        };
    }

    if let Some(prior) = store.find_latest_before_by_operator(operator_id, draft.date)
        && prior.area != draft.area
    {
        tracing::warn!(
            operator = %operator_id,
            area = %draft.area,
            prior_area = %prior.area,
            prior_date = %prior.date,
            "operator moved between areas"
        );
        return RotationAlert::Movement {
            prior_area: prior.area,
            prior_area_label: prior.area.label().to_string(),
            prior_date: prior.date,
        };
    }

    RotationAlert::Clear
}

#[cfg(test)]
mod tests {
    use super::*;
    use qms_store::MemoryStore;

    #[test]
    fn missing_station_skips_lookup() {
        let draft = AssignmentDraft::new(ProductionDate::parse("2024-01-02").unwrap())
            .with_operator_id(OperatorId::new("OP1").ok())
            .with_station(None);
        assert!(evaluate(&draft, &MemoryStore::new()).is_clear());
    }

    #[test]
    fn clear_has_no_message() {
        assert_eq!(RotationAlert::Clear.message(), None);
        let alert = RotationAlert::Movement {
            prior_area: Area::Ltct,
            prior_area_label: Area::Ltct.label().to_string(),
            prior_date: ProductionDate::parse("2024-01-01").unwrap(),
        };
        assert!(alert.message().unwrap().ends_with("LTCT Coding Area."));
    }
}
