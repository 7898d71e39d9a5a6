use std::fmt;
use std::path::Path;

use chrono::Utc;
use qms_model::{
    Area, Entry, GeneralChecksheet, GeneralSheetRecord, Logged, NgEntry, NgRecord,
    ObservationEntry, ObservationRecord, PatrollingChecksheet, PatrollingSheetRecord,
    ProcessChecksheet, ProcessSheetRecord, RfCodingChecksheet, RfCodingSheetRecord,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::journal::{Journal, JournalStore};
use crate::port::AssignmentStore;
use crate::users::UserRegistry;

/// The collections kept in a data directory, one JSON file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Assignments,
    NgRecords,
    Observations,
    RfCodingSheets,
    ProcessSheets,
    PatrollingSheets,
    GeneralSheets,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Assignments,
        Collection::NgRecords,
        Collection::Observations,
        Collection::RfCodingSheets,
        Collection::ProcessSheets,
        Collection::PatrollingSheets,
        Collection::GeneralSheets,
        Collection::Users,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Assignments => "operator_assignments.json",
            Collection::NgRecords => "ng_records.json",
            Collection::Observations => "process_observations.json",
            Collection::RfCodingSheets => "rf_coding_sheets.json",
            Collection::ProcessSheets => "process_sheets.json",
            Collection::PatrollingSheets => "patrolling_sheets.json",
            Collection::GeneralSheets => "general_sheets.json",
            Collection::Users => "users.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Assignments => "Operator assignments",
            Collection::NgRecords => "NG records",
            Collection::Observations => "Process observations",
            Collection::RfCodingSheets => "RF coding checksheets",
            Collection::ProcessSheets => "Process checksheets",
            Collection::PatrollingSheets => "Patrolling checksheets",
            Collection::GeneralSheets => "General checksheets",
            Collection::Users => "Users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every collection of a data directory, opened together.
#[derive(Debug, Clone)]
pub struct Database {
    assignments: JournalStore,
    ng_records: Journal<NgRecord>,
    observations: Journal<ObservationRecord>,
    rf_coding_sheets: Journal<RfCodingSheetRecord>,
    process_sheets: Journal<ProcessSheetRecord>,
    patrolling_sheets: Journal<PatrollingSheetRecord>,
    general_sheets: Journal<GeneralSheetRecord>,
    users: UserRegistry,
}

impl Database {
    /// Open (or lazily create) the collections under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let file = |collection: Collection| dir.join(collection.file_name());
        let db = Self {
            assignments: JournalStore::open(file(Collection::Assignments))?,
            ng_records: Journal::open(file(Collection::NgRecords))?,
            observations: Journal::open(file(Collection::Observations))?,
            rf_coding_sheets: Journal::open(file(Collection::RfCodingSheets))?,
            process_sheets: Journal::open(file(Collection::ProcessSheets))?,
            patrolling_sheets: Journal::open(file(Collection::PatrollingSheets))?,
            general_sheets: Journal::open(file(Collection::GeneralSheets))?,
            users: UserRegistry::open(file(Collection::Users))?,
        };
        tracing::info!(dir = %dir.display(), "opened database");
        Ok(db)
    }

    pub fn in_memory() -> Self {
        Self {
            assignments: JournalStore::in_memory(),
            ng_records: Journal::in_memory(),
            observations: Journal::in_memory(),
            rf_coding_sheets: Journal::in_memory(),
            process_sheets: Journal::in_memory(),
            patrolling_sheets: Journal::in_memory(),
            general_sheets: Journal::in_memory(),
            users: UserRegistry::in_memory(),
        }
    }

    pub fn assignments(&self) -> &JournalStore {
        &self.assignments
    }

    pub fn assignments_mut(&mut self) -> &mut JournalStore {
        &mut self.assignments
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UserRegistry {
        &mut self.users
    }

    pub fn add_ng_record(&mut self, entry: NgEntry) -> Result<&NgRecord> {
        entry.validate()?;
        let record = log_entry(&mut self.ng_records, entry)?;
        tracing::info!(
            id = %record.id,
            area = %record.header.area,
            quantity = record.quantity,
            "NG record logged"
        );
        Ok(record)
    }

    pub fn ng_records(&self) -> &[NgRecord] {
        self.ng_records.records()
    }

    pub fn add_observation(&mut self, entry: ObservationEntry) -> Result<&ObservationRecord> {
        entry.validate()?;
        let record = log_entry(&mut self.observations, entry)?;
        tracing::info!(id = %record.id, category = %record.category, "observation logged");
        Ok(record)
    }

    pub fn observations(&self) -> &[ObservationRecord] {
        self.observations.records()
    }

    pub fn add_rf_coding_sheet(&mut self, sheet: RfCodingChecksheet) -> Result<&RfCodingSheetRecord> {
        sheet.validate()?;
        log_sheet(&mut self.rf_coding_sheets, sheet, RfCodingChecksheet::not_ok_count)
    }

    pub fn rf_coding_sheets(&self) -> &[RfCodingSheetRecord] {
        self.rf_coding_sheets.records()
    }

    pub fn add_process_sheet(&mut self, sheet: ProcessChecksheet) -> Result<&ProcessSheetRecord> {
        sheet.validate()?;
        log_sheet(&mut self.process_sheets, sheet, ProcessChecksheet::not_ok_count)
    }

    pub fn process_sheets(&self) -> &[ProcessSheetRecord] {
        self.process_sheets.records()
    }

    pub fn add_patrolling_sheet(
        &mut self,
        sheet: PatrollingChecksheet,
    ) -> Result<&PatrollingSheetRecord> {
        sheet.validate()?;
        log_sheet(
            &mut self.patrolling_sheets,
            sheet,
            PatrollingChecksheet::not_ok_count,
        )
    }

    pub fn patrolling_sheets(&self) -> &[PatrollingSheetRecord] {
        self.patrolling_sheets.records()
    }

    pub fn add_general_sheet(&mut self, sheet: GeneralChecksheet) -> Result<&GeneralSheetRecord> {
        sheet.validate()?;
        log_sheet(&mut self.general_sheets, sheet, GeneralChecksheet::not_ok_count)
    }

    pub fn general_sheets(&self) -> &[GeneralSheetRecord] {
        self.general_sheets.records()
    }

    /// True when a non-blank `pcb_number` was already logged as NG in `area`.
    pub fn is_duplicate_pcb(&self, pcb_number: &str, area: Area) -> bool {
        let pcb_number = pcb_number.trim();
        if pcb_number.is_empty() {
            return false;
        }
        self.ng_records()
            .iter()
            .any(|record| record.header.area == area && record.pcb() == Some(pcb_number))
    }

    /// Record count per collection.
    pub fn counts(&self) -> Vec<(Collection, usize)> {
        Collection::ALL
            .into_iter()
            .map(|collection| {
                let count = match collection {
                    Collection::Assignments => self.assignments.query_all().len(),
                    Collection::NgRecords => self.ng_records.len(),
                    Collection::Observations => self.observations.len(),
                    Collection::RfCodingSheets => self.rf_coding_sheets.len(),
                    Collection::ProcessSheets => self.process_sheets.len(),
                    Collection::PatrollingSheets => self.patrolling_sheets.len(),
                    Collection::GeneralSheets => self.general_sheets.len(),
                    Collection::Users => self.users.list().len(),
                };
                (collection, count)
            })
            .collect()
    }
}

fn log_entry<T>(journal: &mut Journal<Logged<T>>, body: T) -> Result<&Logged<T>>
where
    T: Entry + Serialize + DeserializeOwned,
{
    journal.push(Logged::new(body, Utc::now()))
}

fn log_sheet<T>(
    journal: &mut Journal<Logged<T>>,
    sheet: T,
    failures: fn(&T) -> usize,
) -> Result<&Logged<T>>
where
    T: Entry + Serialize + DeserializeOwned,
{
    let record = log_entry(journal, sheet)?;
    tracing::info!(
        id = %record.id,
        date = %record.date(),
        not_ok = failures(&record.body),
        "checksheet logged"
    );
    Ok(record)
}
