//! Búsquedas lineales sobre el log. Los logs por instancia son pequeños
//! (acotados por las actividades ejecutadas), no se indexan.

use crate::model::HistoricActivityRecord;

/// Primer registro con `activity_id`.
pub fn find_record<'a>(records: &'a [HistoricActivityRecord], activity_id: &str) -> Option<&'a HistoricActivityRecord> {
    find_record_in_execution(records, activity_id, None)
}

/// Primer registro con `activity_id` producido por `execution_id`. Sin
/// ejecución (`None`) cualquier registro con ese id coincide.
pub fn find_record_in_execution<'a>(records: &'a [HistoricActivityRecord],
                                    activity_id: &str,
                                    execution_id: Option<&str>)
                                    -> Option<&'a HistoricActivityRecord> {
    records.iter().find(|r| {
                      r.activity_id == activity_id
                      && execution_id.map_or(true, |e| r.execution_id.as_deref() == Some(e))
                  })
}

/// `true` si el motor registró realmente `activity_id` (ignora sintéticos).
pub fn has_engine_record(records: &[HistoricActivityRecord], activity_id: &str) -> bool {
    records.iter().any(|r| !r.is_synthetic() && r.activity_id == activity_id)
}
