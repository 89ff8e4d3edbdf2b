//! Medical record rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ListEntity, flexible_date, id_string, null_default};
use crate::{
    list::{
        filters::FilterDefinition,
        table::{CellValue, Column},
    },
    models::EntityKind,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub patient_name: String,
    pub doctor_name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub diagnosis: Option<String>,
    #[serde(deserialize_with = "flexible_date")]
    pub visit_date: Option<NaiveDate>,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
}

impl ListEntity for MedicalRecord {
    const KIND: EntityKind = EntityKind::Records;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        match &self.record_type {
            Some(kind) => format!("{} record for {}", kind, self.patient_name),
            None => format!("record for {}", self.patient_name),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("patientName", "Patient", |r: &MedicalRecord| CellValue::text(&r.patient_name)),
            Column::new("type", "Type", |r: &MedicalRecord| CellValue::optional(r.record_type.as_deref())),
            Column::new("diagnosis", "Diagnosis", |r: &MedicalRecord| {
                CellValue::optional(r.diagnosis.as_deref())
            })
            .unsortable(),
            Column::new("doctorName", "Doctor", |r: &MedicalRecord| {
                CellValue::optional(r.doctor_name.as_deref())
            }),
            Column::new("visitDate", "Visit", |r: &MedicalRecord| {
                CellValue::optional(r.visit_date.map(|d| d.format("%Y-%m-%d")))
            }),
            Column::new("status", "Status", |r: &MedicalRecord| CellValue::status(&r.status)),
        ]
    }

    fn filters() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::new("type", "Record Type")
                .with_option("diagnosis", "Diagnosis")
                .with_option("prescription", "Prescription")
                .with_option("lab-result", "Lab Result")
                .with_option("imaging", "Imaging"),
            FilterDefinition::new("status", "Status")
                .with_option("draft", "Draft")
                .with_option("final", "Final"),
        ]
    }

    fn empty_message() -> &'static str {
        "No medical records found"
    }
}
