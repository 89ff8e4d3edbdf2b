//! Appointment list rows

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
pub struct Appointment {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub patient_name: String,
    #[serde(deserialize_with = "null_default")]
    pub doctor_name: String,
    #[serde(deserialize_with = "flexible_date")]
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub reason: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
}

impl ListEntity for Appointment {
    const KIND: EntityKind = EntityKind::Appointments;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        match self.date {
            Some(date) => format!("{} on {}", self.patient_name, date.format("%Y-%m-%d")),
            None => self.patient_name.clone(),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("patientName", "Patient", |a: &Appointment| CellValue::text(&a.patient_name)),
            Column::new("doctorName", "Doctor", |a: &Appointment| CellValue::text(&a.doctor_name)),
            Column::new("date", "Date", |a: &Appointment| {
                CellValue::optional(a.date.map(|d| d.format("%Y-%m-%d")))
            }),
            Column::new("time", "Time", |a: &Appointment| CellValue::optional(a.time.as_deref())),
            Column::new("type", "Type", |a: &Appointment| {
                CellValue::optional(a.appointment_type.as_deref())
            }),
            Column::new("reason", "Reason", |a: &Appointment| CellValue::optional(a.reason.as_deref()))
                .unsortable(),
            Column::new("status", "Status", |a: &Appointment| CellValue::status(&a.status)),
        ]
    }

    fn filters() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::new("status", "Status")
                .with_option("scheduled", "Scheduled")
                .with_option("confirmed", "Confirmed")
                .with_option("completed", "Completed")
                .with_option("cancelled", "Cancelled")
                .with_option("no-show", "No Show"),
            FilterDefinition::new("type", "Type")
                .with_option("consultation", "Consultation")
                .with_option("follow-up", "Follow-up")
                .with_option("checkup", "Checkup")
                .with_option("emergency", "Emergency"),
        ]
    }

    fn empty_message() -> &'static str {
        "No appointments found"
    }
}
