//! Patient list rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ListEntity, flexible_date, full_name, id_string, null_default};
use crate::{
    list::{
        filters::FilterDefinition,
        table::{CellValue, Column},
    },
    models::EntityKind,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_default")]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "flexible_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
}

impl Patient {
    pub fn name(&self) -> String {
        full_name(&[&self.first_name, &self.last_name])
    }
}

impl ListEntity for Patient {
    const KIND: EntityKind = EntityKind::Patients;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.name()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name", |p: &Patient| CellValue::text(p.name())),
            Column::new("email", "Email", |p: &Patient| CellValue::optional(p.email.as_deref())),
            Column::new("phone", "Phone", |p: &Patient| CellValue::optional(p.phone.as_deref()))
                .unsortable(),
            Column::new("dateOfBirth", "Date of Birth", |p: &Patient| {
                CellValue::optional(p.date_of_birth.map(|d| d.format("%Y-%m-%d")))
            }),
            Column::new("gender", "Gender", |p: &Patient| CellValue::optional(p.gender.as_deref())),
            Column::new("bloodType", "Blood", |p: &Patient| {
                CellValue::optional(p.blood_type.as_deref())
            })
            .unsortable(),
            Column::new("status", "Status", |p: &Patient| CellValue::status(&p.status)),
        ]
    }

    fn filters() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::new("status", "Status")
                .with_option("active", "Active")
                .with_option("inactive", "Inactive")
                .with_option("admitted", "Admitted")
                .with_option("discharged", "Discharged"),
            FilterDefinition::new("gender", "Gender")
                .with_option("male", "Male")
                .with_option("female", "Female")
                .with_option("other", "Other"),
            FilterDefinition::new("bloodType", "Blood Type")
                .with_option("A+", "A+")
                .with_option("A-", "A-")
                .with_option("B+", "B+")
                .with_option("B-", "B-")
                .with_option("AB+", "AB+")
                .with_option("AB-", "AB-")
                .with_option("O+", "O+")
                .with_option("O-", "O-"),
        ]
    }

    fn empty_message() -> &'static str {
        "No patients found"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_fields() {
        let patient: Patient = serde_json::from_str(
            r#"{"id": 3, "firstName": "Ada", "lastName": "Byron", "dateOfBirth": "1990-12-10", "status": "Active"}"#,
        )
        .unwrap();
        assert_eq!(patient.id(), "3");
        assert_eq!(patient.name(), "Ada Byron");
        assert!(patient.email.is_none());

        let cells: Vec<String> = Patient::columns().iter().map(|c| c.render(&patient).plain()).collect();
        assert_eq!(cells, vec!["Ada Byron", "-", "-", "1990-12-10", "-", "-", "Active"]);
    }

    #[test]
    fn test_timestamp_dates_and_null_fields() {
        let patient: Patient = serde_json::from_str(
            r#"{"id": 1, "firstName": "Ada", "lastName": null, "dateOfBirth": "1990-12-10T00:00:00.000Z", "status": null}"#,
        )
        .unwrap();
        assert_eq!(patient.name(), "Ada");
        assert_eq!(patient.date_of_birth, NaiveDate::from_ymd_opt(1990, 12, 10));
        assert_eq!(patient.status, "");
        assert_eq!(Patient::columns()[6].render(&patient).plain(), "");
    }
}
