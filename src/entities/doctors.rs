//! Doctor list rows

use serde::{Deserialize, Serialize};

use super::{ListEntity, id_string, null_default};
use crate::{
    list::{
        filters::FilterDefinition,
        table::{CellValue, Column},
    },
    models::EntityKind,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Doctor {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub department: Option<String>,
    /// Years of practice
    pub experience: Option<u32>,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
}

impl ListEntity for Doctor {
    const KIND: EntityKind = EntityKind::Doctors;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        if self.name.starts_with("Dr") {
            self.name.clone()
        } else {
            format!("Dr. {}", self.name)
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name", |d: &Doctor| CellValue::text(&d.name)),
            Column::new("specialization", "Specialization", |d: &Doctor| {
                CellValue::optional(d.specialization.as_deref())
            }),
            Column::new("department", "Department", |d: &Doctor| {
                CellValue::optional(d.department.as_deref())
            }),
            Column::new("experience", "Experience", |d: &Doctor| {
                CellValue::optional(d.experience.map(|years| format!("{} yrs", years)))
            }),
            Column::new("email", "Email", |d: &Doctor| CellValue::optional(d.email.as_deref()))
                .unsortable(),
            Column::new("status", "Status", |d: &Doctor| CellValue::status(&d.status)),
        ]
    }

    fn filters() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::new("department", "Department")
                .with_option("cardiology", "Cardiology")
                .with_option("neurology", "Neurology")
                .with_option("orthopedics", "Orthopedics")
                .with_option("pediatrics", "Pediatrics")
                .with_option("emergency", "Emergency")
                .with_option("general", "General Medicine"),
            FilterDefinition::new("status", "Status")
                .with_option("available", "Available")
                .with_option("on-leave", "On Leave")
                .with_option("inactive", "Inactive"),
        ]
    }

    fn empty_message() -> &'static str {
        "No doctors found"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_adds_title_once() {
        let doctor = Doctor { name: "Grey".into(), ..Default::default() };
        assert_eq!(doctor.display_name(), "Dr. Grey");
        let doctor = Doctor { name: "Dr. House".into(), ..Default::default() };
        assert_eq!(doctor.display_name(), "Dr. House");
    }

    #[test]
    fn test_experience_column() {
        let doctor: Doctor =
            serde_json::from_str(r#"{"id": "d1", "name": "Yang", "experience": 12, "status": "on leave"}"#)
                .unwrap();
        let columns = Doctor::columns();
        let experience = columns.iter().find(|c| c.key == "experience").unwrap();
        assert_eq!(experience.render(&doctor).plain(), "12 yrs");
        let status = columns.iter().find(|c| c.key == "status").unwrap();
        assert_eq!(status.render(&doctor).plain(), "On Leave");
    }
}
