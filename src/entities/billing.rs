//! Invoice rows of the billing list

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ListEntity, flexible_date, id_string, lenient_number, null_default};
use crate::{
    list::{
        filters::FilterDefinition,
        table::{CellValue, Column},
    },
    models::EntityKind,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub invoice_number: String,
    #[serde(deserialize_with = "null_default")]
    pub patient_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub amount: f64,
    #[serde(deserialize_with = "flexible_date")]
    pub due_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
}

impl Invoice {
    pub fn formatted_amount(&self) -> String {
        format!("${:.2}", self.amount)
    }
}

impl ListEntity for Invoice {
    const KIND: EntityKind = EntityKind::Billing;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        if self.invoice_number.is_empty() {
            format!("invoice {}", self.id)
        } else {
            format!("invoice {}", self.invoice_number)
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("invoiceNumber", "Invoice #", |i: &Invoice| CellValue::text(&i.invoice_number)),
            Column::new("patientName", "Patient", |i: &Invoice| CellValue::text(&i.patient_name)),
            Column::new("amount", "Amount", |i: &Invoice| CellValue::text(i.formatted_amount())),
            Column::new("dueDate", "Due", |i: &Invoice| {
                CellValue::optional(i.due_date.map(|d| d.format("%Y-%m-%d")))
            }),
            Column::new("paymentMethod", "Method", |i: &Invoice| {
                CellValue::optional(i.payment_method.as_deref())
            })
            .unsortable(),
            Column::new("status", "Status", |i: &Invoice| CellValue::status(&i.status)),
        ]
    }

    fn filters() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::new("status", "Status")
                .with_option("paid", "Paid")
                .with_option("unpaid", "Unpaid")
                .with_option("partially-paid", "Partially Paid")
                .with_option("overdue", "Overdue")
                .with_option("refunded", "Refunded"),
            FilterDefinition::new("paymentMethod", "Payment Method")
                .with_option("cash", "Cash")
                .with_option("card", "Card")
                .with_option("insurance", "Insurance"),
        ]
    }

    fn empty_message() -> &'static str {
        "No invoices found"
    }
}
