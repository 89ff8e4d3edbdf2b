//! Inventory item rows

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
pub struct InventoryItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    pub category: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub quantity: i64,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    #[serde(deserialize_with = "flexible_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
}

impl InventoryItem {
    pub fn stock(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {}", self.quantity, unit),
            None => self.quantity.to_string(),
        }
    }
}

impl ListEntity for InventoryItem {
    const KIND: EntityKind = EntityKind::Inventory;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Item", |i: &InventoryItem| CellValue::text(&i.name)),
            Column::new("category", "Category", |i: &InventoryItem| {
                CellValue::optional(i.category.as_deref())
            }),
            Column::new("quantity", "Stock", |i: &InventoryItem| CellValue::text(i.stock())),
            Column::new("supplier", "Supplier", |i: &InventoryItem| {
                CellValue::optional(i.supplier.as_deref())
            })
            .unsortable(),
            Column::new("expiryDate", "Expires", |i: &InventoryItem| {
                CellValue::optional(i.expiry_date.map(|d| d.format("%Y-%m-%d")))
            }),
            Column::new("status", "Status", |i: &InventoryItem| CellValue::status(&i.status)),
        ]
    }

    fn filters() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::new("category", "Category")
                .with_option("medicine", "Medicine")
                .with_option("equipment", "Equipment")
                .with_option("supplies", "Supplies"),
            FilterDefinition::new("status", "Status")
                .with_option("in-stock", "In Stock")
                .with_option("low-stock", "Low Stock")
                .with_option("out-of-stock", "Out of Stock")
                .with_option("expired", "Expired"),
        ]
    }

    fn empty_message() -> &'static str {
        "No inventory items found"
    }

    fn has_details() -> bool {
        false
    }
}
