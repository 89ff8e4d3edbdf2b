use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The list views the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Patients,
    Doctors,
    Appointments,
    Billing,
    Inventory,
    Records,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Patients,
        EntityKind::Doctors,
        EntityKind::Appointments,
        EntityKind::Billing,
        EntityKind::Inventory,
        EntityKind::Records,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patients => "patients",
            EntityKind::Doctors => "doctors",
            EntityKind::Appointments => "appointments",
            EntityKind::Billing => "billing",
            EntityKind::Inventory => "inventory",
            EntityKind::Records => "records",
        }
    }

    /// Path of the list endpoint, relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        self.as_str()
    }

    /// Key of the row array in the list response body
    pub fn rows_key(&self) -> &'static str {
        match self {
            EntityKind::Billing => "invoices",
            EntityKind::Inventory => "items",
            other => other.as_str(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Patients => "Patients",
            EntityKind::Doctors => "Doctors",
            EntityKind::Appointments => "Appointments",
            EntityKind::Billing => "Billing",
            EntityKind::Inventory => "Inventory",
            EntityKind::Records => "Medical Records",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            EntityKind::Patients => 'P',
            EntityKind::Doctors => 'D',
            EntityKind::Appointments => 'A',
            EntityKind::Billing => 'B',
            EntityKind::Inventory => 'I',
            EntityKind::Records => 'R',
        }
    }

    /// Verb for the destructive row action
    pub fn delete_verb(&self) -> &'static str {
        match self {
            EntityKind::Appointments => "Cancel",
            _ => "Delete",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Patient => "patient",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "patient" => Ok(Role::Patient),
            other => Err(format!(
                "Unsupported role: {}. Supported roles: admin, doctor, nurse, patient",
                other
            )),
        }
    }
}

/// Color theme of the terminal UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unsupported theme: {}. Use light or dark", other)),
        }
    }
}
