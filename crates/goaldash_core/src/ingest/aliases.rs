//! Header aliases for each logical column.
//!
//! Spreadsheets exported by different teams name the same column in
//! different ways. Each list is tried front to back and the first
//! non-blank cell wins.

use crate::model::objective::Field;

pub const DEPARTMENT_ALIASES: &[&str] = &[
    "Nombre del departamento",
    "Departamento",
    "nombre_departamento",
    "DEPARTAMENTO",
];

pub const OWNER_ALIASES: &[&str] = &["Propietario", "Responsable", "propietario", "PROPIETARIO"];

pub const OBJECTIVE_ALIASES: &[&str] = &[
    "Nombre del objetivo",
    "Objetivo",
    "nombre_objetivo",
    "OBJETIVO",
];

pub const PROGRESS_ALIASES: &[&str] = &[
    "Promedio de realizacion",
    "Avance",
    "promedio_realizacion",
    "AVANCE",
    "Progreso",
    "PROGRESO",
];

/// Returns the candidate header names for `field` in priority order.
pub fn aliases_for(field: Field) -> &'static [&'static str] {
    match field {
        Field::Department => DEPARTMENT_ALIASES,
        Field::Owner => OWNER_ALIASES,
        Field::Objective => OBJECTIVE_ALIASES,
        Field::Progress => PROGRESS_ALIASES,
    }
}
