//! Built-in sample dataset.
//!
//! Installed when the row source fails or yields nothing usable, so the
//! dashboard always has something to show.

use crate::model::objective::Objective;

const FALLBACK_ROWS: &[(&str, &str, &str, f64)] = &[
    (
        "AUDITORIA INTERNA",
        "JOSE DANIEL ECHEVERRIA",
        "Cumplir con el 100% del plan anual de capacitación que la organización asigne al área de Auditoria Interna en el ejercicio 2025",
        0.0,
    ),
    (
        "AUDITORIA INTERNA",
        "JOSE DANIEL ECHEVERRIA",
        "El área de auditoria debe conocer y comprender el 80% de los procedimientos y políticas Corporativos y de Gestión de Calidad de la organización durante el ejercicio 2025",
        0.0,
    ),
    (
        "NACIONAL DE VENTAS",
        "HEBER ABIMAEL MATEOS",
        "Aumentar las ventas de 2024 vs 2025, para lograr alcanzar el 100% del presupuesto anual",
        100.0,
    ),
    (
        "NACIONAL DE VENTAS",
        "HEBER ABIMAEL MATEOS",
        "Cumplir al 100% con sus tareas operativas asignadas en la matriz",
        90.0,
    ),
    (
        "TI",
        "CESAR JARDINES",
        "Capacitar en 2 procesos automatizados para el 31 de diciembre 2025",
        0.0,
    ),
    (
        "TI",
        "CESAR JARDINES",
        "Implementar 2 mejoras tecnológicas para el 31 de diciembre de 2025",
        25.0,
    ),
    (
        "TI",
        "CESAR JARDINES",
        "Implementar 2 procedimientos en relación a uso de las herramientas tecnológicas para el 31 de diciembre de 2025",
        50.0,
    ),
];

/// Returns the fixed sample objectives in declaration order.
pub fn fallback_dataset() -> Vec<Objective> {
    FALLBACK_ROWS
        .iter()
        .filter_map(|(department, owner, objective, progress)| {
            Objective::new(department, owner, objective, *progress).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fallback_dataset, FALLBACK_ROWS};

    #[test]
    fn every_fallback_row_is_valid() {
        assert_eq!(fallback_dataset().len(), FALLBACK_ROWS.len());
    }
}
