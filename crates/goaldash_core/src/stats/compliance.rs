//! Compliance figure: mean progress over an optionally scoped record set.

use crate::model::objective::{round2, Objective};
use crate::stats::active_filter;

/// Returns the rounded mean progress of `records`, scoped to one department
/// when `department_filter` is non-empty.
///
/// Returns `0` when nothing is in scope.
pub fn compliance(records: &[Objective], department_filter: Option<&str>) -> f64 {
    let filter = active_filter(department_filter);
    let (count, total) = records
        .iter()
        .filter(|item| filter.map_or(true, |department| item.department() == department))
        .fold((0_usize, 0.0_f64), |(count, total), item| {
            (count + 1, total + item.progress())
        });

    if count == 0 {
        return 0.0;
    }
    round2(total / count as f64)
}

#[cfg(test)]
mod tests {
    use super::compliance;
    use crate::model::objective::Objective;

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(compliance(&[], None), 0.0);
        assert_eq!(compliance(&[], Some("TI")), 0.0);
    }

    #[test]
    fn unknown_department_is_zero() {
        let records = vec![Objective::new("TI", "Ana", "goal", 80.0).unwrap()];
        assert_eq!(compliance(&records, Some("RH")), 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let records = vec![
            Objective::new("TI", "Ana", "a", 100.0).unwrap(),
            Objective::new("TI", "Ana", "b", 0.0).unwrap(),
            Objective::new("TI", "Ana", "c", 0.0).unwrap(),
        ];
        assert_eq!(compliance(&records, Some("")), 33.33);
    }
}
