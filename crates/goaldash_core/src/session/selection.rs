//! Selection state machine.
//!
//! # Invariants
//! - `drilldown` holds at most one of department/owner by construction.
//! - Selecting an owner scopes the department filter to that owner's
//!   department.
//! - `clear` only drops the drilldown; the filter survives.

use crate::model::objective::Objective;
use crate::model::stats::OwnerKey;
use log::debug;
use serde::{Deserialize, Serialize};

/// Active drilldown target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drilldown {
    #[default]
    None,
    Department {
        department: String,
    },
    Owner {
        key: OwnerKey,
    },
}

/// Coarse state of the selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Unfiltered,
    DepartmentFiltered,
    DepartmentDrilldown,
    OwnerDrilldown,
}

/// Intent emitted by the presentation layer (chart click, dropdown, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum SelectionIntent {
    /// Empty department means "all departments".
    Filter { department: String },
    SelectDepartment { department: String },
    SelectOwner { owner: String, department: String },
    Clear,
}

/// Current filter plus drilldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    current_department: Option<String>,
    drilldown: Drilldown,
    department_view: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            current_department: None,
            drilldown: Drilldown::None,
            department_view: true,
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scopes views to `department`, or removes the scope when it is empty.
    /// Always drops the drilldown.
    pub fn filter(&mut self, department: &str) {
        self.scope_to(department);
        self.drilldown = Drilldown::None;
        debug!(
            "event=selection_filter module=session phase={:?}",
            self.phase()
        );
    }

    /// Drills into one department; replaces any owner selection.
    pub fn select_department(&mut self, department: &str) {
        self.drilldown = Drilldown::Department {
            department: department.trim().to_string(),
        };
        debug!("event=selection_department module=session phase=department_drilldown");
    }

    /// Drills into one owner entity and scopes the filter to its department.
    ///
    /// A blank department leaves the views unfiltered.
    pub fn select_owner(&mut self, owner: &str, department: &str) {
        self.scope_to(department);
        self.drilldown = Drilldown::Owner {
            key: OwnerKey::new(owner.trim(), department.trim()),
        };
        debug!("event=selection_owner module=session phase=owner_drilldown");
    }

    // Blank means unfiltered, which also restores the department view.
    fn scope_to(&mut self, department: &str) {
        let department = department.trim();
        if department.is_empty() {
            self.current_department = None;
            self.department_view = true;
        } else {
            self.current_department = Some(department.to_string());
            self.department_view = false;
        }
    }

    /// Drops the drilldown, keeping the department filter.
    pub fn clear(&mut self) {
        self.drilldown = Drilldown::None;
        debug!(
            "event=selection_clear module=session phase={:?}",
            self.phase()
        );
    }

    pub fn apply(&mut self, intent: &SelectionIntent) {
        match intent {
            SelectionIntent::Filter { department } => self.filter(department),
            SelectionIntent::SelectDepartment { department } => self.select_department(department),
            SelectionIntent::SelectOwner { owner, department } => {
                self.select_owner(owner, department)
            }
            SelectionIntent::Clear => self.clear(),
        }
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.drilldown, &self.current_department) {
            (Drilldown::Owner { .. }, _) => SelectionPhase::OwnerDrilldown,
            (Drilldown::Department { .. }, _) => SelectionPhase::DepartmentDrilldown,
            (Drilldown::None, Some(_)) => SelectionPhase::DepartmentFiltered,
            (Drilldown::None, None) => SelectionPhase::Unfiltered,
        }
    }

    /// Active department filter, `None` when unfiltered.
    pub fn current_department(&self) -> Option<&str> {
        self.current_department.as_deref()
    }

    pub fn selected_department(&self) -> Option<&str> {
        match &self.drilldown {
            Drilldown::Department { department } => Some(department.as_str()),
            _ => None,
        }
    }

    pub fn selected_owner(&self) -> Option<&OwnerKey> {
        match &self.drilldown {
            Drilldown::Owner { key } => Some(key),
            _ => None,
        }
    }

    pub fn drilldown(&self) -> &Drilldown {
        &self.drilldown
    }

    /// Whether the overview shows departments rather than owners.
    pub fn is_department_view(&self) -> bool {
        self.department_view
    }
}

/// Objectives matching the current drilldown, in source order.
///
/// Empty when no drilldown is active.
pub fn selected_objectives(records: &[Objective], selection: &SelectionState) -> Vec<Objective> {
    match selection.drilldown() {
        Drilldown::None => Vec::new(),
        Drilldown::Department { department } => records
            .iter()
            .filter(|item| item.department() == department.as_str())
            .cloned()
            .collect(),
        Drilldown::Owner { key } => records
            .iter()
            .filter(|item| key.matches(item))
            .cloned()
            .collect(),
    }
}
