//! # Lookup Indexes
//!
//! Flattened views over plans and catalogs. Both are built once when their
//! source changes and then shared read-only.
//!
//! When an id appears more than once while flattening, the last occurrence
//! wins. Procedure ids are trimmed to match the trimmed form of a `RuleId`.

use std::collections::HashMap;

use evident_core::{AssessmentPlan, ComplianceCatalog, StandardMapping};

// -- Procedures --------------------------------------------------------------

/// Where a procedure sits within its assessment plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureEntry {
    pub control_id: String,
    pub requirement_id: String,
    pub documentation: String,
}

/// `procedure id → ProcedureEntry` for one catalog's plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureIndex {
    entries: HashMap<String, ProcedureEntry>,
}

impl ProcedureIndex {
    pub fn build(plans: &[AssessmentPlan]) -> Self {
        let mut entries = HashMap::new();
        for plan in plans {
            for requirement in &plan.requirements {
                for procedure in &requirement.procedures {
                    entries.insert(
                        procedure.procedure_id.trim().to_string(),
                        ProcedureEntry {
                            control_id: plan.control_id.clone(),
                            requirement_id: requirement.requirement_id.clone(),
                            documentation: procedure.documentation.clone(),
                        },
                    );
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, procedure_id: &str) -> Option<&ProcedureEntry> {
        self.entries.get(procedure_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// -- Controls ----------------------------------------------------------------

/// A control's family title and its standard mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEntry {
    pub category: String,
    pub standard_mappings: Vec<StandardMapping>,
}

impl ControlEntry {
    /// Every mapping entry's requirement ref, in encounter order, duplicates
    /// preserved.
    pub fn requirement_refs(&self) -> Vec<String> {
        self.standard_mappings
            .iter()
            .flat_map(|m| m.entries.iter().map(|e| e.requirement_ref.clone()))
            .collect()
    }

    /// Every mapping's standard ref, in encounter order, duplicates preserved.
    pub fn standard_refs(&self) -> Vec<String> {
        self.standard_mappings
            .iter()
            .map(|m| m.standard_ref.clone())
            .collect()
    }
}

/// `control id → ControlEntry` for one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlIndex {
    entries: HashMap<String, ControlEntry>,
}

impl ControlIndex {
    pub fn build(catalog: &ComplianceCatalog) -> Self {
        let mut entries = HashMap::new();
        for family in &catalog.control_families {
            for control in &family.controls {
                entries.insert(
                    control.control_id.clone(),
                    ControlEntry {
                        category: family.title.clone(),
                        standard_mappings: control.standard_mappings.clone(),
                    },
                );
            }
        }
        Self { entries }
    }

    pub fn get(&self, control_id: &str) -> Option<&ControlEntry> {
        self.entries.get(control_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
