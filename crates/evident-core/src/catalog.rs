//! # Compliance Catalogs and Assessment Plans
//!
//! Two externally authored documents drive resolution:
//!
//! - A [`ComplianceCatalog`] groups controls into families and maps each
//!   control onto external standards.
//! - An [`AssessmentPlan`] lists, per control, the requirements that test it
//!   and the procedures (one per policy rule) that check each requirement.
//!
//! A procedure id equals the policy rule id that implements it. That is the
//! join from evidence back to a control. Both documents are read-only once
//! loaded.

use serde::{Deserialize, Serialize};

use crate::identity::CatalogId;

/// A structured set of controls organised into families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCatalog {
    pub catalog_id: CatalogId,
    #[serde(default)]
    pub control_families: Vec<ControlFamily>,
}

/// A titled group of controls. The title becomes the metadata category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlFamily {
    pub title: String,
    #[serde(default)]
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub control_id: String,
    #[serde(default)]
    pub standard_mappings: Vec<StandardMapping>,
}

/// Mapping of a control onto one external standard (e.g. `"NIST-800-53"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardMapping {
    pub standard_ref: String,
    #[serde(default)]
    pub entries: Vec<MappingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub requirement_ref: String,
}

/// Requirements and procedures that assess one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPlan {
    pub control_id: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub requirement_id: String,
    #[serde(default)]
    pub procedures: Vec<Procedure>,
}

/// A concrete check. `procedure_id` is the policy rule id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub procedure_id: String,
    #[serde(default)]
    pub documentation: String,
}
