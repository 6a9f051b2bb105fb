//! # Catalog and Plan Loaders
//!
//! Read catalogs and assessment plans from YAML files. JSON documents load
//! too, since YAML is a superset.
//!
//! - A catalog file holds one [`ComplianceCatalog`].
//! - A plan file holds a list of [`AssessmentPlan`]s.

use std::collections::HashSet;
use std::path::Path;

use evident_core::{AssessmentPlan, ComplianceCatalog};
use serde::de::DeserializeOwned;

use crate::error::LoadError;

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_catalog(path: &Path) -> Result<ComplianceCatalog, LoadError> {
    let catalog: ComplianceCatalog = load_yaml(path)?;
    tracing::info!(
        catalog_id = %catalog.catalog_id,
        families = catalog.control_families.len(),
        path = %path.display(),
        "loaded compliance catalog"
    );
    Ok(catalog)
}

/// Load several catalog files, rejecting repeated catalog ids.
pub fn load_catalogs<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<Vec<ComplianceCatalog>, LoadError> {
    let mut seen = HashSet::new();
    let mut catalogs = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let catalog = load_catalog(path)?;
        if !seen.insert(catalog.catalog_id.clone()) {
            return Err(LoadError::DuplicateCatalog {
                catalog_id: catalog.catalog_id.to_string(),
                path: path.to_path_buf(),
            });
        }
        catalogs.push(catalog);
    }
    Ok(catalogs)
}

pub fn load_plans(path: &Path) -> Result<Vec<AssessmentPlan>, LoadError> {
    let plans: Vec<AssessmentPlan> = load_yaml(path)?;
    tracing::info!(plans = plans.len(), path = %path.display(), "loaded assessment plans");
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const CATALOG: &str = r#"
catalogId: cat-A
controlFamilies:
  - title: Access Control
    controls:
      - controlId: AC
        standardMappings:
          - standardRef: NIST-800-53
            entries:
              - requirementRef: AC-1
"#;

    #[test]
    fn loads_catalog_yaml() {
        let file = write_temp(CATALOG);
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.catalog_id.as_str(), "cat-A");
        assert_eq!(catalog.control_families[0].title, "Access Control");
    }

    #[test]
    fn loads_plans_json() {
        let file = write_temp(
            r#"[{"controlId":"AC","requirements":[{"requirementId":"AC-1-REQ","procedures":[{"procedureId":"AC-1"}]}]}]"#,
        );
        let plans = load_plans(file.path()).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].requirements[0].procedures[0].procedure_id, "AC-1");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_catalog(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn empty_catalog_id_is_parse_error() {
        let file = write_temp("catalogId: ''\ncontrolFamilies: []\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn duplicate_catalog_ids_rejected() {
        let a = write_temp(CATALOG);
        let b = write_temp(CATALOG);
        let err = load_catalogs([a.path(), b.path()]).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateCatalog { .. }));
    }
}
