//! End-to-end resolution scenarios over the plan store, scope and resolver
//! set.

use std::sync::Arc;

use evident_core::{
    calculate, combine, AssessmentPlan, CatalogId, ComplianceCatalog, ComplianceVerdict, Control,
    ControlFamily, EngineName, EnrichmentStatus, EvaluationOutcome, Evidence, MappingEntry,
    PolicyReference, Procedure, Requirement, RuleId, StandardMapping,
};
use evident_mapper::{BasicResolver, MetadataResolver, PlanStore, ResolverSet, Scope, ScopeHandle};
use proptest::prelude::*;

fn cat_a() -> ComplianceCatalog {
    ComplianceCatalog {
        catalog_id: CatalogId::new("cat-A").unwrap(),
        control_families: vec![ControlFamily {
            title: "Access Control".into(),
            controls: vec![Control {
                control_id: "AC".into(),
                standard_mappings: vec![StandardMapping {
                    standard_ref: "NIST-800-53".into(),
                    entries: vec![MappingEntry {
                        requirement_ref: "AC-1".into(),
                    }],
                }],
            }],
        }],
    }
}

fn cat_a_plan() -> AssessmentPlan {
    AssessmentPlan {
        control_id: "AC".into(),
        requirements: vec![Requirement {
            requirement_id: "AC-1-REQ".into(),
            procedures: vec![Procedure {
                procedure_id: "AC-1".into(),
                documentation: "Enforce least privilege".into(),
            }],
        }],
    }
}

fn setup() -> (BasicResolver, Scope) {
    let resolver = BasicResolver::new();
    resolver.register_plan(CatalogId::new("cat-A").unwrap(), vec![cat_a_plan()]);
    (resolver, Scope::from_catalogs([cat_a()]))
}

fn evidence(rule: &str, outcome: EvaluationOutcome) -> Evidence {
    Evidence::new(
        PolicyReference::new(EngineName::new("opa").unwrap(), RuleId::new(rule).unwrap()),
        outcome,
    )
}

#[test]
fn resolves_mapped_rule() {
    let (resolver, scope) = setup();
    let outcome = resolver.metadata(&RuleId::new("AC-1").unwrap(), &scope);

    assert_eq!(outcome.enrichment_status, EnrichmentStatus::Success);
    assert_eq!(outcome.metadata.control_id, "AC-1-REQ");
    assert_eq!(outcome.metadata.category, "Access Control");
    assert_eq!(outcome.metadata.catalog_id, "cat-A");
    assert_eq!(outcome.metadata.requirements, vec!["AC-1"]);
    assert_eq!(outcome.metadata.frameworks, vec!["NIST-800-53"]);
    assert_eq!(
        outcome.metadata.remediation_description.as_deref(),
        Some("Enforce least privilege")
    );
}

#[test]
fn empty_scope_yields_unmapped() {
    let (resolver, _) = setup();
    let outcome = resolver.metadata(&RuleId::new("AC-1").unwrap(), &Scope::empty());

    assert_eq!(outcome.enrichment_status, EnrichmentStatus::Unmapped);
    assert_eq!(outcome.metadata.control_id, "AC-1");
    assert_eq!(outcome.metadata.category, "Unknown");
    assert_eq!(outcome.metadata.catalog_id, "unknown");
}

#[test]
fn unknown_rule_yields_unmapped() {
    let (resolver, scope) = setup();
    let outcome = resolver.metadata(&RuleId::new("ZZ-9").unwrap(), &scope);

    assert_eq!(outcome.enrichment_status, EnrichmentStatus::Unmapped);
    assert_eq!(outcome.metadata.control_id, "ZZ-9");
    assert!(outcome.metadata.requirements.is_empty());
    assert!(outcome.metadata.frameworks.is_empty());
}

#[test]
fn failed_evidence_changes_only_the_verdict() {
    let (resolver, scope) = setup();
    let passed = resolver.enrich(&evidence("AC-1", EvaluationOutcome::Passed), &scope);
    let failed = resolver.enrich(&evidence("AC-1", EvaluationOutcome::Failed), &scope);

    assert_eq!(passed.verdict, ComplianceVerdict::Compliant);
    assert_eq!(failed.verdict, ComplianceVerdict::NonCompliant);
    assert_eq!(passed.metadata, failed.metadata);
}

#[test]
fn enrich_matches_manual_combine() {
    let (resolver, scope) = setup();
    let ev = evidence("AC-1", EvaluationOutcome::NotRun);
    let manual = combine(resolver.metadata(ev.rule_id(), &scope), calculate(&ev));
    assert_eq!(resolver.enrich(&ev, &scope), manual);
}

#[test]
fn plans_registered_later_become_visible() {
    let store = Arc::new(PlanStore::new());
    let resolver = BasicResolver::with_store(Arc::clone(&store));
    let scope = ScopeHandle::new(Scope::from_catalogs([cat_a()]));
    let rule = RuleId::new("AC-1").unwrap();

    let before = resolver.metadata(&rule, &scope.snapshot());
    store.register_plan(CatalogId::new("cat-A").unwrap(), vec![cat_a_plan()]);
    let after = resolver.metadata(&rule, &scope.snapshot());

    assert_eq!(before.enrichment_status, EnrichmentStatus::Unmapped);
    assert_eq!(after.enrichment_status, EnrichmentStatus::Success);
}

#[test]
fn scope_reload_removes_catalog() {
    let (resolver, scope) = setup();
    let handle = ScopeHandle::new(scope);
    let rule = RuleId::new("AC-1").unwrap();

    assert!(resolver.metadata(&rule, &handle.snapshot()).is_mapped());
    handle.replace(Scope::empty());
    assert!(!resolver.metadata(&rule, &handle.snapshot()).is_mapped());
}

#[test]
fn readers_see_whole_scopes_during_replace() {
    let (resolver, scope) = setup();
    let handle = ScopeHandle::new(scope);
    let rule = RuleId::new("AC-1").unwrap();
    let expected = resolver.metadata(&rule, &handle.snapshot());

    std::thread::scope(|s| {
        s.spawn(|| {
            for i in 0..200 {
                if i % 2 == 0 {
                    handle.replace(Scope::empty());
                } else {
                    handle.replace(Scope::from_catalogs([cat_a()]));
                }
            }
        });
        s.spawn(|| {
            for i in 0..200 {
                resolver.register_plan(
                    CatalogId::new(if i % 2 == 0 { "cat-A" } else { "cat-Z" }).unwrap(),
                    vec![AssessmentPlan {
                        control_id: "AC".into(),
                        requirements: vec![],
                    }],
                );
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..500 {
                    let snapshot = handle.snapshot();
                    let outcome = resolver.metadata(&rule, &snapshot);
                    if snapshot.contains(&CatalogId::new("cat-A").unwrap()) {
                        assert_eq!(outcome, expected);
                    } else {
                        assert_eq!(outcome.enrichment_status, EnrichmentStatus::Unmapped);
                    }
                }
            });
        }
    });

    assert_eq!(resolver.plan_store().version(), 201);
}

#[test]
fn padded_procedure_id_matches_rule() {
    let resolver = BasicResolver::new();
    let mut plan = cat_a_plan();
    plan.requirements[0].procedures[0].procedure_id = " AC-1 ".into();
    resolver.register_plan(CatalogId::new("cat-A").unwrap(), vec![plan]);
    let scope = Scope::from_catalogs([cat_a()]);

    let outcome = resolver.metadata(&RuleId::new(" AC-1").unwrap(), &scope);

    assert_eq!(outcome.enrichment_status, EnrichmentStatus::Success);
    assert_eq!(outcome.metadata.control_id, "AC-1-REQ");
}

#[test]
fn resolver_set_routes_unknown_engines_to_baseline() {
    let (resolver, scope) = setup();
    let set = ResolverSet::new(Arc::new(resolver));
    let selected = set.select(&EngineName::new("unknown-engine").unwrap());

    assert_eq!(selected.id(), "basic");
    assert!(selected
        .metadata(&RuleId::new("AC-1").unwrap(), &scope)
        .is_mapped());
}

proptest! {
    #[test]
    fn resolution_is_idempotent(rule in "[A-Z]{2}-[0-9]{1,2}") {
        let (resolver, scope) = setup();
        let rule = RuleId::new(rule).unwrap();
        let first = resolver.metadata(&rule, &scope);
        let second = resolver.metadata(&rule, &scope);
        prop_assert_eq!(first, second);
    }
}
