//! Golden tests for catalog search and filtering.
//!
//! These tests verify ranking against a small fixed catalog.

use medguide_core::catalog::{CatalogIndex, FAMILY_ALL};
use medguide_core::search::normalize;
use tracing_subscriber::EnvFilter;

const CATALOG_JSON: &str = r#"[
    {"name": "Insulina", "presentation": "Vial 100 UI/mL", "simpleFamily": "Hormonas",
     "uses": "Diabetes mellitus", "indications": "Hiperglucemia"},
    {"name": "Insulina glargina", "presentation": "Pluma 100 UI/mL", "simpleFamily": "Hormonas",
     "uses": "Diabetes mellitus tipo 1 y 2"},
    {"name": "Metformina", "presentation": "Tabletas 850mg", "simpleFamily": "Antidiabéticos",
     "uses": "Diabetes tipo 2", "indications": "Resistencia a la insulina"},
    {"name": "Amoxicilina", "presentation": "Suspensión 250mg/5mL", "simpleFamily": "Antibióticos",
     "uses": "Otitis, faringitis"},
    {"name": "Amoxicilina", "presentation": "Suspensión 250mg/5mL", "simpleFamily": "Antibióticos",
     "uses": "Duplicado que debe descartarse"},
    {"name": "Amoxicilina + Ácido clavulánico", "presentation": "Suspensión 400mg/5mL",
     "simpleFamily": "Antibióticos", "uses": "Otitis media"},
    {"name": "Ácido fólico", "presentation": "Tabletas 5mg", "simpleFamily": "Vitaminas",
     "uses": "Anemia megaloblástica"},
    {"name": "Salbutamol", "presentation": "Inhalador 100mcg", "simpleFamily": "Broncodilatadores",
     "uses": "Asma", "indications": "Crisis asmática"},
    {"name": "Sin familia", "presentation": "Ninguna"}
]"#;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    query: &'static str,
    /// Names in expected order
    expected: Vec<&'static str>,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "exact-beats-prefix-beats-indication",
            query: "insulina",
            // 20+0+0+0, 10+0+0+0, 0+0+0+1
            expected: vec!["Insulina", "Insulina glargina", "Metformina"],
        },
        GoldenCase {
            id: "accented-query",
            query: "INSULÍNA",
            expected: vec!["Insulina", "Insulina glargina", "Metformina"],
        },
        GoldenCase {
            id: "accent-insensitive-name",
            query: "acido",
            // prefix 10 vs substring 5
            expected: vec!["Ácido fólico", "Amoxicilina + Ácido clavulánico"],
        },
        GoldenCase {
            id: "prefix-ties-keep-catalog-order",
            query: "amox",
            expected: vec!["Amoxicilina", "Amoxicilina + Ácido clavulánico"],
        },
        GoldenCase {
            id: "uses-only",
            query: "diabetes",
            expected: vec!["Insulina", "Insulina glargina", "Metformina"],
        },
        GoldenCase {
            id: "uses-ties-keep-catalog-order",
            query: "otitis",
            expected: vec!["Amoxicilina", "Amoxicilina + Ácido clavulánico"],
        },
        GoldenCase {
            id: "family-match",
            query: "antibio",
            expected: vec!["Amoxicilina", "Amoxicilina + Ácido clavulánico"],
        },
        GoldenCase {
            id: "indications-only",
            query: "crisis",
            expected: vec!["Salbutamol"],
        },
        GoldenCase {
            id: "no-hits",
            query: "oseltamivir",
            expected: vec![],
        },
    ]
}

/// Opt into log output with RUST_LOG=medguide_core=debug.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn catalog() -> CatalogIndex {
    init_tracing();
    CatalogIndex::from_json_str(CATALOG_JSON).unwrap()
}

#[test]
fn test_golden_cases() {
    let catalog = catalog();

    for case in get_golden_cases() {
        let results: Vec<&str> = catalog
            .search(&normalize(case.query))
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(results, case.expected, "Case {}: ranking mismatch", case.id);
    }
}

#[test]
fn test_scores_are_descending() {
    let catalog = catalog();

    for query in ["a", "in", "ina", "diabetes", "mg"] {
        let scored = catalog.search_scored(&normalize(query));
        let totals: Vec<u32> = scored.iter().map(|(_, b)| b.total()).collect();

        assert!(
            totals.windows(2).all(|w| w[0] >= w[1]),
            "Query {} not sorted: {:?}",
            query,
            totals
        );
        assert!(totals.iter().all(|t| *t > 0), "Query {} kept a zero score", query);
    }
}

#[test]
fn test_equal_scores_keep_catalog_order() {
    let catalog = catalog();

    for query in ["a", "ina", "mg"] {
        let scored = catalog.search_scored(query);
        for pair in scored.windows(2) {
            let (a, sa) = pair[0];
            let (b, sb) = pair[1];
            if sa.total() == sb.total() {
                assert!(a.id < b.id, "Query {}: {} before {} breaks catalog order", query, a.name, b.name);
            }
        }
    }
}

#[test]
fn test_duplicate_dropped_with_first_id() {
    let catalog = catalog();

    let amox: Vec<_> = catalog
        .records()
        .iter()
        .filter(|r| r.identity_key() == "Amoxicilina|Suspensión 250mg/5mL")
        .collect();

    assert_eq!(amox.len(), 1);
    assert_eq!(amox[0].id, 3);
    assert_eq!(amox[0].uses, "Otitis, faringitis");
    assert_eq!(catalog.len(), 8);
}

#[test]
fn test_family_filter() {
    let catalog = catalog();

    let all: Vec<usize> = catalog.list_by_family(FAMILY_ALL).iter().map(|r| r.id).collect();
    assert_eq!(all, vec![0, 1, 2, 3, 5, 6, 7, 8]);

    let hormones: Vec<&str> = catalog
        .list_by_family("Hormonas")
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(hormones, vec!["Insulina", "Insulina glargina"]);

    // Exact label only; no folding on the filter key
    assert!(catalog.list_by_family("hormonas").is_empty());
}

#[test]
fn test_family_options() {
    assert_eq!(
        catalog().distinct_families(),
        vec![
            "Todos",
            "Antibióticos",
            "Antidiabéticos",
            "Broncodilatadores",
            "Hormonas",
            "Vitaminas",
        ]
    );
}
