use logstruct_filters::catalog::{Catalog, StructCatalogEntry};
use logstruct_filters::error::LookupError;
use logstruct_filters::pattern::{PredicateSet, compile_pattern};
use std::collections::HashMap;

fn mailer_catalog() -> Catalog {
    Catalog::new(
        [("event", "evt"), ("source", "src")],
        [
            (
                "ActionMailer",
                StructCatalogEntry::new(["delivered"]).with_fixed_source("mailer"),
            ),
            (
                "Request",
                StructCatalogEntry::new(["request", "response"]),
            ),
        ],
    )
}

#[test]
fn test_action_mailer_scenario() {
    let catalog = mailer_catalog();
    let predicates: PredicateSet = [("mailer_class", vec!["UserMailer"])].into_iter().collect();

    let pattern = compile_pattern(&catalog, "ActionMailer", "delivered", &predicates).unwrap();

    assert_eq!(
        pattern,
        r#"{ $.evt = "delivered" && $.src = "mailer" && $.mailer_class = "UserMailer" }"#
    );
}

#[test]
fn test_event_not_allowed_lists_allowed_set() {
    let catalog = mailer_catalog();

    let err = compile_pattern(&catalog, "ActionMailer", "bounced", &PredicateSet::new())
        .unwrap_err();

    assert_eq!(
        err,
        LookupError::EventNotAllowed {
            event: "bounced".to_string(),
            struct_name: "ActionMailer".to_string(),
            allowed: vec!["delivered".to_string()],
        }
    );
    let message = err.to_string();
    assert!(message.contains("bounced"));
    assert!(message.contains("ActionMailer"));
    assert!(message.contains(r#"["delivered"]"#), "message: {message}");
}

#[test]
fn test_every_allowed_event_compiles_and_others_fail() {
    let catalog = mailer_catalog();
    let none = PredicateSet::new();

    for event in ["request", "response"] {
        assert!(compile_pattern(&catalog, "Request", event, &none).is_ok());
    }
    for event in ["", "REQUEST", "delivered"] {
        assert!(matches!(
            compile_pattern(&catalog, "Request", event, &none),
            Err(LookupError::EventNotAllowed { .. })
        ));
    }
}

#[test]
fn test_compile_is_deterministic() {
    let catalog = mailer_catalog();
    let predicates: PredicateSet = [
        ("zeta", vec!["1", "2"]),
        ("alpha", vec!["x"]),
        ("mid", vec!["m"]),
    ]
    .into_iter()
    .collect();

    let first = compile_pattern(&catalog, "ActionMailer", "delivered", &predicates).unwrap();
    let second = compile_pattern(&catalog, "ActionMailer", "delivered", &predicates).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_variable_source_emits_no_source_clause() {
    let catalog = mailer_catalog();

    let pattern = compile_pattern(&catalog, "Request", "response", &PredicateSet::new()).unwrap();

    assert_eq!(pattern, r#"{ $.evt = "response" }"#);
    assert!(!pattern.contains("$.src"));
}

#[test]
fn test_predicates_sorted_by_field_name() {
    let catalog = mailer_catalog();
    let mut input = HashMap::new();
    input.insert("b".to_string(), vec!["2".to_string()]);
    input.insert("a".to_string(), vec!["1".to_string()]);
    let predicates: PredicateSet = input.into_iter().collect();

    let pattern = compile_pattern(&catalog, "Request", "request", &predicates).unwrap();

    assert_eq!(
        pattern,
        r#"{ $.evt = "request" && $.a = "1" && $.b = "2" }"#
    );
}

#[test]
fn test_multiple_values_form_or_group_in_supplied_order() {
    let catalog = mailer_catalog();
    let predicates: PredicateSet = [("mailer_class", vec!["UserMailer", "AdminMailer"])]
        .into_iter()
        .collect();

    let pattern = compile_pattern(&catalog, "ActionMailer", "delivered", &predicates).unwrap();

    assert!(pattern.contains(
        r#"($.mailer_class = "UserMailer" || $.mailer_class = "AdminMailer")"#
    ));
}

#[test]
fn test_predicate_values_escape_double_quotes() {
    let catalog = mailer_catalog();
    let predicates: PredicateSet = [("msg", vec![r#"He said "hi""#])].into_iter().collect();

    let pattern = compile_pattern(&catalog, "Request", "request", &predicates).unwrap();

    assert!(pattern.contains(r#"$.msg = "He said \"hi\"""#), "{pattern}");
}

#[test]
fn test_fields_without_values_are_skipped() {
    let catalog = mailer_catalog();
    let predicates: PredicateSet = [("empty", Vec::<&str>::new()), ("kept", vec!["y"])]
        .into_iter()
        .collect();

    let pattern = compile_pattern(&catalog, "Request", "request", &predicates).unwrap();

    assert_eq!(pattern, r#"{ $.evt = "request" && $.kept = "y" }"#);
}

#[test]
fn test_missing_event_alias() {
    let catalog = Catalog::new(
        [("source", "src")],
        [("Boot", StructCatalogEntry::new(["boot"]))],
    );

    let err = compile_pattern(&catalog, "Boot", "boot", &PredicateSet::new()).unwrap_err();
    assert_eq!(
        err,
        LookupError::MissingKeyAlias {
            key: "event".to_string()
        }
    );
}

#[test]
fn test_missing_source_alias_only_matters_for_fixed_source() {
    let catalog = Catalog::new(
        [("event", "evt")],
        [
            ("Variable", StructCatalogEntry::new(["boot"])),
            (
                "Fixed",
                StructCatalogEntry::new(["boot"]).with_fixed_source("rails"),
            ),
        ],
    );
    let none = PredicateSet::new();

    assert_eq!(
        compile_pattern(&catalog, "Variable", "boot", &none).unwrap(),
        r#"{ $.evt = "boot" }"#
    );
    assert_eq!(
        compile_pattern(&catalog, "Fixed", "boot", &none).unwrap_err(),
        LookupError::MissingKeyAlias {
            key: "source".to_string()
        }
    );
}

#[test]
fn test_unknown_struct_and_empty_events() {
    let catalog = Catalog::new(
        [("event", "evt")],
        [("Empty", StructCatalogEntry::new(Vec::<String>::new()))],
    );
    let none = PredicateSet::new();

    assert!(matches!(
        compile_pattern(&catalog, "Missing", "boot", &none),
        Err(LookupError::UnknownStruct { .. })
    ));
    assert!(matches!(
        compile_pattern(&catalog, "Empty", "boot", &none),
        Err(LookupError::NoAllowedEvents { .. })
    ));
}

#[test]
fn test_dotted_key_alias_and_fields() {
    let catalog = Catalog::new(
        [("event", "meta.evt"), ("source", "meta.src")],
        [(
            "Job",
            StructCatalogEntry::new(["finish"]).with_fixed_source("job"),
        )],
    );
    let predicates = PredicateSet::parse_terms(["data.queue:default"]).unwrap();

    let pattern = compile_pattern(&catalog, "Job", "finish", &predicates).unwrap();

    assert_eq!(
        pattern,
        r#"{ $.meta.evt = "finish" && $.meta.src = "job" && $.data.queue = "default" }"#
    );
}
