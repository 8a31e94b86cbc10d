//! Roundtrip serialisation tests for `autoflow-core` types.
//!
//! Each `#[case]` is isolated — no shared state.

use std::collections::BTreeMap;

use chrono::Utc;
use rstest::rstest;

use autoflow_core::types::{
    Document, FieldDescriptor, FieldSet, FieldValue, Opportunity, OpportunityId, PipelineConfig,
    Stage, StageId,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn stage(id: &str, label: &str) -> Stage {
    Stage {
        id: StageId::from(id),
        label: label.to_owned(),
        extra: BTreeMap::new(),
    }
}

fn minimal_document() -> Document {
    Document::default()
}

fn full_document() -> Document {
    let now = Utc::now();
    Document {
        opportunities: vec![Opportunity {
            id: OpportunityId::from("a1b2c3d4"),
            title: "Ana — Corolla".to_owned(),
            stage: StageId::from("contacto"),
            created_at: now,
            moved_at: Some(now),
            data: BTreeMap::from([
                ("nombre_cliente".to_owned(), FieldValue::from("Ana")),
                ("modelo_interes".to_owned(), FieldValue::from("Corolla")),
                ("visitas".to_owned(), FieldValue::Num(2.0)),
                ("vip".to_owned(), FieldValue::Bool(false)),
                ("notas".to_owned(), FieldValue::Null),
            ]),
        }],
        config: Some(PipelineConfig {
            name: Some("concesionarias".to_owned()),
            stages: vec![
                stage("contacto", "Contacto"),
                stage("prueba_manejo", "Prueba de manejo"),
                stage("venta", "Venta"),
            ],
            fields: FieldSet {
                global: vec![FieldDescriptor {
                    key: "nombre_cliente".to_owned(),
                    required: true,
                    label: Some("Nombre del cliente".to_owned()),
                    kind: Some("text".to_owned()),
                }],
            },
        }),
    }
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

#[rstest]
#[case::minimal(minimal_document())]
#[case::full(full_document())]
fn document_json_roundtrip(#[case] doc: Document) {
    let json = serde_json::to_string_pretty(&doc).expect("serialize");
    let back: Document = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, doc);
}

#[test]
fn moved_at_absent_until_first_move() {
    let now = Utc::now();
    let record = Opportunity {
        id: OpportunityId::from("x"),
        title: "t".to_owned(),
        stage: StageId::from("contacto"),
        created_at: now,
        moved_at: None,
        data: BTreeMap::new(),
    };
    let json = serde_json::to_value(&record).expect("serialize");
    assert!(
        json.get("moved_at").is_none(),
        "moved_at must not serialize before the first move"
    );
}

#[test]
fn stage_extra_keys_roundtrip() {
    let json = r##"{"id":"venta","label":"Venta","color":"#2ecc71","orden":3}"##;
    let parsed: Stage = serde_json::from_str(json).expect("parse");
    assert_eq!(parsed.extra["color"], serde_json::json!("#2ecc71"));
    let back = serde_json::to_value(&parsed).expect("serialize");
    assert_eq!(back["orden"], serde_json::json!(3));
}

#[test]
fn config_field_type_key_roundtrips_as_type() {
    let json = r#"{"key":"telefono","required":false,"type":"tel"}"#;
    let parsed: FieldDescriptor = serde_json::from_str(json).expect("parse");
    assert_eq!(parsed.kind.as_deref(), Some("tel"));
    let back = serde_json::to_value(&parsed).expect("serialize");
    assert_eq!(back["type"], serde_json::json!("tel"));
}

#[test]
fn legacy_document_without_config_key_parses() {
    let doc: Document = serde_json::from_str(r#"{"opportunities":[]}"#).expect("parse");
    assert!(doc.config.is_none());
}
