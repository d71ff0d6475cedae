//! Integration tests for AttributeValue and the attributes! macro.

use std::collections::HashMap;

use vmsg::{AttributeValue, ExpressionLanguageFeatureLevel, attributes};

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn scalars_render_their_display_form() {
    assert_eq!(AttributeValue::from(true).render().as_deref(), Some("true"));
    assert_eq!(AttributeValue::from('x').render().as_deref(), Some("x"));
    assert_eq!(AttributeValue::from(-3).render().as_deref(), Some("-3"));
    assert_eq!(AttributeValue::from(2.5).render().as_deref(), Some("2.5"));
    assert_eq!(AttributeValue::from("text").render().as_deref(), Some("text"));
}

#[test]
fn f32_renders_shortest_form() {
    assert_eq!(AttributeValue::from(10.1f32).render().as_deref(), Some("10.1"));
}

#[test]
fn null_has_no_rendering() {
    assert_eq!(AttributeValue::Null.render(), None);
    assert!(AttributeValue::from(None::<i32>).is_null());
    assert_eq!(AttributeValue::from(Some(4)).as_integer(), Some(4));
}

#[test]
fn nested_lists_render_with_brackets() {
    let value = AttributeValue::List(vec![
        AttributeValue::from(1),
        AttributeValue::from(vec!["a", "b"]),
        AttributeValue::Null,
    ]);
    assert_eq!(value.render().as_deref(), Some("[1, [a, b], null]"));
}

// =========================================================================
// Decoding
// =========================================================================

#[test]
fn attributes_decode_from_json() {
    let json = r#"{"min": 2, "max": 10.5, "flag": true, "name": "x", "groups": ["a", 1], "none": null}"#;
    let decoded: HashMap<String, AttributeValue> =
        serde_json::from_str(json).unwrap();

    assert_eq!(decoded["min"], AttributeValue::Integer(2));
    assert_eq!(decoded["max"], AttributeValue::Float(10.5));
    assert_eq!(decoded["flag"], AttributeValue::Bool(true));
    assert_eq!(decoded["name"].as_str(), Some("x"));
    assert_eq!(decoded["groups"].render().as_deref(), Some("[a, 1]"));
    assert!(decoded["none"].is_null());
}

#[test]
fn single_character_json_decodes_as_string() {
    let decoded: AttributeValue = serde_json::from_str(r#""x""#).unwrap();
    assert_eq!(decoded, AttributeValue::String("x".to_string()));
    assert_eq!(decoded.render(), AttributeValue::from('x').render());
}

#[test]
fn feature_level_parses_and_orders() {
    let level: ExpressionLanguageFeatureLevel = "bean_properties".parse().unwrap();
    assert_eq!(level, ExpressionLanguageFeatureLevel::BeanProperties);
    assert_eq!(level.to_string(), "bean-properties");
    assert!(ExpressionLanguageFeatureLevel::None < ExpressionLanguageFeatureLevel::Variables);
    assert!(!ExpressionLanguageFeatureLevel::None.is_enabled());
    assert!("everything".parse::<ExpressionLanguageFeatureLevel>().is_err());

    let decoded: ExpressionLanguageFeatureLevel = serde_json::from_str(r#""bean-methods""#).unwrap();
    assert_eq!(decoded, ExpressionLanguageFeatureLevel::BeanMethods);
}

// =========================================================================
// attributes! Macro
// =========================================================================

#[test]
fn attributes_macro_builds_map() {
    let empty = attributes! {};
    assert!(empty.is_empty());

    let attrs = attributes! { "min" => 1, "max" => 5u64, "label" => String::from("x"), };
    assert_eq!(attrs.len(), 3);
    assert_eq!(attrs["max"].as_integer(), Some(5));
}
