use super::decode;

use anyhow::Result;
use serde_json::{json, Value};

use crate::models::DecodeError;

#[test]
fn test_decode_accepts_plain_json_array() -> Result<()> {
    let candidates = decode(r#"[{"name": "Acme"}, {"name": "Beta"}]"#)?;

    assert_eq!(candidates, vec![json!({"name": "Acme"}), json!({"name": "Beta"})]);

    Ok(())
}

#[test]
fn test_decode_strips_const_assignment_prefix() -> Result<()> {
    let candidates = decode(r#"const accounts = [{"name": "Acme"}];"#)?;

    assert_eq!(candidates, vec![json!({"name": "Acme"})]);

    Ok(())
}

#[test]
fn test_decode_strips_module_exports_prefix() -> Result<()> {
    let candidates = decode(r#"module.exports = [{"name": "Acme"}]"#)?;

    assert_eq!(candidates.len(), 1);

    Ok(())
}

#[test]
fn test_decode_strips_export_default_prefix() -> Result<()> {
    let candidates = decode(r#"export default [{"name": "Acme"}];"#)?;

    assert_eq!(candidates.len(), 1);

    Ok(())
}

#[test]
fn test_decode_strips_export_const_prefix() -> Result<()> {
    let candidates = decode(r#"export const accounts = [true, false, null]"#)?;

    assert_eq!(candidates, vec![json!(true), json!(false), Value::Null]);

    Ok(())
}

#[test]
fn test_decode_accepts_javascript_flavored_literals() -> Result<()> {
    let payload = r#"
        // seeded accounts
        const accounts = [
            { name: 'Acme', email: 'ops@acme.io', status: 'active' },
            /* second record */
            { name: "Beta", status: "pending", },
        ];
    "#;

    let candidates = decode(payload)?;

    assert_eq!(
        candidates,
        vec![
            json!({"name": "Acme", "email": "ops@acme.io", "status": "active"}),
            json!({"name": "Beta", "status": "pending"})
        ]
    );

    Ok(())
}

#[test]
fn test_decode_parses_numbers_and_escapes() -> Result<()> {
    let candidates = decode(r#"[{"count": 3, "ratio": -1.5e2, "label": "a\nbA\'"}]"#)?;

    assert_eq!(candidates[0]["count"], json!(3));
    assert_eq!(candidates[0]["ratio"], json!(-150.0));
    assert_eq!(candidates[0]["label"], json!("a\nbA'"));

    Ok(())
}

#[test]
fn test_decode_preserves_candidate_order() -> Result<()> {
    let candidates = decode(r#"[{"name": "c"}, {"name": "a"}, {"name": "b"}]"#)?;

    let names: Vec<&str> = candidates
        .iter()
        .filter_map(|candidate| candidate["name"].as_str())
        .collect();

    assert_eq!(names, vec!["c", "a", "b"]);

    Ok(())
}

#[test]
fn test_decode_is_idempotent_for_identical_payloads() -> Result<()> {
    let payload = r#"module.exports = [{ name: 'Acme' }, { name: 'Beta' }]"#;

    assert_eq!(decode(payload)?, decode(payload)?);

    Ok(())
}

#[test]
fn test_decode_rejects_non_array_root() {
    let result = decode(r#"{"name": "Acme"}"#);

    assert!(matches!(result, Err(DecodeError::RootNotArray)));
}

#[test]
fn test_decode_rejects_scalar_root() {
    assert!(matches!(decode("42"), Err(DecodeError::RootNotArray)));
}

#[test]
fn test_decode_rejects_function_call_expression() {
    let result = decode(r#"[{ name: require("fs").readFileSync("/etc/passwd") }]"#);

    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_bare_identifier_value() {
    let result = decode(r#"[{ name: process }]"#);

    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_computed_expression() {
    assert!(matches!(decode("[1 + 2]"), Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_unknown_leading_identifier() {
    let result = decode(r#"eval("[1]")"#);

    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_trailing_content_after_literal() {
    let result = decode(r#"[1]; [2]"#);

    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_unterminated_string() {
    let result = decode(r#"[{"name": "Acme]"#);

    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_unterminated_block_comment() {
    let result = decode("/* seeded [1]");

    assert!(matches!(result, Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_empty_input() {
    assert!(matches!(decode(""), Err(DecodeError::Malformed { .. })));
    assert!(matches!(decode("   \n\t"), Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_rejects_template_literal() {
    assert!(matches!(decode("[`Acme`]"), Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_passes_non_ascii_text_through() -> Result<()> {
    let candidates = decode(r#"[{ name: 'Müller 株式会社' }]"#)?;

    assert_eq!(candidates[0]["name"], json!("Müller 株式会社"));

    Ok(())
}

#[test]
fn test_decode_combines_surrogate_pair_escapes() -> Result<()> {
    let candidates = decode("[\"\\uD834\\uDD1E\"]")?;

    assert_eq!(candidates[0], json!("\u{1D11E}"));

    Ok(())
}

#[test]
fn test_decode_rejects_unpaired_surrogate_escape() {
    assert!(matches!(decode(r#"["\uD834"]"#), Err(DecodeError::Malformed { .. })));
    assert!(matches!(decode(r#"["\uDD1E"]"#), Err(DecodeError::Malformed { .. })));
}

#[test]
fn test_decode_reports_byte_offset_of_failure() {
    let Err(DecodeError::Malformed { offset, reason }) = decode("[fetch()]") else {
        panic!("expected a malformed payload error");
    };

    assert_eq!(offset, 1);
    assert!(reason.contains("fetch"));
}
