use factura_core::value::{id_from_uri, is_blank};
use serde_json::json;

#[test]
fn null_and_empty_strings_are_blank() {
    assert!(is_blank(&json!(null)));
    assert!(is_blank(&json!("")));
    assert!(!is_blank(&json!("x")));
    assert!(!is_blank(&json!(0)));
    assert!(!is_blank(&json!(false)));
}

#[test]
fn trailing_uri_segment_is_the_identifier() {
    assert_eq!(id_from_uri("sellers/me/emails/77/"), Some("77"));
    assert_eq!(id_from_uri("https://api.factura.dev/threads/42/"), Some("42"));
    assert_eq!(id_from_uri("threads/42"), Some("42"));
    assert_eq!(id_from_uri("/"), None);
    assert_eq!(id_from_uri(""), None);
}
