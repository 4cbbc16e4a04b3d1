use factura_core::{Registry, ResourceError};
use factura_http::transport::mock::MockTransport;
use factura_http::{Method, Response, Status};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

fn response(
    status: Status,
    etag: Option<&str>,
    content_range: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut headers = HashMap::new();
    if let Some(etag) = etag {
        headers.insert("Etag".to_string(), etag.to_string());
    }
    if let Some(range) = content_range {
        headers.insert("Content-Range".to_string(), range.to_string());
    }
    Response::new(status, headers, body)
}

fn two_invoices() -> Value {
    json!([
        {"etag": "1000-7", "name": "April", "read": 0},
        {"etag": "2000-9", "name": "May", "read": 1},
    ])
}

#[test]
fn ranged_populate_clamps_the_window() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::PartialContent,
        Some("3000-c"),
        Some("resources 0-199/3075"),
        Some(json!([])),
    ));

    let mut registry = Registry::new(transport.clone(), "invoices/");
    registry
        .all()
        .populate(Some(0), Some(500), false, None)
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.header("Range"), Some("resources=0-200"));
    assert_eq!(request.header("If-None-Match"), None);
}

#[test]
fn conditional_populate_uses_the_collection_token() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));

    let mut registry = Registry::new(transport.clone(), "invoices/");
    registry.all().populate(None, None, false, None).unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.header("Range"), None);
    assert_eq!(request.header("If-None-Match"), Some("0-0"));
    assert!(request.header("If-Modified-Since").is_some());
}

#[test]
fn populate_builds_members_in_server_order() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));

    let mut registry = Registry::new(transport.clone(), "invoices/");
    let collection = registry.all();
    collection.populate(None, None, false, None).unwrap();

    assert_eq!(collection.len(), 2);
    let ids: Vec<&str> = collection.iter().map(|member| member.id()).collect();
    assert_eq!(ids, ["7", "9"]);

    let member = collection.get_mut("9").unwrap();
    assert_eq!(member.uri(), "invoices/9/");
    assert_eq!(member.etag().to_string(), "2000-9");
    assert_eq!(
        member.string_attribute("name").unwrap(),
        Some("May".to_string())
    );
    // Members are synced from the page, not fetched individually.
    assert_eq!(transport.request_count(), 1);

    // The collection token is its own, distinct from any member's.
    assert_eq!(collection.etag().to_string(), "3000-c");
}

#[test]
fn repopulation_replaces_members_wholesale() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));
    transport.enqueue(response(
        Status::Ok,
        Some("4000-c"),
        Some("resources 0-0/1"),
        Some(json!([{"etag": "5000-11", "name": "June"}])),
    ));

    let mut registry = Registry::new(transport, "invoices/");
    let collection = registry.all();
    collection.populate(None, None, false, None).unwrap();
    collection.populate(None, None, false, None).unwrap();

    assert_eq!(collection.len(), 1);
    assert!(collection.get("7").is_none());
    assert!(collection.get("11").is_some());
}

#[test]
fn count_probes_the_headers_once() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-0/3075"),
        None,
    ));

    let mut registry = Registry::new(transport.clone(), "invoices/");
    let collection = registry.all();

    assert_eq!(collection.count().unwrap(), 3075);
    let probe = transport.last_request().unwrap();
    assert_eq!(probe.method, Method::Head);
    assert_eq!(probe.header("Range"), Some("resources=0-1"));

    // Cached; no second probe.
    assert_eq!(collection.count().unwrap(), 3075);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn no_content_clears_members_and_caches_an_empty_range() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));
    transport.enqueue(response(Status::NoContent, Some("4000-c"), None, None));

    let mut registry = Registry::new(transport.clone(), "invoices/");
    let collection = registry.all();
    collection.populate(None, None, false, None).unwrap();
    assert_eq!(collection.len(), 2);

    collection.populate(None, None, true, None).unwrap();
    assert!(collection.is_empty());

    // A zeroed range was cached, so count needs no further request.
    assert_eq!(collection.count().unwrap(), 0);
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn out_of_range_windows_clear_members() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));
    transport.enqueue(response(
        Status::RangeNotSatisfiable,
        Some("3000-c"),
        Some("resources 0-0/2"),
        None,
    ));

    let mut registry = Registry::new(transport, "invoices/");
    let collection = registry.all();
    collection.populate(None, None, false, None).unwrap();
    collection
        .populate(Some(500), Some(10), false, None)
        .unwrap();

    assert!(collection.is_empty());
    assert_eq!(collection.content_range().unwrap().total(), 2);
}

#[test]
fn not_modified_keeps_local_members() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));
    transport.enqueue(response(Status::NotModified, None, None, None));

    let mut registry = Registry::new(transport, "invoices/");
    let collection = registry.all();
    collection.populate(None, None, false, None).unwrap();
    collection.populate(None, None, false, None).unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.etag().to_string(), "3000-c");
}

#[test]
fn head_probes_update_headers_without_touching_members() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-1/2"),
        Some(two_invoices()),
    ));
    transport.enqueue(response(
        Status::Ok,
        Some("9000-c"),
        Some("resources 0-0/50"),
        None,
    ));

    let mut registry = Registry::new(transport, "invoices/");
    let collection = registry.all();
    collection.populate(None, None, false, None).unwrap();
    collection.load_info().unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.etag().to_string(), "9000-c");
    assert_eq!(collection.content_range().unwrap().total(), 50);
}

#[test]
fn field_filters_extend_the_query_string() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(Status::NoContent, None, None, None));
    transport.enqueue(response(Status::NoContent, None, None, None));

    let mut registry = Registry::new(transport.clone(), "invoices/");
    registry
        .all()
        .populate(None, None, true, Some("name,total"))
        .unwrap();
    assert_eq!(
        transport.last_request().unwrap().uri,
        "invoices/?fields=name%2Ctotal"
    );

    registry
        .search("read==0")
        .populate(None, None, true, Some("name"))
        .unwrap();
    assert_eq!(
        transport.last_request().unwrap().uri,
        "invoices/?q=read%3D%3D0&fields=name"
    );
}

#[test]
fn records_without_tokens_are_rejected() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue(response(
        Status::Ok,
        Some("3000-c"),
        Some("resources 0-0/1"),
        Some(json!([{"name": "stray"}])),
    ));

    let mut registry = Registry::new(transport, "invoices/");
    let error = registry
        .all()
        .populate(None, None, false, None)
        .unwrap_err();

    assert!(matches!(error, ResourceError::Validation(_)));
}
