use factura_http::{
    ApiConfig, Credentials, HttpError, HttpTransport, Method, Payload, Request, Status, Transport,
};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ApiConfig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    ApiConfig {
        endpoint: format!("{}/", server.uri()),
        ..Default::default()
    }
}

async fn run_blocking<F, T>(job: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    // reqwest's blocking client refuses to live on an async runtime thread.
    tokio::task::spawn_blocking(job).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn get_decodes_status_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sellers/me/"))
        .and(header("Accept", "application/json"))
        .and(header(
            "Authorization",
            "BASIC YWRhQGV4YW1wbGUuY29tOnNlY3JldA==",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Etag", "1577836800000-42")
                .set_body_json(serde_json::json!({"firstname": "Jimi"})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = run_blocking(move || {
        let transport =
            HttpTransport::new(config, Credentials::basic("ada@example.com", "secret")).unwrap();
        transport.execute(&Request::new(Method::Get, "sellers/me/"))
    })
    .await
    .unwrap();

    assert_eq!(response.status(), Status::Ok);
    let token = response.etag().unwrap().unwrap();
    assert_eq!(token.id(), "42");
    assert_eq!(
        response.fields().unwrap().get("firstname").unwrap(),
        "Jimi"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn patch_rides_on_post_with_override_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/7/"))
        .and(header("X-Http-Method-Override", "PATCH"))
        .and(header(
            "Content-Type",
            "application/x-www-form-urlencoded",
        ))
        .and(body_string("read=true"))
        .respond_with(ResponseTemplate::new(204).insert_header("Etag", "2000-7"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = run_blocking(move || {
        let transport =
            HttpTransport::new(config, Credentials::bearer("token-1")).unwrap();
        let request = Request::new(Method::Patch, "invoices/7/")
            .with_payload(Payload::form([("read", "true")]));
        transport.execute(&request)
    })
    .await
    .unwrap();

    assert_eq!(response.status(), Status::NoContent);
}

#[tokio::test(flavor = "multi_thread")]
async fn bearer_credentials_form_the_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/buyers/me/"))
        .and(header("Authorization", "BEARER token-1"))
        .respond_with(ResponseTemplate::new(200).insert_header("Etag", "0-me"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = run_blocking(move || {
        let transport = HttpTransport::new(config, Credentials::bearer("token-1")).unwrap();
        transport.execute(&Request::new(Method::Get, "buyers/me/"))
    })
    .await
    .unwrap();

    assert_eq!(response.status(), Status::Ok);
}

#[tokio::test(flavor = "multi_thread")]
async fn typed_headers_serialize_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices/"))
        .and(query_param("q", "read==0"))
        .and(header("Range", "resources=0-200"))
        .and(header("If-None-Match", "0-0"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("Etag", "3000-c")
                .insert_header("Content-Range", "resources 0-24/3075")
                .set_body_json(serde_json::json!([])),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = run_blocking(move || {
        let transport = HttpTransport::new(config, Credentials::bearer("t")).unwrap();
        let request = Request::new(Method::Get, "invoices/?q=read%3D%3D0")
            .with_header("Range", factura_http::RangeSpec::new(0, 500))
            .with_header("If-None-Match", factura_http::Etag::initial());
        transport.execute(&request)
    })
    .await
    .unwrap();

    assert_eq!(response.status(), Status::PartialContent);
    let range = response.content_range().unwrap().unwrap();
    assert_eq!(range.total(), 3075);
}

#[tokio::test(flavor = "multi_thread")]
async fn conflict_statuses_come_back_as_responses() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/invoices/7/"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let response = run_blocking(move || {
        let transport = HttpTransport::new(config, Credentials::bearer("t")).unwrap();
        transport.execute(&Request::new(Method::Delete, "invoices/7/"))
    })
    .await
    .unwrap();

    assert_eq!(response.status(), Status::Conflict);
}

#[tokio::test(flavor = "multi_thread")]
async fn undeclared_statuses_surface_the_body_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sellers/me/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"description": "backend on fire"})),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let error = run_blocking(move || {
        let transport = HttpTransport::new(config, Credentials::bearer("t")).unwrap();
        transport.execute(&Request::new(Method::Get, "sellers/me/"))
    })
    .await
    .unwrap_err();

    match error {
        HttpError::Api {
            status,
            description,
        } => {
            assert_eq!(status, 500);
            assert_eq!(description, "backend on fire");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failures_become_network_errors() {
    // Point at a server that no longer exists.
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let error = run_blocking(move || {
        let transport = HttpTransport::new(config, Credentials::bearer("t")).unwrap();
        transport.execute(&Request::new(Method::Get, "sellers/me/"))
    })
    .await
    .unwrap_err();

    assert!(matches!(error, HttpError::Network(_)));
}
