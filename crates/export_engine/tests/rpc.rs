use std::time::Duration;

use export_core::{
    ElementId, ExportRequest, FormField, FormSnapshot, Msg, Phase, RpcReply, WidgetKind,
    WidgetState, WidgetViewModel,
};
use export_engine::{Driver, JsonRpcClient, RpcCall, RpcClient, RpcError, RpcSettings, ViewSink};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> JsonRpcClient {
    JsonRpcClient::new(&RpcSettings {
        endpoint: format!("{}/bin/jsonrpc", server.uri()),
        ..RpcSettings::default()
    })
    .expect("valid endpoint")
}

fn call<'a>(method: &'a str, id: Option<&'a str>, params: &'a ExportRequest) -> RpcCall<'a> {
    RpcCall {
        namespace: "ExportPlugin",
        method,
        id,
        params,
    }
}

#[tokio::test]
async fn posts_envelope_to_namespace_and_reads_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bin/jsonrpc/ExportPlugin"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "jsonrpc": "2.0",
            "method": "excel",
            "params": {"Topic": "Page1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {"redirectUrl": "/view/Page1.xlsx"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params: ExportRequest = [("Topic", "Page1")].into_iter().collect();
    let reply = client_for(&server)
        .call(call("excel", None, &params))
        .await
        .expect("call ok");

    assert_eq!(
        reply,
        RpcReply {
            redirect_url: Some("/view/Page1.xlsx".to_string())
        }
    );
}

#[tokio::test]
async fn join_call_carries_id_and_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bin/jsonrpc/ExportPlugin"))
        .and(body_json(json!({
            "jsonrpc": "2.0",
            "method": "pdf",
            "params": {"Topic": "P1,P2", "join": 1},
            "id": "export1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut params: ExportRequest = [("Topic", "P1,P2")].into_iter().collect();
    params.set_join(true);
    let reply = client_for(&server)
        .call(call("pdf", Some("export1"), &params))
        .await
        .expect("call ok");

    assert_eq!(reply.redirect_url, None);
}

#[tokio::test]
async fn null_result_is_success_without_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bin/jsonrpc/ExportPlugin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": null,
            "id": "export1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params: ExportRequest = [("Topic", "P1")].into_iter().collect();
    let reply = client_for(&server)
        .call(call("pdf", Some("export1"), &params))
        .await
        .expect("null result is a success");

    assert_eq!(reply, RpcReply { redirect_url: None });
}

struct QuietSink;

impl ViewSink for QuietSink {
    fn render(&self, _element: &ElementId, _view: &WidgetViewModel) {}
    fn navigate(&self, _element: &ElementId, _url: &str) {}
}

#[tokio::test]
async fn pdf_queue_keeps_draining_through_null_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": null,
            "id": "export1"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = WidgetState::new(WidgetKind::Pdf);
    let form = FormSnapshot::new(vec![FormField::required("Topic", "P1,P2")]);

    let phase = Driver::new(&client, "ExportPlugin", &QuietSink)
        .run(&ElementId::new("pdf"), &mut state, Msg::Triggered(form))
        .await;

    assert_eq!(phase, Phase::Done);
    assert_eq!(state.view().banner, None);
}

#[tokio::test]
async fn error_object_becomes_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "jsonrpc": "2.0",
            "error": {"code": 1, "message": "topic does not exist"},
            "id": "export1"
        })))
        .mount(&server)
        .await;

    let params: ExportRequest = [("Topic", "Nope")].into_iter().collect();
    let err = client_for(&server)
        .call(call("pdf", Some("export1"), &params))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RpcError::Remote {
            code: 1,
            message: "topic does not exist".to_string()
        }
    );
    assert_eq!(err.into_failure().content, None);
}

#[tokio::test]
async fn non_json_failure_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let params: ExportRequest = [("Topic", "P1")].into_iter().collect();
    let err = client_for(&server)
        .call(call("pdf", Some("export1"), &params))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RpcError::HttpStatus {
            status: 502,
            content: "Bad Gateway".to_string()
        }
    );
    let failure = err.into_failure();
    assert_eq!(failure.code, 502);
    assert_eq!(failure.content.as_deref(), Some("Bad Gateway"));
}

#[tokio::test]
async fn success_status_with_garbage_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let params: ExportRequest = [("Topic", "P1")].into_iter().collect();
    let err = client_for(&server)
        .call(call("excel", None, &params))
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::Malformed { .. }));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"result": {}})),
        )
        .mount(&server)
        .await;

    let client = JsonRpcClient::new(&RpcSettings {
        endpoint: format!("{}/bin/jsonrpc", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..RpcSettings::default()
    })
    .expect("valid endpoint");
    let params: ExportRequest = [("Topic", "P1")].into_iter().collect();

    let err = client.call(call("excel", None, &params)).await.unwrap_err();
    assert!(matches!(err, RpcError::Timeout(_)));
}
