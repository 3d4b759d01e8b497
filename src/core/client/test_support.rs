//! Mock API server plumbing shared by the client tests.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use tower_test::mock::{self, Handle};

pub type ApiServerHandle = Handle<Request<Body>, Response<Body>>;

/// A client whose requests land on the returned handle.
pub fn mock_client() -> (Client, ApiServerHandle) {
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    (Client::new(service, "default"), handle)
}

pub fn ok_json(value: Value) -> Response<Body> {
    json_response(200, value)
}

pub fn created_json(value: Value) -> Response<Body> {
    json_response(201, value)
}

/// A `Status` failure body, as the API server sends for 4xx answers.
pub fn status_json(code: u16, reason: &str, message: &str) -> Response<Body> {
    json_response(
        code,
        json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": message,
            "reason": reason,
            "code": code
        }),
    )
}

fn json_response(code: u16, value: Value) -> Response<Body> {
    Response::builder()
        .status(code)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string().into_bytes()))
        .unwrap()
}

/// Read a request body as JSON.
pub async fn body_json(req: Request<Body>) -> Value {
    let bytes = req.into_body().collect_bytes().await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
