#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{Router, http::HeaderMap, http::StatusCode, routing::post};
use soap_login_rs::{SoapRequest, Transport, TransportError, TransportResponse};

pub const SOAP_PATH: &str = "/icu-tech/icutech-test.dll/soap/IICUTech";

/// Wrap `json` the way the ICUTech service does
pub fn soap_response(json: &str) -> String {
    format!(
        r#"<?xml version="1.0"?><SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"><SOAP-ENV:Body><NS1:LoginResponse xmlns:NS1="urn:ICUTech.Intf-IICUTech"><return xsi:type="xsd:string">{}</return></NS1:LoginResponse></SOAP-ENV:Body></SOAP-ENV:Envelope>"#,
        json
    )
}

/// In-process transport that answers by the `<UserName>` in the envelope
pub struct ScriptedTransport;

impl Transport for ScriptedTransport {
    async fn send(&self, request: SoapRequest) -> Result<TransportResponse, TransportError> {
        let (status, body) = respond(&request.body);
        Ok(TransportResponse { status, body })
    }
}

fn user_name(envelope: &str) -> &str {
    envelope
        .split_once("<UserName>")
        .and_then(|(_, rest)| rest.split_once("</UserName>"))
        .map(|(name, _)| name)
        .unwrap_or("")
}

/// Canned replies shared by the in-process transport and the fake endpoint
fn respond(envelope: &str) -> (u16, String) {
    match user_name(envelope) {
        "alice" => (
            200,
            soap_response(r#"{"ResultCode":0,"EntityId":"U123","FirstName":"Alice","Email":"alice@example.com"}"#),
        ),
        "bob" => (
            200,
            soap_response(r#"{"ResultCode":-1,"ResultMessage":"User not found"}"#),
        ),
        "carol" => (200, soap_response(r#"{"EntityId":"U999"}"#)),
        "plain" => (200, "plain text { not json } reply".to_string()),
        "broken" => (500, "<html>Internal Server Error</html>".to_string()),
        "tom&amp;jerry" => (200, soap_response(r#"{"ResultCode":1,"EntityId":"TJ"}"#)),
        _ => (200, "<SOAP-ENV:Envelope/>".to_string()),
    }
}

/// Fake ICUTech SOAP endpoint. Rejects requests without the `Login` action
/// header or an XML content type; sleeps for user `slow`.
pub fn fake_soap_service() -> Router {
    Router::new().route(SOAP_PATH, post(soap_handler))
}

async fn soap_handler(headers: HeaderMap, body: String) -> (StatusCode, String) {
    let action = headers
        .get("soapaction")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if action != "urn:ICUTech.Intf-IICUTech#Login" || !content_type.starts_with("text/xml") {
        return (StatusCode::BAD_REQUEST, "unexpected request".to_string());
    }

    if user_name(&body) == "slow" {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    let (status, reply) = respond(&body);
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        reply,
    )
}

/// Serve `app` on an ephemeral local port
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });
    addr
}
