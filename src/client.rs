use anyhow::Result;

use crate::classify::classify_response;
use crate::config::LoginConfig;
use crate::envelope::{LOGIN_SOAP_ACTION, SOAP_CONTENT_TYPE, build_login_envelope};
use crate::transport::{HttpTransport, SoapRequest, Transport, TransportError};
use crate::types::{Credentials, LoginOutcome};

/// Logs users in against the ICUTech SOAP service.
///
/// Holds no per-user state, so one client can serve concurrent logins.
pub struct LoginClient<T = HttpTransport> {
    transport: T,
}

impl LoginClient<HttpTransport> {
    pub fn new() -> Result<Self> {
        Self::with_config(LoginConfig::default())
    }

    pub fn with_config(config: LoginConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }
}

impl<T: Transport> LoginClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Attempt a login. Transport and format problems come back as
    /// `LoginOutcome::Failure`; this never returns an error.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let credentials = Credentials::new(username, password);

        let outcome = match self.call(&credentials).await {
            Ok(body) => classify_response(&body),
            Err(e) => {
                tracing::warn!("Login request failed: {}", e);
                LoginOutcome::failure(e.to_string())
            }
        };

        tracing::info!("Login finished: {}", outcome.kind());
        outcome
    }

    async fn call(&self, credentials: &Credentials) -> Result<String, TransportError> {
        let request = SoapRequest {
            body: build_login_envelope(credentials),
            content_type: SOAP_CONTENT_TYPE,
            soap_action: LOGIN_SOAP_ACTION,
        };

        let response = self.transport.send(request).await?;

        // Non-2xx replies are failures whatever the body says
        if !response.is_success() {
            return Err(TransportError::Status(response.status));
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use std::sync::Mutex;

    /// Replies with a fixed status/body and remembers the last request
    struct FixedTransport {
        status: u16,
        body: String,
        last_request: Mutex<Option<SoapRequest>>,
    }

    impl FixedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                last_request: Mutex::new(None),
            }
        }
    }

    impl Transport for FixedTransport {
        async fn send(&self, request: SoapRequest) -> Result<TransportResponse, TransportError> {
            *self.last_request.lock().unwrap() = Some(request);
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    struct TimedOutTransport;

    impl Transport for TimedOutTransport {
        async fn send(&self, _request: SoapRequest) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Timeout(std::time::Duration::from_secs(30)))
        }
    }

    #[tokio::test]
    async fn test_sends_login_envelope() {
        let client = LoginClient::with_transport(FixedTransport::new(200, r#"{"EntityId":1}"#));
        let outcome = client.login("alice", "a<b").await;
        assert!(outcome.is_success());

        let request = client.transport().last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.soap_action, "urn:ICUTech.Intf-IICUTech#Login");
        assert_eq!(request.content_type, "text/xml; charset=utf-8");
        assert!(request.body.contains("<UserName>alice</UserName>"));
        assert!(request.body.contains("<Password>a&lt;b</Password>"));
    }

    #[tokio::test]
    async fn test_classifies_body() {
        let client = LoginClient::with_transport(FixedTransport::new(
            200,
            r#"<return>{"ResultCode":-1,"ResultMessage":"Bad password"}</return>"#,
        ));
        assert_eq!(
            client.login("alice", "wrong").await,
            LoginOutcome::failure("Bad password")
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let client = LoginClient::with_transport(FixedTransport::new(
            500,
            r#"{"ResultCode":0,"EntityId":1}"#,
        ));
        assert_eq!(
            client.login("alice", "pw").await,
            LoginOutcome::failure("HTTP Error: 500")
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_failure() {
        let client = LoginClient::with_transport(TimedOutTransport);
        assert_eq!(
            client.login("alice", "pw").await,
            LoginOutcome::failure("Request timed out after 30s")
        );
    }
}
