pub mod classify;
pub mod client;
pub mod config;
pub mod envelope;
pub mod extract;
pub mod format;
pub mod transport;
pub mod types;
pub mod web;
pub mod xml;

pub use classify::classify_response;
pub use client::LoginClient;
pub use config::LoginConfig;
pub use envelope::build_login_envelope;
pub use extract::extract_json_payload;
pub use format::format_user_data;
pub use transport::{HttpTransport, SoapRequest, Transport, TransportError, TransportResponse};
pub use types::{Credentials, LoginOutcome, ParsedJsonObject};
pub use xml::escape_xml;
