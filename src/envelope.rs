use crate::types::Credentials;
use crate::xml::escape_xml;

/// Namespace of the remote `IICUTech` service.
pub const SERVICE_NAMESPACE: &str = "urn:ICUTech.Intf-IICUTech";

/// Value of the `SOAPAction` header for the `Login` operation.
pub const LOGIN_SOAP_ACTION: &str = "urn:ICUTech.Intf-IICUTech#Login";

/// Content type sent with every envelope.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Build the SOAP 1.1 `Login` request body for `credentials`.
///
/// Both fields are XML-escaped; `<IPs>` is always sent empty.
pub fn build_login_envelope(credentials: &Credentials) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xmlns:xsd="http://www.w3.org/2001/XMLSchema"
               xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
    <soap:Body>
        <Login xmlns="{namespace}">
            <UserName>{username}</UserName>
            <Password>{password}</Password>
            <IPs></IPs>
        </Login>
    </soap:Body>
</soap:Envelope>"#,
        namespace = SERVICE_NAMESPACE,
        username = escape_xml(credentials.username()),
        password = escape_xml(credentials.password()),
    )
}
