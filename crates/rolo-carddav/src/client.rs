//! CardDAV HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};
use url::Url;

use rolo_core::{Contact, RemoteDirectory, RemoteError};

use crate::multistatus::member_hrefs;
use crate::vcard::{parse_vcard, render_vcard};

/// Connection settings for a CardDAV server.
#[derive(Debug, Clone)]
pub struct DavConfig {
    /// Address-book collection URL.
    pub server_url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Per-request timeout. A hung server must not stall a sync cycle.
    pub timeout: Duration,
}

/// CardDAV client implementing [`RemoteDirectory`].
pub struct DavClient {
    config: DavConfig,
    base: Url,
    client: reqwest::Client,
}

impl DavClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: DavConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Http(e.to_string()))?;
        Self::with_client(config, client)
    }

    /// Create a client reusing a shared HTTP client (tests).
    pub fn with_client(config: DavConfig, client: reqwest::Client) -> Result<Self, RemoteError> {
        let base = parse_base_url(&config.server_url)?;
        Ok(Self {
            config,
            base,
            client,
        })
    }

    fn propfind(&self, depth: &str) -> Result<reqwest::RequestBuilder, RemoteError> {
        let method = Method::from_bytes(b"PROPFIND")
            .map_err(|e| RemoteError::Http(format!("bad method: {e}")))?;
        Ok(self
            .client
            .request(method, self.base.clone())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Depth", depth)
            .header("Content-Type", "application/xml; charset=utf-8"))
    }

    async fn fetch_member(&self, href: &str) -> Result<Option<Contact>, RemoteError> {
        let member_url = self
            .base
            .join(href)
            .map_err(|e| RemoteError::InvalidUrl(format!("{href}: {e}")))?;

        debug!(url = %member_url, "fetching vCard");
        let response = self
            .client
            .get(member_url.clone())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        // One bad member must not abort the snapshot.
        if !response.status().is_success() {
            warn!(url = %member_url, status = response.status().as_u16(), "skipping member");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        let contact = parse_vcard(&body);
        if contact.is_none() {
            debug!(url = %member_url, "dropping malformed vCard");
        }
        Ok(contact)
    }
}

/// Parse and normalize the collection URL; PUTs and member GETs are joined
/// against it, so it must end with a slash.
fn parse_base_url(raw: &str) -> Result<Url, RemoteError> {
    let mut normalized = raw.trim().to_string();
    if normalized.is_empty() {
        return Err(RemoteError::InvalidUrl("server URL is not set".to_string()));
    }
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| RemoteError::InvalidUrl(format!("{raw}: {e}")))
}

#[async_trait]
impl RemoteDirectory for DavClient {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, RemoteError> {
        debug!(url = %self.base, "listing address-book collection");
        let response = self
            .propfind("1")?
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url: self.base.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;
        let hrefs = member_hrefs(&body)?;
        debug!(members = hrefs.len(), "collection listed");

        let mut contacts = Vec::new();
        for href in &hrefs {
            if let Some(contact) = self.fetch_member(href).await? {
                contacts.push(contact);
            }
        }

        debug!(count = contacts.len(), "fetched remote snapshot");
        Ok(contacts)
    }

    async fn test_connection(&self) -> Result<(), RemoteError> {
        let response = self
            .propfind("0")?
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::MULTI_STATUS {
            Ok(())
        } else {
            Err(RemoteError::Status {
                status: status.as_u16(),
                url: self.base.to_string(),
            })
        }
    }

    async fn create_contact(&self, contact: &Contact) -> Result<(), RemoteError> {
        let member_url = self
            .base
            .join(&format!("{}.vcf", contact.uid))
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {e}", contact.uid)))?;

        debug!(uid = %contact.uid, url = %member_url, "uploading contact");
        let response = self
            .client
            .put(member_url.clone())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Content-Type", "text/vcard; charset=utf-8")
            .body(render_vcard(contact))
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemoteError::Status {
                status: status.as_u16(),
                url: member_url.to_string(),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> DavConfig {
        DavConfig {
            server_url: format!("{}/dav/contacts/", server.uri()),
            username: "ada".to_string(),
            password: "secret".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn multistatus_body(hrefs: &[&str]) -> String {
        let responses: String = hrefs
            .iter()
            .map(|h| format!("<d:response><d:href>{h}</d:href></d:response>"))
            .collect();
        format!(
            r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:">{responses}</d:multistatus>"#
        )
    }

    fn vcard(uid: &str, name: &str) -> String {
        format!("BEGIN:VCARD\r\nVERSION:3.0\r\nUID:{uid}\r\nFN:{name}\r\nEND:VCARD\r\n")
    }

    #[tokio::test]
    async fn fetch_walks_members_and_parses_vcards() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .and(path("/dav/contacts/"))
            .and(header("Depth", "1"))
            .respond_with(ResponseTemplate::new(207).set_body_string(multistatus_body(&[
                "/dav/contacts/",
                "/dav/contacts/u-1.vcf",
                "/dav/contacts/u-2.vcf",
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dav/contacts/u-1.vcf"))
            .respond_with(ResponseTemplate::new(200).set_body_string(vcard("u-1", "Ada")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dav/contacts/u-2.vcf"))
            .respond_with(ResponseTemplate::new(200).set_body_string(vcard("u-2", "Grace")))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let contacts = client.fetch_contacts().await.unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].uid, "u-1");
        assert_eq!(contacts[1].full_name, "Grace");
    }

    #[tokio::test]
    async fn malformed_member_is_dropped_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .respond_with(ResponseTemplate::new(207).set_body_string(multistatus_body(&[
                "/dav/contacts/bad.vcf",
                "/dav/contacts/good.vcf",
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dav/contacts/bad.vcf"))
            .respond_with(
                // vCard without a UID — silently filtered
                ResponseTemplate::new(200)
                    .set_body_string("BEGIN:VCARD\r\nFN:No Uid\r\nEND:VCARD\r\n"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dav/contacts/good.vcf"))
            .respond_with(ResponseTemplate::new(200).set_body_string(vcard("u-9", "Kept")))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let contacts = client.fetch_contacts().await.unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].uid, "u-9");
    }

    #[tokio::test]
    async fn failing_member_get_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .respond_with(ResponseTemplate::new(207).set_body_string(multistatus_body(&[
                "/dav/contacts/gone.vcf",
                "/dav/contacts/here.vcf",
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dav/contacts/gone.vcf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dav/contacts/here.vcf"))
            .respond_with(ResponseTemplate::new(200).set_body_string(vcard("u-2", "Here")))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let contacts = client.fetch_contacts().await.unwrap();
        assert_eq!(contacts.len(), 1);
    }

    #[tokio::test]
    async fn propfind_failure_aborts_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let err = client.fetch_contacts().await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn garbage_multistatus_aborts_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .respond_with(ResponseTemplate::new(207).set_body_string("<not-xml"))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let err = client.fetch_contacts().await.unwrap_err();
        assert!(matches!(err, RemoteError::Multistatus(_)));
    }

    #[tokio::test]
    async fn test_connection_requires_multi_status() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .and(header("Depth", "0"))
            .respond_with(ResponseTemplate::new(207).set_body_string(multistatus_body(&[])))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        client.test_connection().await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_rejects_plain_ok() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let err = client.test_connection().await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 200, .. }));
    }

    #[tokio::test]
    async fn create_puts_narrow_vcard_at_uid_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/dav/contacts/u-7.vcf"))
            .and(header("Content-Type", "text/vcard; charset=utf-8"))
            .and(body_string_contains("UID:u-7"))
            .and(body_string_contains("FN:Grace Hopper"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mut grace = Contact::new("u-7", "Grace Hopper");
        grace.email = "grace@example.com".to_string();
        grace.organization = "US Navy".to_string();

        let client = DavClient::new(config(&server)).unwrap();
        client.create_contact(&grace).await.unwrap();
    }

    #[tokio::test]
    async fn create_surfaces_server_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(507))
            .mount(&server)
            .await;

        let client = DavClient::new(config(&server)).unwrap();
        let err = client
            .create_contact(&Contact::new("u-1", "Ada"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 507, .. }));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("https://dav.example.com/contacts").unwrap();
        assert_eq!(url.as_str(), "https://dav.example.com/contacts/");
    }

    #[test]
    fn empty_or_invalid_url_is_rejected() {
        assert!(matches!(
            parse_base_url(""),
            Err(RemoteError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(RemoteError::InvalidUrl(_))
        ));
    }
}
