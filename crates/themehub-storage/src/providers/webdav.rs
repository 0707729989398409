//! WebDAV resource store.
//!
//! Speaks the subset of RFC 4918 the library needs: PROPFIND for listing
//! and metadata, MKCOL for folder creation and MOVE for renames.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use tracing::debug;

use themehub_core::error::{AppError, ErrorKind};
use themehub_core::paths;
use themehub_core::result::AppResult;
use themehub_core::traits::store::{ResourceEntry, ResourceStore};

/// Characters percent-encoded in URL path segments.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:resourcetype/>
    <D:getcontentlength/>
    <D:getlastmodified/>
  </D:prop>
</D:propfind>"#;

/// WebDAV resource store backed by a remote server.
#[derive(Debug, Clone)]
pub struct WebdavResourceStore {
    client: Client,
    /// Server base URL without a trailing slash.
    base_url: String,
    username: String,
    password: String,
}

impl WebdavResourceStore {
    /// Create a new WebDAV store for the given server and credentials.
    pub fn new(base_url: &str, username: &str, password: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to build WebDAV client", e)
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Build the full URL for a library path, encoding each segment.
    fn url_for(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| utf8_percent_encode(s, PATH_SEGMENT).to_string())
            .collect();
        if encoded.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{}", self.base_url, encoded.join("/"))
        }
    }

    async fn propfind(&self, path: &str, depth: &str) -> AppResult<reqwest::Response> {
        let method = Method::from_bytes(b"PROPFIND").map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid HTTP method", e)
        })?;

        let mut headers = HeaderMap::new();
        headers.insert("Depth", HeaderValue::from_str(depth).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid Depth header", e)
        })?);

        self.client
            .request(method, self.url_for(path))
            .basic_auth(&self.username, Some(&self.password))
            .headers(headers)
            .header("Content-Type", "application/xml")
            .body(PROPFIND_BODY)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("PROPFIND failed for {path}"),
                    e,
                )
            })
    }

    async fn mkcol(&self, path: &str) -> AppResult<StatusCode> {
        let method = Method::from_bytes(b"MKCOL").map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid HTTP method", e)
        })?;

        let response = self
            .client
            .request(method, self.url_for(path))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("MKCOL failed for {path}"),
                    e,
                )
            })?;

        Ok(response.status())
    }
}

#[async_trait]
impl ResourceStore for WebdavResourceStore {
    fn store_type(&self) -> &str {
        "webdav"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let response = self.propfind("/", "0").await?;
        Ok(response.status().is_success()
            || response.status() == StatusCode::MULTI_STATUS)
    }

    async fn list(&self, path: &str) -> AppResult<Vec<ResourceEntry>> {
        let response = self.propfind(path, "1").await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if status != StatusCode::MULTI_STATUS && !status.is_success() {
            return Err(AppError::external_service(format!(
                "PROPFIND for {path} returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to read PROPFIND body", e)
        })?;

        let mut entries = parse_multistatus(&body, path)?;
        entries.retain(|e| !paths::is_hidden(&e.name));
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(path, count = entries.len(), "Listed WebDAV directory");
        Ok(entries)
    }

    async fn get_info(&self, path: &str) -> AppResult<ResourceEntry> {
        let response = self.propfind(path, "0").await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Path not found: {path}")));
        }
        if status != StatusCode::MULTI_STATUS && !status.is_success() {
            return Err(AppError::external_service(format!(
                "PROPFIND for {path} returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to read PROPFIND body", e)
        })?;

        let raw = parse_multistatus_raw(&body)?;
        let item = raw
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("Path not found: {path}")))?;

        Ok(ResourceEntry {
            name: paths::base_name(path).to_string(),
            path: path.to_string(),
            is_directory: item.is_directory,
            size_bytes: item.size_bytes,
            modified_at: item.modified_at,
        })
    }

    async fn create_folder(&self, path: &str) -> AppResult<()> {
        // MKCOL requires all intermediate collections to exist, so walk
        // the path one segment at a time.
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = paths::join(&current, segment);
            let status = self.mkcol(&current).await?;
            // 405 means the collection already exists.
            if status != StatusCode::CREATED && status != StatusCode::METHOD_NOT_ALLOWED {
                return Err(AppError::external_service(format!(
                    "MKCOL for {current} returned {status}"
                )));
            }
        }
        debug!(path, "Ensured WebDAV directory");
        Ok(())
    }

    async fn move_entry(&self, from: &str, to: &str) -> AppResult<()> {
        let parent = paths::parent(to);
        if !parent.is_empty() && parent != "/" {
            self.create_folder(&parent).await?;
        }

        let method = Method::from_bytes(b"MOVE").map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid HTTP method", e)
        })?;

        let response = self
            .client
            .request(method, self.url_for(from))
            .basic_auth(&self.username, Some(&self.password))
            .header("Destination", self.url_for(to))
            .header("Overwrite", "F")
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("MOVE failed for {from}"),
                    e,
                )
            })?;

        match response.status() {
            StatusCode::CREATED | StatusCode::NO_CONTENT => {
                debug!(from, to, "Moved WebDAV entry");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(AppError::not_found(format!("Source not found: {from}"))),
            StatusCode::PRECONDITION_FAILED => {
                Err(AppError::conflict(format!("Target already exists: {to}")))
            }
            status => Err(AppError::external_service(format!(
                "MOVE {from} -> {to} returned {status}"
            ))),
        }
    }
}

/// One `D:response` element from a multistatus body.
#[derive(Debug, Default)]
struct MultistatusItem {
    href: String,
    is_directory: bool,
    size_bytes: Option<u64>,
    modified_at: Option<DateTime<Utc>>,
}

/// Parse every `D:response` element from a multistatus body, in order.
fn parse_multistatus_raw(xml: &str) -> AppResult<Vec<MultistatusItem>> {
    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    let mut current: Option<MultistatusItem> = None;
    let mut field: Option<&'static str> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.local_name().as_ref() {
                    b"response" => current = Some(MultistatusItem::default()),
                    b"href" => field = Some("href"),
                    b"getcontentlength" => field = Some("length"),
                    b"getlastmodified" => field = Some("modified"),
                    b"collection" => {
                        if let Some(item) = current.as_mut() {
                            item.is_directory = true;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| {
                    AppError::with_source(ErrorKind::ExternalService, "Invalid multistatus text", e)
                })?;
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                if let (Some(item), Some(kind)) = (current.as_mut(), field) {
                    match kind {
                        "href" => {
                            item.href = percent_decode_str(text)
                                .decode_utf8_lossy()
                                .to_string();
                        }
                        "length" => item.size_bytes = text.parse().ok(),
                        "modified" => {
                            item.modified_at = DateTime::parse_from_rfc2822(text)
                                .ok()
                                .map(|dt| dt.with_timezone(&Utc));
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"response" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                b"href" | b"getcontentlength" | b"getlastmodified" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to parse multistatus body",
                    e,
                ));
            }
            _ => {}
        }
    }

    Ok(items)
}

/// Parse a depth-1 multistatus body into entries under `request_path`.
///
/// The response includes the requested collection itself; it is identified
/// by the shortest href and excluded from the result.
fn parse_multistatus(xml: &str, request_path: &str) -> AppResult<Vec<ResourceEntry>> {
    let items = parse_multistatus_raw(xml)?;

    // The requested collection has the shortest href of all responses.
    let self_index = items
        .iter()
        .enumerate()
        .min_by_key(|(_, i)| i.href.trim_end_matches('/').len())
        .map(|(idx, _)| idx);

    let mut entries = Vec::new();
    for (idx, item) in items.into_iter().enumerate() {
        if Some(idx) == self_index {
            continue;
        }
        let name = paths::base_name(item.href.trim_end_matches('/')).to_string();
        if name.is_empty() {
            continue;
        }
        entries.push(ResourceEntry {
            path: paths::join(request_path, &name),
            name,
            is_directory: item.is_directory,
            size_bytes: if item.is_directory { None } else { item.size_bytes },
            modified_at: item.modified_at,
        });
    }

    Ok(entries)
}
