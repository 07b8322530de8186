//! Rendered HAL documents

use axum::Json;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// Media type of every rendered resource
pub const HAL_MEDIA_TYPE: &str = "application/hal+json";

/// Output of one render call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HalDocument {
    #[serde(rename = "type")]
    pub media_type: &'static str,

    pub body: Value,

    /// RFC 8288 `Link` header value, when the renderer builds one
    #[serde(skip)]
    pub link_header: Option<String>,
}

impl IntoResponse for HalDocument {
    fn into_response(self) -> Response {
        let mut response = Json(self.body).into_response();
        let headers = response.headers_mut();

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.media_type),
        );

        if let Some(link_header) = self.link_header {
            match HeaderValue::from_str(&link_header) {
                Ok(value) => {
                    headers.insert(header::LINK, value);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping Link header with invalid characters");
                }
            }
        }

        response
    }
}

/// Quote a Link header parameter value
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Build an RFC 8288 `Link` header from rendered `_links`.
///
/// Templated links are skipped since their href is not a URI reference.
/// Returns `None` when no link qualifies.
pub fn build_link_header(links: &Map<String, Value>) -> Option<String> {
    let entries: Vec<String> = links
        .iter()
        .filter(|(_, link)| link.get("templated") != Some(&Value::Bool(true)))
        .filter_map(|(rel, link)| {
            let href = link.get("href")?.as_str()?;
            let mut entry = format!("<{}>; rel={}", href, quoted(rel));

            if let Some(title) = link.get("title").and_then(Value::as_str) {
                entry.push_str(&format!("; title={}", quoted(title)));
            }
            if let Some(lang) = link.get("hreflang").and_then(Value::as_str) {
                entry.push_str(&format!("; hreflang={}", lang));
            }

            Some(entry)
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries.join(", "))
    }
}
