//! Link href construction
//!
//! Relative, non-templated hrefs are resolved against the API base, their
//! `:name` path placeholders are filled from the resource fields and their
//! query string is rebuilt from the link's `query` property merged with any
//! query already present in the href.

use crate::core::error::{HalError, HalResult};
use crate::core::field::field_to_string;
use crate::core::link::{HalLink, LinkQuery};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use url::Url;
use url::form_urlencoded;

/// A `:name` placeholder spanning the start of a path segment
fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"(^|/):([A-Za-z_][A-Za-z0-9_]*)").unwrap())
}

/// Replace every `:name` path segment in `path` with the matching field.
///
/// Colons inside a segment (e.g. `/rels/nter:fizz`) are left alone. A
/// placeholder whose field is absent, null or renders as an empty string
/// fails with [`HalError::MissingRequiredProperty`].
pub fn substitute_path(path: &str, fields: &Map<String, Value>) -> HalResult<String> {
    let mut substituted = String::with_capacity(path.len());
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(path) {
        let (Some(whole), Some(prefix), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        let value = fields
            .get(name.as_str())
            .filter(|value| !value.is_null())
            .map(field_to_string)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| HalError::MissingRequiredProperty {
                property: name.as_str().to_string(),
                path: path.to_string(),
            })?;

        substituted.push_str(&path[last..whole.start()]);
        substituted.push_str(prefix.as_str());
        substituted.push_str(&value);
        last = whole.end();
    }

    substituted.push_str(&path[last..]);
    Ok(substituted)
}

/// Merge the href's own query into the link's `query` property.
///
/// Keys set on the `query` property win; href-only keys are appended in the
/// order they appear in the href.
pub fn merge_link_query(link: &HalLink) -> LinkQuery {
    let mut merged = link.query().clone();

    if let Some((_, query_string)) = link.href().split_once('?') {
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            if !merged.contains_key(key.as_ref()) {
                merged.insert(key.into_owned(), Value::String(value.into_owned()));
            }
        }
    }

    merged
}

/// Serialize a query map as `application/x-www-form-urlencoded`.
///
/// Scalars become `key=value`; objects become one `key[subkey]=value` pair
/// per entry and arrays one `key[index]=value` pair per element.
pub fn encode_query(query: &LinkQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in query {
        match value {
            Value::Object(entries) => {
                for (sub_key, sub_value) in entries {
                    serializer.append_pair(
                        &format!("{}[{}]", key, sub_key),
                        &field_to_string(sub_value),
                    );
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    serializer.append_pair(&format!("{}[{}]", key, index), &field_to_string(item));
                }
            }
            scalar => {
                serializer.append_pair(key, &field_to_string(scalar));
            }
        }
    }

    serializer.finish()
}

/// The rendered query string of a link (without the leading `?`)
pub fn build_link_query(link: &HalLink) -> String {
    encode_query(&merge_link_query(link))
}

/// Build the final href of a link.
///
/// - absolute links are returned untouched
/// - relative templated links are only prefixed with `api_base`
/// - relative links are prefixed, have their path placeholders filled from
///   `fields` and their query rebuilt with [`build_link_query`]
pub fn build_link_href(
    api_base: &str,
    link: &HalLink,
    fields: &Map<String, Value>,
) -> HalResult<String> {
    if !link.is_relative() {
        return Ok(link.href().to_string());
    }

    let absolute = format!("{}{}", api_base, link.href());
    if link.is_templated() {
        return Ok(absolute);
    }

    let mut url = Url::parse(&absolute).map_err(|e| HalError::InvalidLinkHref {
        href: absolute.clone(),
        message: e.to_string(),
    })?;

    let path = substitute_path(url.path(), fields)?;
    url.set_path(&path);

    let query = build_link_query(link);
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&query));
    }

    Ok(url.to_string())
}
