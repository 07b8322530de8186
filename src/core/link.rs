//! HAL links
//!
//! A [`HalLink`] is one entry of a resource's `_links` object. It is built
//! once from a relation name and a [`LinkValue`] (a bare href or an object of
//! link properties) and then only adjusted through the `with_*` builders or
//! [`HalLink::set_relative`].

use crate::core::error::{HalError, HalResult};
use crate::core::field::parse_flag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Query parameters attached to a link, in insertion order
pub type LinkQuery = IndexMap<String, Value>;

/// The object form of a link value
///
/// Only the recognized HAL properties are read; unknown keys (including an
/// attempt to set `rel`) are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSpec {
    /// Link target (required when building a link)
    pub href: Option<String>,

    pub name: Option<String>,

    /// Language of the target resource
    #[serde(rename = "hrefLang", alias = "hreflang")]
    pub href_lang: Option<String>,

    pub title: Option<String>,

    /// Templated flag, parsed with [`parse_flag`]
    pub templated: Option<Value>,

    pub icon: Option<String>,

    /// HTTP method used to follow the link
    pub method: Option<String>,

    /// Query parameters merged into the rendered href
    pub query: Option<LinkQuery>,
}

impl LinkSpec {
    /// Create link properties with only an href set
    pub fn href(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }
}

/// Value used to construct a link: a bare href or a property object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkValue {
    Href(String),
    Spec(LinkSpec),
}

impl From<&str> for LinkValue {
    fn from(href: &str) -> Self {
        LinkValue::Href(href.to_string())
    }
}

impl From<String> for LinkValue {
    fn from(href: String) -> Self {
        LinkValue::Href(href)
    }
}

impl From<LinkSpec> for LinkValue {
    fn from(spec: LinkSpec) -> Self {
        LinkValue::Spec(spec)
    }
}

/// A single HAL link relation
#[derive(Debug, Clone, PartialEq)]
pub struct HalLink {
    rel: String,
    href: String,
    name: Option<String>,
    href_lang: Option<String>,
    title: Option<String>,
    templated: bool,
    icon: Option<String>,
    method: Option<String>,
    query: LinkQuery,
    relative: bool,
}

/// An href is absolute when it carries an `http`/`https` scheme
fn is_relative_href(href: &str) -> bool {
    !href.starts_with("http")
}

impl HalLink {
    /// Create a new link
    ///
    /// Fails with [`HalError::MissingHrefOrRel`] when `rel` is empty or when
    /// an object value has no `href`. The relative flag is derived from the
    /// href and can be overridden afterwards with [`HalLink::set_relative`].
    pub fn new(rel: impl Into<String>, value: impl Into<LinkValue>) -> HalResult<Self> {
        let rel = rel.into();
        if rel.is_empty() {
            return Err(HalError::MissingHrefOrRel { field: "rel" });
        }

        let spec = match value.into() {
            LinkValue::Href(href) => LinkSpec::href(href),
            LinkValue::Spec(spec) => spec,
        };

        let href = spec.href.ok_or(HalError::MissingHrefOrRel { field: "href" })?;

        Ok(Self {
            rel,
            relative: is_relative_href(&href),
            href,
            name: spec.name,
            href_lang: spec.href_lang,
            title: spec.title,
            templated: spec.templated.as_ref().is_some_and(parse_flag),
            icon: spec.icon,
            method: spec.method,
            query: spec.query.unwrap_or_default(),
        })
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn href_lang(&self) -> Option<&str> {
        self.href_lang.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_templated(&self) -> bool {
        self.templated
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn query(&self) -> &LinkQuery {
        &self.query
    }

    /// Whether the href is resolved against the API base when rendering
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Override the relative flag derived from the href with any value
    /// accepted by [`parse_flag`]
    pub fn set_relative(&mut self, relative: impl Into<Value>) {
        self.relative = parse_flag(&relative.into());
    }

    pub fn with_relative(mut self, relative: impl Into<Value>) -> Self {
        self.set_relative(relative);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_href_lang(mut self, href_lang: impl Into<String>) -> Self {
        self.href_lang = Some(href_lang.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the templated flag from any value accepted by [`parse_flag`]
    pub fn with_templated(mut self, templated: impl Into<Value>) -> Self {
        self.templated = parse_flag(&templated.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_query(mut self, query: LinkQuery) -> Self {
        self.query = query;
        self
    }

    /// Returns every field of the link as a JSON object
    ///
    /// Useful for diagnostics and equality checks; the renderer emits a
    /// reduced form.
    pub fn to_object(&self) -> Value {
        json!({
            "rel": self.rel,
            "href": self.href,
            "name": self.name,
            "hreflang": self.href_lang,
            "title": self.title,
            "templated": self.templated,
            "icon": self.icon,
            "query": self.query,
            "method": self.method,
            "relative": self.relative,
        })
    }
}
