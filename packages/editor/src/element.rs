//! # Element Tree Model
//!
//! A page is a tree of [`EditorElement`]s rooted at a single body node.
//!
//! The element type and its content are one value ([`ElementContent`]):
//! container-like variants own an ordered list of children, leaf variants
//! own their payload. A node can therefore never carry children and a leaf
//! payload at the same time, and children are owned values so the tree is
//! acyclic by construction.
//!
//! ## Wire format
//!
//! ```text
//! { "id": "…", "name": "…", "styles": { … }, "type": "container", "content": [ … ] }
//! { "id": "…", "name": "…", "styles": { … }, "type": "link", "content": { "href": "#", "innerText": "…" } }
//! ```

use crate::errors::TreeError;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ID of the body root created for every new page
pub const BODY_ID: &str = "__body";

/// Presentation attributes. Opaque to the editor, passed through unchanged.
pub type Styles = BTreeMap<String, serde_json::Value>;

/// Stable element identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Closed set of element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "__body")]
    Body,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "2Col")]
    TwoColumns,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "contactForm")]
    ContactForm,
    #[serde(rename = "paymentForm")]
    PaymentForm,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Body => "__body",
            ElementType::Container => "container",
            ElementType::TwoColumns => "2Col",
            ElementType::Text => "text",
            ElementType::Link => "link",
            ElementType::Video => "video",
            ElementType::ContactForm => "contactForm",
            ElementType::PaymentForm => "paymentForm",
        }
    }

    /// Container-like types hold an ordered list of children
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementType::Body | ElementType::Container | ElementType::TwoColumns
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element content, tagged by element type
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    Body(Vec<EditorElement>),
    Container(Vec<EditorElement>),
    TwoColumns(Vec<EditorElement>),
    Text { inner_text: String },
    Link { href: String, inner_text: String },
    Video { src: String },
    ContactForm,
    PaymentForm,
}

impl ElementContent {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementContent::Body(_) => ElementType::Body,
            ElementContent::Container(_) => ElementType::Container,
            ElementContent::TwoColumns(_) => ElementType::TwoColumns,
            ElementContent::Text { .. } => ElementType::Text,
            ElementContent::Link { .. } => ElementType::Link,
            ElementContent::Video { .. } => ElementType::Video,
            ElementContent::ContactForm => ElementType::ContactForm,
            ElementContent::PaymentForm => ElementType::PaymentForm,
        }
    }

    pub fn children(&self) -> Option<&[EditorElement]> {
        match self {
            ElementContent::Body(children)
            | ElementContent::Container(children)
            | ElementContent::TwoColumns(children) => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<EditorElement>> {
        match self {
            ElementContent::Body(children)
            | ElementContent::Container(children)
            | ElementContent::TwoColumns(children) => Some(children),
            _ => None,
        }
    }
}

/// A node of the page tree
#[derive(Debug, Clone, PartialEq)]
pub struct EditorElement {
    pub id: ElementId,
    pub name: String,
    pub styles: Styles,
    pub content: ElementContent,
}

impl EditorElement {
    pub fn new(id: impl Into<ElementId>, name: impl Into<String>, content: ElementContent) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            styles: Styles::new(),
            content,
        }
    }

    /// The empty body root of a new page
    pub fn body() -> Self {
        Self::new(BODY_ID, "Body", ElementContent::Body(Vec::new()))
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.content.element_type()
    }

    pub fn is_container(&self) -> bool {
        self.element_type().is_container()
    }

    pub fn is_body(&self) -> bool {
        self.element_type() == ElementType::Body
    }

    pub fn children(&self) -> Option<&[EditorElement]> {
        self.content.children()
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<EditorElement>> {
        self.content.children_mut()
    }

    /// Find this node or a descendant by ID
    pub fn find(&self, id: &ElementId) -> Option<&EditorElement> {
        if &self.id == id {
            return Some(self);
        }
        find_in(self.children()?, id)
    }

    pub fn find_mut(&mut self, id: &ElementId) -> Option<&mut EditorElement> {
        if &self.id == id {
            return Some(self);
        }
        find_in_mut(self.children_mut()?, id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.find(id).is_some()
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(EditorElement::node_count).sum())
            .unwrap_or(0)
    }

    /// IDs in this subtree, pre-order
    pub fn ids(&self) -> Vec<&ElementId> {
        let mut ids = Vec::new();
        collect_ids(self, &mut ids);
        ids
    }
}

fn collect_ids<'a>(element: &'a EditorElement, ids: &mut Vec<&'a ElementId>) {
    ids.push(&element.id);
    if let Some(children) = element.children() {
        for child in children {
            collect_ids(child, ids);
        }
    }
}

/// Find an element anywhere in a list of trees
pub fn find_in<'a>(elements: &'a [EditorElement], id: &ElementId) -> Option<&'a EditorElement> {
    elements.iter().find_map(|element| element.find(id))
}

pub fn find_in_mut<'a>(
    elements: &'a mut [EditorElement],
    id: &ElementId,
) -> Option<&'a mut EditorElement> {
    elements.iter_mut().find_map(|element| element.find_mut(id))
}

// ============================================================================
// Serialization
// ============================================================================

/// Leaf payload as stored: every key optional, absent keys omitted
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeafPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inner_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeafPayloadRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inner_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<&'a str>,
}

impl Serialize for EditorElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EditorElement", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("styles", &self.styles)?;
        state.serialize_field("type", &self.element_type())?;

        match &self.content {
            ElementContent::Body(children)
            | ElementContent::Container(children)
            | ElementContent::TwoColumns(children) => {
                state.serialize_field("content", children)?;
            }
            ElementContent::Text { inner_text } => {
                let payload = LeafPayloadRef {
                    href: None,
                    inner_text: Some(inner_text),
                    src: None,
                };
                state.serialize_field("content", &payload)?;
            }
            ElementContent::Link { href, inner_text } => {
                let payload = LeafPayloadRef {
                    href: Some(href),
                    inner_text: Some(inner_text),
                    src: None,
                };
                state.serialize_field("content", &payload)?;
            }
            ElementContent::Video { src } => {
                let payload = LeafPayloadRef {
                    href: None,
                    inner_text: None,
                    src: Some(src),
                };
                state.serialize_field("content", &payload)?;
            }
            ElementContent::ContactForm | ElementContent::PaymentForm => {
                let payload = LeafPayloadRef {
                    href: None,
                    inner_text: None,
                    src: None,
                };
                state.serialize_field("content", &payload)?;
            }
        }

        state.end()
    }
}

#[derive(Deserialize)]
struct RawElement {
    id: ElementId,
    #[serde(default)]
    name: String,
    #[serde(default, alias = "style")]
    styles: Styles,
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(default)]
    content: serde_json::Value,
}

impl TryFrom<RawElement> for EditorElement {
    type Error = TreeError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let invalid = |reason: String| TreeError::InvalidContent {
            id: raw.id.clone(),
            element_type: raw.element_type,
            reason,
        };

        let content = if raw.element_type.is_container() {
            let children: Vec<EditorElement> = match raw.content {
                serde_json::Value::Null => Vec::new(),
                serde_json::Value::Array(_) => serde_json::from_value(raw.content.clone())
                    .map_err(|e| invalid(e.to_string()))?,
                _ => return Err(invalid("expected an array of children".to_string())),
            };

            match raw.element_type {
                ElementType::Body => ElementContent::Body(children),
                ElementType::TwoColumns => ElementContent::TwoColumns(children),
                _ => ElementContent::Container(children),
            }
        } else {
            let payload = match &raw.content {
                serde_json::Value::Null => LeafPayload::default(),
                // Forms were stored with an empty child list
                serde_json::Value::Array(items)
                    if items.is_empty()
                        && matches!(
                            raw.element_type,
                            ElementType::ContactForm | ElementType::PaymentForm
                        ) =>
                {
                    LeafPayload::default()
                }
                serde_json::Value::Object(_) => serde_json::from_value(raw.content.clone())
                    .map_err(|e| invalid(e.to_string()))?,
                _ => return Err(invalid("expected a content object".to_string())),
            };

            match raw.element_type {
                ElementType::Text => ElementContent::Text {
                    inner_text: payload.inner_text.unwrap_or_default(),
                },
                ElementType::Link => ElementContent::Link {
                    href: payload.href.unwrap_or_default(),
                    inner_text: payload.inner_text.unwrap_or_default(),
                },
                ElementType::Video => ElementContent::Video {
                    src: payload.src.unwrap_or_default(),
                },
                ElementType::ContactForm => ElementContent::ContactForm,
                _ => ElementContent::PaymentForm,
            }
        };

        Ok(EditorElement {
            id: raw.id,
            name: raw.name,
            styles: raw.styles,
            content,
        })
    }
}

impl<'de> Deserialize<'de> for EditorElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawElement::deserialize(deserializer)?;
        EditorElement::try_from(raw).map_err(de::Error::custom)
    }
}
