//! Starter elements for the component palette
//!
//! Each palette entry is identified by its drag type string (`text`, `2Col`,
//! ...) and builds a fresh element with newly generated ids.

use crate::element::{EditorElement, ElementContent, Styles};
use crate::errors::EditorError;
use funnelcraft_common::IdGenerator;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_VIDEO_SRC: &str = "https://www.youtube.com/embed/A3l6YYkXzzg?si=zbcCeWcpq7Cwf8W1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTemplate {
    Text,
    Container,
    TwoColumns,
    Link,
    Video,
    ContactForm,
    PaymentForm,
}

/// Style set shared by text, link and container templates
pub fn default_styles() -> Styles {
    [
        ("backgroundPosition", "center"),
        ("objectFit", "cover"),
        ("backgroundRepeat", "no-repeat"),
        ("textAlign", "left"),
        ("opacity", "100%"),
    ]
    .into_iter()
    .map(|(property, value)| (property.to_string(), value.into()))
    .collect()
}

impl ElementTemplate {
    pub const ALL: [ElementTemplate; 7] = [
        ElementTemplate::Text,
        ElementTemplate::Container,
        ElementTemplate::TwoColumns,
        ElementTemplate::Link,
        ElementTemplate::Video,
        ElementTemplate::ContactForm,
        ElementTemplate::PaymentForm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementTemplate::Text => "text",
            ElementTemplate::Container => "container",
            ElementTemplate::TwoColumns => "2Col",
            ElementTemplate::Link => "link",
            ElementTemplate::Video => "video",
            ElementTemplate::ContactForm => "contactForm",
            ElementTemplate::PaymentForm => "paymentForm",
        }
    }

    /// Build a new element from this template
    pub fn build(&self, ids: &mut IdGenerator) -> EditorElement {
        match self {
            ElementTemplate::Text => EditorElement::new(
                ids.new_id(),
                "Text",
                ElementContent::Text {
                    inner_text: "Text Element".to_string(),
                },
            )
            .with_styles(default_styles()),

            ElementTemplate::Container => {
                EditorElement::new(ids.new_id(), "Container", ElementContent::Container(vec![]))
                    .with_styles(default_styles())
            }

            ElementTemplate::TwoColumns => {
                let column = |ids: &mut IdGenerator| {
                    EditorElement::new(ids.new_id(), "Container", ElementContent::Container(vec![]))
                        .with_styles(default_styles())
                        .with_style("width", "100%")
                };
                let columns = vec![column(ids), column(ids)];

                EditorElement::new(ids.new_id(), "Two Columns", ElementContent::TwoColumns(columns))
                    .with_styles(default_styles())
                    .with_style("display", "flex")
            }

            ElementTemplate::Link => EditorElement::new(
                ids.new_id(),
                "Link",
                ElementContent::Link {
                    href: "#".to_string(),
                    inner_text: "Link Element".to_string(),
                },
            )
            .with_styles(default_styles()),

            ElementTemplate::Video => EditorElement::new(
                ids.new_id(),
                "Video",
                ElementContent::Video {
                    src: DEFAULT_VIDEO_SRC.to_string(),
                },
            ),

            ElementTemplate::ContactForm => {
                EditorElement::new(ids.new_id(), "Contact Form", ElementContent::ContactForm)
            }

            ElementTemplate::PaymentForm => {
                EditorElement::new(ids.new_id(), "Payment Form", ElementContent::PaymentForm)
            }
        }
    }
}

impl fmt::Display for ElementTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementTemplate {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementTemplate::ALL
            .into_iter()
            .find(|template| template.as_str() == s)
            .ok_or_else(|| EditorError::UnknownTemplate(s.to_string()))
    }
}
