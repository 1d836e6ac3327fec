//! # Editor Actions
//!
//! The closed set of messages the dispatcher accepts.
//!
//! ## Wire format
//!
//! ```text
//! { "type": "ADD_ELEMENT", "payload": { "containerId": "…", "elementDetails": { … } } }
//! { "type": "UNDO" }
//! ```
//!
//! Payloads are camelCase. Actions without a payload omit the key; optional
//! payloads may be omitted or partial.

use crate::element::{EditorElement, ElementId};
use crate::state::Device;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A state transition request
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    AddElement {
        container_id: ElementId,
        element: EditorElement,
    },
    UpdateElement {
        element: EditorElement,
    },
    /// Only the element's id is significant
    DeleteElement {
        element: EditorElement,
    },
    /// `None` clears the selection
    ChangeClickedElement {
        element: Option<EditorElement>,
    },
    ChangeDevice {
        device: Device,
    },
    TogglePreviewMode,
    /// `None` flips the current value
    ToggleLiveMode {
        value: Option<bool>,
    },
    SetFunnelPageId {
        page_id: String,
    },
    /// `None` elements load the default page
    LoadData {
        elements: Option<Vec<EditorElement>>,
        with_live: bool,
    },
    Undo,
    Redo,
}

/// Fieldless discriminant of [`EditorAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionTag {
    AddElement,
    UpdateElement,
    DeleteElement,
    ChangeClickedElement,
    ChangeDevice,
    TogglePreviewMode,
    ToggleLiveMode,
    SetFunnelPageId,
    LoadData,
    Undo,
    Redo,
}

impl ActionTag {
    pub const ALL: [ActionTag; 11] = [
        ActionTag::AddElement,
        ActionTag::UpdateElement,
        ActionTag::DeleteElement,
        ActionTag::ChangeClickedElement,
        ActionTag::ChangeDevice,
        ActionTag::TogglePreviewMode,
        ActionTag::ToggleLiveMode,
        ActionTag::SetFunnelPageId,
        ActionTag::LoadData,
        ActionTag::Undo,
        ActionTag::Redo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::AddElement => "ADD_ELEMENT",
            ActionTag::UpdateElement => "UPDATE_ELEMENT",
            ActionTag::DeleteElement => "DELETE_ELEMENT",
            ActionTag::ChangeClickedElement => "CHANGE_CLICKED_ELEMENT",
            ActionTag::ChangeDevice => "CHANGE_DEVICE",
            ActionTag::TogglePreviewMode => "TOGGLE_PREVIEW_MODE",
            ActionTag::ToggleLiveMode => "TOGGLE_LIVE_MODE",
            ActionTag::SetFunnelPageId => "SET_FUNNEL_PAGE_ID",
            ActionTag::LoadData => "LOAD_DATA",
            ActionTag::Undo => "UNDO",
            ActionTag::Redo => "REDO",
        }
    }

    /// Whether dispatching appends a history snapshot
    pub fn records_snapshot(&self) -> bool {
        matches!(
            self,
            ActionTag::AddElement
                | ActionTag::UpdateElement
                | ActionTag::DeleteElement
                | ActionTag::ChangeClickedElement
                | ActionTag::SetFunnelPageId
        )
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EditorAction {
    pub fn tag(&self) -> ActionTag {
        match self {
            EditorAction::AddElement { .. } => ActionTag::AddElement,
            EditorAction::UpdateElement { .. } => ActionTag::UpdateElement,
            EditorAction::DeleteElement { .. } => ActionTag::DeleteElement,
            EditorAction::ChangeClickedElement { .. } => ActionTag::ChangeClickedElement,
            EditorAction::ChangeDevice { .. } => ActionTag::ChangeDevice,
            EditorAction::TogglePreviewMode => ActionTag::TogglePreviewMode,
            EditorAction::ToggleLiveMode { .. } => ActionTag::ToggleLiveMode,
            EditorAction::SetFunnelPageId { .. } => ActionTag::SetFunnelPageId,
            EditorAction::LoadData { .. } => ActionTag::LoadData,
            EditorAction::Undo => ActionTag::Undo,
            EditorAction::Redo => ActionTag::Redo,
        }
    }

    fn to_raw(&self) -> Result<RawAction, serde_json::Error> {
        let payload = match self {
            EditorAction::AddElement {
                container_id,
                element,
            } => serde_json::to_value(AddElementPayload {
                container_id: container_id.clone(),
                element_details: element.clone(),
            })?,
            EditorAction::UpdateElement { element } | EditorAction::DeleteElement { element } => {
                serde_json::to_value(ElementPayload {
                    element_details: element.clone(),
                })?
            }
            EditorAction::ChangeClickedElement { element } => {
                serde_json::to_value(SelectionPayload {
                    element_details: element.clone(),
                })?
            }
            EditorAction::ChangeDevice { device } => {
                serde_json::to_value(DevicePayload { device: *device })?
            }
            EditorAction::ToggleLiveMode { value: Some(value) } => {
                serde_json::to_value(LiveModePayload {
                    value: Some(*value),
                })?
            }
            EditorAction::SetFunnelPageId { page_id } => serde_json::to_value(PageIdPayload {
                funnel_page_id: page_id.clone(),
            })?,
            EditorAction::LoadData {
                elements,
                with_live,
            } => serde_json::to_value(LoadDataPayload {
                elements: elements.clone(),
                with_live: *with_live,
            })?,
            EditorAction::ToggleLiveMode { value: None }
            | EditorAction::TogglePreviewMode
            | EditorAction::Undo
            | EditorAction::Redo => serde_json::Value::Null,
        };

        Ok(RawAction {
            tag: self.tag(),
            payload,
        })
    }

    fn from_raw(raw: RawAction) -> Result<Self, serde_json::Error> {
        let RawAction { tag, payload } = raw;

        let action = match tag {
            ActionTag::AddElement => {
                let p: AddElementPayload = decode_payload(payload)?;
                EditorAction::AddElement {
                    container_id: p.container_id,
                    element: p.element_details,
                }
            }
            ActionTag::UpdateElement => {
                let p: ElementPayload = decode_payload(payload)?;
                EditorAction::UpdateElement {
                    element: p.element_details,
                }
            }
            ActionTag::DeleteElement => {
                let p: ElementPayload = decode_payload(payload)?;
                EditorAction::DeleteElement {
                    element: p.element_details,
                }
            }
            ActionTag::ChangeClickedElement => {
                let p: SelectionPayload = decode_payload(payload)?;
                EditorAction::ChangeClickedElement {
                    element: p.element_details,
                }
            }
            ActionTag::ChangeDevice => {
                let p: DevicePayload = decode_payload(payload)?;
                EditorAction::ChangeDevice { device: p.device }
            }
            ActionTag::TogglePreviewMode => EditorAction::TogglePreviewMode,
            ActionTag::ToggleLiveMode => {
                let p: LiveModePayload = decode_payload(payload)?;
                EditorAction::ToggleLiveMode { value: p.value }
            }
            ActionTag::SetFunnelPageId => {
                let p: PageIdPayload = decode_payload(payload)?;
                EditorAction::SetFunnelPageId {
                    page_id: p.funnel_page_id,
                }
            }
            ActionTag::LoadData => {
                let p: LoadDataPayload = decode_payload(payload)?;
                EditorAction::LoadData {
                    elements: p.elements,
                    with_live: p.with_live,
                }
            }
            ActionTag::Undo => EditorAction::Undo,
            ActionTag::Redo => EditorAction::Redo,
        };

        Ok(action)
    }
}

/// An absent payload decodes like an empty object
fn decode_payload<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, serde_json::Error> {
    match payload {
        serde_json::Value::Null => serde_json::from_value(serde_json::Value::Object(Default::default())),
        payload => serde_json::from_value(payload),
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[derive(Serialize, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    tag: ActionTag,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    payload: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddElementPayload {
    container_id: ElementId,
    element_details: EditorElement,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementPayload {
    element_details: EditorElement,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element_details: Option<EditorElement>,
}

#[derive(Serialize, Deserialize)]
struct DevicePayload {
    device: Device,
}

#[derive(Serialize, Deserialize)]
struct LiveModePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<bool>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageIdPayload {
    #[serde(alias = "pageId")]
    funnel_page_id: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadDataPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elements: Option<Vec<EditorElement>>,
    #[serde(default)]
    with_live: bool,
}

impl Serialize for EditorAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EditorAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAction::deserialize(deserializer)?;
        EditorAction::from_raw(raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementContent;
    use serde_json::json;

    #[test]
    fn test_tag_strings() {
        for tag in ActionTag::ALL {
            let encoded = serde_json::to_value(tag).unwrap();
            assert_eq!(encoded, json!(tag.as_str()));
        }
    }

    #[test]
    fn test_decode_add_element() {
        let action: EditorAction = serde_json::from_value(json!({
            "type": "ADD_ELEMENT",
            "payload": {
                "containerId": "container1",
                "elementDetails": {
                    "id": "t1", "name": "Text", "styles": {}, "type": "text",
                    "content": { "innerText": "Text Element" }
                }
            }
        }))
        .unwrap();

        assert_eq!(
            action,
            EditorAction::AddElement {
                container_id: "container1".into(),
                element: EditorElement::new(
                    "t1",
                    "Text",
                    ElementContent::Text {
                        inner_text: "Text Element".to_string()
                    }
                ),
            }
        );
        assert_eq!(action.tag(), ActionTag::AddElement);
    }

    #[test]
    fn test_payloadless_actions() {
        let undo: EditorAction = serde_json::from_value(json!({ "type": "UNDO" })).unwrap();
        assert_eq!(undo, EditorAction::Undo);
        assert!(!undo.tag().records_snapshot());

        assert_eq!(
            serde_json::to_value(EditorAction::TogglePreviewMode).unwrap(),
            json!({ "type": "TOGGLE_PREVIEW_MODE" })
        );
    }

    #[test]
    fn test_optional_payloads() {
        let toggle: EditorAction =
            serde_json::from_value(json!({ "type": "TOGGLE_LIVE_MODE" })).unwrap();
        assert_eq!(toggle, EditorAction::ToggleLiveMode { value: None });

        let clear: EditorAction =
            serde_json::from_value(json!({ "type": "CHANGE_CLICKED_ELEMENT", "payload": {} })).unwrap();
        assert_eq!(clear, EditorAction::ChangeClickedElement { element: None });

        let load: EditorAction = serde_json::from_value(json!({ "type": "LOAD_DATA" })).unwrap();
        assert_eq!(
            load,
            EditorAction::LoadData {
                elements: None,
                with_live: false
            }
        );
    }

    #[test]
    fn test_page_id_alias() {
        let canonical: EditorAction = serde_json::from_value(json!({
            "type": "SET_FUNNEL_PAGE_ID", "payload": { "funnelPageId": "page-1" }
        }))
        .unwrap();
        let short: EditorAction = serde_json::from_value(json!({
            "type": "SET_FUNNEL_PAGE_ID", "payload": { "pageId": "page-1" }
        }))
        .unwrap();

        assert_eq!(canonical, short);
        assert_eq!(
            serde_json::to_value(&canonical).unwrap()["payload"],
            json!({ "funnelPageId": "page-1" })
        );
    }

    #[test]
    fn test_device_payload() {
        let action: EditorAction = serde_json::from_value(json!({
            "type": "CHANGE_DEVICE", "payload": { "device": "Mobile" }
        }))
        .unwrap();

        assert_eq!(
            action,
            EditorAction::ChangeDevice {
                device: Device::Mobile
            }
        );
    }

    #[test]
    fn test_missing_required_payload() {
        let result = serde_json::from_value::<EditorAction>(json!({ "type": "DELETE_ELEMENT" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tag() {
        let result = serde_json::from_value::<EditorAction>(json!({ "type": "EXPLODE" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_tags() {
        assert!(ActionTag::AddElement.records_snapshot());
        assert!(ActionTag::SetFunnelPageId.records_snapshot());
        assert!(!ActionTag::ChangeDevice.records_snapshot());
        assert!(!ActionTag::Undo.records_snapshot());
    }
}
