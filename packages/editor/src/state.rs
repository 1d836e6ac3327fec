//! # Action Dispatcher
//!
//! Editor session state and the transition function over [`EditorAction`]s.
//!
//! ```text
//! action ──► route by tag ──► handler ──► (editor', history')
//!                                 │
//!                                 └── tree mutation (pure)
//! ```
//!
//! Snapshot-recording actions truncate the redo branch and append the new
//! editor. UNDO/REDO only move the history cursor. LOAD_DATA resets history
//! to a single snapshot.

use crate::actions::{ActionTag, EditorAction};
use crate::element::{EditorElement, ElementId};
use crate::history::History;
use crate::mutations::TreeMutation;
use crate::tree::{self, default_elements};
use serde::{Deserialize, Serialize};

/// Preview viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Flat editor state: one history snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    pub elements: Vec<EditorElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_element: Option<EditorElement>,
    pub device: Device,
    pub preview_mode: bool,
    pub live_mode: bool,
    #[serde(rename = "funnelPageId")]
    pub page_id: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            elements: default_elements(),
            selected_element: None,
            device: Device::Desktop,
            preview_mode: false,
            live_mode: false,
            page_id: String::new(),
        }
    }
}

impl Editor {
    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected_element.as_ref().map(|element| &element.id)
    }
}

/// The displayed editor plus its history
///
/// Both are read-only from outside; every change goes through [`EditorState::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorState {
    editor: Editor,
    history: History<Editor>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_history_limit(0)
    }

    /// Cap the number of undo levels retained (0 = unlimited)
    pub fn with_history_limit(max_levels: usize) -> Self {
        let editor = Editor::default();
        Self {
            history: History::with_max_levels(editor.clone(), max_levels),
            editor,
        }
    }

    /// Apply an action in place
    pub fn dispatch(&mut self, action: EditorAction) {
        let tag = action.tag();
        tracing::trace!(action = %tag, "dispatch");

        let next = match tag {
            ActionTag::AddElement => self.add_element(action),
            ActionTag::UpdateElement => self.update_element(action),
            ActionTag::DeleteElement => self.delete_element(action),
            ActionTag::ChangeClickedElement => self.change_clicked_element(action),
            ActionTag::ChangeDevice => self.change_device(action),
            ActionTag::TogglePreviewMode => self.toggle_preview_mode(action),
            ActionTag::ToggleLiveMode => self.toggle_live_mode(action),
            ActionTag::SetFunnelPageId => self.set_funnel_page_id(action),
            // History-owning actions
            ActionTag::LoadData => return self.load_data(action),
            ActionTag::Undo => return self.undo(action),
            ActionTag::Redo => return self.redo(action),
        };

        if tag.records_snapshot() {
            self.history.push(next.clone());
        }
        self.editor = next;
    }

    /// The displayed editor
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn history(&self) -> &History<Editor> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn add_element(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::AddElement {
            container_id,
            element,
        } = action
        else {
            wrong_action(ActionTag::AddElement, tag)
        };

        let elements = TreeMutation::AddElement {
            container_id,
            element,
        }
        .apply(&self.editor.elements);

        Editor {
            elements,
            ..self.editor.clone()
        }
    }

    fn update_element(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::UpdateElement { element } = action else {
            wrong_action(ActionTag::UpdateElement, tag)
        };

        let elements = TreeMutation::UpdateElement {
            element: element.clone(),
        }
        .apply(&self.editor.elements);

        // Selection follows the updated element, otherwise it is dropped
        let selected_element = if self.editor.selected_id() == Some(&element.id) {
            Some(element)
        } else {
            None
        };

        Editor {
            elements,
            selected_element,
            ..self.editor.clone()
        }
    }

    fn delete_element(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::DeleteElement { element } = action else {
            wrong_action(ActionTag::DeleteElement, tag)
        };

        let elements = TreeMutation::DeleteElement {
            element_id: element.id,
        }
        .apply(&self.editor.elements);

        Editor {
            elements,
            ..self.editor.clone()
        }
    }

    fn change_clicked_element(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::ChangeClickedElement { element } = action else {
            wrong_action(ActionTag::ChangeClickedElement, tag)
        };

        Editor {
            selected_element: element,
            ..self.editor.clone()
        }
    }

    fn change_device(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::ChangeDevice { device } = action else {
            wrong_action(ActionTag::ChangeDevice, tag)
        };

        Editor {
            device,
            ..self.editor.clone()
        }
    }

    fn toggle_preview_mode(&self, action: EditorAction) -> Editor {
        if action != EditorAction::TogglePreviewMode {
            wrong_action(ActionTag::TogglePreviewMode, action.tag())
        }

        Editor {
            preview_mode: !self.editor.preview_mode,
            ..self.editor.clone()
        }
    }

    fn toggle_live_mode(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::ToggleLiveMode { value } = action else {
            wrong_action(ActionTag::ToggleLiveMode, tag)
        };

        Editor {
            live_mode: value.unwrap_or(!self.editor.live_mode),
            ..self.editor.clone()
        }
    }

    fn set_funnel_page_id(&self, action: EditorAction) -> Editor {
        let tag = action.tag();
        let EditorAction::SetFunnelPageId { page_id } = action else {
            wrong_action(ActionTag::SetFunnelPageId, tag)
        };

        Editor {
            page_id,
            ..self.editor.clone()
        }
    }

    fn load_data(&mut self, action: EditorAction) {
        let tag = action.tag();
        let EditorAction::LoadData {
            elements,
            with_live,
        } = action
        else {
            wrong_action(ActionTag::LoadData, tag)
        };

        let elements = match elements {
            Some(elements) => match tree::validate(&elements) {
                Ok(()) => elements,
                Err(e) => {
                    tracing::debug!(error = %e, "loaded tree rejected, using default page");
                    default_elements()
                }
            },
            None => default_elements(),
        };

        let editor = Editor {
            elements,
            live_mode: with_live,
            page_id: std::mem::take(&mut self.editor.page_id),
            ..Editor::default()
        };

        self.history.reset(editor.clone());
        self.editor = editor;
    }

    fn undo(&mut self, action: EditorAction) {
        if action != EditorAction::Undo {
            wrong_action(ActionTag::Undo, action.tag())
        }

        match self.history.undo() {
            Some(editor) => self.editor = editor.clone(),
            None => tracing::debug!("nothing to undo"),
        }
    }

    fn redo(&mut self, action: EditorAction) {
        if action != EditorAction::Redo {
            wrong_action(ActionTag::Redo, action.tag())
        }

        match self.history.redo() {
            Some(editor) => self.editor = editor.clone(),
            None => tracing::debug!("nothing to redo"),
        }
    }
}

/// Pure transition: consume a state and an action, return the next state
pub fn reduce(mut state: EditorState, action: EditorAction) -> EditorState {
    state.dispatch(action);
    state
}

/// A handler was routed an action it does not own; the router is broken
#[cold]
fn wrong_action(expected: ActionTag, actual: ActionTag) -> ! {
    panic!("action router bug: {} handler received {}", expected, actual)
}
