//! Browser bindings. Every exported function takes and returns JSON strings
//! so the UI can keep its own wire types.

use funnelcraft_common::IdGenerator;
use funnelcraft_editor::{tree, EditorAction, EditorError, EditorState, ElementTemplate};
use funnelcraft_pipeline::{DragEnd, OrderedBatch, PipelineBoard};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One open page editor
#[wasm_bindgen]
pub struct EditorHandle {
    state: EditorState,
    ids: IdGenerator,
}

#[wasm_bindgen]
impl EditorHandle {
    /// `history_limit` caps undo levels; 0 keeps everything
    #[wasm_bindgen(constructor)]
    pub fn new(history_limit: usize) -> EditorHandle {
        Self::with_ids(history_limit, IdGenerator::random())
    }

    /// Apply one `{ "type": ..., "payload": ... }` action
    pub fn dispatch(&mut self, action_json: &str) -> Result<(), JsValue> {
        self.try_dispatch(action_json).map_err(js_error)
    }

    /// Build an element from a sidebar template and add it to a container.
    /// Returns the new element's id.
    #[wasm_bindgen(js_name = addTemplate)]
    pub fn add_template(&mut self, container_id: &str, template: &str) -> Result<String, JsValue> {
        self.try_add_template(container_id, template).map_err(js_error)
    }

    #[wasm_bindgen(js_name = loadElements)]
    pub fn load_elements(&mut self, elements_json: &str, live: bool) -> Result<(), JsValue> {
        self.try_load_elements(elements_json, live).map_err(js_error)
    }

    /// Full `{ editor, history }` state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(js_error)
    }

    /// Displayed element tree as JSON
    pub fn elements(&self) -> Result<String, JsValue> {
        tree::to_json(&self.state.editor().elements).map_err(js_error)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }
}

impl EditorHandle {
    fn with_ids(history_limit: usize, ids: IdGenerator) -> Self {
        Self {
            state: EditorState::with_history_limit(history_limit),
            ids,
        }
    }

    fn try_dispatch(&mut self, action_json: &str) -> Result<(), EditorError> {
        let action: EditorAction = serde_json::from_str(action_json)?;
        self.state.dispatch(action);
        Ok(())
    }

    fn try_add_template(&mut self, container_id: &str, template: &str) -> Result<String, EditorError> {
        let element = template.parse::<ElementTemplate>()?.build(&mut self.ids);
        let id = element.id.to_string();
        self.state.dispatch(EditorAction::AddElement {
            container_id: container_id.into(),
            element,
        });
        Ok(id)
    }

    fn try_load_elements(&mut self, elements_json: &str, live: bool) -> Result<(), EditorError> {
        let elements = tree::from_json(elements_json)?;
        self.state.dispatch(EditorAction::LoadData {
            elements: Some(elements),
            with_live: live,
        });
        Ok(())
    }
}

#[derive(Serialize)]
struct ReorderResult {
    board: PipelineBoard,
    batch: Option<OrderedBatch>,
}

/// Apply a drag result to a board.
/// Returns `{ board, batch }`; `batch` is null when nothing moved.
#[wasm_bindgen(js_name = reorderBoard)]
pub fn reorder_board(board_json: &str, drag_json: &str) -> Result<String, JsValue> {
    try_reorder_board(board_json, drag_json).map_err(js_error)
}

fn try_reorder_board(board_json: &str, drag_json: &str) -> Result<String, serde_json::Error> {
    let board: PipelineBoard = serde_json::from_str(board_json)?;
    let drop: DragEnd = serde_json::from_str(drag_json)?;

    let (board, outcome) = funnelcraft_pipeline::reorder(board, &drop);
    serde_json::to_string(&ReorderResult {
        board,
        batch: outcome.into_batch(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn handle() -> EditorHandle {
        EditorHandle::with_ids(0, IdGenerator::sequential("el"))
    }

    #[test]
    fn test_add_template_then_undo() {
        let mut editor = handle();

        let id = editor.try_add_template("__body", "text").unwrap();
        assert_eq!(id, "el-1");
        assert!(editor.state.can_undo());

        editor.try_dispatch(r#"{ "type": "UNDO" }"#).unwrap();
        assert!(!editor.state.can_undo());
        assert!(editor.state.can_redo());
    }

    #[test]
    fn test_unknown_template() {
        let mut editor = handle();
        assert!(matches!(
            editor.try_add_template("__body", "carousel"),
            Err(EditorError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_bad_action_json() {
        let mut editor = handle();
        assert!(editor.try_dispatch(r#"{ "type": "EXPLODE" }"#).is_err());
        assert_eq!(editor.state.history().len(), 1);
    }

    #[test]
    fn test_load_elements_resets_history() {
        let mut editor = handle();
        editor.try_add_template("__body", "container").unwrap();

        let page = json!([{ "id": "__body", "name": "Body", "styles": {}, "type": "__body", "content": [] }]);
        editor.try_load_elements(&page.to_string(), true).unwrap();

        assert!(editor.state.editor().live_mode);
        assert_eq!(editor.state.history().len(), 1);
    }

    #[test]
    fn test_reorder_board() {
        let board = json!({
            "pipelineId": "sales",
            "lanes": [
                { "id": "A", "name": "Lead", "pipelineId": "sales", "order": 0, "tickets": [] },
                { "id": "B", "name": "Won", "pipelineId": "sales", "order": 1, "tickets": [] }
            ]
        });
        let drag = json!({
            "type": "lane",
            "source": { "droppableId": "lanes", "index": 0 },
            "destination": { "droppableId": "lanes", "index": 1 }
        });

        let result: Value =
            serde_json::from_str(&try_reorder_board(&board.to_string(), &drag.to_string()).unwrap())
                .unwrap();

        assert_eq!(result["board"]["lanes"][0]["id"], json!("B"));
        assert_eq!(result["batch"]["entity"], json!("lanes"));
        assert_eq!(result["batch"]["items"][1]["id"], json!("A"));
    }

    #[test]
    fn test_noop_drag_has_no_batch() {
        let board = json!({ "pipelineId": "sales", "lanes": [] });
        let drag = json!({ "type": "lane", "source": { "droppableId": "lanes", "index": 0 } });

        let result: Value =
            serde_json::from_str(&try_reorder_board(&board.to_string(), &drag.to_string()).unwrap())
                .unwrap();
        assert_eq!(result["batch"], Value::Null);
    }
}
