use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use funnelcraft_common::{read_json_file, write_json_file};
use funnelcraft_editor::{tree, EditorAction, EditorElement, EditorState};
use funnelcraft_workspace::{FileStore, PageStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Starting page tree JSON file
    pub page: PathBuf,

    /// JSON array of editor actions
    pub actions: PathBuf,

    /// Write the final tree to this file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Save the final tree under this page id in the data directory
    #[arg(long)]
    pub save: Option<String>,
}

pub async fn replay(args: ReplayArgs, cwd: &Path, config: &Config) -> Result<()> {
    let page_path = cwd.join(&args.page);
    let elements: Vec<EditorElement> = read_json_file(&page_path)
        .with_context(|| format!("reading {}", page_path.display()))?;
    tree::validate(&elements).with_context(|| format!("validating {}", page_path.display()))?;

    let actions_path = cwd.join(&args.actions);
    let actions: Vec<EditorAction> = read_json_file(&actions_path)
        .with_context(|| format!("reading {}", actions_path.display()))?;

    println!(
        "{} {} actions",
        "▶️  Replaying".bright_blue().bold(),
        actions.len()
    );

    let state = run(elements, actions, config.history_limit);

    println!();
    println!(
        "  History: {} snapshots, at {}",
        state.history().len(),
        state.history().current_index()
    );
    println!("  Elements: {}", tree::node_count(&state.editor().elements));
    if let Some(selected) = &state.editor().selected_element {
        println!("  Selected: {} #{}", selected.name, selected.id);
    }

    if let Some(out) = &args.out {
        let out_path = cwd.join(out);
        write_json_file(&out_path, &state.editor().elements)?;
        println!("  {} Wrote {}", "✓".green(), out.display());
    }

    if let Some(page_id) = &args.save {
        let store = FileStore::new(config.get_data_dir(cwd));
        store
            .save_tree(page_id, state.editor().elements.clone())
            .await
            .with_context(|| format!("saving page {}", page_id))?;
        println!("  {} Saved page {}", "✓".green(), page_id);
    }

    Ok(())
}

/// Load `elements` into a fresh editor and dispatch every action in order
pub fn run(elements: Vec<EditorElement>, actions: Vec<EditorAction>, history_limit: usize) -> EditorState {
    let mut state = EditorState::with_history_limit(history_limit);
    state.dispatch(EditorAction::LoadData {
        elements: Some(elements),
        with_live: false,
    });

    for (index, action) in actions.into_iter().enumerate() {
        println!("  {:>3}. {}", index + 1, action.tag().to_string().dimmed());
        state.dispatch(action);
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_run_applies_actions() {
        let actions: Vec<EditorAction> = serde_json::from_value(json!([
            { "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "elementDetails":
                { "id": "c1", "name": "Container", "styles": {}, "type": "container", "content": [] } } },
            { "type": "UNDO" }
        ]))
        .unwrap();

        let state = run(vec![EditorElement::body()], actions, 0);

        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history().current_index(), 0);
        assert!(state.can_redo());
    }

    #[tokio::test]
    async fn test_replay_writes_and_saves() {
        let dir = TempDir::new().unwrap();
        write_json_file(&dir.path().join("page.json"), &vec![EditorElement::body()]).unwrap();
        write_json_file(
            &dir.path().join("actions.json"),
            &json!([{ "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "elementDetails":
                { "id": "t1", "name": "Text", "styles": {}, "type": "text", "content": { "innerText": "Hi" } } } }]),
        )
        .unwrap();

        let config = Config::default();
        replay(
            ReplayArgs {
                page: "page.json".into(),
                actions: "actions.json".into(),
                out: Some("out.json".into()),
                save: Some("home".to_string()),
            },
            dir.path(),
            &config,
        )
        .await
        .unwrap();

        let written: Vec<EditorElement> = read_json_file(&dir.path().join("out.json")).unwrap();
        assert!(written[0].contains(&"t1".into()));

        let store = FileStore::new(config.get_data_dir(dir.path()));
        assert_eq!(store.load_tree("home").await.unwrap(), Some(written));
    }
}
