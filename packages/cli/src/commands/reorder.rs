use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use funnelcraft_common::{read_json_file, write_json_file};
use funnelcraft_pipeline::{
    DragEnd, DragLocation, EntityKind, PipelineBoard, ReorderOutcome, LANES_DROPPABLE_ID,
};
use funnelcraft_workspace::{FileStore, OrderStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DragKind {
    Lane,
    Ticket,
}

impl From<DragKind> for EntityKind {
    fn from(kind: DragKind) -> Self {
        match kind {
            DragKind::Lane => EntityKind::Lane,
            DragKind::Ticket => EntityKind::Ticket,
        }
    }
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Pipeline board JSON file
    pub board: PathBuf,

    /// What is being dragged
    #[arg(short, long, value_enum, default_value = "ticket")]
    pub kind: DragKind,

    /// Source as <droppable>:<index>, or a bare index for lanes
    #[arg(long)]
    pub from: String,

    /// Destination as <droppable>:<index>, or a bare index for lanes
    #[arg(long)]
    pub to: String,

    /// Write the reordered board to this file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Persist the order batch to the data directory
    #[arg(long)]
    pub save: bool,
}

pub async fn reorder(args: ReorderArgs, cwd: &Path, config: &Config) -> Result<()> {
    let board_path = cwd.join(&args.board);
    let mut board: PipelineBoard = read_json_file(&board_path)
        .with_context(|| format!("reading {}", board_path.display()))?;

    let drop = DragEnd {
        kind: args.kind.into(),
        source: parse_location(&args.from)?,
        destination: Some(parse_location(&args.to)?),
    };

    let ReorderOutcome::Reordered(batch) = board.apply_drag(&drop) else {
        println!("{} Nothing moved", "⚠️".yellow());
        return Ok(());
    };

    println!(
        "{} {} {:?} renumbered",
        "🔀 Reordered".bright_blue().bold(),
        batch.len(),
        batch.entity_kind()
    );
    println!("{}", serde_json::to_string_pretty(&batch)?);

    if let Some(out) = &args.out {
        write_json_file(&cwd.join(out), &board)?;
        println!("  {} Wrote {}", "✓".green(), out.display());
    }

    if args.save {
        let store = FileStore::new(config.get_data_dir(cwd));
        store
            .save_ordered_batch(batch)
            .await
            .context("saving order batch")?;
        println!("  {} Saved order to {}", "✓".green(), store.root().display());
    }

    Ok(())
}

/// Parse `<droppable>:<index>`; a bare index targets the lane strip
pub fn parse_location(input: &str) -> Result<DragLocation> {
    let (container_id, index) = match input.rsplit_once(':') {
        Some((container_id, index)) => (container_id, index),
        None => (LANES_DROPPABLE_ID, input),
    };

    if container_id.is_empty() {
        return Err(anyhow!("missing droppable id in '{}'", input));
    }

    let index = index
        .trim()
        .parse()
        .with_context(|| format!("invalid index in '{}'", input))?;

    Ok(DragLocation::new(container_id, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnelcraft_pipeline::{Lane, LaneDetails, Ticket};
    use tempfile::TempDir;

    #[test]
    fn test_parse_location() {
        assert_eq!(parse_location("lead:2").unwrap(), DragLocation::new("lead", 2));
        assert_eq!(parse_location("3").unwrap(), DragLocation::new("lanes", 3));
        assert!(parse_location(":1").is_err());
        assert!(parse_location("lead:x").is_err());
    }

    #[tokio::test]
    async fn test_reorder_writes_board() {
        let dir = TempDir::new().unwrap();
        let board = PipelineBoard::new(
            "sales",
            vec![
                LaneDetails::new(Lane::new("A", "Lead", "sales", 0))
                    .with_ticket(Ticket::new("t1", "Acme", "A"))
                    .with_ticket(Ticket::new("t2", "Globex", "A")),
                LaneDetails::new(Lane::new("B", "Won", "sales", 1)),
            ],
        );
        write_json_file(&dir.path().join("board.json"), &board).unwrap();

        reorder(
            ReorderArgs {
                board: "board.json".into(),
                kind: DragKind::Ticket,
                from: "A:1".to_string(),
                to: "B:0".to_string(),
                out: Some("moved.json".into()),
                save: false,
            },
            dir.path(),
            &Config::default(),
        )
        .await
        .unwrap();

        let moved: PipelineBoard = read_json_file(&dir.path().join("moved.json")).unwrap();
        assert_eq!(moved.ticket("t2").unwrap().lane_id, "B");
        assert_eq!(moved.lane("A").unwrap().tickets.len(), 1);
    }
}
