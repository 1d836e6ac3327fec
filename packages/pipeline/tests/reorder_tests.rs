//! Board-level reorder scenarios

use funnelcraft_pipeline::{
    is_contiguous, reorder, DragEnd, DragLocation, Lane, LaneDetails, OrderedBatch, PipelineBoard,
    ReorderOutcome, Ticket,
};
use serde_json::json;

fn two_lane_board() -> PipelineBoard {
    serde_json::from_value(json!({
        "pipelineId": "sales",
        "lanes": [
            { "id": "B", "name": "Qualified", "pipelineId": "sales", "order": 1, "tickets": [] },
            { "id": "A", "name": "Lead", "pipelineId": "sales", "order": 0, "tickets": [
                { "id": "t2", "name": "Globex", "laneId": "A", "order": 1 },
                { "id": "t1", "name": "Acme", "laneId": "A", "order": 0, "value": 1200.0 }
            ] }
        ]
    }))
    .unwrap()
}

#[test]
fn test_move_ticket_into_empty_lane() {
    let board = two_lane_board();
    assert_eq!(board.lanes[0].id(), "A");

    let drop = DragEnd::ticket(DragLocation::new("A", 0), DragLocation::new("B", 0));
    let (board, outcome) = reorder(board, &drop);

    let a = board.lane("A").unwrap();
    let b = board.lane("B").unwrap();
    assert_eq!(a.tickets.len(), 1);
    assert_eq!((a.tickets[0].id.as_str(), a.tickets[0].order), ("t2", 0));
    assert_eq!(b.tickets.len(), 1);
    assert_eq!((b.tickets[0].id.as_str(), b.tickets[0].order), ("t1", 0));
    assert_eq!(b.tickets[0].lane_id, "B");
    assert_eq!(b.tickets[0].value, Some(1200.0));

    let Some(OrderedBatch::Tickets(batch)) = outcome.into_batch() else {
        panic!("expected tickets");
    };
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].lane_id, "B");
    assert_eq!(batch[1].lane_id, "A");
}

#[test]
fn test_lane_reorder_renumbers_all_lanes() {
    let lanes = (0..5)
        .map(|i| LaneDetails::new(Lane::new(format!("lane-{}", i), "Lane", "sales", i)))
        .collect();
    let mut board = PipelineBoard::new("sales", lanes);

    let outcome = board.apply_drag(&DragEnd::lane(4, 1));

    let Some(OrderedBatch::Lanes(lanes)) = outcome.batch() else {
        panic!("expected lanes");
    };
    let ids: Vec<_> = lanes.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["lane-0", "lane-4", "lane-1", "lane-2", "lane-3"]);
    assert!(is_contiguous(lanes));
}

#[test]
fn test_dropped_outside_board() {
    let drop: DragEnd = serde_json::from_value(json!({
        "type": "lane",
        "source": { "droppableId": "lanes", "index": 0 },
        "destination": null
    }))
    .unwrap();

    let (board, outcome) = reorder(two_lane_board(), &drop);
    assert_eq!(outcome, ReorderOutcome::Unchanged);
    assert_eq!(board, two_lane_board());
}

#[test]
fn test_ticket_count_preserved() {
    let mut board = two_lane_board();
    board.lanes[1] = board.lanes[1]
        .clone()
        .with_ticket(Ticket::new("t3", "Initech", "B"));

    let before = board.ticket_count();
    board.apply_drag(&DragEnd::ticket(DragLocation::new("B", 0), DragLocation::new("A", 1)));

    assert_eq!(board.ticket_count(), before);
    assert_eq!(board.ticket("t3").unwrap().lane_id, "A");
    assert_eq!(board.ticket("t3").unwrap().order, 1);
    assert!(board.lane("B").unwrap().tickets.is_empty());
}
