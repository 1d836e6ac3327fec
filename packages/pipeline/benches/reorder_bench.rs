use criterion::{black_box, criterion_group, criterion_main, Criterion};
use funnelcraft_pipeline::{DragEnd, DragLocation, Lane, LaneDetails, PipelineBoard, Ticket};

fn board(lanes: usize, tickets_per_lane: usize) -> PipelineBoard {
    let lanes = (0..lanes)
        .map(|l| {
            let lane_id = format!("lane-{}", l);
            (0..tickets_per_lane).fold(
                LaneDetails::new(Lane::new(lane_id.clone(), "Lane", "bench", l as u32)),
                |lane, t| lane.with_ticket(Ticket::new(format!("{}-{}", lane_id, t), "Ticket", "")),
            )
        })
        .collect();
    PipelineBoard::new("bench", lanes)
}

fn reorder_lanes(c: &mut Criterion) {
    let board = board(20, 50);

    c.bench_function("reorder_lanes", |b| {
        b.iter(|| {
            let mut board = board.clone();
            board.apply_drag(black_box(&DragEnd::lane(0, 19)))
        })
    });
}

fn reorder_ticket_across_lanes(c: &mut Criterion) {
    let board = board(20, 50);
    let drop = DragEnd::ticket(DragLocation::new("lane-0", 0), DragLocation::new("lane-19", 25));

    c.bench_function("reorder_ticket_across_lanes", |b| {
        b.iter(|| {
            let mut board = board.clone();
            board.apply_drag(black_box(&drop))
        })
    });
}

criterion_group!(benches, reorder_lanes, reorder_ticket_across_lanes);
criterion_main!(benches);
