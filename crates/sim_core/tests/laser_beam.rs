use glam::IVec2;
use sim_core::laser::LaserOverlay;
use world_core::fixture::SnapshotBuilder;
use world_core::rooms::{LASER_LEFT_TILE, LASER_RIGHT_TILE};
use world_core::{LaserSpan, RoomManager};

/// Turret pair on row 12: left at block 4, right at block 10, so the beam
/// spans blocks 5..=9.
fn laser_world() -> (LaserOverlay, RoomManager) {
    let mut b = SnapshotBuilder::new();
    b.solid_tile(LASER_LEFT_TILE, 0x07);
    b.solid_tile(LASER_RIGHT_TILE, 0x07);
    b.room_stream(0, &[12, 4, LASER_LEFT_TILE, 12, 10, LASER_RIGHT_TILE]);
    let snap = b.build();
    let overlay = LaserOverlay::decode(&snap).expect("laser frames");
    let mut world = RoomManager::decode(&snap).expect("decode");
    world.move_to_index(0);
    (overlay, world)
}

#[test]
fn beam_width_is_a_triangle_with_a_rest_phase() {
    let span = LaserSpan {
        start: IVec2::new(5, 12),
        max_width: 5,
    };
    // sample one full cycle at the 100 ms phase resolution
    let mut widths = Vec::new();
    for step in 0..30u64 {
        widths.push(LaserOverlay::beam_width(&span, step * 100));
    }
    let peak = *widths.iter().max().expect("samples");
    assert_eq!(peak, span.max_width);
    let resting = widths.iter().filter(|w| **w == 0).count();
    assert!(resting >= 10, "a third of the cycle rests, got {resting}");
    // a phase offset only rotates the cycle
    let shifted = LaserOverlay::beam_width(&span, 0);
    assert_eq!(shifted, LaserOverlay::beam_width(&span, 3000));
}

#[test]
fn active_cells_become_hazards_and_clear_again() {
    let (overlay, mut world) = laser_world();
    let span = world.current_room().lasers[0];

    // find an instant at full width and one at rest
    let full = (0..3000u64)
        .step_by(100)
        .find(|t| LaserOverlay::beam_width(&span, *t) == span.max_width)
        .expect("beam peaks during the cycle");
    let rest = (0..3000u64)
        .step_by(100)
        .find(|t| LaserOverlay::beam_width(&span, *t) == 0)
        .expect("beam rests during the cycle");

    overlay.apply(full, &mut world);
    let room = world.current_room();
    for x in 0..span.max_width {
        assert!(
            room.base.collision_at((span.start.x + x) * 8 + 1, span.start.y * 8 + 1),
            "cell {x} is a hazard at full width"
        );
    }

    overlay.apply(rest, &mut world);
    let room = world.current_room();
    for x in 0..span.max_width {
        assert!(
            !room.base.collision_at((span.start.x + x) * 8 + 1, span.start.y * 8 + 1),
            "cell {x} cleared at rest"
        );
    }
}

#[test]
fn turret_pairs_fire_out_of_phase() {
    let a = LaserSpan {
        start: IVec2::new(5, 12),
        max_width: 5,
    };
    let b = LaserSpan {
        start: IVec2::new(20, 7),
        max_width: 5,
    };
    let differs = (0..3000u64)
        .step_by(100)
        .any(|t| LaserOverlay::beam_width(&a, t) != LaserOverlay::beam_width(&b, t));
    assert!(differs);
}
