use pdf_slice::*;

fn registry(width: u32, height: u32) -> LineRegistry {
    let mut registry = LineRegistry::new(ImageDimensions::new(width, height));
    registry.seed_automatic_lines(width, height);
    registry.drain_events();
    registry
}

fn ids_by_position(registry: &LineRegistry) -> Vec<LineId> {
    registry.sorted().iter().map(|line| line.id()).collect()
}

#[test]
fn test_seed_places_lines_at_chunk_multiples() {
    let registry = registry(900, 3000);
    let c = 900.0 / (297.0 / 420.0);

    assert_eq!(registry.chunk_height(), c);
    assert_eq!(registry.positions(), vec![c, 2.0 * c]);
}

#[test]
fn test_seed_never_places_line_at_or_beyond_height() {
    // Second multiple of the 900px chunk is ≈2545.45
    let taller = registry(900, 2546);
    assert_eq!(taller.len(), 2);

    let shorter = registry(900, 2545);
    assert_eq!(shorter.len(), 1);
    assert!(shorter.positions().iter().all(|&y| y < 2545.0));
}

#[test]
fn test_seed_short_image_has_no_lines() {
    let registry = registry(900, 1000);
    assert!(registry.is_empty());
    assert_eq!(registry.cut_positions(), vec![0.0, 1000.0]);
}

#[test]
fn test_seed_count_matches_floor() {
    for (width, height) in [(100u32, 1000u32), (500, 12_345), (1240, 7016)] {
        let registry = registry(width, height);
        let c = registry.chunk_height();
        let expected = (1..).take_while(|k| *k as f64 * c < height as f64).count();
        assert_eq!(registry.len(), expected, "{}x{}", width, height);
    }
}

#[test]
fn test_seed_clears_previous_lines() {
    let mut registry = registry(900, 3000);
    registry.add_line(10.0);
    registry.seed_automatic_lines(900, 6000);

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.image_height(), 6000.0);
    assert!(registry.drain_events().contains(&LineEvent::Cleared));
}

#[test]
fn test_add_line_clamps() {
    let mut registry = registry(900, 1000);
    let below = registry.add_line(-50.0);
    let above = registry.add_line(5000.0);
    let inside = registry.add_line(321.5);

    assert_eq!(registry.get(below).unwrap().y(), 0.0);
    assert_eq!(registry.get(above).unwrap().y(), 1000.0);
    assert_eq!(registry.get(inside).unwrap().y(), 321.5);
}

#[test]
fn test_add_line_allows_duplicates() {
    let mut registry = registry(900, 1000);
    let a = registry.add_line(400.0);
    let b = registry.add_line(400.0);

    assert_ne!(a, b);
    assert_eq!(registry.positions(), vec![400.0, 400.0]);
}

#[test]
fn test_cut_positions_exclude_boundary_lines() {
    let mut registry = registry(900, 1000);
    registry.add_line(0.0);
    registry.add_line(1000.0);
    registry.add_line(600.0);
    registry.add_line(200.0);

    assert_eq!(registry.cut_positions(), vec![0.0, 200.0, 600.0, 1000.0]);
}

#[test]
fn test_move_line_projects_to_vertical_axis() {
    let mut registry = registry(900, 3000);
    let id = registry.sorted()[0].id();

    assert_eq!(registry.move_line(id, 123.0, 800.0), Some(800.0));
    assert_eq!(registry.get(id).unwrap().state(), LineState::BeingDragged);
    assert_eq!(registry.move_line(id, -40.0, 99_999.0), Some(3000.0));
    assert_eq!(registry.move_line(LineId(999), 0.0, 10.0), None);
}

#[test]
fn test_release_emits_repositioned() {
    let mut registry = registry(900, 3000);
    let id = registry.sorted()[0].id();
    registry.move_line(id, 0.0, 700.0);

    assert!(registry.release_line(id));
    assert_eq!(registry.get(id).unwrap().state(), LineState::Idle);

    let events = registry.drain_events();
    assert_eq!(
        events,
        vec![
            LineEvent::Moved { id, y: 700.0 },
            LineEvent::Repositioned { id, y: 700.0 },
        ]
    );
    assert!(!registry.release_line(LineId(999)));
}

#[test]
fn test_respace_below_cascades_from_moved_line() {
    let mut registry = registry(900, 5000);
    let c = registry.chunk_height();
    let ids = ids_by_position(&registry);
    assert_eq!(ids.len(), 3);

    registry.move_line(ids[0], 0.0, c + 500.0);
    let moved = registry.respace_below(ids[0]);

    assert_eq!(moved, 2);
    let first = registry.get(ids[0]).unwrap().y();
    let second = registry.get(ids[1]).unwrap().y();
    let third = registry.get(ids[2]).unwrap().y();
    assert_eq!(first, c + 500.0);
    assert_eq!(second, first + c);
    assert_eq!(third, second + c);
}

#[test]
fn test_respace_below_clamps_to_height() {
    let mut registry = registry(900, 3000);
    let c = registry.chunk_height();
    let ids = ids_by_position(&registry);

    registry.move_line(ids[0], 0.0, c + 500.0);
    registry.respace_below(ids[0]);

    assert_eq!(registry.get(ids[1]).unwrap().y(), 3000.0);
}

#[test]
fn test_respace_leaves_lines_above_untouched() {
    let mut registry = registry(900, 6000);
    let c = registry.chunk_height();
    let ids = ids_by_position(&registry);
    let before: Vec<f64> = registry.positions();

    registry.move_line(ids[1], 0.0, before[1] - 300.0);
    registry.respace_below(ids[1]);

    assert_eq!(registry.get(ids[0]).unwrap().y(), before[0]);
    let pivot = registry.get(ids[1]).unwrap().y();
    let next = registry.get(ids[2]).unwrap().y();
    assert_eq!(next, pivot + c);
    assert_eq!(registry.get(ids[3]).unwrap().y(), next + c);
}

#[test]
fn test_respace_uses_sorted_order_after_drag_past_neighbours() {
    let mut registry = registry(900, 6000);
    let c = registry.chunk_height();
    let ids = ids_by_position(&registry);

    // Drag the top line below the second one
    registry.move_line(ids[0], 0.0, 2.0 * c + 10.0);
    registry.respace_below(ids[0]);

    // Former second line is now first and keeps its position
    assert_eq!(registry.get(ids[1]).unwrap().y(), 2.0 * c);
    let pivot = registry.get(ids[0]).unwrap().y();
    let next = registry.get(ids[2]).unwrap().y();
    assert_eq!(next, pivot + c);
    assert_eq!(registry.get(ids[3]).unwrap().y(), next + c);
}

#[test]
fn test_respace_unknown_line_is_noop() {
    let mut registry = registry(900, 5000);
    let before = registry.positions();

    assert_eq!(registry.respace_below(LineId(12345)), 0);
    assert_eq!(registry.positions(), before);
}

#[test]
fn test_respace_tolerates_equal_positions() {
    let mut registry = registry(900, 1000);
    let a = registry.add_line(300.0);
    let b = registry.add_line(300.0);

    registry.respace_below(a);
    let c = registry.chunk_height();
    assert_eq!(registry.get(a).unwrap().y(), 300.0);
    assert_eq!(registry.get(b).unwrap().y(), (300.0 + c).min(1000.0));
}

#[test]
fn test_respace_emits_respaced_not_repositioned() {
    let mut registry = registry(900, 5000);
    let ids = ids_by_position(&registry);
    registry.respace_below(ids[0]);

    let events = registry.drain_events();
    assert_eq!(events.len(), 2);
    assert!(
        events
            .iter()
            .all(|event| matches!(event, LineEvent::Respaced { .. }))
    );
}

#[test]
fn test_remove_line() {
    let mut registry = registry(900, 5000);
    let ids = ids_by_position(&registry);
    let before = registry.positions();

    assert!(registry.remove_line(ids[1]));
    assert!(!registry.remove_line(ids[1]));
    assert_eq!(registry.positions(), vec![before[0], before[2]]);
    assert!(
        registry
            .drain_events()
            .contains(&LineEvent::Removed { id: ids[1] })
    );
}

#[test]
fn test_controller_respaces_on_drag_finished() {
    let mut registry = registry(900, 5000);
    let c = registry.chunk_height();
    let ids = ids_by_position(&registry);
    let mut controller = InteractionController::new();

    controller.handle(
        &mut registry,
        InteractionEvent::DragMoved {
            line: ids[0],
            x: 55.0,
            y: c + 500.0,
        },
    );
    assert_eq!(controller.dragging(), Some(ids[0]));

    let respaced = controller.handle(&mut registry, InteractionEvent::DragFinished { line: ids[0] });

    assert_eq!(respaced, 2);
    assert_eq!(controller.dragging(), None);
    let second = registry.get(ids[1]).unwrap().y();
    assert_eq!(second, c + 500.0 + c);
    assert_eq!(registry.get(ids[2]).unwrap().y(), second + c);
}

#[test]
fn test_controller_ignores_unknown_line() {
    let mut registry = registry(900, 5000);
    let before = registry.positions();
    let mut controller = InteractionController::new();

    let respaced = controller.handle(
        &mut registry,
        InteractionEvent::DragFinished { line: LineId(77) },
    );

    assert_eq!(respaced, 0);
    assert_eq!(registry.positions(), before);
}

#[test]
fn test_controller_pump_does_not_cascade_on_respaced() {
    let mut registry = registry(900, 5000);
    let ids = ids_by_position(&registry);
    let mut controller = InteractionController::new();

    registry.respace_below(ids[0]);
    assert_eq!(controller.pump(&mut registry), 0);
}
