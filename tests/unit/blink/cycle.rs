use super::*;

fn shown_sequence(cycle: &mut BlinkCycle, ticks: usize) -> Vec<usize> {
    let mut pending = None;
    (0..ticks).map(|_| cycle.advance(&mut pending).show).collect()
}

#[test]
fn starts_at_most_opaque_with_coincident_previous() {
    let mut cycle = BlinkCycle::new(5);
    let mut pending = None;
    let step = cycle.advance(&mut pending);
    assert_eq!(step.show, 4);
    assert_eq!(step.hide, 4);
    assert_eq!(step.move_to, None);
}

#[test]
fn walks_down_then_reverses_at_zero() {
    let mut cycle = BlinkCycle::new(5);
    assert_eq!(shown_sequence(&mut cycle, 9), vec![4, 3, 2, 1, 0, 1, 2, 3, 4]);
    // Back at the top the direction flips again.
    assert_eq!(shown_sequence(&mut cycle, 2), vec![3, 2]);
}

#[test]
fn hide_always_trails_show_by_one_tick() {
    let mut cycle = BlinkCycle::new(3);
    let mut pending = None;
    let mut last_show = cycle.advance(&mut pending).show;
    for _ in 0..10 {
        let step = cycle.advance(&mut pending);
        assert_eq!(step.hide, last_show);
        last_show = step.show;
    }
}

#[test]
fn unsynchronized_move_applies_on_next_tick() {
    let mut cycle = BlinkCycle::new(5);
    let mut pending = None;
    // Two ticks in, the cycle sits at index 2.
    cycle.advance(&mut pending);
    cycle.advance(&mut pending);

    pending = Some(PendingMove {
        position: GeoPoint::new(1.0, 2.0),
        synchronized: false,
    });
    let step = cycle.advance(&mut pending);
    assert_eq!(step.move_to, Some(GeoPoint::new(1.0, 2.0)));
    assert_eq!(pending, None);
}

#[test]
fn synchronized_move_waits_for_transparent_phase() {
    let mut cycle = BlinkCycle::new(5);
    let mut pending = None;
    // Two ticks in, the cycle sits at index 2.
    cycle.advance(&mut pending);
    cycle.advance(&mut pending);

    pending = Some(PendingMove {
        position: GeoPoint::new(1.0, 2.0),
        synchronized: true,
    });

    let mut applied = Vec::new();
    for _ in 0..10 {
        let step = cycle.advance(&mut pending);
        if let Some(position) = step.move_to {
            applied.push((step.show, position));
        }
    }
    // Exactly one application, at the fully transparent variant.
    assert_eq!(applied, vec![(0, GeoPoint::new(1.0, 2.0))]);
}

#[test]
fn latest_move_request_wins() {
    let mut cycle = BlinkCycle::new(4);
    let mut pending = Some(PendingMove {
        position: GeoPoint::new(1.0, 1.0),
        synchronized: true,
    });
    let _ = pending.replace(PendingMove {
        position: GeoPoint::new(9.0, 9.0),
        synchronized: false,
    });

    let step = cycle.advance(&mut pending);
    assert_eq!(step.move_to, Some(GeoPoint::new(9.0, 9.0)));
    assert_eq!(cycle.advance(&mut pending).move_to, None);
}

#[test]
fn single_variant_cycle_stays_put() {
    let mut cycle = BlinkCycle::new(1);
    let mut pending = Some(PendingMove {
        position: GeoPoint::new(3.0, 4.0),
        synchronized: true,
    });
    for tick in 0..5 {
        let step = cycle.advance(&mut pending);
        assert_eq!(step.show, 0);
        assert_eq!(step.hide, 0);
        // The single variant counts as the transparent phase.
        assert_eq!(step.move_to.is_some(), tick == 0);
    }
}
