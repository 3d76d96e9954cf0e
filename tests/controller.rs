mod common;

use carousel_wasm::layout::{self, LayoutParams};
use carousel_wasm::{
    CarouselConfig, CarouselController, ControllerState, MoveOutcome, ScrollOutcome,
};
use common::{carousel, drive, items, RecordingBackdrop, RecordingStage, FRAME_MS};

#[test]
fn new_carousel_rests_on_first_poster() {
    let c = carousel(10, 45);
    assert_eq!(c.center(), 0);
    assert_eq!(c.state(), ControllerState::Idle);
    assert_eq!(c.stage().transforms.len(), 10);
    assert_eq!(c.rendered(0).map(|t| t.opacity), Some(1.0));
    assert_eq!(c.backdrop().calls, vec![(0, 0.0)]);
}

#[test]
fn initial_center_places_background_in_step() {
    let c = carousel(10, 45).with_initial_center(4);
    assert_eq!(c.center(), 4);
    assert_eq!(c.background_index(), 12);
    assert_eq!(c.rendered(4).map(|t| t.z_index), Some(1000));
}

#[test]
fn moving_to_current_center_is_a_no_op() {
    let mut c = carousel(10, 45);
    let applied = c.stage().applied;
    assert_eq!(c.move_to(0, None), MoveOutcome::Unchanged);
    assert_eq!(c.move_to(10, Some(1)), MoveOutcome::Unchanged);
    assert_eq!(c.state(), ControllerState::Idle);
    assert_eq!(c.stage().applied, applied);
    assert_eq!(c.backdrop().calls.len(), 1);
}

#[test]
fn single_step_lands_on_resting_layout() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    assert_eq!(c.move_to(1, Some(1)), MoveOutcome::Started);
    assert_eq!(c.center(), 1);
    assert_eq!(c.last_center(), 0);
    assert!(c.is_moving());

    let reports = drive(&mut c, &mut now);
    assert!(reports.last().is_some_and(|r| r.transition_finished));
    assert_eq!(c.state(), ControllerState::Idle);

    let params = *c.params();
    for index in 0..10 {
        let rel = carousel_wasm::ring::relative_offset(index, 1.0, 10);
        assert_eq!(c.rendered(index), Some(&layout::transform(rel, &params)));
    }
}

#[test]
fn step_takes_configured_duration() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.move_to(1, Some(1));
    let frames = drive(&mut c, &mut now).len() as f64;
    let expected = CarouselConfig::default().timing.step_ms / FRAME_MS;
    assert!((frames - expected).abs() <= 2.0, "frames={frames} expected≈{expected}");
}

#[test]
fn moves_issued_mid_flight_run_in_order() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    assert_eq!(c.move_to(1, Some(1)), MoveOutcome::Started);
    now += FRAME_MS;
    c.tick(now);
    assert_eq!(c.move_to(2, Some(1)), MoveOutcome::Queued);
    assert_eq!(c.center(), 1);

    let reports = drive(&mut c, &mut now);
    let finished = reports.iter().filter(|r| r.transition_finished).count();
    assert_eq!(finished, 2);
    assert_eq!(c.stage().centered, vec![0, 1, 2]);
    assert_eq!(c.center(), 2);
    assert_eq!(c.pending().count(), 0);
}

#[test]
fn duplicate_queued_targets_are_coalesced() {
    let mut c = carousel(10, 45);
    c.move_to(1, Some(1));
    assert_eq!(c.move_to(3, None), MoveOutcome::Queued);
    assert_eq!(c.move_to(13, None), MoveOutcome::Coalesced);
    assert_eq!(c.move_to(4, None), MoveOutcome::Queued);
    let targets: Vec<_> = c.pending().map(|r| r.target).collect();
    assert_eq!(targets, vec![3, 4]);
}

#[test]
fn queued_move_to_reached_center_is_dropped() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.move_to(1, Some(1));
    assert_eq!(c.move_to(1, Some(1)), MoveOutcome::Queued);
    drive(&mut c, &mut now);
    assert_eq!(c.stage().centered, vec![0, 1]);
    assert_eq!(c.state(), ControllerState::Idle);
    assert_eq!(c.pending().count(), 0);
}

#[test]
fn background_steps_three_per_move_and_wraps() {
    let mut c = carousel(10, 45);
    let step_ms = CarouselConfig::default().timing.step_background_ms;
    c.move_to(-1, Some(-1));
    assert_eq!(c.background_index(), 42);
    assert_eq!(c.backdrop().calls.last(), Some(&(42, step_ms)));
}

#[test]
fn background_wraps_forward_past_the_last_image() {
    let mut c = carousel(20, 45).with_initial_center(15);
    let mut now = 0.0;
    assert_eq!(c.background_index(), 0);
    c.move_to(14, Some(-1));
    drive(&mut c, &mut now);
    assert_eq!(c.background_index(), 42);
    c.move_to(15, Some(1));
    drive(&mut c, &mut now);
    c.move_to(16, Some(1));
    assert_eq!(c.background_index(), 3);
}

#[test]
fn missing_direction_follows_shorter_path() {
    let mut c = carousel(10, 45);
    c.move_to(9, None);
    assert_eq!(c.background_index(), 42);
}

#[test]
fn fast_scroll_takes_the_shorter_way_round() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    assert_eq!(c.fast_scroll(8), ScrollOutcome::Started { steps: -2 });
    assert!(c.is_moving());
    assert_eq!(c.center(), 0);

    drive(&mut c, &mut now);
    assert_eq!(c.center(), 8);
    assert_eq!(c.last_center(), 0);
    assert_eq!(c.background_index(), 39);

    let sweep: Vec<_> = c.backdrop().indices().into_iter().skip(1).collect();
    assert_eq!(sweep, vec![44, 43, 42, 41, 40, 39]);
}

#[test]
fn fast_scroll_tie_goes_forward() {
    let mut c = carousel(10, 45);
    assert_eq!(c.fast_scroll(5), ScrollOutcome::Started { steps: 5 });
}

#[test]
fn fast_scroll_while_busy_is_dropped_not_queued() {
    let mut c = carousel(10, 45);
    c.move_to(1, Some(1));
    assert_eq!(c.fast_scroll(6), ScrollOutcome::Busy);
    assert_eq!(c.pending().count(), 0);
    assert_eq!(c.fast_scroll(16), ScrollOutcome::Busy);
}

#[test]
fn fast_scroll_to_center_does_nothing() {
    let mut c = carousel(10, 45);
    assert_eq!(c.fast_scroll(0), ScrollOutcome::Unchanged);
    assert_eq!(c.state(), ControllerState::Idle);
}

#[test]
fn fast_scroll_sweeps_through_fractional_positions() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.fast_scroll(3);
    // Start the tween, then sample somewhere in the middle.
    now += FRAME_MS;
    c.tick(now);
    now += 300.0;
    c.tick(now);
    let x = c.rendered(0).map(|t| t.x).unwrap_or_default();
    let params = *c.params();
    let at_one = layout::transform(-1.0, &params).x;
    let at_two = layout::transform(-2.0, &params).x;
    assert!(x < 0.0);
    assert!(x != at_one && x != at_two, "expected an in-between position, got {x}");
}

#[test]
fn settle_overshoots_against_travel_then_rests() {
    let mut c = carousel(10, 45);
    let settle_ms = CarouselConfig::default().timing.settle_ms;
    let mut now = 0.0;
    c.fast_scroll(2);
    while c.center() != 2 {
        now += FRAME_MS;
        c.tick(now);
    }
    assert!(c.is_moving(), "settle is part of the transition");
    assert_eq!(c.rendered(2).map(|t| t.x), Some(0.0));

    // First settle frame starts its clock.
    now += FRAME_MS;
    c.tick(now);
    now += settle_ms / 2.0;
    c.tick(now);
    let x = c.rendered(2).map(|t| t.x).unwrap_or_default();
    assert!(x < -1.0, "forward travel should overshoot left, got {x}");

    let reports = drive(&mut c, &mut now);
    assert!(reports.last().is_some_and(|r| r.transition_finished));
    assert_eq!(c.rendered(2).map(|t| t.x), Some(0.0));
    assert_eq!(c.state(), ControllerState::Idle);
}

#[test]
fn moves_queued_during_fast_scroll_run_after_it() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.fast_scroll(4);
    assert_eq!(c.move_to(5, Some(1)), MoveOutcome::Queued);
    drive(&mut c, &mut now);
    assert_eq!(c.stage().centered, vec![0, 4, 5]);
}

#[test]
fn category_jump_scrolls_to_first_match() {
    let mut c = carousel(9, 45);
    assert_eq!(c.jump_to_category("3d"), Some(ScrollOutcome::Started { steps: 1 }));
    assert_eq!(c.jump_to_category("audio"), None);
}

#[test]
fn category_jump_to_current_poster_is_unchanged() {
    let mut c = carousel(9, 45);
    assert_eq!(c.jump_to_category("web"), Some(ScrollOutcome::Unchanged));
}

#[test]
fn entrance_sweeps_into_center_and_blocks_input() {
    let mut c = carousel(20, 45);
    let mut now = 0.0;
    assert!(c.run_entrance_animation());
    assert_eq!(c.state(), ControllerState::EntranceAnimating);
    assert_eq!(c.center(), 14);
    assert_eq!(c.background_index(), 27);
    assert!(!c.is_interactive());
    assert_eq!(c.stage().container_opacity, Some(0.0));
    assert!((0..20).all(|i| c.rendered(i).is_some_and(|t| t.opacity == 0.0)));

    assert_eq!(c.move_to(3, Some(1)), MoveOutcome::Rejected);
    assert_eq!(c.fast_scroll(3), ScrollOutcome::Rejected);
    assert_eq!(c.jump_to_category("3d"), Some(ScrollOutcome::Rejected));

    let reports = drive(&mut c, &mut now);
    let finished: Vec<_> = reports.iter().filter(|r| r.entrance_finished).collect();
    assert_eq!(finished.len(), 1);
    assert!(reports.last().is_some_and(|r| r.entrance_finished));

    assert_eq!(c.center(), 0);
    assert_eq!(c.background_index(), 0);
    assert!(c.is_interactive());
    assert!(c.entrance_complete());
    assert_eq!(c.stage().container_opacity, Some(1.0));
    assert_eq!(&c.stage().centered[1..], &[14, 15, 16, 17, 18, 19, 0]);
    assert_eq!(c.rendered(0).map(|t| t.opacity), Some(1.0));

    assert!(!c.run_entrance_animation());
    assert_eq!(c.move_to(1, Some(1)), MoveOutcome::Started);
}

#[test]
fn entrance_on_tiny_carousel_only_fades_in() {
    let mut c = carousel(2, 45);
    let mut now = 0.0;
    assert!(c.run_entrance_animation());
    assert_eq!(c.center(), 0);
    let reports = drive(&mut c, &mut now);
    assert!(reports.last().is_some_and(|r| r.entrance_finished));
    assert_eq!(c.stage().centered, vec![0, 0]);
}

#[test]
fn resize_relayouts_idle_carousel_without_animation() {
    let mut c = carousel(10, 45);
    let before = c.rendered(1).copied();
    c.resize(2000.0, 900.0);
    assert_eq!(c.state(), ControllerState::Idle);
    let params = LayoutParams::for_viewport(&CarouselConfig::default().geometry, 2000.0);
    assert_eq!(c.rendered(1).copied(), Some(layout::transform(1.0, &params)));
    assert_ne!(c.rendered(1).copied(), before);
}

#[test]
fn resize_mid_step_retargets_resting_layout() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.move_to(1, Some(1));
    now += FRAME_MS;
    c.tick(now);
    c.resize(2000.0, 900.0);
    drive(&mut c, &mut now);
    let params = LayoutParams::for_viewport(&CarouselConfig::default().geometry, 2000.0);
    assert_eq!(c.rendered(2).copied(), Some(layout::transform(1.0, &params)));
}

#[test]
fn resize_during_settle_relayouts_every_poster() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.fast_scroll(2);
    while c.center() != 2 {
        now += FRAME_MS;
        c.tick(now);
    }
    now += FRAME_MS;
    c.tick(now);
    c.resize(2000.0, 900.0);
    drive(&mut c, &mut now);

    let params = LayoutParams::for_viewport(&CarouselConfig::default().geometry, 2000.0);
    assert_eq!(c.rendered(2).copied(), Some(layout::transform(0.0, &params)));
    assert_eq!(c.rendered(3).copied(), Some(layout::transform(1.0, &params)));
    assert_eq!(c.rendered(0).copied(), Some(layout::transform(-2.0, &params)));
}

#[test]
fn resize_during_last_entrance_step_lands_on_new_layout() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    assert!(c.run_entrance_animation());
    while c.center() != 0 {
        now += FRAME_MS;
        c.tick(now);
    }
    assert_eq!(c.state(), ControllerState::EntranceAnimating);
    now += FRAME_MS;
    c.tick(now);
    c.resize(2000.0, 900.0);
    let reports = drive(&mut c, &mut now);
    assert!(reports.last().is_some_and(|r| r.entrance_finished));

    let params = LayoutParams::for_viewport(&CarouselConfig::default().geometry, 2000.0);
    assert_eq!(c.rendered(1).copied(), Some(layout::transform(1.0, &params)));
    assert_eq!(c.rendered(9).copied(), Some(layout::transform(-1.0, &params)));
}

#[test]
fn resize_during_entrance_fade_keeps_new_geometry() {
    let mut c = carousel(2, 45);
    let mut now = 0.0;
    assert!(c.run_entrance_animation());
    now += FRAME_MS;
    c.tick(now);
    c.resize(2000.0, 900.0);
    drive(&mut c, &mut now);

    let params = LayoutParams::for_viewport(&CarouselConfig::default().geometry, 2000.0);
    assert_eq!(c.rendered(1).map(|t| t.x), Some(layout::transform(-1.0, &params).x));
}

#[test]
fn destination_follows_fast_scroll_and_queue() {
    let mut c = carousel(10, 45);
    assert_eq!(c.destination(), 0);
    c.fast_scroll(4);
    assert_eq!(c.center(), 0);
    assert_eq!(c.destination(), 4);
    assert_eq!(c.move_to(7, Some(1)), MoveOutcome::Queued);
    assert_eq!(c.destination(), 7);
}

#[test]
fn gesture_step_during_fast_scroll_continues_from_landing() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    c.fast_scroll(4);
    let target = c.destination() as i64 + 1;
    assert_eq!(c.move_to(target, Some(1)), MoveOutcome::Queued);
    drive(&mut c, &mut now);

    assert_eq!(c.center(), 5);
    assert_eq!(c.background_index(), 15);
    assert_eq!(c.stage().centered, vec![0, 4, 5]);
}

#[test]
fn repeated_gesture_steps_accumulate() {
    let mut c = carousel(10, 45);
    let mut now = 0.0;
    for _ in 0..3 {
        let target = c.destination() as i64 + 1;
        c.move_to(target, Some(1));
    }
    drive(&mut c, &mut now);
    assert_eq!(c.stage().centered, vec![0, 1, 2, 3]);
    assert_eq!(c.background_index(), 9);
}

#[test]
fn empty_carousel_ignores_everything() {
    let mut c = carousel(0, 45);
    assert_eq!(c.move_to(3, None), MoveOutcome::Empty);
    assert_eq!(c.fast_scroll(3), ScrollOutcome::Empty);
    assert!(!c.run_entrance_animation());
    assert!(!c.tick(16.0).animating);
    assert!(c.backdrop().calls.is_empty());
}

#[test]
fn carousel_runs_without_backdrop() {
    let mut c = CarouselController::new(
        items(6),
        CarouselConfig::default(),
        1280.0,
        RecordingStage::default(),
        None::<RecordingBackdrop>,
    );
    let mut now = 0.0;
    assert_eq!(c.move_to(2, None), MoveOutcome::Started);
    drive(&mut c, &mut now);
    assert_eq!(c.center(), 2);
    assert_eq!(c.background_index(), 0);
}
