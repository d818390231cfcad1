//! Progress-watch scheduling: threshold detection, rearm policies, and
//! callback re-entrancy.

use conductor_audio::test_data::MockBackend;
use conductor_audio::{
    AudioBackend, AudioError, ChannelRegistry, ChildTag, ProgressCallback, ProgressResponse,
};

use std::cell::RefCell;
use std::rc::Rc;

fn registry() -> ChannelRegistry<MockBackend> {
    ChannelRegistry::new(MockBackend::with_clip_length(10.0))
}

fn noop() -> ProgressCallback {
    Box::new(|_, _| ProgressResponse::Unsub)
}

fn counter() -> (Rc<RefCell<u32>>, Rc<RefCell<u32>>) {
    let count = Rc::new(RefCell::new(0));
    (count.clone(), count)
}

#[test]
fn watch_fires_at_threshold_and_not_before() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::Unsub
        }),
    )
    .unwrap();

    reg.backend_mut().advance(4.9);
    reg.tick(4.9);
    assert_eq!(*count.borrow(), 0);

    reg.backend_mut().advance(0.2);
    reg.tick(0.2);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn unsub_policy_fires_exactly_once_across_loops() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.set_looping("bgm", true).unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::Unsub
        }),
    )
    .unwrap();

    for _ in 0..30 {
        reg.backend_mut().advance(1.0);
        reg.tick(1.0);
    }
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn rearm_after_remaining_fires_once_per_loop_iteration() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.set_looping("bgm", true).unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::RearmAfterRemaining
        }),
    )
    .unwrap();

    // Clip loops every 10s; the threshold sits at 5s into each iteration.
    for step in 1..=30 {
        reg.backend_mut().advance(1.0);
        reg.tick(1.0);
        let expected = match step {
            0..=4 => 0,
            5..=14 => 1,
            15..=24 => 2,
            _ => 3,
        };
        assert_eq!(*count.borrow(), expected, "at t={}", step);
    }
}

#[test]
fn rearm_immediate_is_limited_to_one_fire_per_tick() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::RearmImmediate
        }),
    )
    .unwrap();

    reg.backend_mut().advance(6.0);
    reg.tick(6.0);
    assert_eq!(*count.borrow(), 1);

    // Still past the threshold: one more fire per tick, never a spin.
    reg.tick(0.1);
    reg.tick(0.1);
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn stopped_instance_never_achieves_progress() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::Unsub
        }),
    )
    .unwrap();

    // Position the stopped instance past the threshold.
    reg.skip_time("bgm", 6.0, ChildTag::Parent).unwrap();
    reg.tick(1.0);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn subscription_bookkeeping_errors() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    reg.subscribe_progress("bgm", 0.5, noop()).unwrap();
    assert_eq!(
        reg.subscribe_progress("bgm", 0.5, noop()),
        Err(AudioError::AlreadySubscribed)
    );
    assert_eq!(
        reg.unsubscribe_progress("bgm", 0.25),
        Err(AudioError::NotSubscribed)
    );
    reg.unsubscribe_progress("bgm", 0.5).unwrap();
    assert_eq!(
        reg.unsubscribe_progress("bgm", 0.5),
        Err(AudioError::NotSubscribed)
    );
}

#[test]
fn unreachable_thresholds_are_rejected_per_direction() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    assert_eq!(
        reg.subscribe_progress("bgm", 1.5, noop()),
        Err(AudioError::InvalidProgress)
    );
    assert_eq!(
        reg.subscribe_progress("bgm", 0.995, noop()),
        Err(AudioError::InvalidProgress)
    );
    reg.subscribe_progress("bgm", 0.005, noop()).unwrap();

    reg.set_playback_direction("bgm", -1.0).unwrap();
    assert_eq!(
        reg.subscribe_progress("bgm", 0.006, noop()),
        Err(AudioError::InvalidProgress)
    );
    reg.subscribe_progress("bgm", 0.995, noop()).unwrap();
}

#[test]
fn reverse_playback_crosses_thresholds_downward() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.set_playback_direction("bgm", -1.0).unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::Unsub
        }),
    )
    .unwrap();

    // Starts near the end (0.99); plays backward toward 0.5.
    reg.backend_mut().advance(4.0);
    reg.tick(4.0);
    assert_eq!(*count.borrow(), 0);
    reg.backend_mut().advance(1.0);
    reg.tick(1.0);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn child_crossing_reports_its_tag() {
    let mut reg = registry();
    reg.add_from_path("engine", "sfx/engine.wav").unwrap();
    reg.set_spatial_blend("engine", 1.0).unwrap();
    reg.play_at_position("engine", [2.0, 0.0, 0.0]).unwrap();

    let seen: Rc<RefCell<Option<ChildTag>>> = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    reg.subscribe_progress(
        "engine",
        0.5,
        Box::new(move |_, hit| {
            *sink.borrow_mut() = Some(hit.tag);
            ProgressResponse::Unsub
        }),
    )
    .unwrap();

    reg.backend_mut().advance(6.0);
    reg.tick(6.0);
    assert_eq!(*seen.borrow(), Some(ChildTag::Positional));
}

#[test]
fn callback_may_replace_its_own_watch() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let first = Rc::new(RefCell::new(0u32));
    let second = Rc::new(RefCell::new(0u32));
    let first_sink = first.clone();
    let second_sink = second.clone();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |ctx, hit| {
            *first_sink.borrow_mut() += 1;
            let chained = second_sink.clone();
            ctx.subscribe_progress(
                &hit.name,
                hit.progress,
                Box::new(move |_, _| {
                    *chained.borrow_mut() += 1;
                    ProgressResponse::Unsub
                }),
            )
            .unwrap();
            ProgressResponse::Unsub
        }),
    )
    .unwrap();

    reg.backend_mut().advance(6.0);
    reg.tick(6.0);
    assert_eq!((*first.borrow(), *second.borrow()), (1, 0));

    // Replacement watch fires on the next tick, original never again.
    reg.tick(0.1);
    assert_eq!((*first.borrow(), *second.borrow()), (1, 1));
}

#[test]
fn channel_removal_cancels_watches() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let (count, sink) = counter();
    reg.subscribe_progress(
        "bgm",
        0.5,
        Box::new(move |_, _| {
            *sink.borrow_mut() += 1;
            ProgressResponse::RearmImmediate
        }),
    )
    .unwrap();

    reg.remove_sound("bgm").unwrap();
    reg.backend_mut().advance(6.0);
    reg.tick(6.0);
    assert_eq!(*count.borrow(), 0);

    // A fresh registration starts with a clean watch table.
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.subscribe_progress("bgm", 0.5, noop()).unwrap();
}

#[test]
fn play_at_timestamp_plays_once_without_shifting_the_start() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    reg.play_at_timestamp("bgm", 6.0).unwrap();
    assert!((reg.playback_position("bgm", ChildTag::Parent).unwrap() - 6.0).abs() < 1e-9);

    // Poll tick-by-tick up to the clip boundary; the internal watch stops
    // the non-looping clip and resets the start time.
    for _ in 0..80 {
        reg.backend_mut().advance(0.05);
        reg.tick(0.05);
    }
    let primary = reg.backend().ids()[0];
    assert!(!reg.backend().is_playing(primary));

    reg.play("bgm", ChildTag::Parent).unwrap();
    assert!(reg.playback_position("bgm", ChildTag::Parent).unwrap() < 1e-9);
}
