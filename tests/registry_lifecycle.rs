//! Registration, parameter propagation, children, and mixer behavior of
//! the channel registry against the scripted backend.

use conductor_audio::defs::parse_defs;
use conductor_audio::test_data::MockBackend;
use conductor_audio::{AudioBackend, AudioError, ChannelRegistry, ChildTag, ObjectId};

use std::cell::RefCell;
use std::rc::Rc;

fn registry() -> ChannelRegistry<MockBackend> {
    ChannelRegistry::new(MockBackend::new())
}

#[test]
fn duplicate_name_is_rejected_and_original_untouched() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.set_volume("bgm", 0.3).unwrap();

    assert_eq!(
        reg.add_from_path("bgm", "music/other.ogg"),
        Err(AudioError::AlreadyExists)
    );
    assert!((reg.params("bgm").unwrap().volume - 0.3).abs() < 1e-6);
    assert_eq!(reg.names(), vec!["bgm".to_string()]);
}

#[test]
fn refused_path_is_invalid_path() {
    let mut backend = MockBackend::new();
    backend.refuse_path("broken/clip.ogg");
    let mut reg = ChannelRegistry::new(backend);

    assert_eq!(
        reg.add_from_path("sfx", "broken/clip.ogg"),
        Err(AudioError::InvalidPath)
    );
    assert!(reg.names().is_empty());
}

#[test]
fn unknown_channel_is_does_not_exist() {
    let mut reg = registry();
    assert_eq!(
        reg.play("ghost", ChildTag::Parent),
        Err(AudioError::DoesNotExist)
    );
    assert_eq!(reg.remove_sound("ghost"), Err(AudioError::DoesNotExist));
    assert_eq!(
        reg.progress("ghost", ChildTag::Parent),
        Err(AudioError::DoesNotExist)
    );
}

#[test]
fn defs_seed_initial_parameters() {
    let defs = parse_defs(
        r#"[
            {"name": "bgm", "path": "music/bgm.ogg", "looping": true, "volume": 0.8},
            {"name": "engine", "path": "sfx/engine.wav", "spatial_blend": 1.0}
        ]"#,
    )
    .unwrap();

    let mut reg = registry();
    reg.add_from_defs(&defs).unwrap();

    assert_eq!(reg.names(), vec!["bgm".to_string(), "engine".to_string()]);
    let bgm = reg.params("bgm").unwrap();
    assert!(bgm.looping);
    assert!((bgm.volume - 0.8).abs() < 1e-6);
    assert!((reg.params("engine").unwrap().spatial_blend - 1.0).abs() < 1e-6);
}

#[test]
fn parent_volume_propagates_to_children_but_position_does_not() {
    let mut reg = registry();
    reg.add_from_path("engine", "sfx/engine.wav").unwrap();
    reg.set_spatial_blend("engine", 1.0).unwrap();
    reg.register_child_at("engine", [3.0, 0.0, 1.0]).unwrap();

    let ids = reg.backend().ids();
    let child = ids[1];

    reg.set_volume("engine", 0.25).unwrap();

    let mirrored = reg.backend().instance(child);
    assert!((mirrored.params.volume - 0.25).abs() < 1e-6);
    assert_eq!(mirrored.position_3d, Some([3.0, 0.0, 1.0]));
}

#[test]
fn removal_destroys_children_and_primary() {
    let mut reg = registry();
    reg.add_from_path("engine", "sfx/engine.wav").unwrap();
    reg.set_spatial_blend("engine", 1.0).unwrap();
    reg.register_child_at("engine", [0.0, 0.0, 0.0]).unwrap();

    let ids = reg.backend().ids();
    assert_eq!(ids.len(), 2);

    reg.remove_sound("engine").unwrap();
    assert!(reg.backend().ids().is_empty());
    assert_eq!(
        reg.progress("engine", ChildTag::Positional),
        Err(AudioError::DoesNotExist)
    );
}

#[test]
fn child_dispatch_errors_are_specific() {
    let mut reg = registry();
    reg.add_from_path("engine", "sfx/engine.wav").unwrap();

    assert_eq!(
        reg.play("engine", ChildTag::Positional),
        Err(AudioError::MissingChildren)
    );

    reg.set_spatial_blend("engine", 1.0).unwrap();
    reg.register_child_at("engine", [0.0, 0.0, 0.0]).unwrap();
    assert_eq!(
        reg.play("engine", ChildTag::Attached),
        Err(AudioError::InvalidChild)
    );
    assert_eq!(
        reg.deregister_child("engine", ChildTag::Parent),
        Err(AudioError::InvalidChild)
    );
    reg.play("engine", ChildTag::Positional).unwrap();
}

#[test]
fn flat_source_cannot_take_children() {
    let mut reg = registry();
    reg.add_from_path("ui", "sfx/click.wav").unwrap();
    assert_eq!(
        reg.register_child_at("ui", [1.0, 0.0, 0.0]),
        Err(AudioError::CanNotBe3D)
    );
    assert_eq!(
        reg.play_attached("ui", ObjectId(1)),
        Err(AudioError::CanNotBe3D)
    );
}

#[test]
fn attached_children_follow_scene_objects() {
    let mut backend = MockBackend::new();
    backend.add_object(ObjectId(7));
    let mut reg = ChannelRegistry::new(backend);
    reg.add_from_path("engine", "sfx/engine.wav").unwrap();
    reg.set_spatial_blend("engine", 1.0).unwrap();

    assert_eq!(
        reg.register_child_attached("engine", ObjectId(99)),
        Err(AudioError::InvalidParent)
    );

    reg.play_attached("engine", ObjectId(7)).unwrap();
    let child = reg.backend().ids()[1];
    assert_eq!(reg.backend().instance(child).attached_to, Some(ObjectId(7)));
    assert!(reg.backend().is_playing(child));
}

#[test]
fn one_shot_slot_is_independent_of_the_looping_child() {
    let mut reg = registry();
    reg.add_from_path("engine", "sfx/engine.wav").unwrap();
    reg.set_spatial_blend("engine", 1.0).unwrap();

    reg.play_at_position("engine", [0.0, 0.0, 0.0]).unwrap();
    reg.play_once_at_position("engine", [9.0, 0.0, 0.0]).unwrap();

    // primary + positional + one-shot positional
    assert_eq!(reg.backend().ids().len(), 3);
}

#[test]
fn toggle_mute_and_pause_act_on_the_tagged_instance() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    let primary = reg.backend().ids()[0];

    reg.toggle_mute("bgm", ChildTag::Parent).unwrap();
    assert!(reg.backend().is_muted(primary));
    reg.toggle_mute("bgm", ChildTag::Parent).unwrap();
    assert!(!reg.backend().is_muted(primary));

    reg.play("bgm", ChildTag::Parent).unwrap();
    reg.toggle_pause("bgm", ChildTag::Parent).unwrap();
    assert!(reg.backend().is_paused(primary));
    reg.toggle_pause("bgm", ChildTag::Parent).unwrap();
    assert!(reg.backend().is_playing(primary));
}

#[test]
fn progress_is_monotonic_while_playing() {
    let mut reg = ChannelRegistry::new(MockBackend::with_clip_length(10.0));
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();
    reg.play("bgm", ChildTag::Parent).unwrap();

    let mut last = reg.progress("bgm", ChildTag::Parent).unwrap();
    assert_eq!(last, 0.0);
    for _ in 0..8 {
        reg.backend_mut().advance(1.0);
        reg.tick(1.0);
        let now = reg.progress("bgm", ChildTag::Parent).unwrap();
        assert!(now >= last);
        assert!((0.0..=1.0).contains(&now));
        last = now;
    }
    assert!((last - 0.8).abs() < 1e-9);
    assert!((reg.playback_position("bgm", ChildTag::Parent).unwrap() - 8.0).abs() < 1e-9);
}

#[test]
fn changed_callback_fires_after_child_sync() {
    let mut reg = registry();
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    reg.subscribe_changed("bgm", Box::new(move |name| sink.borrow_mut().push(name.into())))
        .unwrap();
    assert_eq!(
        reg.subscribe_changed("bgm", Box::new(|_| {})),
        Err(AudioError::AlreadySubscribed)
    );

    reg.set_volume("bgm", 0.1).unwrap();
    reg.set_looping("bgm", true).unwrap();
    assert_eq!(&*seen.borrow(), &["bgm".to_string(), "bgm".to_string()]);

    reg.unsubscribe_changed("bgm").unwrap();
    assert_eq!(
        reg.unsubscribe_changed("bgm"),
        Err(AudioError::NotSubscribed)
    );
    reg.set_volume("bgm", 0.2).unwrap();
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn mixer_group_gatekeeps_exposed_parameters() {
    let mut backend = MockBackend::new();
    backend.expose_parameter("MusicVolume", 0.0);
    let mut reg = ChannelRegistry::new(backend);
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    assert_eq!(
        reg.set_group_value("bgm", "MusicVolume", -6.0),
        Err(AudioError::MissingMixerGroup)
    );
    assert_eq!(reg.remove_group("bgm"), Err(AudioError::MissingMixerGroup));

    reg.add_group("bgm", "Music").unwrap();
    reg.set_group_value("bgm", "MusicVolume", -6.0).unwrap();
    assert_eq!(reg.get_group_value("bgm", "MusicVolume"), Ok(-6.0));

    assert_eq!(
        reg.set_group_value("bgm", "Unknown", 1.0),
        Err(AudioError::MixerNotExposed)
    );

    reg.reset_group_value("bgm", "MusicVolume").unwrap();
    assert_eq!(reg.get_group_value("bgm", "MusicVolume"), Ok(0.0));

    reg.remove_group("bgm").unwrap();
    assert_eq!(
        reg.get_group_value("bgm", "MusicVolume"),
        Err(AudioError::MissingMixerGroup)
    );
}

#[test]
fn start_time_validation_and_skip_clamping() {
    let mut reg = ChannelRegistry::new(MockBackend::with_clip_length(10.0));
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    assert_eq!(
        reg.set_start_time("bgm", 11.0),
        Err(AudioError::InvalidTime)
    );
    assert_eq!(
        reg.set_start_time("bgm", -1.0),
        Err(AudioError::InvalidTime)
    );
    assert_eq!(
        reg.play_delayed("bgm", -0.5, ChildTag::Parent),
        Err(AudioError::InvalidTime)
    );

    reg.play("bgm", ChildTag::Parent).unwrap();
    reg.skip_time("bgm", 25.0, ChildTag::Parent).unwrap();
    assert!((reg.playback_position("bgm", ChildTag::Parent).unwrap() - 10.0).abs() < 1e-9);
    reg.skip_time("bgm", -4.0, ChildTag::Parent).unwrap();
    assert!((reg.playback_position("bgm", ChildTag::Parent).unwrap() - 6.0).abs() < 1e-9);
}

#[test]
fn reverse_direction_repositions_near_the_clip_end() {
    let mut reg = ChannelRegistry::new(MockBackend::with_clip_length(10.0));
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    reg.set_playback_direction("bgm", -1.0).unwrap();
    assert!((reg.params("bgm").unwrap().pitch + 1.0).abs() < 1e-6);
    // Repositioned to the last progress the detector can observe.
    assert!((reg.progress("bgm", ChildTag::Parent).unwrap() - 0.99).abs() < 1e-9);
}

#[test]
fn detached_registry_rejects_task_spawns_but_plays() {
    let mut reg = ChannelRegistry::detached(MockBackend::new());
    reg.add_from_path("bgm", "music/bgm.ogg").unwrap();

    reg.play("bgm", ChildTag::Parent).unwrap();
    assert_eq!(
        reg.lerp_volume("bgm", 0.0, 1.0, 5),
        Err(AudioError::MissingParent)
    );
    assert_eq!(
        reg.subscribe_progress("bgm", 0.5, Box::new(|_, _| {
            conductor_audio::ProgressResponse::Unsub
        })),
        Err(AudioError::MissingParent)
    );
    assert_eq!(
        reg.play_at_timestamp("bgm", 2.0),
        Err(AudioError::MissingParent)
    );
    // No scheduler, so ticking is a no-op rather than a panic.
    reg.tick(1.0);
}
