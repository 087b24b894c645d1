use {
    minifb::Key,
    pose_record::keys::{Action, action_for},
};

#[test]
fn test_trigger_keys() {
    assert_eq!(action_for(Key::C), Some(Action::Camera));
    assert_eq!(action_for(Key::F), Some(Action::File));
    assert_eq!(action_for(Key::R), Some(Action::Record));
    assert_eq!(action_for(Key::D), Some(Action::Download));
    assert_eq!(action_for(Key::Escape), Some(Action::Quit));
}

#[test]
fn test_other_keys_ignored() {
    for key in [Key::A, Key::Space, Key::Enter, Key::Key1] {
        assert_eq!(action_for(key), None);
    }
}
