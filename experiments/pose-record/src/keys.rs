use minifb::Key;

/// The host triggers, one key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Camera,
    File,
    Record,
    Download,
    Quit,
}

pub fn action_for(key: Key) -> Option<Action> {
    match key {
        Key::C => Some(Action::Camera),
        Key::F => Some(Action::File),
        Key::R => Some(Action::Record),
        Key::D => Some(Action::Download),
        Key::Escape => Some(Action::Quit),
        _ => None,
    }
}

pub const HELP: &str = "C camera | F file | R record | D download | Esc quit";
