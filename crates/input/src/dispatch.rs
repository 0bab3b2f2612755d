use crate::action::Action;
use crate::event::{Key, PointerButton, RawEvent};
use glam::IVec2;
use tilecraft_common::{BlockId, Direction};

/// Classify one raw event into at most one action.
///
/// - window close and Escape quit
/// - number keys `1`..`9` select the block with the same id
/// - W/A/S/D move up/left/down/right
/// - a primary pointer press places at the pointer
///
/// Everything else maps to `None`.
pub fn classify(event: &RawEvent) -> Option<Action> {
    match *event {
        RawEvent::Quit => Some(Action::Quit),
        RawEvent::KeyDown(key) => classify_key(key),
        RawEvent::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
        } => Some(Action::Place(IVec2::new(x, y))),
        RawEvent::PointerDown { .. } => None,
    }
}

fn classify_key(key: Key) -> Option<Action> {
    let c = match key {
        Key::Escape => return Some(Action::Quit),
        Key::Char(c) => c,
        Key::Other => return None,
    };
    if let Some(digit) = c.to_digit(10) {
        return BlockId::placeable(digit as u16).map(Action::SelectBlock);
    }
    let direction = match c.to_ascii_lowercase() {
        'w' => Direction::Up,
        's' => Direction::Down,
        'a' => Direction::Left,
        'd' => Direction::Right,
        _ => return None,
    };
    Some(Action::Move(direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> RawEvent {
        RawEvent::KeyDown(Key::Char(c))
    }

    #[test]
    fn quit_sources() {
        assert_eq!(classify(&RawEvent::Quit), Some(Action::Quit));
        assert_eq!(classify(&RawEvent::KeyDown(Key::Escape)), Some(Action::Quit));
    }

    #[test]
    fn digits_select_matching_block() {
        for (c, id) in ('1'..='9').zip(1u16..=9) {
            assert_eq!(classify(&key(c)), Some(Action::SelectBlock(BlockId(id))));
        }
    }

    #[test]
    fn zero_and_other_keys_select_nothing() {
        assert_eq!(classify(&key('0')), None);
        assert_eq!(classify(&key('x')), None);
        assert_eq!(classify(&key(' ')), None);
        assert_eq!(classify(&RawEvent::KeyDown(Key::Other)), None);
    }

    #[test]
    fn wasd_moves() {
        assert_eq!(classify(&key('w')), Some(Action::Move(Direction::Up)));
        assert_eq!(classify(&key('a')), Some(Action::Move(Direction::Left)));
        assert_eq!(classify(&key('s')), Some(Action::Move(Direction::Down)));
        assert_eq!(classify(&key('D')), Some(Action::Move(Direction::Right)));
    }

    #[test]
    fn only_primary_pointer_places() {
        let press = |button| RawEvent::PointerDown {
            x: 280,
            y: 12,
            button,
        };
        assert_eq!(
            classify(&press(PointerButton::Primary)),
            Some(Action::Place(IVec2::new(280, 12)))
        );
        assert_eq!(classify(&press(PointerButton::Secondary)), None);
        assert_eq!(classify(&press(PointerButton::Middle)), None);
        assert_eq!(classify(&press(PointerButton::Other(8))), None);
    }
}
