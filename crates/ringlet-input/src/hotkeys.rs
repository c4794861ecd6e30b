//! Keyboard stand-ins for the material buttons.
//!
//! Digits `1`..`9`, `0` pick the material set in manifest order. The modifier
//! picks the ring: none for the outer ring, `Shift` for the middle one, and
//! `Ctrl` for the inner one.

use winit::keyboard::KeyCode;

use crate::modifiers::Modifiers;

/// A material-button press decoded from a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialHotkey {
    /// Index into the material catalog order, `0..10`.
    pub set_index: usize,
    /// Ring index, `0` (outer) to `2` (inner).
    pub body_index: usize,
}

/// Decode a key press into a material button, if it is bound to one.
#[must_use]
pub fn material_hotkey(code: KeyCode, mods: Modifiers) -> Option<MaterialHotkey> {
    let set_index = digit_index(code)?;
    let body_index = if mods.is_empty() {
        0
    } else if mods == Modifiers::SHIFT {
        1
    } else if mods == Modifiers::CTRL {
        2
    } else {
        return None;
    };
    Some(MaterialHotkey {
        set_index,
        body_index,
    })
}

fn digit_index(code: KeyCode) -> Option<usize> {
    let index = match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => 0,
        KeyCode::Digit2 | KeyCode::Numpad2 => 1,
        KeyCode::Digit3 | KeyCode::Numpad3 => 2,
        KeyCode::Digit4 | KeyCode::Numpad4 => 3,
        KeyCode::Digit5 | KeyCode::Numpad5 => 4,
        KeyCode::Digit6 | KeyCode::Numpad6 => 5,
        KeyCode::Digit7 | KeyCode::Numpad7 => 6,
        KeyCode::Digit8 | KeyCode::Numpad8 => 7,
        KeyCode::Digit9 | KeyCode::Numpad9 => 8,
        KeyCode::Digit0 | KeyCode::Numpad0 => 9,
        _ => return None,
    };
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_digit_targets_outer_ring() {
        assert_eq!(
            material_hotkey(KeyCode::Digit1, Modifiers::NONE),
            Some(MaterialHotkey {
                set_index: 0,
                body_index: 0
            })
        );
    }

    #[test]
    fn test_zero_is_tenth_set() {
        let hotkey = material_hotkey(KeyCode::Digit0, Modifiers::NONE).unwrap();
        assert_eq!(hotkey.set_index, 9);
    }

    #[test]
    fn test_modifiers_select_ring() {
        let middle = material_hotkey(KeyCode::Digit2, Modifiers::SHIFT).unwrap();
        assert_eq!(middle.body_index, 1);
        let inner = material_hotkey(KeyCode::Numpad2, Modifiers::CTRL).unwrap();
        assert_eq!(inner.body_index, 2);
        assert_eq!(inner.set_index, 1);
    }

    #[test]
    fn test_unbound_combinations() {
        assert_eq!(material_hotkey(KeyCode::KeyA, Modifiers::NONE), None);
        assert_eq!(material_hotkey(KeyCode::Digit1, Modifiers::ALT), None);
        assert_eq!(
            material_hotkey(KeyCode::Digit1, Modifiers::SHIFT | Modifiers::CTRL),
            None
        );
    }
}
