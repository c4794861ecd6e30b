//! Modifier key bitflags.

use winit::keyboard::ModifiersState;

/// Modifier key bitflags. Combines via bitwise OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 0);
    /// Control key.
    pub const CTRL: Self = Self(1 << 1);
    /// Alt key.
    pub const ALT: Self = Self(1 << 2);
    /// Super/Meta/Win key.
    pub const SUPER: Self = Self(1 << 3);

    /// Returns true if `self` contains all bits in `other`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no modifier bits are set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut mods = Self::NONE;
        if state.shift_key() {
            mods |= Self::SHIFT;
        }
        if state.control_key() {
            mods |= Self::CTRL;
        }
        if state.alt_key() {
            mods |= Self::ALT;
        }
        if state.super_key() {
            mods |= Self::SUPER;
        }
        mods
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_winit_state() {
        let state = ModifiersState::SHIFT | ModifiersState::CONTROL;
        let mods = Modifiers::from(state);
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::ALT));
    }

    #[test]
    fn test_empty_state() {
        assert!(Modifiers::from(ModifiersState::empty()).is_empty());
    }

    #[test]
    fn test_contains_subset() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!Modifiers::CTRL.contains(mods));
    }
}
