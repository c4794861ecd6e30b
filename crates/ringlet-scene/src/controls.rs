//! The 30 material buttons: one per material set for each ring.
//!
//! Buttons are named `{set}Button`, `{set}Button2` and `{set}Button3` for
//! the outer, middle and inner ring. They start disabled and are enabled
//! together once the material catalog is ready.

use ringlet_materials::MaterialKind;

use crate::body::BodyId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub name: String,
    pub body: BodyId,
    pub kind: MaterialKind,
    pub enabled: bool,
}

/// Name of the button assigning `kind` to `body`.
pub fn button_name(body: BodyId, kind: MaterialKind) -> String {
    let suffix = match body {
        BodyId::Outer => "",
        BodyId::Middle => "2",
        BodyId::Inner => "3",
    };
    format!("{}Button{suffix}", kind.name())
}

#[derive(Clone, Debug)]
pub struct ControlSurface {
    buttons: Vec<Button>,
}

impl Default for ControlSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlSurface {
    /// All buttons, disabled. Ordered by ring, then by set.
    pub fn new() -> Self {
        let buttons = BodyId::ALL
            .into_iter()
            .flat_map(|body| {
                MaterialKind::ALL.into_iter().map(move |kind| Button {
                    name: button_name(body, kind),
                    body,
                    kind,
                    enabled: false,
                })
            })
            .collect();
        Self { buttons }
    }

    pub fn enable_all(&mut self) {
        for button in &mut self.buttons {
            button.enabled = true;
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, name: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.name == name)
    }

    pub fn find(&self, body: BodyId, kind: MaterialKind) -> &Button {
        &self.buttons[body.index() * MaterialKind::COUNT + kind.index()]
    }

    /// Resolve a press. Unknown or disabled buttons yield `None`.
    pub fn press(&self, name: &str) -> Option<(BodyId, MaterialKind)> {
        self.button(name)
            .filter(|b| b.enabled)
            .map(|b| (b.body, b.kind))
    }

    pub fn is_enabled(&self) -> bool {
        self.buttons.iter().all(|b| b.enabled)
    }
}
