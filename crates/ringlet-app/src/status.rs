//! Window-title status line.

use ringlet_materials::LoadProgress;
use ringlet_scene::{MaterialSlot, RotatingBody};

/// Title showing load progress, or the material on each ring once loaded.
pub fn status_title(base: &str, progress: Option<LoadProgress>, bodies: &[RotatingBody]) -> String {
    match progress {
        // Failed textures are logged by the loader only; the title keeps
        // showing the stalled count.
        Some(p) if !p.is_complete() => format!("{base} | loading textures {}/{}", p.loaded, p.total),
        _ => {
            let names: Vec<String> = bodies
                .iter()
                .map(|body| match body.material() {
                    MaterialSlot::Placeholder => "-".to_string(),
                    MaterialSlot::Set(kind) => kind.to_string(),
                })
                .collect();
            format!("{base} | {}", names.join(" / "))
        }
    }
}

#[cfg(test)]
mod tests {
    use ringlet_scene::BodyId;

    use super::*;

    fn bodies() -> Vec<RotatingBody> {
        BodyId::ALL.into_iter().map(RotatingBody::new).collect()
    }

    #[test]
    fn test_loading_progress() {
        let progress = LoadProgress {
            loaded: 5,
            failed: 0,
            total: 33,
        };
        assert_eq!(
            status_title("ringlet", Some(progress), &bodies()),
            "ringlet | loading textures 5/33"
        );
    }

    #[test]
    fn test_stalled_load_shows_no_failure() {
        let progress = LoadProgress {
            loaded: 32,
            failed: 1,
            total: 33,
        };
        let title = status_title("ringlet", Some(progress), &bodies());
        assert_eq!(title, "ringlet | loading textures 32/33");
        assert!(!title.contains("fail"));
    }

    #[test]
    fn test_placeholders_after_load() {
        assert_eq!(status_title("ringlet", None, &bodies()), "ringlet | - / - / -");
    }
}
