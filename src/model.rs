//! Core data model for the icon garden: the fixed icon catalog plus the
//! numeric position/transform state that every input channel reads and
//! writes. Keeping scale/rotation as plain numbers here (instead of
//! re-parsing the rendered transform string per event) is what keeps the
//! keyboard path and the pointer path from drifting apart.

use std::fmt;

pub const SCALE_MIN: f64 = 0.3;
pub const SCALE_MAX: f64 = 3.0;
/// Scale step per wheel notch while a press is held.
pub const WHEEL_SCALE_STEP: f64 = 0.05;
/// Scale step for ArrowUp/ArrowDown.
pub const ARROW_SCALE_STEP: f64 = 0.1;
/// Rotation step for right-click and ArrowLeft/ArrowRight.
pub const ROTATE_STEP_DEG: f64 = 15.0;

/// DOM id of the status text region; status updates are no-ops without it.
pub const STATUS_REGION_ID: &str = "status-bar";
pub const IDLE_PROMPT: &str =
    "Drag, pinch, scroll, right-click or use arrow keys to arrange the garden";

/// Glyphs for the fixed catalog, 1-indexed by position.
const PLANT_GLYPHS: [&str; 14] = [
    "🌱", "🌿", "🍀", "🌵", "🌴", "🌳", "🌲", "🌷", "🌻", "🌹", "🌺", "🍄", "💐", "🌾",
];
const ANIMAL_GLYPHS: [&str; 7] = ["🐰", "🐱", "🐶", "🦊", "🐸", "🐢", "🦋"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconKind {
    Plant,
    Animal,
}

impl IconKind {
    fn prefix(self) -> &'static str {
        match self {
            IconKind::Plant => "plant",
            IconKind::Animal => "animal",
        }
    }
}

/// Stable identity of one manipulable icon; `index` is 1-based to match the
/// DOM ids (`plant1`..`plant14`, `animal1`..`animal7`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconId {
    pub kind: IconKind,
    pub index: u32,
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index)
    }
}

/// Status line published on every drag move, with the latest pointer
/// coordinates.
pub fn drag_status(id: IconId, x: i32, y: i32) -> String {
    format!("Dragging {} | X:{}, Y:{}", id, x, y)
}

/// The full fixed list of manipulable icons with their glyphs. Adding or
/// removing icons means editing the glyph arrays above.
pub fn catalog() -> Vec<(IconId, &'static str)> {
    let plants = PLANT_GLYPHS.iter().enumerate().map(|(i, g)| {
        (
            IconId {
                kind: IconKind::Plant,
                index: i as u32 + 1,
            },
            *g,
        )
    });
    let animals = ANIMAL_GLYPHS.iter().enumerate().map(|(i, g)| {
        (
            IconId {
                kind: IconKind::Animal,
                index: i as u32 + 1,
            },
            *g,
        )
    });
    plants.chain(animals).collect()
}

/// A pointer location in client (viewport) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the segment self→other in degrees, atan2 convention.
    pub fn angle_deg(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

/// Pixel offset of an icon inside its container. Only tracked once a drag
/// has adopted the element's rendered offset; before that the icon sits at
/// its CSS default (centered).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

pub fn clamp_scale(v: f64) -> f64 {
    v.clamp(SCALE_MIN, SCALE_MAX)
}

/// Reduce an angle to [0, 360). Wraps both directions.
pub fn normalize_deg(v: f64) -> f64 {
    v.rem_euclid(360.0)
}

/// Composed scale + rotation of one icon. Invariants hold on every
/// mutation: scale stays in [0.3, 3.0], rotation in [0, 360).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn bump_scale(&mut self, delta: f64) {
        self.scale = clamp_scale(self.scale + delta);
    }

    pub fn rotate_by(&mut self, delta_deg: f64) {
        self.rotation = normalize_deg(self.rotation + delta_deg);
    }

    /// Render the CSS transform. Translate must stay first so the icon's
    /// visual center is fixed under scaling and rotation.
    pub fn css(&self) -> String {
        format!(
            "translate(-50%, -50%) scale({}) rotate({}deg)",
            self.scale, self.rotation
        )
    }

    /// Recover scale/rotation from a rendered transform string. Any missing
    /// or malformed component falls back to the default (scale 1, rotation
    /// 0). Only used once, when adopting whatever transform an element
    /// already carries at attach time.
    pub fn parse(s: &str) -> Self {
        let mut t = Transform::default();
        if let Some(v) = number_after(s, "scale(") {
            t.scale = clamp_scale(v);
        }
        if let Some(v) = number_after(s, "rotate(") {
            t.rotation = normalize_deg(v);
        }
        t
    }
}

fn number_after(s: &str, marker: &str) -> Option<f64> {
    let at = s.find(marker)? + marker.len();
    let rest = &s[at..];
    let end = rest.find(')')?;
    rest[..end].trim().trim_end_matches("deg").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_fourteen_plants_and_seven_animals() {
        let cat = catalog();
        assert_eq!(cat.len(), 21);
        assert_eq!(cat[0].0.to_string(), "plant1");
        assert_eq!(cat[13].0.to_string(), "plant14");
        assert_eq!(cat[14].0.to_string(), "animal1");
        assert_eq!(cat[20].0.to_string(), "animal7");
    }

    #[test]
    fn drag_status_has_the_published_shape() {
        let id = IconId {
            kind: IconKind::Plant,
            index: 1,
        };
        assert_eq!(drag_status(id, 80, 130), "Dragging plant1 | X:80, Y:130");
    }

    #[test]
    fn scale_clamps_at_both_ends() {
        let mut t = Transform::default();
        for _ in 0..100 {
            t.bump_scale(ARROW_SCALE_STEP);
        }
        assert_eq!(t.scale, SCALE_MAX);
        for _ in 0..100 {
            t.bump_scale(-ARROW_SCALE_STEP);
        }
        assert_eq!(t.scale, SCALE_MIN);
    }

    #[test]
    fn seven_wheel_steps_up_from_one() {
        let mut t = Transform::default();
        for _ in 0..7 {
            t.bump_scale(WHEEL_SCALE_STEP);
        }
        assert!((t.scale - 1.35).abs() < 1e-9);
    }

    #[test]
    fn rotation_wraps_both_directions() {
        let mut t = Transform::default();
        t.rotate_by(-ROTATE_STEP_DEG);
        assert_eq!(t.rotation, 345.0);
        t.rotate_by(ROTATE_STEP_DEG);
        assert_eq!(t.rotation, 0.0);
        for _ in 0..24 {
            t.rotate_by(ROTATE_STEP_DEG);
        }
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn six_right_click_steps_reach_ninety() {
        let mut t = Transform::default();
        for _ in 0..6 {
            t.rotate_by(ROTATE_STEP_DEG);
        }
        assert_eq!(t.rotation, 90.0);
    }

    #[test]
    fn css_keeps_translate_first() {
        let t = Transform {
            scale: 1.5,
            rotation: 45.0,
        };
        assert_eq!(t.css(), "translate(-50%, -50%) scale(1.5) rotate(45deg)");
        assert!(t.css().starts_with("translate(-50%, -50%)"));
    }

    #[test]
    fn parse_round_trips_css() {
        let t = Transform {
            scale: 2.25,
            rotation: 120.0,
        };
        assert_eq!(Transform::parse(&t.css()), t);
    }

    #[test]
    fn parse_of_malformed_string_falls_back_to_defaults() {
        assert_eq!(Transform::parse(""), Transform::default());
        assert_eq!(Transform::parse("rotate(3d6deg)"), Transform::default());
        assert_eq!(
            Transform::parse("scale(abc) rotate(junk"),
            Transform::default()
        );
        // one good component still parses
        let t = Transform::parse("scale(0.5) rotate(nope)");
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn two_finger_geometry_helpers() {
        let a = Point { x: 0.0, y: 0.0 };
        let b = Point { x: 3.0, y: 4.0 };
        assert_eq!(a.distance(b), 5.0);
        let r = Point { x: 10.0, y: 0.0 };
        assert_eq!(a.angle_deg(r), 0.0);
        let d = Point { x: 0.0, y: 10.0 };
        assert!((a.angle_deg(d) - 90.0).abs() < 1e-9);
    }
}
