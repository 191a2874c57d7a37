//! The application-state object behind the whole page. Every input channel
//! funnels into a transition method here; the DOM layer only translates
//! events in and writes the returned position/transform out. Nothing in
//! this module touches web APIs, so all gesture semantics are testable
//! natively.

use std::collections::HashMap;

use crate::model::{
    catalog, normalize_deg, IconId, Point, Position, Transform, ARROW_SCALE_STEP, ROTATE_STEP_DEG,
    SCALE_MAX, SCALE_MIN,
};
use crate::state::{GesturePhase, GestureSession, Selection};

/// Mutable state of one icon. `position` stays `None` until the first drag
/// adopts the element's rendered offset; before that the icon sits at its
/// CSS-centered default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IconState {
    pub position: Option<Position>,
    pub transform: Transform,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(ArrowKey::Up),
            "ArrowDown" => Some(ArrowKey::Down),
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BoardState {
    icons: HashMap<IconId, IconState>,
    pub selection: Selection,
    session: Option<GestureSession>,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            icons: catalog()
                .into_iter()
                .map(|(id, _)| (id, IconState::default()))
                .collect(),
            selection: Selection::default(),
            session: None,
        }
    }

    pub fn icon(&self, id: IconId) -> Option<&IconState> {
        self.icons.get(&id)
    }

    /// Adopt the transform an element already carried when the engine
    /// attached. From here on the numeric fields are the source of truth.
    pub fn adopt_transform(&mut self, id: IconId, transform: Transform) {
        if let Some(icon) = self.icons.get_mut(&id) {
            icon.transform = transform;
        }
    }

    pub fn session_owner(&self) -> Option<IconId> {
        self.session.map(|s| s.icon)
    }

    /// Press on an icon: select it, adopt `rendered` as its position if it
    /// was never dragged before, and open a drag session anchored at `at`.
    /// Any previous session is implicitly replaced; there is only one
    /// gesture owner at a time.
    pub fn begin_drag(&mut self, id: IconId, at: Point, rendered: Position) -> Option<Position> {
        let icon = self.icons.get_mut(&id)?;
        let pos = *icon.position.get_or_insert(rendered);
        self.selection.select(id);
        self.session = Some(GestureSession {
            icon: id,
            phase: GesturePhase::Dragging { last: at },
        });
        Some(pos)
    }

    /// One pointer-move step. The delta is previous minus current, so
    /// dragging right moves the icon left; that inverted sign is the
    /// page's established convention and is kept on purpose.
    pub fn drag_move(&mut self, to: Point) -> Option<(IconId, Position)> {
        let session = self.session.as_mut()?;
        let GesturePhase::Dragging { last } = &mut session.phase else {
            return None;
        };
        let dx = last.x - to.x;
        let dy = last.y - to.y;
        *last = to;
        let icon = self.icons.get_mut(&session.icon)?;
        let pos = icon.position.as_mut()?;
        pos.left += dx;
        pos.top += dy;
        Some((session.icon, *pos))
    }

    /// A second finger landed: snapshot distance, angle and the icon's
    /// current transform as the pinch baseline.
    pub fn begin_two_finger(&mut self, p0: Point, p1: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(icon) = self.icons.get(&session.icon) else {
            return;
        };
        session.phase = GesturePhase::TwoFinger {
            start_distance: p0.distance(p1),
            start_angle: p0.angle_deg(p1),
            base: icon.transform,
        };
    }

    /// One two-touch move step: scale by the distance ratio against the
    /// baseline, rotate by the angle difference.
    pub fn two_finger_move(&mut self, p0: Point, p1: Point) -> Option<(IconId, Transform)> {
        let session = self.session.as_ref()?;
        let GesturePhase::TwoFinger {
            start_distance,
            start_angle,
            base,
        } = session.phase
        else {
            return None;
        };
        let id = session.icon;
        let icon = self.icons.get_mut(&id)?;
        if start_distance > 0.0 {
            icon.transform.scale = (base.scale * p0.distance(p1) / start_distance)
                .clamp(SCALE_MIN, SCALE_MAX);
        }
        icon.transform.rotation = normalize_deg(base.rotation + (p0.angle_deg(p1) - start_angle));
        Some((id, icon.transform))
    }

    /// Two touches dropped to one: the pinch baseline is discarded and the
    /// session falls back to a plain drag re-anchored at the surviving
    /// touch.
    pub fn two_finger_release(&mut self, survivor: Point) {
        if let Some(session) = self.session.as_mut() {
            if matches!(session.phase, GesturePhase::TwoFinger { .. }) {
                session.phase = GesturePhase::Dragging { last: survivor };
            }
        }
    }

    /// Release: closes the session and reports who owned it.
    pub fn end_session(&mut self) -> Option<IconId> {
        self.session.take().map(|s| s.icon)
    }

    pub fn scale_by(&mut self, id: IconId, delta: f64) -> Option<Transform> {
        let icon = self.icons.get_mut(&id)?;
        icon.transform.bump_scale(delta);
        Some(icon.transform)
    }

    pub fn rotate_by(&mut self, id: IconId, delta_deg: f64) -> Option<Transform> {
        let icon = self.icons.get_mut(&id)?;
        icon.transform.rotate_by(delta_deg);
        Some(icon.transform)
    }

    /// Keyboard arrows act on the current selection; ignored when nothing
    /// was ever selected. Reads and writes the same numeric transform as
    /// every other channel.
    pub fn arrow(&mut self, key: ArrowKey) -> Option<(IconId, Transform)> {
        let id = self.selection.active?;
        let t = match key {
            ArrowKey::Up => self.scale_by(id, ARROW_SCALE_STEP),
            ArrowKey::Down => self.scale_by(id, -ARROW_SCALE_STEP),
            ArrowKey::Left => self.rotate_by(id, -ROTATE_STEP_DEG),
            ArrowKey::Right => self.rotate_by(id, ROTATE_STEP_DEG),
        }?;
        Some((id, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IconKind, WHEEL_SCALE_STEP};

    fn plant(n: u32) -> IconId {
        IconId {
            kind: IconKind::Plant,
            index: n,
        }
    }

    fn animal(n: u32) -> IconId {
        IconId {
            kind: IconKind::Animal,
            index: n,
        }
    }

    fn pt(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn drag_uses_the_inverted_delta_convention() {
        let mut board = BoardState::new();
        let start = Position {
            top: 300.0,
            left: 200.0,
        };
        board.begin_drag(plant(1), pt(100.0, 100.0), start);
        let (id, pos) = board.drag_move(pt(80.0, 130.0)).unwrap();
        assert_eq!(id, plant(1));
        assert_eq!(pos.left, 220.0);
        assert_eq!(pos.top, 270.0);
    }

    #[test]
    fn drag_with_zero_net_movement_round_trips_position() {
        let mut board = BoardState::new();
        let start = Position {
            top: 50.0,
            left: 60.0,
        };
        board.begin_drag(plant(2), pt(10.0, 10.0), start);
        board.drag_move(pt(35.0, 5.0));
        board.drag_move(pt(12.0, 40.0));
        board.drag_move(pt(10.0, 10.0));
        assert_eq!(board.end_session(), Some(plant(2)));
        assert_eq!(board.icon(plant(2)).unwrap().position, Some(start));
    }

    #[test]
    fn press_adopts_rendered_offset_only_once() {
        let mut board = BoardState::new();
        let first = Position {
            top: 10.0,
            left: 10.0,
        };
        board.begin_drag(plant(3), pt(0.0, 0.0), first);
        board.drag_move(pt(-5.0, -5.0));
        board.end_session();
        // second press reports a different rendered offset; tracked state wins
        let moved = board.icon(plant(3)).unwrap().position.unwrap();
        let pos = board
            .begin_drag(plant(3), pt(0.0, 0.0), Position { top: 99.0, left: 99.0 })
            .unwrap();
        assert_eq!(pos, moved);
    }

    #[test]
    fn press_selects_and_reselect_is_idempotent() {
        let mut board = BoardState::new();
        board.begin_drag(animal(1), pt(0.0, 0.0), Position::default());
        assert_eq!(board.selection.active, Some(animal(1)));
        let snapshot = board.icon(animal(1)).copied();
        assert!(!board.selection.select(animal(1)));
        assert_eq!(board.icon(animal(1)).copied(), snapshot);
    }

    #[test]
    fn a_new_press_replaces_the_previous_session() {
        let mut board = BoardState::new();
        board.begin_drag(plant(1), pt(0.0, 0.0), Position::default());
        board.begin_drag(animal(2), pt(5.0, 5.0), Position::default());
        assert_eq!(board.session_owner(), Some(animal(2)));
        // moves now land on the new owner only
        let (id, _) = board.drag_move(pt(6.0, 6.0)).unwrap();
        assert_eq!(id, animal(2));
        assert_eq!(board.icon(plant(1)).unwrap().position, Some(Position::default()));
    }

    #[test]
    fn pinch_scales_by_distance_ratio() {
        let mut board = BoardState::new();
        board.begin_drag(plant(4), pt(0.0, 0.0), Position::default());
        board.begin_two_finger(pt(0.0, 0.0), pt(100.0, 0.0));
        let (_, t) = board
            .two_finger_move(pt(0.0, 0.0), pt(50.0, 0.0))
            .unwrap();
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn pinch_with_unit_ratio_and_zero_twist_is_a_noop() {
        let mut board = BoardState::new();
        board.adopt_transform(
            plant(5),
            Transform {
                scale: 1.7,
                rotation: 30.0,
            },
        );
        board.begin_drag(plant(5), pt(0.0, 0.0), Position::default());
        board.begin_two_finger(pt(10.0, 10.0), pt(40.0, 50.0));
        let (_, t) = board
            .two_finger_move(pt(110.0, 10.0), pt(140.0, 50.0))
            .unwrap();
        assert!((t.scale - 1.7).abs() < 1e-9);
        assert_eq!(t.rotation, 30.0);
    }

    #[test]
    fn pinch_twist_rotates_by_angle_difference() {
        let mut board = BoardState::new();
        board.begin_drag(plant(6), pt(0.0, 0.0), Position::default());
        board.begin_two_finger(pt(0.0, 0.0), pt(100.0, 0.0));
        let (_, t) = board
            .two_finger_move(pt(0.0, 0.0), pt(0.0, 100.0))
            .unwrap();
        assert!((t.rotation - 90.0).abs() < 1e-9);
        assert_eq!(t.scale, 1.0);
        // twist back past zero wraps into [0, 360)
        let (_, t) = board
            .two_finger_move(pt(0.0, 0.0), pt(100.0, -100.0))
            .unwrap();
        assert!((t.rotation - 315.0).abs() < 1e-9);
    }

    #[test]
    fn pinch_scale_respects_the_clamp() {
        let mut board = BoardState::new();
        board.begin_drag(plant(7), pt(0.0, 0.0), Position::default());
        board.begin_two_finger(pt(0.0, 0.0), pt(10.0, 0.0));
        let (_, t) = board
            .two_finger_move(pt(0.0, 0.0), pt(1000.0, 0.0))
            .unwrap();
        assert_eq!(t.scale, SCALE_MAX);
        let (_, t) = board
            .two_finger_move(pt(0.0, 0.0), pt(0.1, 0.0))
            .unwrap();
        assert_eq!(t.scale, SCALE_MIN);
    }

    #[test]
    fn two_to_one_transition_reanchors_the_drag() {
        let mut board = BoardState::new();
        board.begin_drag(plant(8), pt(0.0, 0.0), Position { top: 0.0, left: 0.0 });
        board.begin_two_finger(pt(0.0, 0.0), pt(100.0, 0.0));
        board.two_finger_release(pt(200.0, 200.0));
        // next move diffs against the surviving touch, not the stale anchor
        let (_, pos) = board.drag_move(pt(190.0, 205.0)).unwrap();
        assert_eq!(pos.left, 10.0);
        assert_eq!(pos.top, -5.0);
    }

    #[test]
    fn wheel_steps_accumulate_within_clamp() {
        let mut board = BoardState::new();
        let id = animal(3);
        for _ in 0..7 {
            board.scale_by(id, WHEEL_SCALE_STEP);
        }
        let t = board.icon(id).unwrap().transform;
        assert!((t.scale - 1.35).abs() < 1e-9);
        for _ in 0..100 {
            board.scale_by(id, -WHEEL_SCALE_STEP);
        }
        assert_eq!(board.icon(id).unwrap().transform.scale, SCALE_MIN);
    }

    #[test]
    fn six_context_menu_rotations_reach_ninety() {
        let mut board = BoardState::new();
        let id = animal(4);
        for _ in 0..6 {
            board.rotate_by(id, ROTATE_STEP_DEG);
        }
        assert_eq!(board.icon(id).unwrap().transform.rotation, 90.0);
    }

    #[test]
    fn arrows_are_ignored_without_a_selection() {
        let mut board = BoardState::new();
        assert_eq!(board.arrow(ArrowKey::Up), None);
    }

    #[test]
    fn arrows_drive_the_selected_icon() {
        let mut board = BoardState::new();
        board.begin_drag(plant(9), pt(0.0, 0.0), Position::default());
        board.end_session();
        let (id, t) = board.arrow(ArrowKey::Up).unwrap();
        assert_eq!(id, plant(9));
        assert!((t.scale - 1.1).abs() < 1e-9);
        let (_, t) = board.arrow(ArrowKey::Left).unwrap();
        assert_eq!(t.rotation, 345.0);
        let (_, t) = board.arrow(ArrowKey::Right).unwrap();
        assert_eq!(t.rotation, 0.0);
        let (_, t) = board.arrow(ArrowKey::Down).unwrap();
        assert!((t.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn keyboard_and_pinch_share_one_source_of_truth() {
        let mut board = BoardState::new();
        let id = plant(10);
        board.begin_drag(id, pt(0.0, 0.0), Position::default());
        board.begin_two_finger(pt(0.0, 0.0), pt(100.0, 0.0));
        board.two_finger_move(pt(0.0, 0.0), pt(200.0, 0.0));
        board.end_session();
        // arrow continues from the pinched scale, not from a stale copy
        let (_, t) = board.arrow(ArrowKey::Up).unwrap();
        assert!((t.scale - 2.1).abs() < 1e-9);
    }
}
