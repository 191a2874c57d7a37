use crate::model::{IconId, Point, Transform};

/// Phase of the one in-flight gesture. Idle is the absence of a
/// [`GestureSession`]; the variants here only exist between press and
/// release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase {
    /// Single pointer held down; `last` is the previous pointer point the
    /// next move event diffs against.
    Dragging { last: Point },
    /// Exactly two touches held down. Distance/angle between them at the
    /// moment the second finger landed, plus the icon's transform at that
    /// moment as the baseline the whole pinch scales/twists from.
    TwoFinger {
        start_distance: f64,
        start_angle: f64,
        base: Transform,
    },
}

/// The transient per-interaction state. At most one exists at a time;
/// whichever icon most recently started a press owns it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub icon: IconId,
    pub phase: GesturePhase,
}
