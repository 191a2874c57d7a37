pub mod board;
pub mod gesture;
pub mod selection;

pub use board::{ArrowKey, BoardState, IconState};
pub use gesture::{GesturePhase, GestureSession};
pub use selection::Selection;
