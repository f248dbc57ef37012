pub mod autosave;
pub mod input;
pub mod mutation;
pub mod session;
pub mod shortcuts;
pub mod state;

pub use autosave::Autosave;
pub use input::{InputEvent, Modifiers, PointerButton};
pub use mutation::{Applied, SceneMutation};
pub use session::{CanvasHandle, CanvasSession, EventOutcome};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use state::{Gesture, InteractionState};
