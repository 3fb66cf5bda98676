pub mod chat;
pub mod gesture;
pub mod history;
pub mod hit;
pub mod input;
pub mod session;
pub mod shortcuts;

pub use chat::{ChatCommand, Interpretation, interpret};
pub use gesture::{Gesture, GestureKind, GesturePhase};
pub use history::History;
pub use input::{HitTarget, InputEvent, Modifiers};
pub use session::{EditorSession, RenderItem, RenderPlan};
pub use shortcuts::{ShortcutAction, ShortcutMap};
