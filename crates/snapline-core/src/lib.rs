//! SnapLine Core Library
//!
//! Alignment guide lines for dragging graph nodes and combos: while an
//! element is dragged, every other node is tested for near-alignment and the
//! closest match per guide line slot is kept on the canvas.

pub mod bounds;
pub mod camera;
pub mod candidate;
pub mod events;
pub mod graph;
pub mod guide;
pub mod options;
pub mod plugin;
pub mod selector;
pub mod session;
pub mod style;

pub use bounds::{Axis, Bounds, Point3, Role};
pub use camera::{Camera, Viewport};
pub use candidate::{
    AlignCandidate, AlignModes, CandidateGenerator, DEFAULT_TOLERANCE, LineId, RolePair, Tolerance,
};
pub use events::{DragPhase, ElementDragEvent, EventBus, EventName, ListenerId, UnknownEvent};
pub use graph::{BoundsProvider, ElementId, ElementRecord, ElementType, GraphModel, MemoryGraph};
pub use guide::{GuideCanvas, GuideLines, ReconcileStats};
pub use options::{OptionsError, OptionsResult, PartialSnapLineOptions, SnapLineOptions};
pub use plugin::{RuntimeContext, SnapLine};
pub use selector::{CandidateSelector, SelectedCandidates};
pub use session::{DragSession, SessionState, select_alignments};
pub use style::{GuideLineStyle, SerializableColor};
