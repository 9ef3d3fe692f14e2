pub mod surface;
pub mod canvas;
pub mod path;
pub mod recording;

pub use surface::Surface;
pub use canvas::CanvasSurface;
pub use path::{Outline, Segment};
pub use recording::{RecordingSurface, DrawCommand, Paint};
