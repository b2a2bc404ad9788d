pub mod compositor;
pub mod metrics;
pub mod overlay;
pub mod renderer;

pub use compositor::{LopdfMergeEngine, PageDocument, PageMergeEngine};
pub use metrics::{ImageDimensions, ImageMetrics};
pub use overlay::{OverlayComposer, OverlayDraw, OverlayOutcome, OverlayPage};
pub use renderer::{HtmlRenderer, WeasyPrintRenderer};
