pub mod pdf;

pub use pdf::{AssembledDocument, PdfGenerator, PipelineStage};
