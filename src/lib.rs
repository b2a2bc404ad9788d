pub mod amortization;
pub mod api;
pub mod core;
pub mod generators;
pub mod layout;
pub mod models;
pub mod pdf;
pub mod templates;

// Re-export commonly used types
pub use amortization::{build_schedule, monthly_payment, AmortizationEntry, AmortizationSchedule};
pub use core::{DocumentError, DocumentResult, GeneratorConfig};
pub use generators::{AssembledDocument, PdfGenerator, PipelineStage};
pub use models::{DocumentType, LoanRequest, LoanTerms};
pub use pdf::OverlayOutcome;
