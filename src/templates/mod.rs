pub mod binding;
pub mod corrections;
pub mod engine;
pub mod loader;
pub mod template_engine;
pub mod template_trait;
pub mod templates;

pub use binding::{bind, Placeholder};
pub use corrections::{apply_corrections, Correction};
pub use engine::{FragmentEngine, AMORTIZATION_HEADERS};
pub use loader::{FileTemplateLoader, StaticTemplateLoader, TemplateLoader};
pub use template_engine::TemplateAssembler;
pub use template_trait::{Binding, Field, LoanTemplate, TemplateRegistry};
