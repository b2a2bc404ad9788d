// Exportar todas las plantillas disponibles

mod approval;
mod card;
mod contract;
mod guarantee;
mod letter;

pub use approval::ApprovalTemplate;
pub use card::CardTemplate;
pub use contract::{ContractTemplate, SAMPLE_ISSUE_DATE};
pub use guarantee::GuaranteeTemplate;
