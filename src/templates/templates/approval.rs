use once_cell::sync::Lazy;

use super::letter::letter_corrections;
use crate::models::{DocumentType, RequestField};
use crate::templates::corrections::Correction;
use crate::templates::template_trait::{Binding, Field, LoanTemplate};

const REQUIRED: &[RequestField] = &[RequestField::Name, RequestField::Amount, RequestField::NominalRate];

const BINDINGS: &[Binding] = &[
    Binding::next("XXX", Field::BorrowerName),
    Binding::next("XXX", Field::Amount),
    Binding::next("XXX", Field::NominalRate),
];

static CORRECTIONS: Lazy<Vec<Correction>> = Lazy::new(|| letter_corrections("approval"));

pub struct ApprovalTemplate;

impl ApprovalTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl LoanTemplate for ApprovalTemplate {
    fn document_type(&self) -> DocumentType {
        DocumentType::Approval
    }

    fn required_fields(&self) -> &'static [RequestField] {
        REQUIRED
    }

    fn bindings(&self) -> &'static [Binding] {
        BINDINGS
    }

    fn corrections(&self) -> &'static [Correction] {
        &CORRECTIONS
    }

    fn description(&self) -> &str {
        "Carta de aprobación del préstamo"
    }
}
