use once_cell::sync::Lazy;

use super::letter::letter_corrections;
use crate::models::{DocumentType, RequestField};
use crate::templates::corrections::Correction;
use crate::templates::template_trait::{Binding, Field, LoanTemplate};

const REQUIRED: &[RequestField] = &[
    RequestField::Name,
    RequestField::Amount,
    RequestField::Duration,
    RequestField::NominalRate,
];

const BINDINGS: &[Binding] = &[
    Binding::next("XXX", Field::BorrowerName),
    Binding::next("XXX", Field::Amount),
    Binding::next("XXX", Field::NominalRate),
    Binding::next("XXX", Field::Duration),
    Binding::next("XXX", Field::MonthlyPayment),
];

static CORRECTIONS: Lazy<Vec<Correction>> = Lazy::new(|| letter_corrections("card"));

/// Carta de concesión de la tarjeta de crédito
pub struct CardTemplate;

impl CardTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl LoanTemplate for CardTemplate {
    fn document_type(&self) -> DocumentType {
        DocumentType::Card
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
        "Carta de concesión de tarjeta con importe, TAN, duración y cuota"
    }
}
