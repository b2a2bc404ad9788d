use once_cell::sync::Lazy;

use crate::models::{DocumentType, RequestField};
use crate::templates::corrections::Correction;
use crate::templates::template_trait::{Binding, Field, LoanTemplate};

const GUARANTEE_CSS: &str = r#"
@page { size: A4; margin: 1cm; border: 4pt solid #a52b4c; padding: 0; }
.c8 { padding: 0 2cm !important; max-width: none !important; }
* { page-break-after: avoid !important; page-break-inside: avoid !important; page-break-before: avoid !important; }
@page:nth(2) { display: none !important; }
"#;

const REQUIRED: &[RequestField] = &[RequestField::Name];

const BINDINGS: &[Binding] = &[Binding::next("XXX", Field::BorrowerName)];

// Todas las imágenes se quitan: membrete, sello y firma van superpuestos
static CORRECTIONS: Lazy<Vec<Correction>> = Lazy::new(|| {
    vec![
        Correction::remove(r"<img[^>]*>"),
        Correction::replace(r"<span[^>]*overflow:[^>]*>[^<]*</span>", "<br><br>"),
        Correction::inject_style("guarantee", GUARANTEE_CSS),
    ]
});

/// Carta de garantía; solo necesita el nombre del titular
pub struct GuaranteeTemplate;

impl GuaranteeTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl LoanTemplate for GuaranteeTemplate {
    fn document_type(&self) -> DocumentType {
        DocumentType::Guarantee
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
        "Carta de garantía a nombre del titular"
    }
}
