use once_cell::sync::Lazy;

use crate::models::{DocumentType, RequestField};
use crate::templates::corrections::Correction;
use crate::templates::template_trait::{Binding, Field, LoanTemplate};

/// El contrato fluye en varias páginas; solo se normalizan márgenes y bordes
const CONTRACT_CSS: &str = r#"
@page { size: A4; margin: 1cm; border: 4pt solid #a52b4c; padding: 0; }
body { font-family: "Roboto Mono", monospace; font-size: 10pt; line-height: 1.0; margin: 0; padding: 0 2cm; }
.c17, .c23 { border: none !important; padding: 0 !important; }
.c20 { border: none !important; padding: 3mm !important; margin: 0 !important; }
.page-break { page-break-before: always; }
p { margin: 2pt 0 !important; padding: 0 !important; line-height: 1.0 !important; }
div { margin: 0 !important; padding: 0 !important; }
table { margin: 3pt 0 !important; font-size: 10pt !important; }
.c22 { max-width: none !important; padding: 0 !important; margin: 0 !important; border: none !important; }
.c14, .c25 { margin-left: 0 !important; }
.c15 { font-size: 14pt !important; margin: 4pt 0 !important; font-weight: 700 !important; }
.c10 { font-size: 12pt !important; margin: 3pt 0 !important; font-weight: 700 !important; }
.c6:empty { height: 0pt !important; margin: 0 !important; padding: 0 !important; }
.c3 { margin: 1pt 0 !important; }
.c1, .c16 { background-color: transparent !important; background: none !important; }
"#;

/// Fecha de ejemplo que trae la plantilla exportada; se sustituye por la de emisión
pub const SAMPLE_ISSUE_DATE: &str = "11/06/2025";

const REQUIRED: &[RequestField] = &[
    RequestField::Name,
    RequestField::Amount,
    RequestField::Duration,
    RequestField::NominalRate,
    RequestField::EffectiveRate,
];

const BINDINGS: &[Binding] = &[
    Binding::named("{{AMORTIZATION_TABLE}}", Field::AmortizationTable),
    Binding::next("XXX", Field::BorrowerName),
    Binding::next("XXX", Field::Amount),
    Binding::next("XXX", Field::NominalRate),
    Binding::next("XXX", Field::EffectiveRate),
    Binding::next("XXX", Field::Duration),
    Binding::next("XXX", Field::MonthlyPayment),
    Binding::next(SAMPLE_ISSUE_DATE, Field::IssueDate),
    Binding::next("XXX", Field::BorrowerName),
    Binding::named("PAYMENT_SCHEDULE_MONTHLY_RATE", Field::ScheduleMonthlyRate),
    Binding::named("PAYMENT_SCHEDULE_MONTHLY_PAYMENT", Field::ScheduleMonthlyPayment),
    Binding::named("PAYMENT_SCHEDULE_TOTAL_PAYMENTS", Field::ScheduleTotalPayments),
    Binding::named("PAYMENT_SCHEDULE_OVERPAYMENT", Field::ScheduleOverpayment),
];

static CORRECTIONS: Lazy<Vec<Correction>> = Lazy::new(|| {
    vec![
        Correction::inject_style("contract", CONTRACT_CSS),
        // Bloque de imágenes entre secciones; el logotipo se superpone después
        Correction::remove(concat!(
            r#"<p class="c3"><span style="overflow: hidden[^>]*><img alt="" src="images/image1\.png"[^>]*></span>"#,
            r#"<span style="overflow: hidden[^>]*><img alt="" src="images/image2\.png"[^>]*></span>"#,
            r#"<span style="overflow: hidden[^>]*><img alt="" src="images/image4\.png"[^>]*></span></p>"#,
        )),
        Correction::remove_trailing(r#"<div><p class="c6 c18"><span class="c7 c23"></span></p></div>"#),
        Correction::remove_trailing(r#"<p class="c3 c6"><span class="c7 c12"></span></p>"#),
        Correction::remove_trailing(r#"<p class="c6 c24"><span class="c7 c12"></span></p>"#),
        Correction::auto_height("c13"),
        Correction::auto_height("c19"),
        Correction::auto_height("c5"),
        Correction::auto_height("c9"),
        Correction::CollapseTallRules,
    ]
});

/// Contrato de préstamo con cuadro de amortización completo
pub struct ContractTemplate;

impl ContractTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl LoanTemplate for ContractTemplate {
    fn document_type(&self) -> DocumentType {
        DocumentType::Contract
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
        "Contrato de préstamo con cuadro de amortización"
    }
}
