use chrono::NaiveDate;
use minijinja::HtmlEscape;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::binding::{bind, Placeholder};
use super::corrections::apply_corrections;
use super::engine::FragmentEngine;
use super::loader::TemplateLoader;
use super::template_trait::{Field, LoanTemplate, TemplateRegistry};
use crate::amortization::{self, AmortizationSchedule};
use crate::core::{format_date, format_money, format_months, format_percent, DocumentError, DocumentResult};
use crate::models::{DocumentType, LoanTerms};

/// Carga la plantilla, aplica sus correcciones y enlaza los valores calculados
pub struct TemplateAssembler {
    loader: Arc<dyn TemplateLoader>,
    registry: Arc<TemplateRegistry>,
    fragments: FragmentEngine,
}

impl TemplateAssembler {
    pub fn new(loader: Arc<dyn TemplateLoader>) -> DocumentResult<Self> {
        Ok(Self {
            loader,
            registry: Arc::new(TemplateRegistry::new()),
            fragments: FragmentEngine::new()?,
        })
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn template(&self, document_type: DocumentType) -> DocumentResult<Arc<dyn LoanTemplate>> {
        self.registry
            .get(document_type)
            .ok_or_else(|| DocumentError::UnsupportedDocumentType(document_type.to_string()))
    }

    pub fn assemble(
        &self,
        document_type: DocumentType,
        terms: &LoanTerms,
        schedule: Option<&AmortizationSchedule>,
        issue_date: NaiveDate,
    ) -> DocumentResult<String> {
        let template = self.template(document_type)?;

        let raw = self.loader.load(document_type)?;
        let corrected = apply_corrections(&raw, template.corrections());

        let values = BindingValues {
            terms,
            schedule,
            issue_date,
            fragments: &self.fragments,
        };

        let plan = template
            .bindings()
            .iter()
            .map(|binding| -> DocumentResult<(Placeholder, String)> {
                Ok((binding.placeholder, values.resolve(binding.field)?))
            })
            .collect::<DocumentResult<Vec<_>>>()?;

        let html = bind(&corrected, &plan)?;

        tracing::debug!(
            document_type = %document_type,
            bindings = plan.len(),
            "template assembled ({} bytes)",
            html.len()
        );

        Ok(html)
    }
}

struct BindingValues<'a> {
    terms: &'a LoanTerms,
    schedule: Option<&'a AmortizationSchedule>,
    issue_date: NaiveDate,
    fragments: &'a FragmentEngine,
}

impl BindingValues<'_> {
    fn resolve(&self, field: Field) -> DocumentResult<String> {
        let value = match field {
            Field::BorrowerName => HtmlEscape(&self.terms.borrower_name).to_string(),
            Field::Amount => format_money(self.principal()?),
            Field::NominalRate => format_percent(self.nominal_rate()?),
            Field::EffectiveRate => format_percent(
                self.terms
                    .effective_rate
                    .ok_or_else(|| unavailable("effective_rate"))?,
            ),
            Field::Duration => format_months(self.duration()?),
            Field::MonthlyPayment => format_money(self.payment()?),
            Field::IssueDate => format_date(self.issue_date),
            Field::AmortizationTable => self.fragments.amortization_table(self.schedule()?)?,
            Field::ScheduleMonthlyRate => {
                let rate = amortization::monthly_rate(self.nominal_rate()?).round_dp(10);
                format!("{:.10}", rate)
            }
            Field::ScheduleMonthlyPayment => euro(self.payment()?),
            Field::ScheduleTotalPayments => euro(self.total_payments()?),
            Field::ScheduleOverpayment => euro(
                self.total_payments()?
                    .checked_sub(self.principal()?)
                    .ok_or_else(|| unavailable("overpayment"))?,
            ),
        };
        Ok(value)
    }

    fn principal(&self) -> DocumentResult<Decimal> {
        self.terms.principal.ok_or_else(|| unavailable("amount"))
    }

    fn nominal_rate(&self) -> DocumentResult<Decimal> {
        self.terms.nominal_rate.ok_or_else(|| unavailable("nominal_rate"))
    }

    fn duration(&self) -> DocumentResult<u32> {
        self.terms.duration_months.ok_or_else(|| unavailable("duration"))
    }

    /// La cuota indicada por el llamador, o la calculada si no la hay
    fn payment(&self) -> DocumentResult<Decimal> {
        match self.terms.monthly_payment {
            Some(payment) => Ok(payment),
            None => amortization::monthly_payment(self.principal()?, self.duration()?, self.nominal_rate()?),
        }
    }

    /// Cuota impresa por número de meses, coherente con la cuota mostrada
    fn total_payments(&self) -> DocumentResult<Decimal> {
        self.payment()?
            .checked_mul(Decimal::from(self.duration()?))
            .ok_or_else(|| unavailable("total_payments"))
    }

    fn schedule(&self) -> DocumentResult<&AmortizationSchedule> {
        self.schedule
            .ok_or_else(|| DocumentError::TemplateBinding("el cuadro de amortización no está disponible".into()))
    }
}

fn euro(amount: Decimal) -> String {
    format!("€ {}", format_money(amount))
}

fn unavailable(field: &str) -> DocumentError {
    DocumentError::TemplateBinding(format!("valor no disponible para el enlace: {}", field))
}
