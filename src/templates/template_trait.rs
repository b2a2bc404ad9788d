use std::collections::HashMap;
use std::sync::Arc;

use super::binding::Placeholder;
use super::corrections::Correction;
use crate::core::DocumentResult;
use crate::models::{DocumentType, LoanRequest, LoanTerms, RequestField};

/// Valor calculado que una plantilla puede pedir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BorrowerName,
    Amount,
    NominalRate,
    EffectiveRate,
    Duration,
    MonthlyPayment,
    IssueDate,
    AmortizationTable,
    /// Tipo mensual con diez decimales
    ScheduleMonthlyRate,
    /// Cuota precedida del símbolo `€`
    ScheduleMonthlyPayment,
    ScheduleTotalPayments,
    ScheduleOverpayment,
}

impl Field {
    pub fn needs_schedule(&self) -> bool {
        matches!(
            self,
            Field::AmortizationTable
                | Field::ScheduleMonthlyRate
                | Field::ScheduleMonthlyPayment
                | Field::ScheduleTotalPayments
                | Field::ScheduleOverpayment
        )
    }
}

/// Entrada del plan de enlace: qué marcador recibe qué valor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub placeholder: Placeholder,
    pub field: Field,
}

impl Binding {
    pub const fn next(token: &'static str, field: Field) -> Self {
        Binding {
            placeholder: Placeholder::Next(token),
            field,
        }
    }

    pub const fn named(token: &'static str, field: Field) -> Self {
        Binding {
            placeholder: Placeholder::Named(token),
            field,
        }
    }
}

/// Trait base para las plantillas de documentos de préstamo
pub trait LoanTemplate: Send + Sync {
    fn document_type(&self) -> DocumentType;

    /// Campos de la petición sin los que no se puede generar el documento
    fn required_fields(&self) -> &'static [RequestField];

    /// Plan de enlace, en el orden en que aparecen los marcadores
    fn bindings(&self) -> &'static [Binding];

    /// Correcciones de maquetación, aplicadas antes del enlace
    fn corrections(&self) -> &'static [Correction];

    fn description(&self) -> &str {
        "Documento de préstamo"
    }

    fn validate(&self, request: &LoanRequest) -> DocumentResult<LoanTerms> {
        request.to_terms(self.required_fields())
    }

    fn needs_schedule(&self) -> bool {
        self.bindings().iter().any(|b| b.field.needs_schedule())
    }
}

/// Registry central de todas las plantillas disponibles
pub struct TemplateRegistry {
    templates: HashMap<DocumentType, Arc<dyn LoanTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        use crate::templates::templates::*;

        let available: [Arc<dyn LoanTemplate>; 4] = [
            Arc::new(ContractTemplate::new()),
            Arc::new(GuaranteeTemplate::new()),
            Arc::new(CardTemplate::new()),
            Arc::new(ApprovalTemplate::new()),
        ];

        let templates = available
            .into_iter()
            .map(|template| (template.document_type(), template))
            .collect();

        Self { templates }
    }

    pub fn get(&self, document_type: DocumentType) -> Option<Arc<dyn LoanTemplate>> {
        self.templates.get(&document_type).cloned()
    }

    /// Tipos disponibles con su descripción, en orden estable
    pub fn list(&self) -> Vec<(DocumentType, String)> {
        DocumentType::ALL
            .iter()
            .filter_map(|document_type| {
                self.templates
                    .get(document_type)
                    .map(|template| (*document_type, template.description().to_string()))
            })
            .collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
