use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::MAX_DURATION_MONTHS;
use crate::core::{DocumentError, DocumentResult};

/// Campos que un tipo de documento puede exigir en la petición
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    Name,
    Amount,
    Duration,
    NominalRate,
    EffectiveRate,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::Name => "name",
            RequestField::Amount => "amount",
            RequestField::Duration => "duration",
            RequestField::NominalRate => "nominal_rate",
            RequestField::EffectiveRate => "effective_rate",
        }
    }
}

/// Petición de generación tal y como llega del llamador. Todos los campos son
/// opcionales: cada plantilla declara cuáles necesita.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRequest {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    /// Meses
    pub duration: Option<i64>,
    /// TAN, porcentaje anual
    #[serde(alias = "tan")]
    pub nominal_rate: Option<Decimal>,
    /// TAEG, porcentaje anual
    #[serde(alias = "taeg")]
    pub effective_rate: Option<Decimal>,
    /// Cuota mensual ya calculada; si falta se calcula
    pub payment: Option<Decimal>,
}

impl LoanRequest {
    pub fn for_borrower(name: impl Into<String>) -> Self {
        LoanRequest {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn has(&self, field: RequestField) -> bool {
        match field {
            RequestField::Name => self.name.is_some(),
            RequestField::Amount => self.amount.is_some(),
            RequestField::Duration => self.duration.is_some(),
            RequestField::NominalRate => self.nominal_rate.is_some(),
            RequestField::EffectiveRate => self.effective_rate.is_some(),
        }
    }

    /// Comprueba la presencia de los campos requeridos y después sus rangos.
    /// Los campos que el documento no requiere se descartan.
    pub fn to_terms(&self, required: &[RequestField]) -> DocumentResult<LoanTerms> {
        let missing: Vec<&str> = required
            .iter()
            .filter(|field| !self.has(**field))
            .map(|field| field.as_str())
            .collect();

        if !missing.is_empty() {
            return Err(DocumentError::TemplateBinding(format!(
                "campos requeridos faltantes: {}",
                missing.join(", ")
            )));
        }

        let wants = |field: RequestField| required.contains(&field);

        let borrower_name = self.name.as_deref().unwrap_or_default().trim().to_string();
        if borrower_name.is_empty() {
            return Err(DocumentError::InvalidTerms(
                "el nombre del titular no puede estar vacío".into(),
            ));
        }

        let principal = match self.amount.filter(|_| wants(RequestField::Amount)) {
            Some(amount) if amount <= Decimal::ZERO => {
                return Err(DocumentError::InvalidTerms(format!(
                    "el importe debe ser positivo (recibido {})",
                    amount
                )))
            }
            other => other,
        };

        let duration_months = match self.duration.filter(|_| wants(RequestField::Duration)) {
            Some(months) if months <= 0 => {
                return Err(DocumentError::InvalidTerms(format!(
                    "la duración debe ser positiva (recibido {})",
                    months
                )))
            }
            Some(months) if months > i64::from(MAX_DURATION_MONTHS) => {
                return Err(DocumentError::InvalidTerms(format!(
                    "la duración no puede superar {} meses (recibido {})",
                    MAX_DURATION_MONTHS, months
                )))
            }
            Some(months) => Some(u32::try_from(months).map_err(|_| {
                DocumentError::InvalidTerms(format!("duración fuera de rango: {}", months))
            })?),
            None => None,
        };

        let nominal_rate = non_negative_rate(
            self.nominal_rate.filter(|_| wants(RequestField::NominalRate)),
            "TAN",
        )?;
        let effective_rate = non_negative_rate(
            self.effective_rate.filter(|_| wants(RequestField::EffectiveRate)),
            "TAEG",
        )?;

        // La cuota solo se imprime en documentos con plazo
        let monthly_payment = match self.payment.filter(|_| wants(RequestField::Duration)) {
            Some(payment) if payment <= Decimal::ZERO => {
                return Err(DocumentError::InvalidTerms(format!(
                    "la cuota debe ser positiva (recibido {})",
                    payment
                )))
            }
            other => other,
        };

        Ok(LoanTerms {
            borrower_name,
            principal,
            duration_months,
            nominal_rate,
            effective_rate,
            monthly_payment,
        })
    }
}

fn non_negative_rate(rate: Option<Decimal>, label: &str) -> DocumentResult<Option<Decimal>> {
    match rate {
        Some(value) if value.is_sign_negative() && !value.is_zero() => Err(
            DocumentError::InvalidTerms(format!("{} no puede ser negativo (recibido {})", label, value)),
        ),
        other => Ok(other),
    }
}

/// Condiciones validadas de una petición. Inmutables una vez construidas.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    pub borrower_name: String,
    pub principal: Option<Decimal>,
    pub duration_months: Option<u32>,
    pub nominal_rate: Option<Decimal>,
    pub effective_rate: Option<Decimal>,
    pub monthly_payment: Option<Decimal>,
}
