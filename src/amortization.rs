//! Cálculo de la cuota (método francés) y del cuadro de amortización.
//!
//! Todas las cifras se redondean a céntimos en el momento de calcularlas, de
//! forma que el cuadro que se imprime es exactamente el que se ha calculado.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::{round_money, DocumentError, DocumentResult};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);
const NEGLIGIBLE_BALANCE: Decimal = dec!(0.01);

/// Plazo máximo admitido (50 años)
pub const MAX_DURATION_MONTHS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationEntry {
    pub period: u32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationSchedule {
    pub principal: Decimal,
    pub annual_rate: Decimal,
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    /// Suma de las cuotas del cuadro
    pub fn total_payments(&self) -> DocumentResult<Decimal> {
        checked_sum(self.entries.iter().map(|e| e.payment))
    }

    pub fn total_interest(&self) -> DocumentResult<Decimal> {
        checked_sum(self.entries.iter().map(|e| e.interest))
    }

    /// Lo pagado por encima del capital prestado
    pub fn overpayment(&self) -> DocumentResult<Decimal> {
        self.total_payments()?
            .checked_sub(self.principal)
            .ok_or_else(out_of_range)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tipo de interés mensual a partir del TAN anual en porcentaje
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

fn out_of_range() -> DocumentError {
    DocumentError::InvalidTerms("condiciones fuera del rango representable".into())
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> DocumentResult<Decimal> {
    values.try_fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).ok_or_else(out_of_range)
    })
}

fn validate_terms(principal: Decimal, months: u32, annual_rate_percent: Decimal) -> DocumentResult<()> {
    if months == 0 {
        return Err(DocumentError::InvalidTerms(
            "la duración debe ser de al menos un mes".into(),
        ));
    }
    if months > MAX_DURATION_MONTHS {
        return Err(DocumentError::InvalidTerms(format!(
            "la duración no puede superar {} meses (recibido {})",
            MAX_DURATION_MONTHS, months
        )));
    }
    if principal <= Decimal::ZERO {
        return Err(DocumentError::InvalidTerms(format!(
            "el importe debe ser positivo (recibido {})",
            principal
        )));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(DocumentError::InvalidTerms(format!(
            "el tipo de interés no puede ser negativo (recibido {})",
            annual_rate_percent
        )));
    }
    Ok(())
}

/// Cuota constante que amortiza `principal` en `months` meses
pub fn monthly_payment(principal: Decimal, months: u32, annual_rate_percent: Decimal) -> DocumentResult<Decimal> {
    validate_terms(principal, months, annual_rate_percent)?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(round_money(principal / Decimal::from(months)));
    }

    let growth_step = Decimal::ONE + rate;
    let mut growth = Decimal::ONE;
    for _ in 0..months {
        growth = growth.checked_mul(growth_step).ok_or_else(out_of_range)?;
    }

    let numerator = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .ok_or_else(out_of_range)?;
    let denominator = growth - Decimal::ONE;

    Ok(round_money(numerator.checked_div(denominator).ok_or_else(out_of_range)?))
}

/// Cuadro de amortización completo. La última cuota absorbe el saldo
/// residual para que el saldo final sea exactamente cero. Un cuadro
/// construido aquí garantiza que sus totales son representables.
pub fn build_schedule(principal: Decimal, months: u32, annual_rate_percent: Decimal) -> DocumentResult<AmortizationSchedule> {
    let payment = monthly_payment(principal, months, annual_rate_percent)?;
    let rate = monthly_rate(annual_rate_percent);

    let mut entries = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for period in 1..=months {
        let interest = round_money(balance.checked_mul(rate).ok_or_else(out_of_range)?);

        let principal_part = if period == months {
            balance
        } else {
            payment
                .checked_sub(interest)
                .ok_or_else(out_of_range)?
                .min(balance)
        };

        balance -= principal_part;
        if balance < NEGLIGIBLE_BALANCE {
            balance = Decimal::ZERO;
        }

        entries.push(AmortizationEntry {
            period,
            payment: principal_part.checked_add(interest).ok_or_else(out_of_range)?,
            interest,
            principal: principal_part,
            balance,
        });
    }

    let schedule = AmortizationSchedule {
        principal,
        annual_rate: annual_rate_percent,
        entries,
    };
    schedule.overpayment()?;

    tracing::debug!(
        principal = %principal,
        months,
        payment = %payment,
        "amortization schedule built"
    );

    Ok(schedule)
}
