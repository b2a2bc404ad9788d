use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const THOUSANDS_SEPARATOR: char = ' ';

/// Tabla ya formateada, lista para pasarla a una plantilla
#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(headers: Vec<String>) -> Self {
        TableData {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Redondea a céntimos con redondeo "half-up" (0.005 -> 0.01)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Importe con separador de miles y dos decimales, sin símbolo de moneda
/// (el símbolo lo aporta el HTML de la plantilla)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money(pub Decimal);

impl Money {
    pub fn format(&self) -> String {
        let rounded = round_money(self.0);
        let formatted = format!("{:.2}", rounded.abs());
        let (integer, decimal) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, c) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(THOUSANDS_SEPARATOR);
            }
            grouped.push(c);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        format!("{}{}.{}", sign, grouped, decimal)
    }
}

pub fn format_money(amount: Decimal) -> String {
    Money(amount).format()
}

/// Tasa anual como porcentaje con dos decimales: `7.86%`
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", round_money(rate))
}

pub fn format_months(months: u32) -> String {
    format!("{} mesi", months)
}

/// Fecha en orden día/mes/año
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
