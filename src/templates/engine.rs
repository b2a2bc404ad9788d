use minijinja::{context, Environment};

use crate::amortization::AmortizationSchedule;
use crate::core::{format_money, DocumentError, DocumentResult, TableData};

const AMORTIZATION_TABLE: &str = "amortization_table.html";

const AMORTIZATION_TABLE_SOURCE: &str = r#"<table class="c18" style="width: 100%; border-collapse: collapse;">
<tr class="c7">
{%- for label in table.headers %}
<td class="c4"><p class="c15"><span class="c6 c11">{{ label }}</span></p></td>
{%- endfor %}
</tr>
{%- for row in table.rows %}
<tr class="c7">
{%- for cell in row %}
<td class="c5"><p class="c15"><span class="c6 c11" style="font-weight: normal; font-size: 9pt;">{{ cell }}</span></p></td>
{%- endfor %}
</tr>
{%- endfor %}
</table>"#;

pub const AMORTIZATION_HEADERS: [&str; 5] = [
    "Mese",
    "Pagamento",
    "Interessi",
    "Importo del prestito",
    "Saldo residuo",
];

/// Fragmentos HTML generados a partir de datos calculados. Los nombres de
/// plantilla terminan en `.html`, así que minijinja escapa cada valor.
pub struct FragmentEngine {
    env: Environment<'static>,
}

impl FragmentEngine {
    pub fn new() -> DocumentResult<Self> {
        let mut env = Environment::new();
        env.add_template(AMORTIZATION_TABLE, AMORTIZATION_TABLE_SOURCE)
            .map_err(fragment_error)?;

        Ok(FragmentEngine { env })
    }

    pub fn amortization_table(&self, schedule: &AmortizationSchedule) -> DocumentResult<String> {
        let mut table = TableData::new(AMORTIZATION_HEADERS.iter().map(|h| h.to_string()).collect());
        for entry in &schedule.entries {
            table.add_row(vec![
                entry.period.to_string(),
                euro(entry.payment),
                euro(entry.interest),
                euro(entry.principal),
                euro(entry.balance),
            ]);
        }

        let template = self.env.get_template(AMORTIZATION_TABLE).map_err(fragment_error)?;
        let html = template
            .render(context! { table => table })
            .map_err(fragment_error)?;

        tracing::debug!("Rendered amortization table with {} rows", schedule.len());
        Ok(html)
    }
}

fn euro(amount: rust_decimal::Decimal) -> String {
    format!("{} €", format_money(amount))
}

fn fragment_error(e: minijinja::Error) -> DocumentError {
    DocumentError::TemplateBinding(format!("error generando fragmento HTML: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::build_schedule;
    use rust_decimal_macros::dec;

    #[test]
    fn one_row_per_period_plus_header() {
        let schedule = build_schedule(dec!(15000), 36, dec!(7.86)).unwrap();
        let html = FragmentEngine::new().unwrap().amortization_table(&schedule).unwrap();

        assert_eq!(html.matches("<tr").count(), 37);
        for label in AMORTIZATION_HEADERS {
            assert!(html.contains(label), "missing header {label}");
        }
        assert!(html.contains("469.08 €"));
        assert!(html.contains("14 629.17 €"));
        assert!(html.trim_end().ends_with("</table>"));
    }

    #[test]
    fn zero_rate_table_lists_flat_installments() {
        let schedule = build_schedule(dec!(100), 3, dec!(0)).unwrap();
        let html = FragmentEngine::new().unwrap().amortization_table(&schedule).unwrap();

        assert_eq!(html.matches("33.33 €").count(), 4);
        assert!(html.contains("33.34 €"));
        assert_eq!(html.matches("0.00 €").count(), 4);
    }
}
