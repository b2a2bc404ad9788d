//! Sustitución de marcadores en el texto de la plantilla.
//!
//! Un marcador secuencial (`XXX`) consume su siguiente aparición en orden de
//! plantilla: el orden del plan debe coincidir con el del documento. Es frágil
//! si se edita la plantilla, por eso cualquier desajuste es un error y nunca se
//! deja texto de marcador en la salida.
//!
//! Un marcador con nombre (`{{AMORTIZATION_TABLE}}`) se sustituye en todas sus
//! apariciones. Los valores insertados no se vuelven a examinar.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::core::{DocumentError, DocumentResult};

/// Cualquier marcador que no debe sobrevivir al enlace
static UNRESOLVED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"XXX|\{\{[A-Z0-9_]+\}\}|PAYMENT_SCHEDULE_[A-Z_]+").expect("valid placeholder pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Consume la siguiente aparición del token
    Next(&'static str),
    /// Sustituye todas las apariciones del token
    Named(&'static str),
}

impl Placeholder {
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Next(token) | Placeholder::Named(token) => token,
        }
    }
}

/// Aplica el plan `(marcador, valor)` sobre `source`
pub fn bind(source: &str, plan: &[(Placeholder, String)]) -> DocumentResult<String> {
    // (inicio, fin, índice en el plan)
    let mut spans: Vec<(usize, usize, usize)> = Vec::new();
    let mut cursors: HashMap<&str, usize> = HashMap::new();

    for (index, (placeholder, _)) in plan.iter().enumerate() {
        match placeholder {
            Placeholder::Next(token) => {
                let from = cursors.get(token).copied().unwrap_or(0);
                let start = source[from..]
                    .find(token)
                    .map(|offset| from + offset)
                    .ok_or_else(|| {
                        DocumentError::TemplateBinding(format!(
                            "la plantilla no tiene más apariciones de '{}' (valor #{})",
                            token,
                            index + 1
                        ))
                    })?;
                let end = start + token.len();
                cursors.insert(token, end);
                spans.push((start, end, index));
            }
            Placeholder::Named(token) => {
                let before = spans.len();
                spans.extend(
                    source
                        .match_indices(token)
                        .map(|(start, _)| (start, start + token.len(), index)),
                );
                if spans.len() == before {
                    return Err(DocumentError::TemplateBinding(format!(
                        "la plantilla no contiene el marcador '{}'",
                        token
                    )));
                }
            }
        }
    }

    spans.sort_unstable_by_key(|span| span.0);

    let mut output = String::with_capacity(source.len());
    let mut unresolved: Vec<&str> = Vec::new();
    let mut last = 0;

    for (start, end, index) in spans {
        if start < last {
            return Err(DocumentError::TemplateBinding(format!(
                "marcadores solapados en la posición {}",
                start
            )));
        }
        let gap = &source[last..start];
        unresolved.extend(UNRESOLVED.find_iter(gap).map(|m| m.as_str()));
        output.push_str(gap);
        output.push_str(&plan[index].1);
        last = end;
    }

    let tail = &source[last..];
    unresolved.extend(UNRESOLVED.find_iter(tail).map(|m| m.as_str()));
    output.push_str(tail);

    if !unresolved.is_empty() {
        return Err(DocumentError::TemplateBinding(format!(
            "marcadores sin resolver tras el enlace: {}",
            unresolved.join(", ")
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plan(entries: &[(Placeholder, &str)]) -> Vec<(Placeholder, String)> {
        entries.iter().map(|(p, v)| (*p, v.to_string())).collect()
    }

    #[test]
    fn sequential_tokens_are_consumed_in_order() {
        let html = "<p>XXX borrows XXX at XXX</p>";
        let bound = bind(
            html,
            &plan(&[
                (Placeholder::Next("XXX"), "Mario Rossi"),
                (Placeholder::Next("XXX"), "15 000.00"),
                (Placeholder::Next("XXX"), "7.86%"),
            ]),
        )
        .unwrap();

        assert_eq!(bound, "<p>Mario Rossi borrows 15 000.00 at 7.86%</p>");
    }

    #[test]
    fn named_tokens_replace_every_occurrence() {
        let html = "<p>{{TOTAL}}</p><p>{{TOTAL}}</p>";
        let bound = bind(html, &plan(&[(Placeholder::Named("{{TOTAL}}"), "€ 1.00")])).unwrap();
        assert_eq!(bound, "<p>€ 1.00</p><p>€ 1.00</p>");
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let html = "<p>XXX</p><p>XXX</p>";
        let bound = bind(
            html,
            &plan(&[(Placeholder::Next("XXX"), "XXX Holdings"), (Placeholder::Next("XXX"), "second")]),
        )
        .unwrap();
        assert_eq!(bound, "<p>XXX Holdings</p><p>second</p>");
    }

    #[test]
    fn independent_tokens_keep_their_own_cursor() {
        let html = "<p>XXX</p><p>11/06/2025</p><p>XXX</p>";
        let bound = bind(
            html,
            &plan(&[
                (Placeholder::Next("XXX"), "a"),
                (Placeholder::Next("11/06/2025"), "16/10/2026"),
                (Placeholder::Next("XXX"), "b"),
            ]),
        )
        .unwrap();
        assert_eq!(bound, "<p>a</p><p>16/10/2026</p><p>b</p>");
    }

    #[test]
    fn leftover_placeholder_is_an_error() {
        let err = bind("<p>XXX XXX</p>", &plan(&[(Placeholder::Next("XXX"), "only one")])).unwrap_err();
        assert!(matches!(err, DocumentError::TemplateBinding(ref m) if m.contains("XXX")));

        let err = bind("<p>{{AMORTIZATION_TABLE}}</p>", &[]).unwrap_err();
        assert!(matches!(err, DocumentError::TemplateBinding(_)));
    }

    #[test]
    fn exhausted_placeholder_is_an_error() {
        let err = bind(
            "<p>XXX</p>",
            &plan(&[(Placeholder::Next("XXX"), "a"), (Placeholder::Next("XXX"), "b")]),
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::TemplateBinding(ref m) if m.contains("#2")));

        let err = bind("<p>none</p>", &plan(&[(Placeholder::Named("{{TABLE}}"), "x")])).unwrap_err();
        assert!(matches!(err, DocumentError::TemplateBinding(_)));
    }
}
