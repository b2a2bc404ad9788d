//! Correcciones de maquetación aplicadas al HTML exportado antes del enlace.
//!
//! Cada tipo de documento declara una tabla de reglas. Todas las reglas son
//! idempotentes: aplicar la tabla dos veces produce el mismo texto que una.

use once_cell::sync::Lazy;
use regex::Regex;

static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<style data-layout-fixes="[^"]*">.*?</style>"#).expect("valid style pattern")
});

static TALL_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.([a-zA-Z0-9_-]+)\{[^}]*height:\s*(?:[5-9][0-9]{2}|[0-9]{4,})pt[^}]*\}")
        .expect("valid css rule pattern")
});

static EMPTY_PARAGRAPH_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:<p[^>]*><span[^>]*></span></p>\s*)+\z").expect("valid paragraph pattern")
});

static EMPTY_DIV_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<div[^>]*></div>\s*)+\z").expect("valid div pattern"));

#[derive(Debug, Clone)]
pub enum Correction {
    /// Inserta un bloque `<style>` antes de `</head>`, sustituyendo el anterior
    InjectStyle { id: &'static str, css: &'static str },
    /// Elimina todas las coincidencias
    Remove(Regex),
    /// Elimina las coincidencias consecutivas al final del cuerpo
    RemoveTrailing(Regex),
    Replace { pattern: Regex, replacement: &'static str },
    /// `class="cX"` pasa a llevar `height: auto`
    AutoHeight { class: &'static str, pattern: Regex },
    /// Reglas CSS con alturas de 500pt o más pasan a `height:auto`
    CollapseTallRules,
    /// Quita párrafos y divs vacíos antes de `</body>` y cierra el documento
    TrimBodyTail,
}

impl Correction {
    pub fn inject_style(id: &'static str, css: &'static str) -> Self {
        Correction::InjectStyle { id, css }
    }

    pub fn remove(pattern: &str) -> Self {
        Correction::Remove(compile(pattern))
    }

    pub fn remove_trailing(pattern: &str) -> Self {
        Correction::RemoveTrailing(compile(&format!(r"(?:{}\s*)+(?P<tail></body>|\z)", pattern)))
    }

    pub fn replace(pattern: &str, replacement: &'static str) -> Self {
        Correction::Replace {
            pattern: compile(pattern),
            replacement,
        }
    }

    pub fn auto_height(class: &'static str) -> Self {
        let pattern = format!(
            r#"class="{}"(?: style="height: auto !important;")?"#,
            regex::escape(class)
        );
        Correction::AutoHeight {
            class,
            pattern: compile(&pattern),
        }
    }

    pub fn apply(&self, html: &str) -> String {
        match self {
            Correction::InjectStyle { id, css } => {
                let cleaned = STYLE_BLOCK.replace_all(html, "");
                let block = format!("<style data-layout-fixes=\"{}\">{}</style></head>", id, css);
                cleaned.replacen("</head>", &block, 1)
            }
            Correction::Remove(pattern) => pattern.replace_all(html, "").into_owned(),
            Correction::RemoveTrailing(pattern) => pattern.replace_all(html, "${tail}").into_owned(),
            Correction::Replace { pattern, replacement } => {
                pattern.replace_all(html, *replacement).into_owned()
            }
            Correction::AutoHeight { class, pattern } => {
                let replacement = format!(r#"class="{}" style="height: auto !important;""#, class);
                pattern
                    .replace_all(html, regex::NoExpand(&replacement))
                    .into_owned()
            }
            Correction::CollapseTallRules => TALL_RULE.replace_all(html, ".${1}{height:auto;}").into_owned(),
            Correction::TrimBodyTail => trim_body_tail(html),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    // Los patrones son literales del código; uno inválido es un error de programación
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid correction pattern {pattern:?}: {e}"))
}

fn trim_body_tail(html: &str) -> String {
    let Some(body_end) = html.rfind("</body>") else {
        return html.to_string();
    };

    let mut content = html[..body_end].trim_end().to_string();
    loop {
        let before = content.len();
        content = EMPTY_PARAGRAPH_TAIL.replace(&content, "").trim_end().to_string();
        content = EMPTY_DIV_TAIL.replace(&content, "").trim_end().to_string();
        if content.len() == before {
            break;
        }
    }

    format!("{}\n</body></html>", content)
}

pub fn apply_corrections(html: &str, corrections: &[Correction]) -> String {
    corrections
        .iter()
        .fold(html.to_string(), |current, correction| correction.apply(&current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn style_block_is_replaced_not_duplicated() {
        let rule = Correction::inject_style("card", "body{margin:0}");
        let once = rule.apply("<html><head><title>t</title></head><body></body></html>");
        let twice = rule.apply(&once);

        assert_eq!(once, twice);
        assert_eq!(once.matches("data-layout-fixes").count(), 1);
        assert!(once.contains(r#"<style data-layout-fixes="card">body{margin:0}</style></head>"#));
    }

    #[test]
    fn auto_height_does_not_stack_attributes() {
        let rule = Correction::auto_height("c5");
        let once = rule.apply(r#"<td class="c5">a</td><td class="c55">b</td>"#);

        assert_eq!(
            once,
            r#"<td class="c5" style="height: auto !important;">a</td><td class="c55">b</td>"#
        );
        assert_eq!(rule.apply(&once), once);
    }

    #[test]
    fn tall_rules_collapse_to_auto() {
        let css = ".c4{width:10pt;height:620pt}.c9{height:12pt}.c2{min-height:1200pt;color:red}";
        let fixed = Correction::CollapseTallRules.apply(css);

        assert_eq!(fixed, ".c4{height:auto;}.c9{height:12pt}.c2{height:auto;}");
        assert_eq!(Correction::CollapseTallRules.apply(&fixed), fixed);
    }

    #[test]
    fn trailing_elements_removed_only_at_the_end() {
        let rule = Correction::remove_trailing(r#"<p class="c3 c6"><span class="c7 c12"></span></p>"#);
        let html = concat!(
            r#"<p class="c3 c6"><span class="c7 c12"></span></p><p>text</p>"#,
            r#"<p class="c3 c6"><span class="c7 c12"></span></p>"#,
            "\n",
            r#"<p class="c3 c6"><span class="c7 c12"></span></p></body>"#,
        );

        let fixed = rule.apply(html);
        assert_eq!(
            fixed,
            r#"<p class="c3 c6"><span class="c7 c12"></span></p><p>text</p></body>"#
        );
        assert_eq!(rule.apply(&fixed), fixed);
    }

    #[test]
    fn body_tail_is_trimmed_and_closed() {
        let html = "<html><body><p>Firma</p>\n<p class=\"c6\"><span></span></p><div class=\"x\"></div>\n<p><span class=\"c7\"></span></p></body>\n</html>\n";
        let fixed = trim_body_tail(html);

        assert_eq!(fixed, "<html><body><p>Firma</p>\n</body></html>");
        assert_eq!(trim_body_tail(&fixed), fixed);
    }

    #[test]
    fn correction_table_is_idempotent() {
        let table = vec![
            Correction::inject_style("letter", ".c8 { padding: 0 }"),
            Correction::remove(r#"<span style="overflow: hidden[^>]*><img alt="" src="images/image2\.png"[^>]*></span>"#),
            Correction::auto_height("c13"),
            Correction::TrimBodyTail,
            Correction::CollapseTallRules,
        ];
        let html = concat!(
            "<html><head><style>.c1{height:700pt}</style></head><body>",
            r#"<table class="c13"><tr><td><span style="overflow: hidden; width: 10px"><img alt="" src="images/image2.png" style="x"></span></td></tr></table>"#,
            "<p class=\"c6\"><span class=\"c7\"></span></p></body></html>"
        );

        let once = apply_corrections(html, &table);
        let twice = apply_corrections(&once, &table);

        assert_eq!(once, twice);
        assert!(!once.contains("image2.png"));
        assert!(once.contains(".c1{height:auto;}"));
    }
}
