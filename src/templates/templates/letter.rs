//! Piezas comunes a las cartas de una sola página (tarjeta y aprobación).

use crate::templates::corrections::Correction;

pub(crate) const LETTER_CSS: &str = r#"
@page { size: A4; margin: 1cm; border: 2pt solid #a52b4c; padding: 0; }
body { font-family: "Roboto Mono", monospace; font-size: 9pt; line-height: 1.0; margin: 0; padding: 0 2cm; overflow: hidden; }
* { page-break-after: avoid !important; page-break-inside: avoid !important; page-break-before: avoid !important; overflow: hidden !important; }
@page:nth(2) { display: none !important; }
.c12, .c9, .c20, .c22, .c8 { border: none !important; padding: 2pt !important; margin: 0 !important; width: 100% !important; max-width: none !important; }
.c12 { max-width: none !important; padding: 0 !important; margin: 0 !important; width: 100% !important; height: auto !important; overflow: hidden !important; border: none !important; }
.c6, .c0, .c2, .c3 { margin: 1pt 0 !important; padding: 0 !important; text-align: left !important; width: 100% !important; line-height: 1.0 !important; overflow: hidden !important; }
table { margin: 1pt 0 !important; padding: 0 !important; width: 100% !important; font-size: 9pt !important; border-collapse: collapse !important; }
td, th { padding: 1pt !important; margin: 0 !important; font-size: 9pt !important; line-height: 1.0 !important; }
.c15, .c1, .c16, .c6 { background-color: transparent !important; background: none !important; }
ul, ol, li { margin: 0 !important; padding: 0 !important; line-height: 1.0 !important; }
h1, h2, h3, h4, h5, h6 { margin: 2pt 0 !important; padding: 0 !important; font-size: 10pt !important; line-height: 1.0 !important; }
"#;

/// Tabla de correcciones de tarjeta y aprobación. Quita las imágenes que el
/// exportador dejó en el lugar del logotipo, sello y firma, que luego se
/// superponen en su posición calibrada.
pub(crate) fn letter_corrections(style_id: &'static str) -> Vec<Correction> {
    vec![
        Correction::inject_style(style_id, LETTER_CSS),
        Correction::remove(
            r#"<p class="c12"><span style="overflow: hidden[^>]*><img alt="" src="images/image1\.png"[^>]*></span></p>"#,
        ),
        Correction::remove(
            r#"<span style="overflow: hidden[^>]*><img alt="" src="images/image2\.png"[^>]*></span>"#,
        ),
        Correction::remove(
            r#"<span style="overflow: hidden[^>]*><img alt="" src="images/image3\.png"[^>]*></span>"#,
        ),
        Correction::remove(r#"<div><p class="c6 c18"><span class="c7 c23"></span></p></div>"#),
        Correction::remove(r#"<p class="c3 c6"><span class="c7 c12"></span></p>"#),
        Correction::remove(r#"<p class="c6 c24"><span class="c7 c12"></span></p>"#),
        Correction::remove(r#"<p class="c6"><span class="c7"></span></p>"#),
        Correction::auto_height("c13"),
        Correction::auto_height("c19"),
        Correction::auto_height("c5"),
        Correction::auto_height("c9"),
        Correction::TrimBodyTail,
        Correction::CollapseTallRules,
    ]
}
