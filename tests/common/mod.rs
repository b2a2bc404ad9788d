#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use loan_documents::core::{DocumentError, DocumentResult};
use loan_documents::pdf::{HtmlRenderer, ImageDimensions, LopdfMergeEngine, OverlayComposer};
use loan_documents::templates::{FileTemplateLoader, TemplateAssembler};
use loan_documents::{LoanRequest, PdfGenerator};

/// Rasterizador de prueba: guarda el HTML recibido y devuelve un PDF A4 con
/// el número de páginas indicado
pub struct StubRenderer {
    pages: u32,
    fail: bool,
    pub seen: Mutex<Vec<String>>,
}

impl StubRenderer {
    pub fn with_pages(pages: u32) -> Self {
        StubRenderer {
            pages,
            fail: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        StubRenderer {
            pages: 0,
            fail: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_html(&self) -> String {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl HtmlRenderer for StubRenderer {
    fn render(&self, html: &str, _base_path: &Path) -> DocumentResult<Vec<u8>> {
        self.seen.lock().unwrap().push(html.to_string());
        if self.fail {
            return Err(DocumentError::render("weasyprint salió con código 1"));
        }
        Ok(a4_pdf(self.pages))
    }
}

pub fn a4_pdf(pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..pages {
        let content = format!("BT /F1 12 Tf 72 760 Td (Pagina {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn repo_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

pub fn generator_with(renderer: Arc<StubRenderer>, assets_dir: &Path) -> PdfGenerator {
    let loader = FileTemplateLoader::new(repo_dir("templates"));
    let assembler = TemplateAssembler::new(Arc::new(loader)).unwrap();
    let overlay = OverlayComposer::new(
        assets_dir,
        Arc::new(ImageDimensions),
        Arc::new(LopdfMergeEngine),
    );
    PdfGenerator::new(assembler, renderer, overlay, repo_dir("templates"))
}

/// Solicitud completa del escenario de referencia
pub fn mario_rossi() -> LoanRequest {
    LoanRequest {
        name: Some("Mario Rossi".into()),
        amount: Some(dec!(15000)),
        duration: Some(36),
        nominal_rate: Some(dec!(7.86)),
        effective_rate: Some(dec!(8.30)),
        payment: None,
    }
}

pub fn page_ids(pdf: &[u8]) -> (Document, Vec<ObjectId>) {
    let doc = Document::load_mem(pdf).unwrap();
    let ids = doc.get_pages().values().copied().collect();
    (doc, ids)
}

/// Nombres de las imágenes registradas en los recursos de la página
pub fn xobject_names(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = match page.get(b"Resources") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).unwrap().clone(),
        _ => return Vec::new(),
    };
    let xobjects = match resources.get(b"XObject") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).unwrap().clone(),
        _ => return Vec::new(),
    };

    let mut names: Vec<String> = xobjects
        .iter()
        .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
        .collect();
    names.sort();
    names
}
