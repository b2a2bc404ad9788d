//! Composición de recursos gráficos sobre un PDF ya rasterizado, con lopdf.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::overlay::{OverlayDraw, OverlayPage};
use crate::core::{DocumentError, DocumentResult};

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Profundidad máxima al buscar recursos heredados en el árbol de páginas
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Abre un PDF como documento navegable por páginas
pub trait PageMergeEngine: Send + Sync {
    fn open(&self, pdf: &[u8]) -> DocumentResult<Box<dyn PageDocument>>;
}

pub trait PageDocument {
    fn page_count(&self) -> usize;

    /// Dibuja la capa `overlay` encima de la página `index` (desde 0)
    fn merge_page(&mut self, index: usize, overlay: &OverlayPage) -> DocumentResult<()>;

    /// Conserva solo las primeras `keep` páginas
    fn truncate(&mut self, keep: usize) -> DocumentResult<()>;

    fn to_bytes(self: Box<Self>) -> DocumentResult<Vec<u8>>;
}

pub struct LopdfMergeEngine;

impl PageMergeEngine for LopdfMergeEngine {
    fn open(&self, pdf: &[u8]) -> DocumentResult<Box<dyn PageDocument>> {
        let doc = Document::load_mem(pdf)
            .map_err(|e| DocumentError::OverlayAsset(format!("PDF base ilegible: {}", e)))?;

        Ok(Box::new(LopdfPageDocument {
            doc,
            images: HashMap::new(),
        }))
    }
}

struct LopdfPageDocument {
    doc: Document,
    /// Cada imagen se incrusta una sola vez aunque se dibuje en varias páginas
    images: HashMap<PathBuf, ObjectId>,
}

impl LopdfPageDocument {
    fn page_id(&self, index: usize) -> DocumentResult<ObjectId> {
        let number = u32::try_from(index + 1)
            .map_err(|_| DocumentError::OverlayAsset(format!("página fuera de rango: {}", index)))?;

        self.doc
            .get_pages()
            .get(&number)
            .copied()
            .ok_or_else(|| DocumentError::OverlayAsset(format!("el PDF no tiene página {}", number)))
    }

    fn embed_image(&mut self, path: &Path) -> DocumentResult<ObjectId> {
        if let Some(id) = self.images.get(path) {
            return Ok(*id);
        }

        let image = image::open(path)
            .map_err(|e| DocumentError::OverlayAsset(format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        let smask_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(&alpha)?,
        ));

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
                "SMask" => Object::Reference(smask_id),
            },
            deflate(&rgb)?,
        ));

        self.images.insert(path.to_path_buf(), image_id);
        Ok(image_id)
    }
}

impl PageDocument for LopdfPageDocument {
    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn merge_page(&mut self, index: usize, overlay: &OverlayPage) -> DocumentResult<()> {
        if overlay.draws.is_empty() {
            return Ok(());
        }

        let page_id = self.page_id(index)?;

        let mut named = Vec::with_capacity(overlay.draws.len());
        for (position, draw) in overlay.draws.iter().enumerate() {
            let image_id = self.embed_image(&draw.path)?;
            // El índice de página entra en el nombre: el diccionario de recursos
            // puede estar compartido entre páginas
            let name = format!("LoanOverlay{}x{}", index, position);
            named.push((name, image_id, draw));
        }

        let xobjects = xobject_dict_mut(&mut self.doc, page_id).map_err(merge_error)?;
        for (name, image_id, _) in &named {
            xobjects.set(name.as_bytes().to_vec(), Object::Reference(*image_id));
        }

        // El contenido original se aísla entre q/Q para partir de la matriz identidad
        let mut operations = String::from("Q\n");
        for (name, _, draw) in &named {
            operations.push_str(&draw_operations(name, draw));
        }

        let save_id = self.doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let overlay_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), operations.into_bytes()));

        let page = self
            .doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(merge_error)?;

        let mut contents = vec![Object::Reference(save_id)];
        match page.remove(b"Contents") {
            Some(Object::Reference(existing)) => contents.push(Object::Reference(existing)),
            Some(Object::Array(existing)) => contents.extend(existing),
            _ => {}
        }
        contents.push(Object::Reference(overlay_id));
        page.set("Contents", Object::Array(contents));

        tracing::debug!("Merged {} overlay draws onto page {}", named.len(), index + 1);
        Ok(())
    }

    fn truncate(&mut self, keep: usize) -> DocumentResult<()> {
        let extra: Vec<u32> = self
            .doc
            .get_pages()
            .keys()
            .copied()
            .filter(|number| *number as usize > keep)
            .collect();

        if !extra.is_empty() {
            tracing::debug!("Dropping {} trailing pages", extra.len());
            self.doc.delete_pages(&extra);
            self.doc.prune_objects();
        }
        Ok(())
    }

    fn to_bytes(mut self: Box<Self>) -> DocumentResult<Vec<u8>> {
        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| DocumentError::OverlayAsset(format!("no se pudo serializar el PDF: {}", e)))?;
        Ok(buffer)
    }
}

fn draw_operations(name: &str, draw: &OverlayDraw) -> String {
    let placement = &draw.placement;
    format!(
        "q\n{:.4} 0 0 {:.4} {:.4} {:.4} cm\n/{} Do\nQ\n",
        placement.width * MM_TO_PT,
        placement.height * MM_TO_PT,
        placement.x * MM_TO_PT,
        placement.y * MM_TO_PT,
        name
    )
}

fn deflate(data: &[u8]) -> DocumentResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| DocumentError::OverlayAsset(format!("error comprimiendo imagen: {}", e)))
}

fn merge_error(e: lopdf::Error) -> DocumentError {
    DocumentError::OverlayAsset(format!("estructura de página no válida: {}", e))
}

/// Dónde vive el diccionario de recursos de una página
enum ResourcesLocation {
    Inline,
    Shared(ObjectId),
}

fn resources_location(doc: &mut Document, page_id: ObjectId) -> Result<ResourcesLocation, lopdf::Error> {
    let current = match doc.get_dictionary(page_id)?.get(b"Resources") {
        Ok(Object::Reference(id)) => Some(ResourcesLocation::Shared(*id)),
        Ok(Object::Dictionary(_)) => Some(ResourcesLocation::Inline),
        _ => None,
    };
    if let Some(location) = current {
        return Ok(location);
    }

    // Heredados de un nodo padre: se copian a la página para no tocar el resto
    let inherited = inherited_resources(doc, page_id)?.unwrap_or_else(Dictionary::new);
    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Resources", Object::Dictionary(inherited));
    Ok(ResourcesLocation::Inline)
}

fn inherited_resources(doc: &Document, page_id: ObjectId) -> Result<Option<Dictionary>, lopdf::Error> {
    let mut parent = doc.get_dictionary(page_id)?.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let Some(node_id) = parent else {
            return Ok(None);
        };
        let node = doc.get_dictionary(node_id)?;
        match node.get(b"Resources") {
            Ok(Object::Dictionary(resources)) => return Ok(Some(resources.clone())),
            Ok(Object::Reference(id)) => return Ok(Some(doc.get_dictionary(*id)?.clone())),
            _ => parent = node.get(b"Parent").and_then(Object::as_reference).ok(),
        }
    }
    Ok(None)
}

fn resources_mut<'a>(doc: &'a mut Document, page_id: ObjectId, location: &ResourcesLocation) -> Result<&'a mut Dictionary, lopdf::Error> {
    match location {
        ResourcesLocation::Inline => doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .get_mut(b"Resources")?
            .as_dict_mut(),
        ResourcesLocation::Shared(id) => doc.get_object_mut(*id)?.as_dict_mut(),
    }
}

fn xobject_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary, lopdf::Error> {
    let location = resources_location(doc, page_id)?;

    let existing = match resources_mut(doc, page_id, &location)?.get(b"XObject") {
        Ok(Object::Reference(id)) => Some(Some(*id)),
        Ok(Object::Dictionary(_)) => Some(None),
        _ => None,
    };

    match existing {
        Some(Some(id)) => doc.get_object_mut(id)?.as_dict_mut(),
        Some(None) => resources_mut(doc, page_id, &location)?
            .get_mut(b"XObject")?
            .as_dict_mut(),
        None => {
            let resources = resources_mut(doc, page_id, &location)?;
            resources.set("XObject", Object::Dictionary(Dictionary::new()));
            resources.get_mut(b"XObject")?.as_dict_mut()
        }
    }
}
