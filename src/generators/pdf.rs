use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::amortization::{build_schedule, AmortizationSchedule};
use crate::core::{DocumentError, DocumentResult, GeneratorConfig};
use crate::models::{DocumentType, LoanRequest, LoanTerms};
use crate::pdf::{
    HtmlRenderer, ImageDimensions, LopdfMergeEngine, OverlayComposer, OverlayOutcome, WeasyPrintRenderer,
};
use crate::templates::{FileTemplateLoader, TemplateAssembler, TemplateRegistry};

/// Etapas por las que pasa cada generación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ValidatingInput,
    AssemblingTemplate,
    Rendering,
    Overlaying,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::ValidatingInput => "validating_input",
            PipelineStage::AssemblingTemplate => "assembling_template",
            PipelineStage::Rendering => "rendering",
            PipelineStage::Overlaying => "overlaying",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

/// PDF final de una generación
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub document_type: DocumentType,
    pub pdf: Vec<u8>,
    pub overlay: OverlayOutcome,
}

struct StageTracker {
    document_type: DocumentType,
    stage: PipelineStage,
    started: Instant,
}

impl StageTracker {
    fn new(document_type: DocumentType) -> Self {
        StageTracker {
            document_type,
            stage: PipelineStage::ValidatingInput,
            started: Instant::now(),
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        tracing::debug!(
            document_type = %self.document_type,
            from = self.stage.as_str(),
            to = stage.as_str(),
            "pipeline stage"
        );
        self.stage = stage;
    }

    fn fail(&mut self, error: &DocumentError) {
        tracing::error!(
            document_type = %self.document_type,
            stage = self.stage.as_str(),
            kind = error.kind(),
            "Document generation failed: {}",
            error
        );
        self.stage = PipelineStage::Failed;
    }
}

/// Orquesta validación, ensamblado, rasterizado y superposición. No guarda
/// estado entre llamadas; cada petición es independiente.
pub struct PdfGenerator {
    assembler: TemplateAssembler,
    renderer: Arc<dyn HtmlRenderer>,
    overlay: OverlayComposer,
    base_path: PathBuf,
}

impl PdfGenerator {
    pub fn new(
        assembler: TemplateAssembler,
        renderer: Arc<dyn HtmlRenderer>,
        overlay: OverlayComposer,
        base_path: impl Into<PathBuf>,
    ) -> Self {
        PdfGenerator {
            assembler,
            renderer,
            overlay,
            base_path: base_path.into(),
        }
    }

    /// Plantillas en disco, `weasyprint` y composición con lopdf
    pub fn from_config(config: &GeneratorConfig) -> DocumentResult<Self> {
        let loader = FileTemplateLoader::new(config.templates_dir.clone());
        let assembler = TemplateAssembler::new(Arc::new(loader))?;
        let renderer = WeasyPrintRenderer::from_config(config);
        let overlay = OverlayComposer::new(
            config.assets_dir.clone(),
            Arc::new(ImageDimensions),
            Arc::new(LopdfMergeEngine),
        );

        Ok(Self::new(assembler, Arc::new(renderer), overlay, config.base_url.clone()))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        self.assembler.registry()
    }

    pub fn generate_contract(&self, request: &LoanRequest) -> DocumentResult<AssembledDocument> {
        self.generate(DocumentType::Contract, request)
    }

    pub fn generate_card(&self, request: &LoanRequest) -> DocumentResult<AssembledDocument> {
        self.generate(DocumentType::Card, request)
    }

    pub fn generate_approval(&self, request: &LoanRequest) -> DocumentResult<AssembledDocument> {
        self.generate(DocumentType::Approval, request)
    }

    pub fn generate_guarantee(&self, name: &str) -> DocumentResult<AssembledDocument> {
        self.generate(DocumentType::Guarantee, &LoanRequest::for_borrower(name))
    }

    /// Genera con la fecha local de hoy como fecha de emisión
    pub fn generate(&self, document_type: DocumentType, request: &LoanRequest) -> DocumentResult<AssembledDocument> {
        self.generate_on(document_type, request, Local::now().date_naive())
    }

    pub fn generate_on(
        &self,
        document_type: DocumentType,
        request: &LoanRequest,
        issue_date: NaiveDate,
    ) -> DocumentResult<AssembledDocument> {
        let mut tracker = StageTracker::new(document_type);

        match self.run(document_type, request, issue_date, &mut tracker) {
            Ok(document) => {
                tracing::info!(
                    document_type = %document_type,
                    overlay = document.overlay.as_str(),
                    bytes = document.pdf.len(),
                    "Document generated in {:?}",
                    tracker.started.elapsed()
                );
                Ok(document)
            }
            Err(e) => {
                tracker.fail(&e);
                Err(e)
            }
        }
    }

    fn run(
        &self,
        document_type: DocumentType,
        request: &LoanRequest,
        issue_date: NaiveDate,
        tracker: &mut StageTracker,
    ) -> DocumentResult<AssembledDocument> {
        let template = self.assembler.template(document_type)?;
        let terms = template.validate(request)?;
        let schedule = if template.needs_schedule() {
            Some(schedule_for(&terms)?)
        } else {
            None
        };

        tracker.enter(PipelineStage::AssemblingTemplate);
        let html = self
            .assembler
            .assemble(document_type, &terms, schedule.as_ref(), issue_date)?;

        tracker.enter(PipelineStage::Rendering);
        let rasterized = self.renderer.render(&html, &self.base_path)?;

        tracker.enter(PipelineStage::Overlaying);
        let (pdf, overlay) = self.overlay.apply(rasterized, document_type);

        tracker.enter(PipelineStage::Done);
        Ok(AssembledDocument {
            document_type,
            pdf,
            overlay,
        })
    }
}

fn schedule_for(terms: &LoanTerms) -> DocumentResult<AmortizationSchedule> {
    let missing = |field: &str| DocumentError::InvalidTerms(format!("falta {} para el cuadro de amortización", field));

    build_schedule(
        terms.principal.ok_or_else(|| missing("amount"))?,
        terms.duration_months.ok_or_else(|| missing("duration"))?,
        terms.nominal_rate.ok_or_else(|| missing("nominal_rate"))?,
    )
}
