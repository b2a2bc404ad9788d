mod common;

use chrono::NaiveDate;
use regex::Regex;
use std::sync::Arc;

use common::{mario_rossi, repo_dir};
use loan_documents::templates::{apply_corrections, FileTemplateLoader, TemplateAssembler, TemplateLoader};
use loan_documents::{build_schedule, DocumentType};

fn loader() -> FileTemplateLoader {
    FileTemplateLoader::new(repo_dir("templates"))
}

#[test]
fn every_bundled_template_binds_without_leftovers() {
    let assembler = TemplateAssembler::new(Arc::new(loader())).unwrap();
    let leftovers = Regex::new(r"XXX|\{\{[A-Z0-9_]+\}\}|PAYMENT_SCHEDULE_").unwrap();
    let issue_date = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();

    for document_type in DocumentType::ALL {
        let template = assembler.template(document_type).unwrap();
        let terms = template.validate(&mario_rossi()).unwrap();
        let schedule = if template.needs_schedule() {
            Some(build_schedule(terms.principal.unwrap(), terms.duration_months.unwrap(), terms.nominal_rate.unwrap()).unwrap())
        } else {
            None
        };

        let html = assembler
            .assemble(document_type, &terms, schedule.as_ref(), issue_date)
            .unwrap_or_else(|e| panic!("{document_type}: {e}"));

        assert!(!leftovers.is_match(&html), "{document_type} keeps unresolved tokens");
        assert!(html.contains("Mario Rossi"), "{document_type} lost the borrower name");
        assert!(html.contains("data-layout-fixes"), "{document_type} has no layout fixes");
    }
}

#[test]
fn corrections_are_idempotent_on_bundled_templates() {
    let assembler = TemplateAssembler::new(Arc::new(loader())).unwrap();
    let loader = loader();

    for document_type in DocumentType::ALL {
        let template = assembler.template(document_type).unwrap();
        let raw = loader.load(document_type).unwrap();

        let once = apply_corrections(&raw, template.corrections());
        let twice = apply_corrections(&once, template.corrections());

        assert_eq!(once, twice, "{document_type} corrections are not stable");
    }
}

#[test]
fn letters_lose_their_placeholder_images() {
    let assembler = TemplateAssembler::new(Arc::new(loader())).unwrap();
    let loader = loader();

    for document_type in [DocumentType::Card, DocumentType::Approval, DocumentType::Guarantee] {
        let template = assembler.template(document_type).unwrap();
        let corrected = apply_corrections(&loader.load(document_type).unwrap(), template.corrections());

        assert!(!corrected.contains("<img"), "{document_type} still embeds images");
    }
}
