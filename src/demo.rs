use loan_documents::core::GeneratorConfig;
use loan_documents::models::{DocumentType, LoanRequest};
use loan_documents::PdfGenerator;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const BORROWER: &str = "Mario Rossi";

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🚀 Demo de generación de documentos de préstamo");
    println!("================================================\n");

    std::fs::create_dir_all("output")?;

    let config = GeneratorConfig::from_env()?;
    let generator = PdfGenerator::from_config(&config)?;

    let request = LoanRequest {
        name: Some(BORROWER.to_string()),
        amount: Some(dec!(15000)),
        duration: Some(36),
        nominal_rate: Some(dec!(7.86)),
        effective_rate: Some(dec!(8.30)),
        payment: None,
    };

    for document_type in DocumentType::ALL {
        let document = match document_type {
            DocumentType::Contract => generator.generate_contract(&request),
            DocumentType::Guarantee => generator.generate_guarantee(BORROWER),
            DocumentType::Card => generator.generate_card(&request),
            DocumentType::Approval => generator.generate_approval(&request),
        };

        match document {
            Ok(document) => {
                let path = format!("output/{}_{}.pdf", document_type, BORROWER.replace(' ', "_"));
                std::fs::write(&path, &document.pdf)?;
                println!(
                    "  ✓ {} ({} bytes, overlay {})",
                    path,
                    document.pdf.len(),
                    document.overlay.as_str()
                );
            }
            Err(e) => println!("  ✗ {}: {}", document_type, e),
        }
    }

    println!("\n✅ Documentos generados en la carpeta 'output/'");
    Ok(())
}
