use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::DocumentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Contract,
    Guarantee,
    Card,
    Approval,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Contract,
        DocumentType::Guarantee,
        DocumentType::Card,
        DocumentType::Approval,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Contract => "contract",
            DocumentType::Guarantee => "guarantee",
            DocumentType::Card => "card",
            DocumentType::Approval => "approval",
        }
    }

    /// Nombre del fichero de plantilla (sin extensión)
    pub fn template_name(&self) -> &'static str {
        self.as_str()
    }

    /// Los documentos de una sola página se recortan a la primera página
    /// renderizada; el contrato fluye libremente
    pub fn is_single_page(&self) -> bool {
        !matches!(self, DocumentType::Contract)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = DocumentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "contract" | "contratto" => Ok(DocumentType::Contract),
            "guarantee" | "garanzia" => Ok(DocumentType::Guarantee),
            "card" | "carta" => Ok(DocumentType::Card),
            "approval" | "approvazione" => Ok(DocumentType::Approval),
            other => Err(DocumentError::UnsupportedDocumentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_english_and_italian_keys() {
        assert_eq!("contract".parse::<DocumentType>().unwrap(), DocumentType::Contract);
        assert_eq!("Garanzia".parse::<DocumentType>().unwrap(), DocumentType::Guarantee);
        assert_eq!(" carta ".parse::<DocumentType>().unwrap(), DocumentType::Card);
        assert_eq!("approvazione".parse::<DocumentType>().unwrap(), DocumentType::Approval);
    }

    #[test]
    fn unknown_type_is_a_usage_error() {
        let err = "mortgage".parse::<DocumentType>().unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedDocumentType(ref t) if t == "mortgage"));
    }

    #[test]
    fn only_contract_flows_across_pages() {
        assert!(!DocumentType::Contract.is_single_page());
        assert!(DocumentType::Guarantee.is_single_page());
        assert!(DocumentType::Card.is_single_page());
        assert!(DocumentType::Approval.is_single_page());
    }
}
