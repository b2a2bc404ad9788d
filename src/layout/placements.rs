//! Tabla de posiciones calibradas por (tipo de documento, recurso).
//!
//! Los valores se ajustaron a mano contra las plantillas impresas; no se
//! derivan de nada, por eso viven aquí como constantes con nombre.

use serde::Serialize;

use super::grid::{Anchor, PlacementSpec};
use crate::models::DocumentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    Company,
    Logo,
    Seal,
    Signature,
}

impl AssetRole {
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetRole::Company => "company.png",
            AssetRole::Logo => "logo.png",
            AssetRole::Seal => "seal.png",
            AssetRole::Signature => "signature.png",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetRole::Company => "company",
            AssetRole::Logo => "logo",
            AssetRole::Seal => "seal",
            AssetRole::Signature => "signature",
        }
    }
}

/// Membrete de contrato, tarjeta y aprobación (celda 52)
pub const LETTERHEAD_COMPANY: PlacementSpec = PlacementSpec {
    cell: 52,
    scale_divisor: 2.0 / 1.44,
    fine_offset_x: -1.0 / 6.0 + 0.25,
    fine_offset_y: -1.75,
    anchor: Anchor::LowerLeft,
};

/// Logotipo del contrato (celda 71), páginas 1 y 2.
/// La columna se calibró como −2 + 4 − 1.5 celdas desde el borde izquierdo.
pub const CONTRACT_LOGO: PlacementSpec = PlacementSpec {
    cell: 71,
    scale_divisor: 9.0,
    fine_offset_x: -2.0 + 4.0 - 1.5 - 0.5,
    fine_offset_y: -1.75,
    anchor: Anchor::LowerLeft,
};

/// Membrete de la carta de garantía (celda 27)
pub const GUARANTEE_COMPANY: PlacementSpec = PlacementSpec {
    cell: 27,
    scale_divisor: 1.33,
    fine_offset_x: 5.0 + 1.25 + 1.0 + 1.0 / 3.0 - 3.0 - 0.5,
    fine_offset_y: -1.5,
    anchor: Anchor::Center,
};

pub const LETTER_SEAL: PlacementSpec = PlacementSpec {
    cell: 590,
    scale_divisor: 5.0,
    fine_offset_x: 0.0,
    fine_offset_y: 0.0,
    anchor: Anchor::Center,
};

pub const LETTER_SIGNATURE: PlacementSpec = PlacementSpec {
    cell: 593,
    scale_divisor: 5.0,
    fine_offset_x: 0.0,
    fine_offset_y: 0.0,
    anchor: Anchor::Center,
};

pub fn placement_for(document_type: DocumentType, role: AssetRole) -> Option<PlacementSpec> {
    use AssetRole::*;
    use DocumentType::*;

    match (document_type, role) {
        (Contract, Company) | (Card, Company) | (Approval, Company) => Some(LETTERHEAD_COMPANY),
        (Contract, Logo) => Some(CONTRACT_LOGO),
        (Guarantee, Company) => Some(GUARANTEE_COMPANY),
        (Guarantee | Card | Approval, Seal) => Some(LETTER_SEAL),
        (Guarantee | Card | Approval, Signature) => Some(LETTER_SIGNATURE),
        _ => None,
    }
}

const CONTRACT_PAGES: &[&[AssetRole]] = &[
    &[AssetRole::Company, AssetRole::Logo],
    &[AssetRole::Logo],
];

const LETTER_PAGES: &[&[AssetRole]] = &[&[
    AssetRole::Company,
    AssetRole::Seal,
    AssetRole::Signature,
]];

/// Recursos a dibujar en cada página, en orden. Las páginas que no aparecen
/// se dejan intactas.
pub fn page_layout(document_type: DocumentType) -> &'static [&'static [AssetRole]] {
    match document_type {
        DocumentType::Contract => CONTRACT_PAGES,
        DocumentType::Guarantee | DocumentType::Card | DocumentType::Approval => LETTER_PAGES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::{place_asset, CELL_HEIGHT_MM, CELL_WIDTH_MM, PAGE_HEIGHT_MM, PX_TO_MM};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn every_layout_entry_has_a_placement() {
        for document_type in DocumentType::ALL {
            for page in page_layout(document_type) {
                for role in page.iter() {
                    assert!(
                        placement_for(document_type, *role).is_some(),
                        "{document_type} has no placement for {role:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn contract_draws_logo_on_first_two_pages_only() {
        let pages = page_layout(DocumentType::Contract);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], &[AssetRole::Company, AssetRole::Logo]);
        assert_eq!(pages[1], &[AssetRole::Logo]);
        assert_eq!(placement_for(DocumentType::Contract, AssetRole::Seal), None);
    }

    #[test]
    fn letterhead_matches_calibrated_corner() {
        let placement = place_asset(&LETTERHEAD_COMPANY, (400, 100)).unwrap();

        let x = 2.0 * CELL_WIDTH_MM - 0.5 * CELL_WIDTH_MM - CELL_WIDTH_MM / 6.0 + 0.25 * CELL_WIDTH_MM;
        let y = PAGE_HEIGHT_MM - 4.0 * CELL_HEIGHT_MM + 0.5 * CELL_HEIGHT_MM + 0.25 * CELL_HEIGHT_MM
            - CELL_HEIGHT_MM;

        assert!((placement.x - x).abs() < EPSILON);
        assert!((placement.y - y).abs() < EPSILON);
        assert!((placement.width - 400.0 * PX_TO_MM / 2.0 * 1.44).abs() < EPSILON);
    }

    #[test]
    fn contract_logo_matches_calibrated_corner() {
        let placement = place_asset(&CONTRACT_LOGO, (900, 300)).unwrap();

        let x = (20.0 - 2.0 + 4.0 - 1.5) * CELL_WIDTH_MM;
        let y = PAGE_HEIGHT_MM - 3.0 * CELL_HEIGHT_MM - 0.25 * CELL_HEIGHT_MM - CELL_HEIGHT_MM;

        assert!((placement.x - x).abs() < EPSILON);
        assert!((placement.y - y).abs() < EPSILON);
        assert!((placement.height - 300.0 * PX_TO_MM / 9.0).abs() < EPSILON);
    }

    #[test]
    fn guarantee_company_is_centered_on_shifted_anchor() {
        let placement = place_asset(&GUARANTEE_COMPANY, (266, 133)).unwrap();

        let center_x = (1.0 + 5.0 + 0.5 + 1.25 + 1.0 + 1.0 / 3.0 - 3.0 - 0.5) * CELL_WIDTH_MM;
        let center_y = PAGE_HEIGHT_MM - (1.0 + 0.5 + 1.0 + 0.5) * CELL_HEIGHT_MM;

        assert!((placement.x + placement.width / 2.0 - center_x).abs() < EPSILON);
        assert!((placement.y + placement.height / 2.0 - center_y).abs() < EPSILON);
    }
}
