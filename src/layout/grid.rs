//! Cuadrícula lógica de 25 × 35 celdas sobre una página A4.
//!
//! Las celdas se numeran desde 1, de izquierda a derecha y de arriba abajo.
//! Las coordenadas devueltas están en milímetros con el origen en la esquina
//! inferior izquierda de la página, como espera el lienzo PDF.

use crate::core::{DocumentError, DocumentResult};

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const GRID_COLUMNS: i64 = 25;
pub const GRID_ROWS: i64 = 35;
pub const CELL_WIDTH_MM: f64 = PAGE_WIDTH_MM / GRID_COLUMNS as f64;
pub const CELL_HEIGHT_MM: f64 = PAGE_HEIGHT_MM / GRID_ROWS as f64;

/// Milímetros por píxel a 96 ppp
pub const PX_TO_MM: f64 = 0.264583;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub index: i64,
    pub row: i64,
    pub col: i64,
}

impl GridCell {
    pub fn new(index: i64) -> DocumentResult<Self> {
        if index < 1 || index > GRID_COLUMNS * GRID_ROWS {
            return Err(DocumentError::InvalidCell(index));
        }
        Ok(GridCell {
            index,
            row: (index - 1) / GRID_COLUMNS,
            col: (index - 1) % GRID_COLUMNS,
        })
    }

    pub fn center(&self) -> (f64, f64) {
        let x = (self.col as f64 + 0.5) * CELL_WIDTH_MM;
        let y = PAGE_HEIGHT_MM - (self.row as f64 + 0.5) * CELL_HEIGHT_MM;
        (x, y)
    }
}

pub fn cell_to_center(index: i64) -> DocumentResult<(f64, f64)> {
    Ok(GridCell::new(index)?.center())
}

/// Cómo se interpreta el punto de anclaje al dibujar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// El rectángulo se centra sobre el punto
    Center,
    /// El punto es la esquina inferior izquierda del rectángulo
    LowerLeft,
}

/// Posición calibrada de un recurso gráfico sobre la cuadrícula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSpec {
    pub cell: i64,
    /// El tamaño nativo (mm) se divide entre este valor
    pub scale_divisor: f64,
    /// Desplazamiento respecto al centro de la celda, en celdas
    pub fine_offset_x: f64,
    pub fine_offset_y: f64,
    pub anchor: Anchor,
}

/// Rectángulo de dibujo en milímetros
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn place_asset(spec: &PlacementSpec, native_px: (u32, u32)) -> DocumentResult<Placement> {
    let (center_x, center_y) = cell_to_center(spec.cell)?;

    let width = native_px.0 as f64 * PX_TO_MM / spec.scale_divisor;
    let height = native_px.1 as f64 * PX_TO_MM / spec.scale_divisor;

    let anchor_x = center_x + spec.fine_offset_x * CELL_WIDTH_MM;
    let anchor_y = center_y + spec.fine_offset_y * CELL_HEIGHT_MM;

    let (x, y) = match spec.anchor {
        Anchor::Center => (anchor_x - width / 2.0, anchor_y - height / 2.0),
        Anchor::LowerLeft => (anchor_x, anchor_y),
    };

    Ok(Placement { x, y, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn first_cell_is_top_left() {
        let (x, y) = cell_to_center(1).unwrap();
        assert!(close(x, CELL_WIDTH_MM / 2.0));
        assert!(close(y, PAGE_HEIGHT_MM - CELL_HEIGHT_MM / 2.0));
    }

    #[test]
    fn rows_wrap_every_25_cells() {
        let cell = GridCell::new(26).unwrap();
        assert_eq!((cell.row, cell.col), (1, 0));

        let cell = GridCell::new(590).unwrap();
        assert_eq!((cell.row, cell.col), (23, 14));

        let last = GridCell::new(875).unwrap();
        assert_eq!((last.row, last.col), (34, 24));
        let (x, y) = last.center();
        assert!(close(x, PAGE_WIDTH_MM - CELL_WIDTH_MM / 2.0));
        assert!(close(y, CELL_HEIGHT_MM / 2.0));
    }

    #[test]
    fn cells_outside_the_grid_are_rejected() {
        assert!(matches!(cell_to_center(0), Err(DocumentError::InvalidCell(0))));
        assert!(matches!(cell_to_center(-3), Err(DocumentError::InvalidCell(-3))));
        assert!(matches!(cell_to_center(876), Err(DocumentError::InvalidCell(876))));
    }

    #[test]
    fn centered_asset_is_scaled_and_centered() {
        let spec = PlacementSpec {
            cell: 590,
            scale_divisor: 5.0,
            fine_offset_x: 0.0,
            fine_offset_y: 0.0,
            anchor: Anchor::Center,
        };
        let placement = place_asset(&spec, (500, 250)).unwrap();
        let (cx, cy) = cell_to_center(590).unwrap();

        assert!(close(placement.width, 500.0 * PX_TO_MM / 5.0));
        assert!(close(placement.height, 250.0 * PX_TO_MM / 5.0));
        assert!(close(placement.x + placement.width / 2.0, cx));
        assert!(close(placement.y + placement.height / 2.0, cy));
    }

    #[test]
    fn lower_left_anchor_ignores_draw_size() {
        let spec = PlacementSpec {
            cell: 1,
            scale_divisor: 1.0,
            fine_offset_x: 1.0,
            fine_offset_y: -1.0,
            anchor: Anchor::LowerLeft,
        };
        let placement = place_asset(&spec, (1000, 1000)).unwrap();

        assert!(close(placement.x, 1.5 * CELL_WIDTH_MM));
        assert!(close(placement.y, PAGE_HEIGHT_MM - 1.5 * CELL_HEIGHT_MM));
    }

    proptest! {
        #[test]
        fn mapping_is_pure(index in 1i64..=875) {
            let first = cell_to_center(index).unwrap();
            let second = cell_to_center(index).unwrap();
            prop_assert_eq!(first, second);

            let (x, y) = first;
            prop_assert!(x > 0.0 && x < PAGE_WIDTH_MM);
            prop_assert!(y > 0.0 && y < PAGE_HEIGHT_MM);
        }
    }
}
