use crate::format::CurrencyFormat;
use crate::model::{Alignment, CellRole, CellStyle, LIGHT_GRAY, Rgb, WHITE};

/// Decides how every table cell looks. Row striping follows the physical row
/// index in the table (header = 0), so it never restarts on a new page.
#[derive(Clone, Debug)]
pub struct CellStyler {
    pub font_size: f32,
    pub row_height: f32,
    pub header_background: Rgb,
    pub even_background: Rgb,
    pub odd_background: Rgb,
    pub border_bottom: f32,
    pub padding_bottom: f32,
    pub icon_size: f32,
    pub id_width: usize,
    pub currency: CurrencyFormat,
}

impl Default for CellStyler {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            row_height: 25.0,
            header_background: WHITE,
            even_background: WHITE,
            odd_background: LIGHT_GRAY,
            border_bottom: 1.0,
            padding_bottom: 5.0,
            icon_size: 20.0,
            id_width: 6,
            currency: CurrencyFormat::brl(),
        }
    }
}

impl CellStyler {
    pub fn background_for_row(&self, physical_row: usize) -> Rgb {
        if physical_row % 2 == 1 {
            self.odd_background
        } else {
            self.even_background
        }
    }

    pub fn style_for_cell(&self, physical_row: usize, role: CellRole, alignment: Alignment) -> CellStyle {
        let (bold, background) = match role {
            CellRole::Header => (true, self.header_background),
            CellRole::Data => (false, self.background_for_row(physical_row)),
        };
        CellStyle {
            alignment,
            bold,
            italic: false,
            font_size: self.font_size,
            fixed_height: self.row_height,
            background,
            border_bottom: self.border_bottom,
            padding_bottom: self.padding_bottom,
        }
    }
}
