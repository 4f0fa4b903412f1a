use crate::assets::ReportAssets;
use crate::format::format_id;
use crate::model::{
    Alignment, AssetId, CellContent, CellRole, ColumnDef, ColumnKind, PersonRecord, Table,
    TableCell, TableRow,
};
use crate::styler::CellStyler;

#[derive(Clone, Debug)]
pub struct TableSpec {
    pub columns: Vec<ColumnDef>,
}

impl TableSpec {
    /// The five report columns: code, name, profession, salary, employment status.
    pub fn people() -> Self {
        let col = |label: &str, kind, relative_width, header_alignment, alignment| ColumnDef {
            label: label.to_string(),
            kind,
            relative_width,
            header_alignment,
            alignment,
        };
        Self {
            columns: vec![
                col("Código", ColumnKind::Code, 0.6, Alignment::Center, Alignment::Center),
                col("Nome", ColumnKind::Name, 2.0, Alignment::Left, Alignment::Left),
                // free text, so left-aligned under a centered header
                col("Profissão", ColumnKind::Profession, 1.5, Alignment::Center, Alignment::Left),
                col("Salário", ColumnKind::Salary, 1.0, Alignment::Center, Alignment::Right),
                col("Empregada", ColumnKind::Status, 1.0, Alignment::Center, Alignment::Center),
            ],
        }
    }

    pub fn relative_widths(&self) -> Vec<f32> {
        self.columns.iter().map(|c| c.relative_width).collect()
    }
}

impl Default for TableSpec {
    fn default() -> Self {
        Self::people()
    }
}

/// Scale relative widths so they add up to `total` (100.0 for percentages,
/// the content width for points). Non-positive totals fall back to equal columns.
pub fn normalize_widths(relative: &[f32], total: f32) -> Vec<f32> {
    if relative.is_empty() {
        return Vec::new();
    }
    let sum: f32 = relative.iter().filter(|w| **w > 0.0).sum();
    if sum <= 0.0 {
        let each = total / relative.len() as f32;
        return vec![each; relative.len()];
    }
    relative
        .iter()
        .map(|w| w.max(0.0) / sum * total)
        .collect()
}

fn data_cell(
    record: &PersonRecord,
    column: &ColumnDef,
    physical_row: usize,
    styler: &CellStyler,
    assets: &ReportAssets,
) -> TableCell {
    let content = match column.kind {
        ColumnKind::Code => CellContent::Text(format_id(record.id, styler.id_width)),
        ColumnKind::Name => CellContent::Text(record.full_name()),
        ColumnKind::Profession => CellContent::Text(record.profession.name.clone()),
        ColumnKind::Salary => CellContent::Text(styler.currency.format(record.salary)),
        ColumnKind::Status => {
            let asset = if record.employed {
                AssetId::EmployedIcon
            } else {
                AssetId::UnemployedIcon
            };
            if assets.contains(asset) {
                CellContent::Image {
                    asset,
                    max_width: styler.icon_size,
                    max_height: styler.icon_size,
                }
            } else {
                CellContent::Empty
            }
        }
    };
    TableCell {
        content,
        style: styler.style_for_cell(physical_row, CellRole::Data, column.alignment),
    }
}

/// Header row followed by one row per record. Each row is styled with its
/// index in `rows` at the moment it is added.
pub fn build_table(
    records: &[PersonRecord],
    spec: &TableSpec,
    styler: &CellStyler,
    assets: &ReportAssets,
) -> Table {
    let mut rows: Vec<TableRow> = Vec::with_capacity(records.len() + 1);

    let header_row = rows.len();
    let header_cells = spec
        .columns
        .iter()
        .map(|col| TableCell {
            content: CellContent::Text(col.label.clone()),
            style: styler.style_for_cell(header_row, CellRole::Header, col.header_alignment),
        })
        .collect();
    rows.push(TableRow {
        cells: header_cells,
        height: styler.row_height,
    });

    for record in records {
        let physical_row = rows.len();
        let cells = spec
            .columns
            .iter()
            .map(|col| data_cell(record, col, physical_row, styler, assets))
            .collect();
        rows.push(TableRow {
            cells,
            height: styler.row_height,
        });
    }

    let missing_icons = rows[1..]
        .iter()
        .flat_map(|r| r.cells.iter())
        .filter(|c| c.content == CellContent::Empty)
        .count();
    if missing_icons > 0 {
        log::debug!("build_table: {missing_icons} status cells left empty (icon not loaded)");
    }

    Table {
        col_widths: spec.relative_widths(),
        rows,
    }
}
