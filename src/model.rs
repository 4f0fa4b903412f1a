use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
/// 0.95 gray, the tint of odd table rows.
pub const LIGHT_GRAY: Rgb = [242, 242, 242];
pub const BLACK: Rgb = [0, 0, 0];
pub const LINK_BLUE: Rgb = [0, 0, 255];

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profession {
    #[serde(alias = "Nome")]
    pub name: String,
}

/// One person entry of the report. Accepts both camelCase keys and the
/// PascalCase Portuguese keys of the legacy `pessoas.json` files.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(alias = "IdPessoa")]
    pub id: u32,
    #[serde(alias = "Nome")]
    pub first_name: String,
    #[serde(alias = "Sobrenome")]
    pub last_name: String,
    #[serde(alias = "Profissao")]
    pub profession: Profession,
    #[serde(alias = "Salario")]
    pub salary: Decimal,
    #[serde(alias = "Empregado")]
    pub employed: bool,
}

impl PersonRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnKind {
    Code,
    Name,
    Profession,
    Salary,
    Status,
}

#[derive(Clone, Debug)]
pub struct ColumnDef {
    pub label: String,
    pub kind: ColumnKind,
    pub relative_width: f32,
    pub header_alignment: Alignment,
    pub alignment: Alignment,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellRole {
    Header,
    Data,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub alignment: Alignment,
    pub bold: bool,
    pub italic: bool,
    pub font_size: f32,
    pub fixed_height: f32,
    pub background: Rgb,
    pub border_bottom: f32, // points, 0 = none
    pub padding_bottom: f32,
}

/// Logical image resources of a report. Resolved against the loaded
/// [`crate::ReportAssets`] when the table is built and again when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetId {
    Logo,
    EmployedIcon,
    UnemployedIcon,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Text(String),
    Image {
        asset: AssetId,
        max_width: f32,  // points
        max_height: f32, // points
    },
    Empty,
}

#[derive(Clone, Debug)]
pub struct TableCell {
    pub content: CellContent,
    pub style: CellStyle,
}

#[derive(Clone, Debug)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub height: f32,
}

pub struct Table {
    pub col_widths: Vec<f32>, // relative, normalized when laid out
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Rows excluding the header row.
    pub fn data_rows(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }
}
