use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::Error;
use crate::model::AssetId;
use crate::pagination::{PageLayoutPlan, derive_capacities};
use crate::styler::CellStyler;
use crate::table::TableSpec;

pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

pub fn mm(v: f32) -> f32 {
    v * POINTS_PER_MM
}

/// Page size and margins, in points.
#[derive(Clone, Debug)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// A4 portrait with 15 mm margins and a 20 mm bottom margin for the footer.
    pub fn a4() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin_left: mm(15.0),
            margin_right: mm(15.0),
            margin_top: mm(15.0),
            margin_bottom: mm(20.0),
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Y coordinate of the top edge of the content area (PDF origin is bottom-left).
    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin_right
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Clone, Debug)]
pub struct HeaderLink {
    pub text: String,
    pub url: String,
    pub font_size: f32,
}

/// The block at the top of page 1: title on the left, logo and link on the right.
#[derive(Clone, Debug)]
pub struct TitleBlock {
    pub title: String,
    pub font_size: f32,
    pub leading: f32, // multiple of font_size
    pub lines: u32,   // title line plus blank lines after it
    pub spacing_after: f32,
    pub logo_height: f32,
    pub logo_bottom_offset: f32, // below the content top
    pub link: Option<HeaderLink>,
}

impl TitleBlock {
    /// Vertical space the block takes from the first page's content area.
    pub fn height(&self) -> f32 {
        self.font_size * self.leading * self.lines as f32 + self.spacing_after
    }
}

impl Default for TitleBlock {
    fn default() -> Self {
        Self {
            title: "Relatório de Pessoas".to_string(),
            font_size: 32.0,
            leading: 1.5,
            lines: 2,
            spacing_after: 4.0,
            logo_height: 32.0,
            logo_bottom_offset: 54.0,
            link: Some(HeaderLink {
                text: "LeonarDev".to_string(),
                url: "https://github.com/LeonarDev".to_string(),
                font_size: 9.9,
            }),
        }
    }
}

/// Image files, relative to `dir`.
#[derive(Clone, Debug)]
pub struct AssetPaths {
    pub dir: PathBuf,
    pub logo: PathBuf,
    pub employed_icon: PathBuf,
    pub unemployed_icon: PathBuf,
}

impl AssetPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            logo: "github.png".into(),
            employed_icon: "emoji_feliz.png".into(),
            unemployed_icon: "emoji_triste.png".into(),
        }
    }

    pub fn path(&self, id: AssetId) -> PathBuf {
        let file = match id {
            AssetId::Logo => &self.logo,
            AssetId::EmployedIcon => &self.employed_icon,
            AssetId::UnemployedIcon => &self.unemployed_icon,
        };
        self.dir.join(file)
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir("img")
    }
}

#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    /// Maximum number of records reported, taken from the start of the input.
    pub limit: usize,
    pub geometry: PageGeometry,
    pub title_block: TitleBlock,
    pub table: TableSpec,
    pub styler: CellStyler,
    pub assets: AssetPaths,
    pub compress: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("pessoas.json"),
            output_dir: PathBuf::from("."),
            file_prefix: "pessoas".to_string(),
            limit: 100,
            geometry: PageGeometry::a4(),
            title_block: TitleBlock::default(),
            table: TableSpec::people(),
            styler: CellStyler::default(),
            assets: AssetPaths::default(),
            compress: true,
        }
    }
}

impl ReportConfig {
    /// (first page, later pages) data-row capacities for this geometry.
    pub fn capacities(&self) -> Result<(usize, usize), Error> {
        derive_capacities(
            &self.geometry,
            self.title_block.height(),
            self.styler.row_height,
        )
    }

    pub fn layout_plan(&self, total_rows: usize) -> Result<PageLayoutPlan, Error> {
        let (first, later) = self.capacities()?;
        PageLayoutPlan::new(total_rows, first, later)
    }

    pub fn output_path(&self, now: &DateTime<Local>) -> PathBuf {
        self.output_dir.join(output_file_name(&self.file_prefix, now))
    }
}

/// `<prefix>.YYYY.MM.DD.HH.MM.SS.pdf`, unique per second.
pub fn output_file_name(prefix: &str, now: &DateTime<Local>) -> String {
    format!("{prefix}.{}.pdf", now.format("%Y.%m.%d.%H.%M.%S"))
}
