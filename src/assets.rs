use std::collections::HashMap;
use std::path::Path;

use crate::config::AssetPaths;
use crate::error::Error;
use crate::model::AssetId;

/// A decoded raster image, split into the RGB and alpha planes a PDF image
/// XObject and its soft mask need.
#[derive(Clone)]
pub struct ImageAsset {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub(crate) rgb: Vec<u8>,
    pub(crate) alpha: Option<Vec<u8>>,
}

impl ImageAsset {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display()))))?
            .with_guessed_format()
            .map_err(Error::Io)?;
        let decoded = reader
            .decode()
            .map_err(|e| Error::InvalidInput(format!("{}: {e}", path.display())))?;
        Ok(Self::from_rgba(&decoded.to_rgba8()))
    }

    pub fn from_rgba(rgba: &image::RgbaImage) -> Self {
        let (w, h) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
        let rgb = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());
        Self {
            pixel_width: w,
            pixel_height: h,
            rgb,
            alpha,
        }
    }

    /// Width over height; 1.0 for degenerate images.
    pub fn aspect_ratio(&self) -> f32 {
        if self.pixel_height == 0 {
            return 1.0;
        }
        self.pixel_width as f32 / self.pixel_height as f32
    }

    pub fn scale_to_fit(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        fit_in_box(self.aspect_ratio(), max_width, max_height)
    }
}

/// Largest (width, height) with aspect ratio `ratio` (width / height) inside the box.
pub(crate) fn fit_in_box(ratio: f32, max_width: f32, max_height: f32) -> (f32, f32) {
    if max_width / ratio <= max_height {
        (max_width, max_width / ratio)
    } else {
        (max_height * ratio, max_height)
    }
}

const ALL_ASSETS: [AssetId; 3] = [AssetId::Logo, AssetId::EmployedIcon, AssetId::UnemployedIcon];

/// The images of one report run, each loaded once. Missing or unreadable
/// files are simply absent; whatever would have shown them is left out.
#[derive(Clone, Default)]
pub struct ReportAssets {
    images: HashMap<AssetId, ImageAsset>,
}

impl ReportAssets {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn load(paths: &AssetPaths) -> Self {
        let mut assets = Self::none();
        for id in ALL_ASSETS {
            let path = paths.path(id);
            if !path.exists() {
                log::warn!("Asset not found: {} ({id:?}), omitted", path.display());
                continue;
            }
            match ImageAsset::load(&path) {
                Ok(img) => {
                    log::debug!(
                        "Loaded asset {id:?} from {} ({}x{})",
                        path.display(),
                        img.pixel_width,
                        img.pixel_height
                    );
                    assets.insert(id, img);
                }
                Err(e) => log::warn!("Asset {id:?} unreadable, omitted: {e}"),
            }
        }
        assets
    }

    pub fn insert(&mut self, id: AssetId, image: ImageAsset) {
        self.images.insert(id, image);
    }

    pub fn get(&self, id: AssetId) -> Option<&ImageAsset> {
        self.images.get(&id)
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.images.contains_key(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (AssetId, &ImageAsset)> {
        ALL_ASSETS
            .into_iter()
            .filter_map(|id| self.get(id).map(|img| (id, img)))
    }
}
