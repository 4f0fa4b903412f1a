use std::collections::HashMap;

use pdf_writer::{Filter, Pdf, Ref};

use crate::assets::{ImageAsset, ReportAssets};
use crate::model::AssetId;

pub(super) struct EmbeddedImage {
    pub(super) pdf_name: String,
    pub(super) xobj_ref: Ref,
    pub(super) aspect_ratio: f32,
}

/// Image XObjects written once per document; every cell or decoration that
/// shows the same asset references the same object.
#[derive(Default)]
pub(super) struct EmbeddedImages {
    by_asset: HashMap<AssetId, EmbeddedImage>,
    order: Vec<AssetId>,
}

impl EmbeddedImages {
    pub(super) fn embed(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, assets: &ReportAssets) -> Self {
        let mut out = Self::default();
        for (id, img) in assets.iter() {
            let pdf_name = format!("Im{}", out.order.len() + 1);
            let xobj_ref = write_image_xobject(pdf, alloc, img);
            out.by_asset.insert(
                id,
                EmbeddedImage {
                    pdf_name,
                    xobj_ref,
                    aspect_ratio: img.aspect_ratio(),
                },
            );
            out.order.push(id);
        }
        out
    }

    pub(super) fn get(&self, id: AssetId) -> Option<&EmbeddedImage> {
        self.by_asset.get(&id)
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &EmbeddedImage> {
        self.order.iter().filter_map(|id| self.by_asset.get(id))
    }

    pub(super) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// RGB plane as a Flate-compressed image, alpha (if any) as its soft mask.
fn write_image_xobject(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, img: &ImageAsset) -> Ref {
    let xobj_ref = alloc();
    let (w, h) = (img.pixel_width as i32, img.pixel_height as i32);

    let smask_ref = img.alpha.as_ref().map(|alpha| {
        let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(w);
        mask.height(h);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb, 6);
    let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(w);
    xobj.height(h);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    xobj_ref
}
