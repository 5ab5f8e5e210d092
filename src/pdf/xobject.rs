use pdf_writer::{Filter, Pdf, Ref};

use crate::error::Error;
use crate::model::{EmbeddedImage, ImageFormat};

fn dimension(value: u32) -> Result<i32, Error> {
    i32::try_from(value).map_err(|_| Error::Pdf(format!("image dimension {value} out of range")))
}

/// Write an image XObject (plus soft mask for transparent PNGs) and return its ref.
pub(super) fn write_image_xobject(
    pdf: &mut Pdf,
    img: &EmbeddedImage,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<Ref, Error> {
    let width = dimension(img.pixel_width)?;
    let height = dimension(img.pixel_height)?;
    let xobj_ref = alloc();

    match img.format {
        ImageFormat::Jpeg => {
            let mut xobj = pdf.image_xobject(xobj_ref, &img.data);
            xobj.filter(Filter::DctDecode);
            xobj.width(width);
            xobj.height(height);
            match img.components {
                1 => xobj.color_space().device_gray(),
                4 => xobj.color_space().device_cmyk(),
                _ => xobj.color_space().device_rgb(),
            };
            xobj.bits_per_component(8);
        }
        ImageFormat::Png => {
            let smask_ref = match &img.alpha {
                Some(alpha) => {
                    let mask_ref = alloc();
                    let mut mask = pdf.image_xobject(mask_ref, alpha);
                    mask.filter(Filter::FlateDecode);
                    mask.width(width);
                    mask.height(height);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_ref)
                }
                None => None,
            };

            let mut xobj = pdf.image_xobject(xobj_ref, &img.data);
            xobj.filter(Filter::FlateDecode);
            xobj.width(width);
            xobj.height(height);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }

    Ok(xobj_ref)
}
