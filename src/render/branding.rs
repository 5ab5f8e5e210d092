use crate::fonts::Face;
use crate::format::is_valid_image;
use crate::images::decode_data_uri;
use crate::model::{AgencySettings, Alignment, ImageFormat};
use crate::style::{LOGO_WIDTH, MARK_CYAN, MARK_GREEN, MARK_RED, PRIMARY};
use crate::surface::{StrokeStyle, Surface, TextStyle};

const DEFAULT_AGENCY: &str = "TripSheetPro";

/// Which header variant was drawn. Exactly one per sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrandingOutcome {
    Logo(ImageFormat),
    /// A logo is configured but could not be decoded.
    TextFallback,
    /// No usable logo; abstract three-stroke mark.
    PlaceholderMark,
}

pub fn draw_branding(surface: &mut Surface, x: f32, y: f32, settings: &AgencySettings) -> BrandingOutcome {
    let agency = if settings.agency_name.is_empty() {
        DEFAULT_AGENCY
    } else {
        settings.agency_name.as_str()
    };
    let logo = settings
        .logo_base64
        .as_deref()
        .filter(|uri| is_valid_image(Some(*uri)));

    let Some(logo) = logo else {
        draw_placeholder_mark(surface, x, y);
        surface.text(
            agency,
            x + 20.0,
            y + 9.0,
            TextStyle::new(Face::HelveticaBold, 22.0, PRIMARY),
            Alignment::Left,
        );
        return BrandingOutcome::PlaceholderMark;
    };

    match decode_data_uri(logo) {
        Ok(image) => {
            let height = LOGO_WIDTH * image.aspect_ratio();
            let format = image.format;
            let id = surface.add_image(image);
            surface.draw_image(id, x, y - 2.0, LOGO_WIDTH, height);
            surface.text(
                agency,
                x + 35.0,
                y + 7.0,
                TextStyle::new(Face::HelveticaBold, 18.0, PRIMARY),
                Alignment::Left,
            );
            BrandingOutcome::Logo(format)
        }
        Err(e) => {
            log::warn!("Logo image error, using text fallback: {e}");
            surface.text(
                agency,
                x,
                y + 9.0,
                TextStyle::new(Face::HelveticaBold, 22.0, PRIMARY),
                Alignment::Left,
            );
            BrandingOutcome::TextFallback
        }
    }
}

fn draw_placeholder_mark(surface: &mut Surface, x: f32, y: f32) {
    surface.line(x, y + 5.0, x + 10.0, y, StrokeStyle::round(MARK_RED, 1.0));
    surface.line(x + 2.0, y + 7.0, x + 12.0, y + 2.0, StrokeStyle::round(MARK_CYAN, 1.0));
    surface.line(x + 4.0, y + 9.0, x + 14.0, y + 4.0, StrokeStyle::round(MARK_GREEN, 1.0));
}
