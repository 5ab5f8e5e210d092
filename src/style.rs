//! Page geometry and palette. All lengths are millimetres measured from the
//! top-left corner of the page.

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 148.0;
pub const MARGIN: f32 = 10.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN * 2.0;

/// Distance of the decorative frame from the page edge.
pub const FRAME_INSET: f32 = 5.0;

pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub type Rgb = [u8; 3];

pub const PRIMARY: Rgb = [185, 28, 28];
pub const TEXT: Rgb = [30, 41, 59];
pub const LABEL: Rgb = [100, 116, 139];
pub const BORDER: Rgb = [203, 213, 225];
pub const HEADER_BG: Rgb = [241, 245, 249];
pub const GRID_LINE: Rgb = [226, 232, 240];
pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];

// Placeholder mark strokes
pub const MARK_RED: Rgb = [220, 38, 38];
pub const MARK_CYAN: Rgb = [6, 182, 212];
pub const MARK_GREEN: Rgb = [34, 197, 94];

/// Vertical advance per wrapped line of a field value.
pub const FIELD_LINE_HEIGHT: f32 = 4.0;
/// Gap added below every field row.
pub const FIELD_ROW_GAP: f32 = 8.0;

pub const GRID_HEADER_HEIGHT: f32 = 8.0;
pub const GRID_ROW_HEIGHT: f32 = 9.0;

pub const SIGNATURE_WIDTH: f32 = 50.0;
pub const SIGNATURE_HEIGHT: f32 = 20.0;

pub const LOGO_WIDTH: f32 = 30.0;

pub(crate) fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}
