use crate::fonts::Face;
use crate::model::Alignment;
use crate::style::{
    BLACK, BORDER, CONTENT_WIDTH, GRID_HEADER_HEIGHT, GRID_LINE, GRID_ROW_HEIGHT, HEADER_BG,
    LABEL, MARGIN, PAGE_WIDTH, TEXT,
};
use crate::surface::{StrokeStyle, Surface, TextStyle};

const HEADERS: [&str; 3] = ["STARTING", "CLOSING", "TOTAL"];
const RULE_WIDTH: f32 = 0.2;

/// One label/value pair inside a grid cell.
pub struct Metric<'a> {
    pub label: &'a str,
    pub value: String,
}

/// Three readings of one quantity: start, close, total.
pub type MetricRow<'a> = [Metric<'a>; 3];

pub fn grid_height(rows: usize) -> f32 {
    GRID_HEADER_HEIGHT + GRID_ROW_HEIGHT * rows as f32
}

/// Draw the shaded-header metrics table with its top edge at `y`.
/// Returns the table height.
pub fn draw_metrics_grid(surface: &mut Surface, y: f32, rows: &[MetricRow<'_>]) -> f32 {
    let grid_h = grid_height(rows.len());
    let col_w = CONTENT_WIDTH / 3.0;
    let border = StrokeStyle::new(BORDER, RULE_WIDTH);
    let rule = StrokeStyle::new(GRID_LINE, RULE_WIDTH);

    surface.fill_rect(MARGIN, y, CONTENT_WIDTH, GRID_HEADER_HEIGHT, HEADER_BG);
    surface.stroke_rect(MARGIN, y, CONTENT_WIDTH, grid_h, border);
    for col in 1..3 {
        let x = MARGIN + col_w * col as f32;
        surface.line(x, y, x, y + grid_h, border);
    }
    // Rules under the header and between metric rows; the outer rect closes the last one
    for row in 0..rows.len() {
        let ry = y + GRID_HEADER_HEIGHT + GRID_ROW_HEIGHT * row as f32;
        surface.line(MARGIN, ry, PAGE_WIDTH - MARGIN, ry, rule);
    }

    let header_style = TextStyle::new(Face::HelveticaBold, 8.0, TEXT);
    for (col, header) in HEADERS.iter().enumerate() {
        let cx = MARGIN + col_w * col as f32 + col_w / 2.0;
        surface.text(*header, cx, y + 5.5, header_style, Alignment::Center);
    }

    let label_style = TextStyle::new(Face::Helvetica, 8.0, LABEL);
    let value_style = TextStyle::new(Face::HelveticaBold, 9.0, BLACK);
    for (row_idx, row) in rows.iter().enumerate() {
        let baseline = y + GRID_HEADER_HEIGHT + GRID_ROW_HEIGHT * row_idx as f32 + 6.0;
        for (col, metric) in row.iter().enumerate() {
            let x_base = MARGIN + col_w * col as f32;
            surface.text(metric.label, x_base + 4.0, baseline, label_style, Alignment::Left);
            surface.text(
                metric.value.as_str(),
                x_base + col_w - 4.0,
                baseline,
                value_style,
                Alignment::Right,
            );
        }
    }

    log::debug!("metrics grid: top={y:.1} rows={} height={grid_h:.1}", rows.len());
    grid_h
}
