mod xobject;

use pdf_writer::types::LineCapStyle;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{register_fonts, to_winansi_bytes};
use crate::model::Alignment;
use crate::style::{PAGE_HEIGHT, PAGE_WIDTH, Rgb, mm_to_pt};
use crate::surface::{DrawCommand, Paint, StrokeStyle, Surface};

use xobject::write_image_xobject;

/// Bezier control-point factor for quarter circles.
const KAPPA: f32 = 0.552_284_8;

/// Page x in points.
fn px(x_mm: f32) -> f32 {
    mm_to_pt(x_mm)
}

/// Page y in points; surface y grows downwards, PDF y upwards.
fn py(y_mm: f32) -> f32 {
    mm_to_pt(PAGE_HEIGHT - y_mm)
}

fn unit_rgb([r, g, b]: Rgb) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

fn apply_stroke(content: &mut Content, stroke: &StrokeStyle) {
    let (r, g, b) = unit_rgb(stroke.color);
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(mm_to_pt(stroke.width));
    if stroke.round_cap {
        content.set_line_cap(LineCapStyle::RoundCap);
    }
}

fn rounded_rect_path(content: &mut Content, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    // Corners in points; (x0, y0) is bottom-left
    let r = mm_to_pt(radius.min(w / 2.0).min(h / 2.0));
    let x0 = px(x);
    let x1 = px(x + w);
    let y0 = py(y + h);
    let y1 = py(y);
    let k = r * KAPPA;

    content.move_to(x0 + r, y0);
    content.line_to(x1 - r, y0);
    content.cubic_to(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
    content.line_to(x1, y1 - r);
    content.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    content.line_to(x0 + r, y1);
    content.cubic_to(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
    content.line_to(x0, y0 + r);
    content.cubic_to(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
    content.close_path();
}

fn render_command(content: &mut Content, command: &DrawCommand, image_names: &[String]) {
    match command {
        DrawCommand::Text {
            x,
            y,
            text,
            style,
            align,
        } => {
            if text.is_empty() {
                return;
            }
            let width = style.face.text_width(text, style.size);
            let start_x = match align {
                Alignment::Left => *x,
                Alignment::Center => x - width / 2.0,
                Alignment::Right => x - width,
            };
            let (r, g, b) = unit_rgb(style.color);
            content.save_state();
            content.set_fill_rgb(r, g, b);
            content.begin_text();
            content.set_font(Name(style.face.pdf_name().as_bytes()), style.size);
            content.next_line(px(start_x), py(*y));
            content.show(Str(&to_winansi_bytes(text)));
            content.end_text();
            content.restore_state();
        }
        DrawCommand::Rect { x, y, w, h, paint } => {
            content.save_state();
            content.rect(px(*x), py(y + h), mm_to_pt(*w), mm_to_pt(*h));
            match paint {
                Paint::Fill(color) => {
                    let (r, g, b) = unit_rgb(*color);
                    content.set_fill_rgb(r, g, b);
                    content.fill_nonzero();
                }
                Paint::Stroke(stroke) => {
                    apply_stroke(content, stroke);
                    content.stroke();
                }
            }
            content.restore_state();
        }
        DrawCommand::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            stroke,
        } => {
            content.save_state();
            apply_stroke(content, stroke);
            rounded_rect_path(content, *x, *y, *w, *h, *radius);
            content.stroke();
            content.restore_state();
        }
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            content.save_state();
            apply_stroke(content, stroke);
            content.move_to(px(*x1), py(*y1));
            content.line_to(px(*x2), py(*y2));
            content.stroke();
            content.restore_state();
        }
        DrawCommand::Image { id, x, y, w, h } => {
            let Some(name) = image_names.get(id.0) else {
                log::warn!("Image {} was never registered, skipping", id.0);
                return;
            };
            content.save_state();
            content.transform([mm_to_pt(*w), 0.0, 0.0, mm_to_pt(*h), px(*x), py(y + h)]);
            content.x_object(Name(name.as_bytes()));
            content.restore_state();
        }
    }
}

/// Serialize a single-page surface. No timestamps or random ids are written,
/// so the same surface always yields the same bytes.
pub(crate) fn write_page(surface: &Surface) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();

    let fonts = register_fonts(&mut pdf, &mut alloc);

    let mut image_xobjects: Vec<(String, Ref)> = Vec::new();
    for (i, image) in surface.images().iter().enumerate() {
        let xobj_ref = write_image_xobject(&mut pdf, image, &mut alloc)?;
        image_xobjects.push((format!("Im{}", i + 1), xobj_ref));
    }
    let image_names: Vec<String> = image_xobjects.iter().map(|(n, _)| n.clone()).collect();

    let mut content = Content::new();
    for command in surface.commands() {
        render_command(&mut content, command, &image_names);
    }
    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, px(PAGE_WIDTH), mm_to_pt(PAGE_HEIGHT)))
            .parent(pages_id)
            .contents(content_id);
        let mut resources = page.resources();
        {
            let mut font_dict = resources.fonts();
            for (face, font_ref) in &fonts {
                font_dict.pair(Name(face.pdf_name().as_bytes()), *font_ref);
            }
        }
        if !image_xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_xobjects {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    let bytes = pdf.finish();
    log::debug!(
        "write_page: commands={} images={} {} bytes {:.1}ms",
        surface.commands().len(),
        image_xobjects.len(),
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    if bytes.is_empty() {
        return Err(Error::Pdf("writer produced no output".into()));
    }
    Ok(bytes)
}
