use pdf_writer::{Name, Pdf, Ref};

use crate::style::PT_PER_MM;

/// The base-14 faces a trip sheet uses. Nothing is embedded; every viewer
/// ships these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Helvetica,
    HelveticaBold,
    TimesBold,
}

impl Face {
    pub const ALL: [Face; 3] = [Face::Helvetica, Face::HelveticaBold, Face::TimesBold];

    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            Face::Helvetica => "F1",
            Face::HelveticaBold => "F2",
            Face::TimesBold => "F3",
        }
    }

    fn base_font(self) -> &'static [u8] {
        match self {
            Face::Helvetica => b"Helvetica",
            Face::HelveticaBold => b"Helvetica-Bold",
            Face::TimesBold => b"Times-Bold",
        }
    }

    /// Advance width in 1000-units for a WinAnsi byte.
    fn width_1000(self, byte: u8) -> f32 {
        match self {
            Face::Helvetica => helvetica_width(byte),
            Face::HelveticaBold => helvetica_bold_width(byte),
            Face::TimesBold => times_bold_width(byte),
        }
    }

    /// Width of `text` set at `size_pt`, in millimetres.
    pub fn text_width(self, text: &str, size_pt: f32) -> f32 {
        let units: f32 = text
            .chars()
            .map(|c| self.width_1000(char_to_winansi(c).unwrap_or(b'?')))
            .sum();
        units * size_pt / 1000.0 / PT_PER_MM
    }
}

/// Map a single Unicode char to its WinAnsi (Windows-1252) byte.
fn char_to_winansi(c: char) -> Option<u8> {
    let byte = match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        // The rupee sign has no WinAnsi slot
        _ => return None,
    };
    Some(byte)
}

/// Encode text for a WinAnsi `Tj` string. Tabs and newlines become spaces,
/// anything outside the code page becomes `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            _ => char_to_winansi(c).unwrap_or(b'?'),
        })
        .collect()
}

/// Approximate Helvetica widths at 1000 units/em.
fn helvetica_width(b: u8) -> f32 {
    match b {
        32 => 278.0,                          // space
        40 | 41 | 45 => 333.0,                // ( ) -
        44 | 46 | 47 | 58 | 59 => 278.0,      // , . / : ;
        33..=47 => 400.0,                     // other punctuation
        48..=57 => 556.0,                     // digits
        64 => 1015.0,                         // @
        60..=63 => 584.0,                     // < = > ?
        73 => 278.0,                          // I
        74 => 500.0,                          // J
        77 => 833.0,                          // M
        87 => 944.0,                          // W
        67 | 68 | 71 | 72 | 78 | 79 | 81 | 85 => 722.0,
        70 | 84 | 90 => 611.0,                // F T Z
        76 => 556.0,                          // L
        65..=90 => 667.0,                     // remaining uppercase
        95 => 556.0,                          // _
        91..=96 => 278.0,                     // brackets etc.
        102 | 116 => 278.0,                   // f t
        105 | 106 | 108 => 222.0,             // i j l
        114 => 333.0,                         // r
        107 | 115 | 118 | 120 | 121 | 122 => 500.0,
        109 => 833.0,                         // m
        119 => 722.0,                         // w
        99 => 500.0,                          // c
        97..=122 => 556.0,                    // remaining lowercase
        _ => 556.0,
    }
}

fn helvetica_bold_width(b: u8) -> f32 {
    match b {
        32 => 278.0,
        44 | 46 | 47 | 58 | 59 => 333.0,
        33..=47 => 444.0,
        48..=57 => 556.0,
        64 => 975.0,
        60..=63 => 584.0,
        73 => 278.0,
        74 => 556.0,
        77 => 833.0,
        87 => 944.0,
        67 | 68 | 72 | 78 | 82 | 85 => 722.0,
        71 | 79 | 81 => 778.0,
        70 | 84 | 90 => 611.0,
        76 => 611.0,
        65..=90 => 667.0,
        95 => 556.0,
        91..=96 => 333.0,
        105 | 106 | 108 => 278.0,
        102 | 116 => 333.0,
        114 => 389.0,
        99 | 107 | 115 | 120 | 121 | 122 => 556.0,
        109 => 889.0,
        119 => 778.0,
        97..=122 => 611.0,
        _ => 611.0,
    }
}

fn times_bold_width(b: u8) -> f32 {
    match b {
        32 => 250.0,
        33..=47 => 333.0,
        48..=57 => 500.0,
        73 => 389.0,
        77 => 944.0,
        87 => 1000.0,
        65..=90 => 722.0,
        105 | 106 | 108 | 116 => 278.0,
        102 | 114 => 400.0,
        109 => 833.0,
        119 => 722.0,
        97..=122 => 520.0,
        _ => 500.0,
    }
}

/// Write a Type1 font dictionary per face and return their refs.
pub(crate) fn register_fonts(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Vec<(Face, Ref)> {
    Face::ALL
        .iter()
        .map(|&face| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(face.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            log::debug!("register_font: {:?} -> {}", face, face.pdf_name());
            (face, font_ref)
        })
        .collect()
}
