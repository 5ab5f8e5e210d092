//! Single and bulk export. A bulk export is a fold over the selected trips:
//! every trip either becomes an archive entry or a recorded failure.

use std::io::{Cursor, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::Error;
use crate::format::{archive_file_name, trip_file_name};
use crate::model::{AgencySettings, TripRecord};
use crate::render::render_trip_document;

/// Folder every trip sheet is placed under inside the archive.
pub const ARCHIVE_FOLDER: &str = "tripsheets";

/// A named binary ready for the download step.
#[derive(Clone, Debug)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A trip that could not be rendered and was left out of the archive.
#[derive(Debug)]
pub struct BatchFailure {
    /// Position in the caller's selection.
    pub index: usize,
    pub vehicle_reg_no: String,
    pub error: Error,
}

#[derive(Debug)]
pub struct BatchExport {
    pub archive: ExportFile,
    /// Entry paths in archive order.
    pub entries: Vec<String>,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug)]
pub enum Export {
    Single(ExportFile),
    Archive(BatchExport),
}

impl Export {
    pub fn file(&self) -> &ExportFile {
        match self {
            Export::Single(file) => file,
            Export::Archive(batch) => &batch.archive,
        }
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn render_pdf(trip: &TripRecord, settings: &AgencySettings) -> Result<Vec<u8>, Error> {
    render_trip_document(trip, settings)?.to_pdf()
}

/// Render one trip straight to a named PDF.
pub fn export_single(trip: &TripRecord, settings: &AgencySettings) -> Result<ExportFile, Error> {
    let bytes = render_pdf(trip, settings)?;
    Ok(ExportFile {
        filename: trip_file_name(trip, now_millis()),
        bytes,
    })
}

#[derive(Default)]
struct BatchParts {
    entries: Vec<(String, Vec<u8>)>,
    failures: Vec<BatchFailure>,
}

impl BatchParts {
    /// Same-named entries are not deduplicated: the later trip replaces the earlier one.
    fn add_entry(&mut self, name: String, bytes: Vec<u8>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => {
                log::warn!("Archive entry {name} written twice, keeping the later trip");
                slot.1 = bytes;
            }
            None => self.entries.push((name, bytes)),
        }
    }
}

fn build_archive(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, Error> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Render every trip and pack the successes into one in-memory zip.
///
/// A trip that fails to render is logged, recorded in `failures` and
/// skipped. An archive with no entries is still returned; deciding what to
/// tell the operator is up to the caller.
pub fn export_batch(trips: &[TripRecord], settings: &AgencySettings) -> Result<BatchExport, Error> {
    let t0 = std::time::Instant::now();
    let now = now_millis();

    let parts = trips
        .iter()
        .enumerate()
        .fold(BatchParts::default(), |mut parts, (index, trip)| {
            match render_pdf(trip, settings) {
                Ok(bytes) => {
                    let name = format!("{ARCHIVE_FOLDER}/{}", trip_file_name(trip, now));
                    parts.add_entry(name, bytes);
                }
                Err(error) => {
                    log::error!(
                        "Skipping faulty trip #{index} ({}) in bulk generation: {error}",
                        trip.vehicle_reg_no
                    );
                    parts.failures.push(BatchFailure {
                        index,
                        vehicle_reg_no: trip.vehicle_reg_no.clone(),
                        error,
                    });
                }
            }
            parts
        });

    let bytes = build_archive(&parts.entries)?;
    log::info!(
        "Bulk export: {} trips, {} entries, {} skipped, {} bytes in {:.1}ms",
        trips.len(),
        parts.entries.len(),
        parts.failures.len(),
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(BatchExport {
        archive: ExportFile {
            filename: archive_file_name(settings),
            bytes,
        },
        entries: parts.entries.into_iter().map(|(name, _)| name).collect(),
        failures: parts.failures,
    })
}

/// The admin "download selected" action: one trip goes out as a plain PDF,
/// several as an archive. An archive where every trip failed is an error.
pub fn export_selection(trips: &[TripRecord], settings: &AgencySettings) -> Result<Export, Error> {
    match trips {
        [] => Err(Error::NothingSelected),
        [trip] => export_single(trip, settings).map(Export::Single),
        _ => {
            let batch = export_batch(trips, settings)?;
            if batch.entries.is_empty() {
                return Err(Error::EmptyArchive {
                    failed: batch.failures.len(),
                });
            }
            Ok(Export::Archive(batch))
        }
    }
}
