//! Hands a finished PDF or archive to the operator by saving it to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::export::ExportFile;

pub const DOWNLOAD_BLOCKED_NOTICE: &str =
    "Download failed. Your system settings might be blocking the download.";

#[derive(Clone, Debug, PartialEq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    /// Nothing to save; no file was touched.
    Skipped,
    /// Saving failed. `notice` is the message to show the operator.
    Blocked { notice: String },
}

/// Save `bytes` as `dir/filename`.
///
/// The data is staged in a hidden `.part` file and renamed into place once
/// fully written, so a reader never sees a half-written file. An empty blob
/// is refused with a warning. Failures never propagate: they are logged and
/// reported as [`DownloadOutcome::Blocked`].
pub fn trigger_download(bytes: &[u8], dir: &Path, filename: &str) -> DownloadOutcome {
    if bytes.is_empty() {
        log::warn!("Refusing to save {filename}: generation resulted in an empty file");
        return DownloadOutcome::Skipped;
    }

    match save(bytes, dir, filename) {
        Ok(path) => {
            log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
            DownloadOutcome::Saved(path)
        }
        Err(e) => {
            log::error!("Critical download error for {filename}: {e}");
            DownloadOutcome::Blocked {
                notice: DOWNLOAD_BLOCKED_NOTICE.to_string(),
            }
        }
    }
}

fn save(bytes: &[u8], dir: &Path, filename: &str) -> io::Result<PathBuf> {
    if filename.is_empty() || filename.contains(&['/', '\\'][..]) || filename == ".." {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a plain file name: {filename:?}"),
        ));
    }
    let target = dir.join(filename);
    let staging = dir.join(format!(".{filename}.part"));

    let written = fs::File::create(&staging)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&staging, &target));

    if let Err(e) = written {
        if staging.exists() {
            let _ = fs::remove_file(&staging);
        }
        return Err(e);
    }
    Ok(target)
}

impl ExportFile {
    pub fn download(&self, dir: &Path) -> DownloadOutcome {
        trigger_download(&self.bytes, dir, &self.filename)
    }
}
