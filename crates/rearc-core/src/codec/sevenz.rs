//! 7z codec adapter (behind the `sevenz` feature).
//!
//! Password is supported on both decode and encode; encode with a password
//! switches the content methods to AES-256 over LZMA2. The entry list is
//! read from the archive header before extraction so the progress total is
//! known up front.

use std::cell::RefCell;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use sevenz_rust2::Archive;
use sevenz_rust2::ArchiveEntry;
use sevenz_rust2::ArchiveWriter;
use sevenz_rust2::EncoderMethod;
use sevenz_rust2::Password;
use sevenz_rust2::encoder_options::AesEncoderOptions;

use crate::ArchiveError;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;

use super::Codec;
use super::collect_entries;

/// 7z adapter.
pub struct SevenZCodec;

impl Codec for SevenZCodec {
    fn decode(
        &self,
        archive: &Path,
        staging: &StagingArea,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        let mut source = File::open(archive)?;
        let pass = password.map_or_else(Password::empty, Password::from);

        // Header pass: entry count for progress, path validation before
        // anything is written.
        let header = Archive::read(&mut source, &pass).map_err(|e| classify(&e, archive))?;
        let total = header.files.len();
        for file in &header.files {
            staging.resolve(&file.name)?;
        }
        source.rewind()?;

        let completed = RefCell::new(0usize);
        let progress = RefCell::new(&mut *reporter.progress);
        let extract_fn = |entry: &ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            let dest = staging
                .resolve(&entry.name)
                .map_err(|e| sevenz_rust2::Error::Other(e.to_string().into()))?;

            if entry.is_directory() {
                std::fs::create_dir_all(&dest)?;
            } else {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&dest)?;
                std::io::copy(reader, &mut out)?;
            }

            let mut done = completed.borrow_mut();
            *done += 1;
            progress.borrow_mut().update(*done, total, "import 7z");
            Ok(true)
        };

        if password.is_some() {
            sevenz_rust2::decompress_with_extract_fn_and_password(
                source,
                staging.root(),
                pass,
                extract_fn,
            )
            .map_err(|e| classify(&e, archive))?;
        } else {
            sevenz_rust2::decompress_with_extract_fn(source, staging.root(), extract_fn)
                .map_err(|e| classify(&e, archive))?;
        }
        reporter.progress.finished("import 7z");

        Ok(total)
    }

    fn encode(
        &self,
        staging: &StagingArea,
        output: &Path,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        let mut writer = ArchiveWriter::create(output).map_err(|e| classify(&e, output))?;
        if let Some(pw) = password {
            writer.set_content_methods(vec![
                AesEncoderOptions::new(pw.into()).into(),
                EncoderMethod::LZMA2.into(),
            ]);
        }

        let entries = collect_entries(staging)?;
        let total = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            let archive_entry = ArchiveEntry::from_path(&entry.abs, entry.rel.clone());
            if entry.is_dir {
                writer
                    .push_archive_entry::<File>(archive_entry, None)
                    .map_err(|e| classify(&e, output))?;
            } else {
                let source = File::open(&entry.abs)?;
                writer
                    .push_archive_entry(archive_entry, Some(source))
                    .map_err(|e| classify(&e, output))?;
            }
            reporter.progress.update(index + 1, total, "export 7z");
        }

        writer.finish()?;
        reporter.progress.finished("export 7z");

        Ok(total)
    }

    fn name(&self) -> &'static str {
        "7z"
    }
}

/// Maps 7z provider errors onto the crate's error kinds.
///
/// The provider does not expose a dedicated wrong-password variant across
/// all paths, so classification goes by the error text, the same signal
/// the archive tools themselves print.
fn classify(err: &sevenz_rust2::Error, archive: &Path) -> ArchiveError {
    let text = err.to_string();
    let lower = text.to_lowercase();
    if lower.contains("password") || lower.contains("encrypt") || lower.contains("checksum") {
        ArchiveError::EncryptedArchive {
            archive: archive.to_path_buf(),
        }
    } else {
        ArchiveError::InvalidArchive(format!("7z: {text}"))
    }
}
