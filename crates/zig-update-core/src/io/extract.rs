//! Archive extraction module
//!
//! Handles tar.gz, tar.xz and zip release archives. Every release archive wraps
//! its contents in one top-level directory (`zig-linux-x86_64-0.13.0/`), which
//! is dropped while extracting so the destination receives the contents
//! directly.
//!
//! All three formats share one walk ([`unpack`]) over a [`MemberSource`]; only
//! the container adapters differ.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Cursor, Read, Seek};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::Reporter;

/// File type bits of a Unix mode.
const S_IFMT: u32 = 0o170_000;
/// Symlink file type.
const S_IFLNK: u32 = 0o120_000;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Incomplete download: expected {expected} bytes, received {actual}")]
    IncompleteDownload { expected: u64, actual: u64 },

    #[error("Refusing to extract outside the destination: {}", .0.display())]
    UnsafePath(PathBuf),
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::Archive(other.to_string()),
        }
    }
}

/// Archive container, decided by the download URL's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Gzip-compressed tar (`.tar.gz`).
    TarGz,
    /// Xz-compressed tar (`.xz`, normally `.tar.xz`).
    TarXz,
    /// Zip (`.zip`), needs the whole body for its central directory.
    Zip,
}

impl ArchiveFormat {
    /// Detect the format from a download URL. Query strings and fragments are ignored.
    ///
    /// ```
    /// use zig_update_core::io::extract::ArchiveFormat;
    ///
    /// let url = "https://ziglang.org/download/0.13.0/zig-linux-x86_64-0.13.0.tar.xz";
    /// assert_eq!(ArchiveFormat::from_url(url).unwrap(), ArchiveFormat::TarXz);
    /// assert!(ArchiveFormat::from_url("https://example.com/zig.7z").is_err());
    /// ```
    pub fn from_url(url: &str) -> Result<Self, ExtractError> {
        let path = url.split(['?', '#']).next().unwrap_or(url);

        if path.ends_with(".tar.gz") {
            Ok(Self::TarGz)
        } else if path.ends_with(".zip") {
            Ok(Self::Zip)
        } else if path.ends_with(".xz") {
            Ok(Self::TarXz)
        } else {
            Err(ExtractError::UnsupportedFormat(url.to_string()))
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TarGz => "tar.gz",
            Self::TarXz => "tar.xz",
            Self::Zip => "zip",
        })
    }
}

/// What an archive member materializes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Directory,
    File,
    /// Symbolic or hard link. Not extracted.
    Link,
    /// Devices, fifos and anything else the walk does not handle.
    Other,
}

/// One entry read from an archive.
pub struct Member<'a> {
    /// Path as stored in the archive, top-level directory included.
    pub path: PathBuf,
    /// Recorded Unix permission bits, if the archive carries them.
    pub mode: Option<u32>,
    pub kind: MemberKind,
    /// Decompressed content. Empty for anything but regular files.
    pub reader: Box<dyn Read + 'a>,
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Sequential access to the members of an archive, in stored order.
pub trait MemberSource {
    /// Next member, or `None` once the archive is exhausted.
    fn next_member(&mut self) -> Result<Option<Member<'_>>, ExtractError>;
}

/// Members of a (decompressed) tar stream.
pub struct TarSource<'a, R: Read + 'a> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: Read + 'a> TarSource<'a, R> {
    pub fn new(archive: &'a mut tar::Archive<R>) -> Result<Self, ExtractError> {
        Ok(Self {
            entries: archive.entries()?,
        })
    }
}

impl<'a, R: Read + 'a> MemberSource for TarSource<'a, R> {
    fn next_member(&mut self) -> Result<Option<Member<'_>>, ExtractError> {
        for entry in self.entries.by_ref() {
            let entry = entry?;
            let header = entry.header();
            let entry_type = header.entry_type();

            // Global pax headers carry archive metadata (e.g. a commit id), not content.
            if entry_type.is_pax_global_extensions() {
                continue;
            }

            let kind = if entry_type.is_dir() {
                MemberKind::Directory
            } else if entry_type.is_file() {
                MemberKind::File
            } else if entry_type.is_symlink() || entry_type.is_hard_link() {
                MemberKind::Link
            } else {
                MemberKind::Other
            };
            let mode = header.mode().ok();
            let path = entry.path()?.into_owned();

            return Ok(Some(Member {
                path,
                mode,
                kind,
                reader: Box::new(entry),
            }));
        }
        Ok(None)
    }
}

/// Members of a zip archive, read through its central directory.
pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    next: usize,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self, ExtractError> {
        Ok(Self {
            archive: zip::ZipArchive::new(reader)?,
            next: 0,
        })
    }
}

impl<R: Read + Seek> MemberSource for ZipSource<R> {
    fn next_member(&mut self) -> Result<Option<Member<'_>>, ExtractError> {
        if self.next >= self.archive.len() {
            return Ok(None);
        }
        let index = self.next;
        self.next += 1;

        let file = self.archive.by_index(index)?;
        let mode = file.unix_mode();
        let kind = if file.is_dir() {
            MemberKind::Directory
        } else if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
            MemberKind::Link
        } else {
            MemberKind::File
        };
        let path = PathBuf::from(file.name());

        Ok(Some(Member {
            path,
            mode,
            kind,
            reader: Box::new(file),
        }))
    }
}

/// Counts from one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub directories: usize,
    /// Links and special files that were not extracted.
    pub skipped: usize,
}

/// Drop the archive's top-level directory from a member path.
///
/// Fails with [`ExtractError::UnsafePath`] for absolute paths and `..`
/// segments, so the result can always be joined under the destination.
///
/// ```
/// use std::path::Path;
/// use zig_update_core::io::extract::strip_root;
///
/// let stripped = strip_root(Path::new("zig-linux-x86_64-0.13.0/lib/std/std.zig")).unwrap();
/// assert_eq!(stripped, Path::new("lib/std/std.zig"));
/// assert!(strip_root(Path::new("zig/../../etc/passwd")).is_err());
/// ```
pub fn strip_root(path: &Path) -> Result<PathBuf, ExtractError> {
    let unsafe_path = || ExtractError::UnsafePath(path.to_path_buf());

    let mut components = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir));

    match components.next() {
        Some(Component::Normal(_)) | None => {}
        Some(_) => return Err(unsafe_path()),
    }

    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => relative.push(part),
            _ => return Err(unsafe_path()),
        }
    }
    Ok(relative)
}

/// Walk every member of `source` and materialize it under `dest`.
///
/// Links and special files are skipped with a warning; extraction continues
/// with the next member.
pub fn unpack<S, R>(source: &mut S, dest: &Path, reporter: &R) -> Result<ExtractSummary, ExtractError>
where
    S: MemberSource + ?Sized,
    R: Reporter + ?Sized,
{
    create_dir(dest)?;
    let mut summary = ExtractSummary::default();

    while let Some(mut member) = source.next_member()? {
        let relative = strip_root(&member.path)?;
        let target = dest.join(&relative);

        match member.kind {
            MemberKind::Directory => {
                create_dir(&target)?;
                summary.directories += 1;
            }
            MemberKind::File => {
                if relative.as_os_str().is_empty() {
                    return Err(ExtractError::Archive(format!(
                        "file '{}' is not inside a top-level directory",
                        member.path.display()
                    )));
                }
                write_file(member.reader.as_mut(), &target, member.mode)?;
                summary.files += 1;
            }
            MemberKind::Link | MemberKind::Other => {
                tracing::warn!(
                    "Skipping {:?} member {}",
                    member.kind,
                    member.path.display()
                );
                reporter.skipped(&member.path, "links and special files are not extracted");
                summary.skipped += 1;
                continue;
            }
        }

        tracing::debug!("Extracted {}", target.display());
        reporter.extracted(&target);
    }

    Ok(summary)
}

fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

fn write_file(reader: &mut dyn Read, target: &Path, mode: Option<u32>) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        create_dir(parent)?;
    }

    let mut file = File::create(target)?;
    io::copy(reader, &mut file)?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = mode {
            fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o7777))?;
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

fn extract_tar<R: Read, P: Reporter + ?Sized>(
    reader: R,
    dest: &Path,
    reporter: &P,
) -> Result<ExtractSummary, ExtractError> {
    let mut archive = tar::Archive::new(reader);
    let mut source = TarSource::new(&mut archive)?;
    let summary = unpack(&mut source, dest, reporter)?;
    drop(source);

    // Read past the end-of-archive marker so the whole body is received.
    io::copy(&mut archive.into_inner(), &mut io::sink())?;
    Ok(summary)
}

/// Extract a gzip-compressed tar stream into `dest`.
pub fn extract_tar_gz<R: Read, P: Reporter + ?Sized>(
    reader: R,
    dest: &Path,
    reporter: &P,
) -> Result<ExtractSummary, ExtractError> {
    extract_tar(flate2::read::GzDecoder::new(reader), dest, reporter)
}

/// Extract an xz-compressed tar stream into `dest`.
pub fn extract_tar_xz<R: Read, P: Reporter + ?Sized>(
    reader: R,
    dest: &Path,
    reporter: &P,
) -> Result<ExtractSummary, ExtractError> {
    extract_tar(xz2::read::XzDecoder::new(reader), dest, reporter)
}

/// Extract a fully buffered zip archive into `dest`.
///
/// When `declared_len` is known it must match the buffer length; otherwise
/// nothing is written and [`ExtractError::IncompleteDownload`] is returned.
pub fn extract_zip_bytes<P: Reporter + ?Sized>(
    bytes: &[u8],
    declared_len: Option<u64>,
    dest: &Path,
    reporter: &P,
) -> Result<ExtractSummary, ExtractError> {
    let actual = bytes.len() as u64;
    if let Some(expected) = declared_len {
        if expected != actual {
            return Err(ExtractError::IncompleteDownload { expected, actual });
        }
    }

    let mut source = ZipSource::new(Cursor::new(bytes))?;
    unpack(&mut source, dest, reporter)
}
