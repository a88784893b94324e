//! Synthetic release archives for tests.
//!
//! Each archive holds `root/a/` (directory) and `root/a/b.txt` (file with
//! [`CONTENT`] and [`MODE`]), mirroring the single top-level directory that
//! real release archives use.

use std::io::{self, Cursor, Write};

pub(crate) const CONTENT: &[u8] = b"const std = @import(\"std\");\n";
pub(crate) const MODE: u32 = 0o750;

pub(crate) fn tar_bytes() -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_mode(0o755);
    dir.set_size(0);
    builder
        .append_data(&mut dir, "root/a/", io::empty())
        .unwrap();

    let mut file = tar::Header::new_gnu();
    file.set_entry_type(tar::EntryType::Regular);
    file.set_mode(MODE);
    file.set_size(CONTENT.len() as u64);
    builder
        .append_data(&mut file, "root/a/b.txt", CONTENT)
        .unwrap();

    builder.into_inner().unwrap()
}

pub(crate) fn tar_gz_bytes() -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_bytes()).unwrap();
    encoder.finish().unwrap()
}

pub(crate) fn tar_xz_bytes() -> Vec<u8> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(&tar_bytes()).unwrap();
    encoder.finish().unwrap()
}

pub(crate) fn zip_bytes() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let dir_opts = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    writer.add_directory("root/a/", dir_opts).unwrap();
    let file_opts = zip::write::SimpleFileOptions::default().unix_permissions(MODE);
    writer.start_file("root/a/b.txt", file_opts).unwrap();
    writer.write_all(CONTENT).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Assert that `dest` holds the fixture layout with the root component stripped.
pub(crate) fn assert_layout(dest: &std::path::Path) {
    let file = dest.join("a").join("b.txt");
    assert!(dest.join("a").is_dir());
    assert_eq!(std::fs::read(&file).unwrap(), CONTENT);
    assert!(!dest.join("root").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, MODE);
    }
}
