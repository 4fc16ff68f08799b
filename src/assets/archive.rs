use flate2::read::GzDecoder;
use std::fs;
use std::io::BufReader;
use std::path::Path;
use tar::Archive;

/// Unpacks a gzip-compressed tar archive into `dest`, creating it if needed.
pub fn extract_tgz(
    archive_path: &Path,
    dest: &Path,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = fs::File::open(archive_path)
        .map_err(|e| format!("cannot open archive {}: {}", archive_path.display(), e))?;

    fs::create_dir_all(dest)?;

    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));
    archive
        .unpack(dest)
        .map_err(|e| format!("cannot extract {}: {}", archive_path.display(), e))?;

    Ok(())
}

#[cfg(test)]
pub fn build_tgz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}
