use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use hexe_buffer::Buffer;
use rand::Rng;

/// Write the buffer contents to `target` without ever leaving it half
/// written. The contents are written to a temporary file next to the target,
/// synced to disk and then renamed over the target.
/// On failure the target is untouched and the temporary file removed.
pub(crate) fn write_atomic(target: &Path, buf: &Buffer) -> io::Result<u64> {
    let dir = target
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let (tmp, file) = tmp_file_in(dir, target)?;
    log::debug!("Writing {:?} through {:?}", target, tmp);

    let result = write_and_rename(file, &tmp, target, buf);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }

    result
}

fn write_and_rename(file: File, tmp: &Path, target: &Path, buf: &Buffer) -> io::Result<u64> {
    if let Ok(meta) = fs::metadata(target) {
        file.set_permissions(meta.permissions())?;
    }

    let mut writer = BufWriter::new(file);
    let written = buf.write_to(&mut writer)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp, target)?;
    Ok(written)
}

/// Create a new uniquely named file in `dir`
fn tmp_file_in(dir: &Path, target: &Path) -> io::Result<(PathBuf, File)> {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut rng = rand::thread_rng();

    loop {
        let rand: u32 = rng.gen();
        let path = dir.join(format!(".{}.hexe-{:08x}.tmp", name, rand));

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => return Ok((path, f)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn overwrites_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"old content").unwrap();

        let mut buf = Buffer::from_path(&path).unwrap();
        buf.replace(0, b'O').unwrap();
        buf.insert_bytes(buf.len(), b"!").unwrap();

        let written = write_atomic(&path, &buf).unwrap();
        assert_eq!(12, written);
        assert_eq!(b"Old content!".to_vec(), fs::read(&path).unwrap());
        assert_eq!(vec!["data.bin".to_string()], entries(dir.path()));

        // Buffer still reads the original file contents
        assert_eq!(b"Old content!".to_vec(), buf.to_vec().unwrap());
    }

    #[test]
    fn creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.bin");
        let buf = Buffer::from_bytes(vec![1, 2, 3]);

        write_atomic(&path, &buf).unwrap();
        assert_eq!(vec![1, 2, 3], fs::read(&path).unwrap());
    }

    #[test]
    fn failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        // Renaming a file over a directory fails
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), b"x").unwrap();

        let buf = Buffer::from_bytes(vec![1, 2, 3]);
        assert!(write_atomic(&target, &buf).is_err());
        assert!(target.is_dir());
        assert_eq!(vec!["target".to_string()], entries(dir.path()));
    }
}
