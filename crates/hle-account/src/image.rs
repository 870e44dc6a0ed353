//! Profile image policy.
//!
//! A session either holds an open image file or serves the built-in
//! default image. On-disk images are read from offset 0 and never past
//! `MAX_JPEG_IMAGE_SIZE`, whatever the file size.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Upper bound on any image payload.
pub const MAX_JPEG_IMAGE_SIZE: u32 = 0x20000;

/// Minimal valid 1x1 JPEG served when no user image resolves.
pub static DEFAULT_PROFILE_IMAGE: [u8; 107] = [
    0xff, 0xd8, 0xff, 0xdb, 0x00, 0x43, 0x00, 0x03, 0x02, 0x02, 0x02, 0x02, 0x02, 0x03, 0x02,
    0x02, 0x02, 0x03, 0x03, 0x03, 0x03, 0x04, 0x06, 0x04, 0x04, 0x04, 0x04, 0x04, 0x08, 0x06,
    0x06, 0x05, 0x06, 0x09, 0x08, 0x0a, 0x0a, 0x09, 0x08, 0x09, 0x09, 0x0a, 0x0c, 0x0f, 0x0c,
    0x0a, 0x0b, 0x0e, 0x0b, 0x09, 0x09, 0x0d, 0x11, 0x0d, 0x0e, 0x0f, 0x10, 0x10, 0x11, 0x10,
    0x0a, 0x0c, 0x12, 0x13, 0x12, 0x10, 0x13, 0x0f, 0x10, 0x10, 0x10, 0xff, 0xc9, 0x00, 0x0b,
    0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xff, 0xcc, 0x00, 0x06, 0x00, 0x10,
    0x10, 0x05, 0xff, 0xda, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3f, 0x00, 0xd2, 0xcf, 0x20,
    0xff, 0xd9,
];

/// Size of [`DEFAULT_PROFILE_IMAGE`].
pub const DEFAULT_PROFILE_IMAGE_SIZE: u32 = DEFAULT_PROFILE_IMAGE.len() as u32;

/// An open, read-only user image file.
#[derive(Debug)]
pub struct ProfileImage {
    file: File,
    path: PathBuf,
}

impl ProfileImage {
    /// Open `path` for reading. Directories and other non-files fail.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "profile image is not a regular file",
            ));
        }
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `min(file size, MAX_JPEG_IMAGE_SIZE)`, from the file's current size.
    pub fn capped_size(&self) -> io::Result<u32> {
        let len = self.file.metadata()?.len();
        Ok(len.min(u64::from(MAX_JPEG_IMAGE_SIZE)) as u32)
    }

    /// Read `capped_size()` bytes from offset 0.
    ///
    /// If the file shrinks under us the tail stays zeroed, so the byte
    /// count always matches the size reported just before.
    pub fn read(&mut self) -> io::Result<Vec<u8>> {
        let size = self.capped_size()? as usize;
        let mut buffer = vec![0u8; size];

        self.file.seek(SeekFrom::Start(0))?;
        let mut filled = 0;
        while filled < size {
            match self.file.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_image_is_jpeg() {
        assert_eq!(DEFAULT_PROFILE_IMAGE_SIZE, 107);
        assert_eq!(&DEFAULT_PROFILE_IMAGE[..2], &[0xff, 0xd8]);
        assert_eq!(&DEFAULT_PROFILE_IMAGE[105..], &[0xff, 0xd9]);
    }

    #[test]
    fn test_small_file_read_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.jpg");
        fs::write(&path, [1u8, 2, 3, 4, 5]).unwrap();

        let mut image = ProfileImage::open(&path).unwrap();
        assert_eq!(image.capped_size().unwrap(), 5);
        assert_eq!(image.read().unwrap(), vec![1, 2, 3, 4, 5]);
        // Second read starts over from offset 0
        assert_eq!(image.read().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_large_file_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.jpg");
        let contents: Vec<u8> = (0..500_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &contents).unwrap();

        let mut image = ProfileImage::open(&path).unwrap();
        assert_eq!(image.capped_size().unwrap(), MAX_JPEG_IMAGE_SIZE);

        let bytes = image.read().unwrap();
        assert_eq!(bytes.len(), MAX_JPEG_IMAGE_SIZE as usize);
        assert_eq!(&bytes[..], &contents[..MAX_JPEG_IMAGE_SIZE as usize]);
    }

    #[test]
    fn test_open_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProfileImage::open(&dir.path().join("missing.jpg")).is_err());
        assert!(ProfileImage::open(dir.path()).is_err());
    }
}
