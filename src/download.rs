//! Archive retrieval.
//!
//! Archives are fetched once and kept: a destination that already exists is never re-downloaded.
//! Downloads go through a `.download` file that is renamed on success,
//! so that an interrupted download is never mistaken for an archive.
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use url::Url;

use crate::error::Error;

pub trait Fetch {
    /// Fetch `url` into `dst`, returning the number of bytes written.
    fn fetch(&self, url: &Url, dst: &Path) -> Result<u64, Error>;

    /// Fetch `url` into `dst` unless `dst` exists.
    ///
    /// Returns `true` if something was fetched.
    fn fetch_if_missing(&self, url: &Url, dst: &Path) -> Result<bool, Error> {
        if dst.exists() {
            debug!("{:?} already present, skipping download", dst);
            return Ok(false);
        }

        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.fetch(url, dst)?;
        Ok(true)
    }
}

/// Blocking http(s) downloader. `file://` urls are copied.
pub struct Downloader {
    client: reqwest::blocking::Client,
}

impl Default for Downloader {
    fn default() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Downloader {
    fn download_to(&self, url: &Url, out: &mut impl Write) -> Result<u64, Error> {
        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| Error::Custom(format!("invalid file url: {}", url)))?;
            let mut src = BufReader::new(File::open(path)?);
            return Ok(std::io::copy(&mut src, out)?);
        }

        let mut response = self.client.get(url.clone()).send()?.error_for_status()?;
        Ok(response.copy_to(out)?)
    }
}

impl Fetch for Downloader {
    fn fetch(&self, url: &Url, dst: &Path) -> Result<u64, Error> {
        info!("downloading {}", url);
        let tmp = download_path(dst);

        let result = File::create(&tmp).map_err(Error::from).and_then(|f| {
            let mut out = BufWriter::new(f);
            let nb_bytes = self.download_to(url, &mut out)?;
            out.flush()?;
            Ok(nb_bytes)
        });

        match result {
            Ok(nb_bytes) => {
                std::fs::rename(&tmp, dst)?;
                info!("downloaded {} ({} bytes)", url, nb_bytes);
                Ok(nb_bytes)
            }
            Err(e) => {
                // best effort: the error that matters is the download one
                let _ = std::fs::remove_file(&tmp);
                Err(e)
            }
        }
    }
}

/// Never downloads anything: archives have to be present locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl Fetch for Offline {
    fn fetch(&self, url: &Url, dst: &Path) -> Result<u64, Error> {
        Err(Error::Custom(format!(
            "{:?} is missing and downloads are disabled (from {})",
            dst, url
        )))
    }
}

fn download_path(dst: &Path) -> PathBuf {
    let mut p = dst.as_os_str().to_owned();
    p.push(".download");
    PathBuf::from(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_url() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("remote.tsv.gz");
        std::fs::write(&src, b"some bytes").unwrap();

        let dst = dir.path().join("local/archive.tsv.gz");
        let url = Url::from_file_path(&src).unwrap();

        let d = Downloader::default();
        assert!(d.fetch_if_missing(&url, &dst).unwrap());
        assert_eq!(std::fs::read(&dst).unwrap(), b"some bytes");
        assert!(!dir.path().join("local/archive.tsv.gz.download").exists());

        // second call is a no-op
        assert!(!d.fetch_if_missing(&url, &dst).unwrap());
    }

    #[test]
    fn failed_download_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("does-not-exist")).unwrap();
        let dst = dir.path().join("archive.tsv.gz");

        assert!(Downloader::default().fetch_if_missing(&url, &dst).is_err());
        assert!(!dst.exists());
        assert!(!dir.path().join("archive.tsv.gz.download").exists());
    }

    #[test]
    fn offline() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::parse("https://example.org/a.tsv.gz").unwrap();
        let dst = dir.path().join("a.tsv.gz");
        assert!(Offline.fetch_if_missing(&url, &dst).is_err());

        std::fs::write(&dst, b"").unwrap();
        assert!(!Offline.fetch_if_missing(&url, &dst).unwrap());
    }
}
