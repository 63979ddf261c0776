//! Filesystem entry points.
//!
//! Thin wrappers that read or write a whole file and hand the bytes to
//! [`PackageReader`] / [`PackageWriter`]. The async variants do file IO on
//! `tokio::fs` and run the CPU-bound transcoding on the blocking pool.

use crate::common::{Error, Result};
use crate::ooxml::opc::config::TranscodeOptions;
use crate::ooxml::opc::package::Package;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use std::path::Path;

impl Package {
    /// Open a `.pptx` file with default options.
    ///
    /// # Errors
    /// [`Error::PackageNotFound`] if the file does not exist, otherwise the
    /// errors of [`PackageReader::from_bytes_with`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &TranscodeOptions::default())
    }

    /// Open a `.pptx` file.
    pub fn open_with<P: AsRef<Path>>(path: P, options: &TranscodeOptions) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        PackageReader::from_bytes_with(&data, options)
    }

    /// Encode the package and write it to `path` with default options.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PackageWriter::write(path, self)
    }

    /// Encode the package and write it to `path`.
    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &TranscodeOptions) -> Result<()> {
        let bytes = PackageWriter::to_bytes_with(self, options)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Async version of [`Package::open_with`].
    #[cfg(feature = "async")]
    pub async fn open_async<P: AsRef<Path>>(path: P, options: &TranscodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::PackageNotFound(path.display().to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        let options = options.clone();
        tokio::task::spawn_blocking(move || PackageReader::from_bytes_with(&data, &options)).await?
    }

    /// Async version of [`Package::save_with`].
    ///
    /// The package is cloned for the blocking encoder; binary parts share
    /// their buffers, so the copy is mostly the XML trees.
    #[cfg(feature = "async")]
    pub async fn save_async<P: AsRef<Path>>(
        &self,
        path: P,
        options: &TranscodeOptions,
    ) -> Result<()> {
        let package = self.clone();
        let options = options.clone();
        let bytes =
            tokio::task::spawn_blocking(move || PackageWriter::to_bytes_with(&package, &options))
                .await??;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

impl PackageReader {
    /// Decode a `.pptx` file, see [`Package::open`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Package> {
        Package::open(path)
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: &TranscodeOptions) -> Result<Package> {
        Package::open_with(path, options)
    }
}
