use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::APP_DIR_NAME;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file not found: {0}")]
    MissingFile(PathBuf),
    #[error("model {name} not found in cache or bundled directory and no download URL configured")]
    NotFound { name: String },
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where to look for one model file.
#[derive(Clone, Debug, Default)]
pub struct ModelSource {
    /// File name inside the cache and bundled directories.
    pub name: String,
    /// User-supplied path; when set, nothing else is consulted.
    pub explicit_path: Option<PathBuf>,
    pub bundled_dir: Option<PathBuf>,
    pub url: Option<String>,
}

/// Resolve a model file, checking local locations before downloading.
///
/// Resolution order:
/// 1. Explicit path (must exist)
/// 2. User cache directory (platform-specific)
/// 3. Bundled directory
/// 4. Download from URL to cache, if a URL is configured
pub fn resolve(source: &ModelSource, progress: Option<ProgressFn>) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = &source.explicit_path {
        return explicit(path);
    }
    resolve_in(&model_cache_dir()?, source, progress)
}

fn explicit(path: &Path) -> Result<PathBuf, ModelResolveError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ModelResolveError::MissingFile(path.to_path_buf()))
    }
}

fn resolve_in(
    cache_dir: &Path,
    source: &ModelSource,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cached_path = cache_dir.join(&source.name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    if let Some(dir) = &source.bundled_dir {
        let bundled_path = dir.join(&source.name);
        if bundled_path.exists() {
            return Ok(bundled_path);
        }
    }

    let url = source.url.as_deref().ok_or_else(|| ModelResolveError::NotFound {
        name: source.name.clone(),
    })?;
    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {} from {url}", source.name);
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/SmileHard/models/`
/// - Linux: `$XDG_CACHE_HOME/SmileHard/models/` or `~/.cache/SmileHard/models/`
/// - Windows: `%LOCALAPPDATA%/SmileHard/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join(APP_DIR_NAME).join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    // Clean up .part file on any error
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ModelResolveError::Write { path, source }
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;
    let mut file = fs::File::create(temp_path).map_err(write_err(temp_path))?;

    let mut buf = vec![0u8; 256 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err(temp_path))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err(temp_path))?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err(temp_path))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(write_err(dest))?;
    Ok(())
}
