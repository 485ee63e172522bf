//! Shared voice model lifecycle
//!
//! The vosk model takes seconds to load and tens of megabytes of memory,
//! so it is loaded at most once per process: first use locks the registry,
//! resolves the model directory (unpacking a downloaded zip archive if
//! that is all we have), loads the model, and caches it. After that the
//! model is immutable and shared read-only by every recognizer instance.

use crate::config::Config;
use crate::error::RecognizeError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use vosk::Model;

/// Process-wide model cache, populated on first use
static SHARED_MODEL: Mutex<Option<Arc<Model>>> = Mutex::new(None);

/// Get the shared model, loading it on first call.
///
/// Load failures are returned to every caller rather than cached; no
/// session can succeed without a model, so the error must stay visible.
pub fn shared_model(config: &Config) -> Result<Arc<Model>, RecognizeError> {
    let mut guard = SHARED_MODEL
        .lock()
        .map_err(|e| RecognizeError::InitFailed(format!("model registry lock poisoned: {}", e)))?;

    if let Some(model) = guard.as_ref() {
        return Ok(Arc::clone(model));
    }

    let dir = prepare_model_dir(&config.model_dir())?;
    tracing::info!("Loading voice model from {:?}", dir);
    let start = std::time::Instant::now();

    let model = Model::new(dir.to_string_lossy().to_string())
        .ok_or_else(|| RecognizeError::ModelLoad(dir.display().to_string()))?;

    tracing::info!(
        "Voice model loaded in {:.1}s",
        start.elapsed().as_secs_f32()
    );

    let model = Arc::new(model);
    *guard = Some(Arc::clone(&model));
    Ok(model)
}

/// Resolve the directory the model actually lives in, extracting a
/// packaged zip archive on first use if that is all that is present.
///
/// Lookup order inside the configured model directory:
/// 1. a `model/` subdirectory
/// 2. an already-extracted `vosk-model-*` subdirectory
/// 3. the directory itself, if it looks like an extracted model
/// 4. a `*.zip` archive, extracted in place and re-scanned
pub fn prepare_model_dir(model_dir: &Path) -> Result<PathBuf, RecognizeError> {
    if let Some(dir) = find_model_dir(model_dir) {
        return Ok(dir);
    }

    if let Some(archive) = find_archive(model_dir) {
        tracing::info!("Extracting voice model archive {:?}", archive);
        extract_archive(&archive, model_dir)?;

        if let Some(dir) = find_model_dir(model_dir) {
            return Ok(dir);
        }
    }

    Err(RecognizeError::ModelNotFound(
        model_dir.display().to_string(),
    ))
}

/// An extracted vosk model directory always carries a `conf/` or `am/` subdir
fn looks_like_model(dir: &Path) -> bool {
    dir.join("conf").is_dir() || dir.join("am").is_dir()
}

fn find_model_dir(model_dir: &Path) -> Option<PathBuf> {
    let nested = model_dir.join("model");
    if nested.is_dir() && looks_like_model(&nested) {
        return Some(nested);
    }

    if let Ok(entries) = std::fs::read_dir(model_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if path.is_dir() && name.starts_with("vosk-model") && looks_like_model(&path) {
                return Some(path);
            }
        }
    }

    if looks_like_model(model_dir) {
        return Some(model_dir.to_path_buf());
    }

    None
}

fn find_archive(model_dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(model_dir).ok()?;
    entries
        .flatten()
        .map(|e| e.path())
        .find(|p| p.extension().map(|ext| ext == "zip").unwrap_or(false))
}

fn extract_archive(archive: &Path, dest: &Path) -> Result<(), RecognizeError> {
    let file =
        std::fs::File::open(archive).map_err(|e| RecognizeError::Extract(e.to_string()))?;
    let mut zip =
        zip::ZipArchive::new(file).map_err(|e| RecognizeError::Extract(e.to_string()))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| RecognizeError::Extract(e.to_string()))?;

        // Reject entries that would escape the destination
        let Some(relative) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
            return Err(RecognizeError::Extract(format!(
                "unsafe path in archive: {}",
                entry.name()
            )));
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| RecognizeError::Extract(e.to_string()))?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RecognizeError::Extract(e.to_string()))?;
            }
            let mut out = std::fs::File::create(&out_path)
                .map_err(|e| RecognizeError::Extract(e.to_string()))?;
            std::io::copy(&mut entry, &mut out)
                .map_err(|e| RecognizeError::Extract(e.to_string()))?;
        }
    }

    Ok(())
}
