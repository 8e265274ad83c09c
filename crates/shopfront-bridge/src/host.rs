//! # Export Host
//!
//! Owns the save prompt and filesystem access. Each request is handled on
//! its own task, so concurrent saves each get their own prompt.
//!
//! ## Request Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ExportHost::run                                      │
//! │                                                                         │
//! │  recv SaveImageRequest ──► tokio::spawn ──► handle_save                 │
//! │                                                │                        │
//! │            prompt.choose_path("Save Barcode As", PNG only)              │
//! │              │                 │                  │                     │
//! │          Canceled           io error           Chosen(path)             │
//! │              │                 │                  │                     │
//! │   "Dialog canceled"      failed(reason)   ensure .png extension         │
//! │                                                   │                     │
//! │                                strip header, base64 decode, write       │
//! │                                                   │                     │
//! │                                  saved(path) │ failed(reason)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::handle::ExportHandle;
use crate::prompt::{PromptOutcome, SavePrompt};
use crate::protocol::{
    SaveDialogOptions, SaveImage, SaveImageRequest, SaveImageResponse, PNG_DATA_URL_HEADER,
};

/// Pending requests allowed before senders wait.
const CHANNEL_CAPACITY: usize = 16;

/// Host side of the export bridge.
pub struct ExportHost {
    receiver: mpsc::Receiver<SaveImageRequest>,
    prompt: Arc<dyn SavePrompt>,
}

impl ExportHost {
    /// Creates a host and the handle that talks to it.
    pub fn new(prompt: Arc<dyn SavePrompt>) -> (Self, ExportHandle) {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        (Self { receiver, prompt }, ExportHandle::new(sender))
    }

    /// Creates a host and runs it on the current tokio runtime.
    pub fn spawn(prompt: Arc<dyn SavePrompt>) -> (ExportHandle, JoinHandle<()>) {
        let (host, handle) = Self::new(prompt);
        (handle, tokio::spawn(host.run()))
    }

    /// Serves requests until every handle is dropped.
    pub async fn run(mut self) {
        info!("Export host started");

        while let Some(request) = self.receiver.recv().await {
            let prompt = Arc::clone(&self.prompt);
            tokio::spawn(async move {
                let SaveImageRequest {
                    id,
                    payload,
                    respond_to,
                } = request;
                debug!(%id, default_path = %payload.default_path, "Save request received");

                let response = handle_save(prompt.as_ref(), &payload).await;
                if response.success {
                    info!(%id, path = ?response.path, "Image saved");
                } else {
                    warn!(%id, reason = ?response.reason, "Image not saved");
                }

                // Caller may have stopped waiting
                let _ = respond_to.send(response);
            });
        }

        info!("Export host stopped");
    }
}

/// Prompts for a path and writes the decoded PNG there.
pub async fn handle_save(prompt: &dyn SavePrompt, payload: &SaveImage) -> SaveImageResponse {
    let options = SaveDialogOptions::png(&payload.default_path);

    let path = match prompt.choose_path(&options).await {
        Ok(PromptOutcome::Chosen(path)) => ensure_png_extension(path),
        Ok(PromptOutcome::Canceled) => return SaveImageResponse::canceled(),
        Err(e) => return SaveImageResponse::failed(e.to_string()),
    };

    let bytes = match decode_data_url(&payload.png_data_url) {
        Ok(bytes) => bytes,
        Err(e) => return SaveImageResponse::failed(e.to_string()),
    };

    match tokio::fs::write(&path, &bytes).await {
        Ok(()) => SaveImageResponse::saved(path),
        Err(e) => SaveImageResponse::failed(e.to_string()),
    }
}

/// Strips the PNG data URL header (when present) and decodes the rest.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = data_url
        .strip_prefix(PNG_DATA_URL_HEADER)
        .unwrap_or(data_url);
    STANDARD.decode(payload.trim())
}

/// Appends `.png` unless the path already ends in it (any case).
pub fn ensure_png_extension(path: PathBuf) -> PathBuf {
    let has_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if has_png {
        return path;
    }

    let mut raw: OsString = path.into_os_string();
    raw.push(".png");
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Answers prompts from a fixed script, recording what was asked.
    struct ScriptedPrompt {
        answers: Mutex<Vec<PromptOutcome>>,
        asked: Mutex<Vec<SaveDialogOptions>>,
    }

    impl ScriptedPrompt {
        fn new(answers: Vec<PromptOutcome>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers),
                asked: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SavePrompt for ScriptedPrompt {
        async fn choose_path(&self, options: &SaveDialogOptions) -> io::Result<PromptOutcome> {
            self.asked.lock().unwrap().push(options.clone());
            Ok(self
                .answers
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(PromptOutcome::Canceled))
        }
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shopfront-bridge-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn payload(bytes: &[u8]) -> SaveImage {
        SaveImage {
            png_data_url: format!("{}{}", PNG_DATA_URL_HEADER, STANDARD.encode(bytes)),
            default_path: "Fashion_World-P001-Price499.png".to_string(),
        }
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_confirm_writes_decoded_bytes() {
        let dir = temp_dir();
        let target = dir.join("label.png");
        let prompt = ScriptedPrompt::new(vec![PromptOutcome::Chosen(target.clone())]);

        let bytes = [0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        let response = handle_save(prompt.as_ref(), &payload(&bytes)).await;

        assert_eq!(response, SaveImageResponse::saved(target.clone()));
        assert_eq!(std::fs::read(&target).unwrap(), bytes);

        let asked = prompt.asked.lock().unwrap();
        assert_eq!(asked[0].title, "Save Barcode As");
        assert_eq!(asked[0].default_path, "Fashion_World-P001-Price499.png");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_cancel_touches_nothing() {
        let dir = temp_dir();
        let prompt = ScriptedPrompt::new(vec![PromptOutcome::Canceled]);

        let response = handle_save(prompt.as_ref(), &payload(b"png")).await;
        assert!(response.is_canceled());
        assert_eq!(response.reason.as_deref(), Some("Dialog canceled"));
        assert_eq!(entries(&dir), 0);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_extension_enforced() {
        let dir = temp_dir();
        let prompt = ScriptedPrompt::new(vec![PromptOutcome::Chosen(dir.join("shelf-tag"))]);

        let response = handle_save(prompt.as_ref(), &payload(b"png")).await;
        assert_eq!(response.path, Some(dir.join("shelf-tag.png")));
        assert!(dir.join("shelf-tag.png").is_file());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_decode_and_write_failures_are_reported() {
        let dir = temp_dir();

        let prompt = ScriptedPrompt::new(vec![PromptOutcome::Chosen(dir.join("bad.png"))]);
        let bad = SaveImage {
            png_data_url: "data:image/png;base64,***".to_string(),
            default_path: "bad.png".to_string(),
        };
        let response = handle_save(prompt.as_ref(), &bad).await;
        assert!(!response.success);
        assert!(response.reason.is_some());
        assert_eq!(entries(&dir), 0);

        let missing_parent = dir.join("no-such-dir").join("x.png");
        let prompt = ScriptedPrompt::new(vec![PromptOutcome::Chosen(missing_parent)]);
        let response = handle_save(prompt.as_ref(), &payload(b"png")).await;
        assert!(!response.success);
        assert!(!response.is_canceled());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_ensure_png_extension() {
        assert_eq!(ensure_png_extension("a.png".into()), PathBuf::from("a.png"));
        assert_eq!(ensure_png_extension("a.PNG".into()), PathBuf::from("a.PNG"));
        assert_eq!(ensure_png_extension("a".into()), PathBuf::from("a.png"));
        assert_eq!(ensure_png_extension("a.v2".into()), PathBuf::from("a.v2.png"));
    }

    #[test]
    fn test_decode_without_header() {
        assert_eq!(decode_data_url("AQID").unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_concurrent_requests_each_prompt() {
        let dir = temp_dir();
        let prompt = ScriptedPrompt::new(vec![
            PromptOutcome::Chosen(dir.join("one.png")),
            PromptOutcome::Chosen(dir.join("two.png")),
        ]);
        let (handle, _host) = ExportHost::spawn(prompt.clone());

        let other = handle.clone();
        let (a, b) = tokio::join!(
            handle.save_image(payload(b"a").png_data_url, "a.png"),
            other.save_image(payload(b"b").png_data_url, "b.png"),
        );

        assert!(a.unwrap().success);
        assert!(b.unwrap().success);
        assert_eq!(prompt.asked.lock().unwrap().len(), 2);
        assert_eq!(entries(&dir), 2);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_directory_host_refuses_paths_outside_export_dir() {
        let root = temp_dir();
        let export = root.join("export");
        let (handle, _host) = ExportHost::spawn(Arc::new(crate::DirectoryPrompt::new(&export)));

        let outside = root.join("outside").join("evil.png");
        let attempts = [
            outside.to_string_lossy().into_owned(),
            "../outside/evil2".to_string(),
        ];
        for default_path in attempts {
            let response = handle
                .save_image(payload(b"x").png_data_url, default_path)
                .await
                .unwrap();
            assert!(response.is_canceled());
        }
        assert!(!root.join("outside").exists());

        let response = handle
            .save_image(payload(b"x").png_data_url, "inside")
            .await
            .unwrap();
        assert_eq!(response.path, Some(export.join("inside.png")));

        let _ = std::fs::remove_dir_all(root);
    }
}
