//! Caller side of the export bridge.

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::error::{BridgeError, BridgeResult};
use crate::protocol::{SaveImage, SaveImageRequest, SaveImageResponse};

/// Cloneable sender for save requests.
///
/// Holding a handle grants no filesystem access: the only thing it can do
/// is ask the host to save an image.
#[derive(Debug, Clone)]
pub struct ExportHandle {
    sender: mpsc::Sender<SaveImageRequest>,
}

impl ExportHandle {
    pub fn new(sender: mpsc::Sender<SaveImageRequest>) -> Self {
        Self { sender }
    }

    /// Asks the host to save a PNG data URL, waiting for the outcome.
    ///
    /// A canceled prompt or a failed write is `Ok` with `success: false`.
    /// `Err` means the host itself is gone.
    pub async fn save_image(
        &self,
        png_data_url: impl Into<String>,
        default_path: impl Into<String>,
    ) -> BridgeResult<SaveImageResponse> {
        let (respond_to, response) = oneshot::channel();
        let request = SaveImageRequest {
            id: Uuid::new_v4(),
            payload: SaveImage {
                png_data_url: png_data_url.into(),
                default_path: default_path.into(),
            },
            respond_to,
        };

        self.sender
            .send(request)
            .await
            .map_err(|_| BridgeError::HostClosed)?;
        response.await.map_err(|_| BridgeError::HostDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closed_host() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);

        let handle = ExportHandle::new(sender);
        let err = handle.save_image("data:image/png;base64,", "x.png").await;
        assert_eq!(err.unwrap_err(), BridgeError::HostClosed);
    }

    #[tokio::test]
    async fn test_dropped_reply() {
        let (sender, mut receiver) = mpsc::channel::<SaveImageRequest>(1);
        tokio::spawn(async move {
            // Drop the request without answering
            let _ = receiver.recv().await;
        });

        let handle = ExportHandle::new(sender);
        let err = handle.save_image("data:image/png;base64,", "x.png").await;
        assert_eq!(err.unwrap_err(), BridgeError::HostDropped);
    }
}
