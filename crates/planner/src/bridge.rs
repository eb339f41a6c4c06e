//! Line-delimited JSON bridge between a host and a [`PlanSession`].
//!
//! Reads one [`HostRequest`] per line, writes one [`HostResponse`] per line.
//! A file list is sent as soon as the bridge starts. Requests are handled
//! on their own tasks so a file-list request is answered while a plan is
//! being generated; submissions still run one at a time inside the session.

use std::sync::Arc;
use taskweaver_core::host::{HostRequest, HostResponse};
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::session::PlanSession;

/// Serve `input` until it reaches end of file, then wait for in-flight
/// requests to finish and their responses to be written.
pub async fn serve<R, W>(session: Arc<PlanSession>, input: R, output: W) -> io::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<HostResponse>(32);

    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_string(&response).map_err(io::Error::other)?;
            line.push('\n');
            output.write_all(line.as_bytes()).await?;
            output.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let files = session.files().await;
    info!(
        root = %session.root().display(),
        files = files.len(),
        "Host bridge started"
    );
    if tx.send(HostResponse::FileList { files }).await.is_err() {
        warn!("Host output closed before the file list was sent");
    }

    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<HostRequest>(line) {
            Ok(request) => {
                debug!(?request, "Host request");
                let session = session.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    for response in session.handle(request).await {
                        if tx.send(response).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                warn!(error = %e, "Unrecognized host message");
                let response = HostResponse::Error {
                    message: format!("Unrecognized message: {e}"),
                };
                if tx.send(response).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(tx);
    match writer.await {
        Ok(result) => result,
        Err(e) => Err(io::Error::other(e)),
    }
}
