use std::cell::RefCell;
use std::future::Future;
use std::thread;

use futures::channel::oneshot;

use super::error::EditorError;
use super::session::EditorSession;
use crate::event::ListEntry;
use crate::loaders::{self, ModelData, ModelSource};

/// Decode on a worker thread; the returned future resolves exactly once
pub async fn decode_in_background(source: ModelSource) -> Result<ModelData, EditorError> {
    let (sender, receiver) = oneshot::channel();
    let source_name = source.to_string();

    thread::Builder::new()
        .name("model-decoder".into())
        .spawn(move || {
            // Receiver gone means the caller stopped waiting
            let _ = sender.send(loaders::decode(&source));
        })
        .map_err(|err| {
            log::error!("Could not start model decoder: {}", err);
            EditorError::WorkerLost
        })?;

    match receiver.await {
        Ok(Ok(model)) => Ok(model),
        Ok(Err(source)) => Err(EditorError::Decode {
            source_name,
            source,
        }),
        Err(oneshot::Canceled) => Err(EditorError::WorkerLost),
    }
}

/// Load a model into the session
///
/// The session is only borrowed before and after the decode, so other
/// edits can happen while it is pending. The viewport must already be
/// mounted when the load starts (headless callers mount a virtual one) and
/// stay mounted for the whole load; otherwise the decoded model is dropped
/// and the load resolves to [`EditorError::Detached`].
pub async fn load_from_source(
    session: &RefCell<EditorSession>,
    source: ModelSource,
) -> Result<ListEntry, EditorError> {
    log::info!("Loading model from {}", source);
    load_with(session, decode_in_background(source)).await
}

/// Same as [`load_from_source`] with the decode step supplied by the caller
///
/// `decode` is not polled until the viewport has been checked.
pub async fn load_with<F>(session: &RefCell<EditorSession>, decode: F) -> Result<ListEntry, EditorError>
where
    F: Future<Output = Result<ModelData, EditorError>>,
{
    let token = session
        .borrow()
        .viewport()
        .mount_token()
        .ok_or(EditorError::Detached)?;

    let model = decode.await.map_err(|err| {
        match &err {
            EditorError::Decode {
                source_name,
                source,
            } => log::error!("Failed to load {}: {:#}", source_name, source),
            other => log::error!("Model load failed: {}", other),
        }
        err
    })?;

    let mut session = session.borrow_mut();
    if !session.viewport().is_current(token) {
        log::warn!("Viewport detached while {:?} was loading, discarding it", model.name);
        return Err(EditorError::Detached);
    }

    Ok(session.insert_model(model))
}
