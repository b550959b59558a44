use std::sync::mpsc;

use ndarray::Array2;
use tracing::{debug, warn};

use crate::detection::extract_geometry;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::mask::{decode, AlphaMask};
use crate::model::{encode_prompts, ImageEmbedding, MaskPredictor, ModelScale};

use super::messages::{InferenceRequest, WorkerCommand, WorkerResult, WorkerSettings};

/// Per-image state living on the worker thread.
struct ImageCache {
    image_id: u64,
    embedding: ImageEmbedding,
    scale: ModelScale,
    /// Low-resolution logits of the last successful inference.
    low_res: Option<Array2<f32>>,
}

/// Spawn the worker thread. Returns the command sender.
///
/// The thread exits when the sender is dropped.
pub fn spawn_worker(
    predictor: Box<dyn MaskPredictor>,
    settings: WorkerSettings,
    result_tx: mpsc::Sender<WorkerResult>,
) -> Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("segview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, predictor, settings);
        })?;

    Ok(cmd_tx)
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    mut predictor: Box<dyn MaskPredictor>,
    settings: WorkerSettings,
) {
    let mut cache: Option<ImageCache> = None;

    while let Ok(first) = cmd_rx.recv() {
        // Drain whatever queued up meanwhile; only the newest inference runs.
        let mut batch = vec![first];
        batch.extend(cmd_rx.try_iter());
        let newest_infer = batch
            .iter()
            .rposition(|cmd| matches!(cmd, WorkerCommand::Infer(_)));

        for (i, cmd) in batch.into_iter().enumerate() {
            match cmd {
                WorkerCommand::OpenImage {
                    image_id,
                    embedding,
                    scale,
                } => {
                    debug!(image_id, "Worker cached image embedding");
                    cache = Some(ImageCache {
                        image_id,
                        embedding,
                        scale,
                        low_res: None,
                    });
                }
                WorkerCommand::Infer(req) if Some(i) != newest_infer => {
                    debug!(seq = req.seq, "Request superseded before running");
                }
                WorkerCommand::Infer(req) => {
                    let seq = req.seq;
                    let outcome =
                        handle_infer(&req, cache.as_mut(), predictor.as_mut(), &settings);
                    let result = match outcome {
                        Ok((mask, geometry)) => WorkerResult::Segmented {
                            seq,
                            mask,
                            geometry,
                        },
                        Err(message) => {
                            warn!(seq, %message, "Segmentation cycle failed");
                            WorkerResult::Failed { seq, message }
                        }
                    };
                    if tx.send(result).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Predict, decode and extract one request.
fn handle_infer(
    req: &InferenceRequest,
    cache: Option<&mut ImageCache>,
    predictor: &mut dyn MaskPredictor,
    settings: &WorkerSettings,
) -> std::result::Result<(AlphaMask, Geometry), String> {
    let cache = match cache {
        Some(c) if c.image_id == req.image_id => c,
        _ => return Err(format!("no embedding cached for image {}", req.image_id)),
    };

    let prior = if req.use_prior_mask {
        cache.low_res.as_ref()
    } else {
        None
    };
    let feeds = encode_prompts(&req.clicks, req.box_prompt.as_ref(), &cache.scale, prior)
        .map_err(|e| format!("Failed to encode prompts: {e}"))?;

    let output = predictor
        .predict(&cache.embedding, &feeds)
        .map_err(|e| format!("Inference failed: {e}"))?;

    let mask = decode(&output.mask, output.width, output.height, &settings.style)
        .map_err(|e| format!("Failed to decode mask: {e}"))?;

    let geometry = extract_geometry(&mask, &settings.extraction)
        .to_image_space(mask.size(), cache.scale.natural_size());

    cache.low_res = output.low_res;
    Ok((mask, geometry))
}
