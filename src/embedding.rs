use std::fmt;
use std::str::FromStr;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModelType,
};
use tch::Device;
use tracing::{info, warn};

use crate::error::{Result, ScorerError};

/// Turns texts into fixed-size document embeddings.
pub trait Encoder: Send + Sync {
    /// One embedding per input text, in input order.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// Pretrained sentence-embedding models the dense backend can load. All of
/// them mean-pool token representations into one vector per text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingModel {
    AllMiniLmL6V2,
    AllMiniLmL12V2,
    AllDistilrobertaV1,
    BertBaseNliMeanTokens,
    ParaphraseAlbertSmallV2,
}

impl EmbeddingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingModel::AllMiniLmL6V2 => "all-mini-lm-l6-v2",
            EmbeddingModel::AllMiniLmL12V2 => "all-mini-lm-l12-v2",
            EmbeddingModel::AllDistilrobertaV1 => "all-distilroberta-v1",
            EmbeddingModel::BertBaseNliMeanTokens => "bert-base-nli-mean-tokens",
            EmbeddingModel::ParaphraseAlbertSmallV2 => "paraphrase-albert-small-v2",
        }
    }

    fn model_type(&self) -> SentenceEmbeddingsModelType {
        match self {
            EmbeddingModel::AllMiniLmL6V2 => SentenceEmbeddingsModelType::AllMiniLmL6V2,
            EmbeddingModel::AllMiniLmL12V2 => SentenceEmbeddingsModelType::AllMiniLmL12V2,
            EmbeddingModel::AllDistilrobertaV1 => SentenceEmbeddingsModelType::AllDistilrobertaV1,
            EmbeddingModel::BertBaseNliMeanTokens => {
                SentenceEmbeddingsModelType::BertBaseNliMeanTokens
            }
            EmbeddingModel::ParaphraseAlbertSmallV2 => {
                SentenceEmbeddingsModelType::ParaphraseAlbertSmallV2
            }
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingModel {
    type Err = ScorerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all-mini-lm-l6-v2" => Ok(EmbeddingModel::AllMiniLmL6V2),
            "all-mini-lm-l12-v2" => Ok(EmbeddingModel::AllMiniLmL12V2),
            "all-distilroberta-v1" => Ok(EmbeddingModel::AllDistilrobertaV1),
            "bert-base-nli-mean-tokens" => Ok(EmbeddingModel::BertBaseNliMeanTokens),
            "paraphrase-albert-small-v2" => Ok(EmbeddingModel::ParaphraseAlbertSmallV2),
            _ => Err(ScorerError::UnsupportedModel(s.to_string())),
        }
    }
}

type EncodeReply = std::result::Result<Vec<Vec<f32>>, String>;

struct EncodeRequest {
    texts: Vec<String>,
    reply: mpsc::Sender<EncodeReply>,
}

/// rust-bert sentence-embedding model running on its own worker thread.
///
/// The model is loaded before [`BertEncoder::load`] returns; callers then
/// submit texts over a channel and block on a per-request reply.
pub struct BertEncoder {
    model: EmbeddingModel,
    requests: Option<mpsc::Sender<EncodeRequest>>,
    worker: Option<JoinHandle<()>>,
}

impl BertEncoder {
    pub fn load(model: EmbeddingModel, use_gpu: bool) -> Result<Self> {
        info!("Loading embedding model {model} (gpu: {use_gpu})");

        let (request_tx, request_rx) = mpsc::channel::<EncodeRequest>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<std::result::Result<(), String>>(1);

        let worker = thread::Builder::new()
            .name("bert-encoder".to_string())
            .spawn(move || {
                let device = if use_gpu {
                    Device::cuda_if_available()
                } else {
                    Device::Cpu
                };
                let built = SentenceEmbeddingsBuilder::remote(model.model_type())
                    .with_device(device)
                    .create_model();
                let encoder = match built {
                    Ok(encoder) => {
                        let _ = ready_tx.send(Ok(()));
                        encoder
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                for request in request_rx {
                    let result = encoder.encode(&request.texts).map_err(|e| e.to_string());
                    let _ = request.reply.send(result);
                }
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!("Embedding model {model} ready");
                Ok(Self {
                    model,
                    requests: Some(request_tx),
                    worker: Some(worker),
                })
            }
            Ok(Err(msg)) => {
                let _ = worker.join();
                Err(ScorerError::ModelLoad(msg))
            }
            Err(_) => Err(ScorerError::ModelLoad(
                "encoder thread exited during start-up".to_string(),
            )),
        }
    }

    pub fn model(&self) -> EmbeddingModel {
        self.model
    }
}

impl Encoder for BertEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let requests = self
            .requests
            .as_ref()
            .ok_or_else(|| ScorerError::Encoding("encoder is shut down".to_string()))?;

        let (reply_tx, reply_rx) = mpsc::channel();
        requests
            .send(EncodeRequest {
                texts: texts.iter().map(|t| t.to_string()).collect(),
                reply: reply_tx,
            })
            .map_err(|_| ScorerError::Encoding("encoder thread stopped".to_string()))?;

        reply_rx
            .recv()
            .map_err(|_| ScorerError::Encoding("encoder dropped the request".to_string()))?
            .map_err(ScorerError::Encoding)
    }
}

impl Drop for BertEncoder {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Embedding worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_model_names() {
        assert_eq!(
            "all-mini-lm-l6-v2".parse::<EmbeddingModel>().unwrap(),
            EmbeddingModel::AllMiniLmL6V2
        );
        assert_eq!(
            "Bert-Base-NLI-Mean-Tokens".parse::<EmbeddingModel>().unwrap(),
            EmbeddingModel::BertBaseNliMeanTokens
        );
    }

    #[test]
    fn test_rejects_unknown_model() {
        let err = "gpt-2".parse::<EmbeddingModel>().unwrap_err();
        assert!(matches!(err, ScorerError::UnsupportedModel(_)));
    }

    #[test]
    fn test_names_round_trip() {
        for model in [
            EmbeddingModel::AllMiniLmL6V2,
            EmbeddingModel::AllMiniLmL12V2,
            EmbeddingModel::AllDistilrobertaV1,
            EmbeddingModel::BertBaseNliMeanTokens,
            EmbeddingModel::ParaphraseAlbertSmallV2,
        ] {
            assert_eq!(model.to_string().parse::<EmbeddingModel>().unwrap(), model);
        }
    }
}
