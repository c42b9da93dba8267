use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};

use crate::inference::InferenceClient;
use crate::store::KeyValueStore;
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Load { key: String },
    Store { key: String, value: String },
    Ask { prompt: String, model: String },
}

/// Receives engine results; called from the worker thread or a runtime task.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Front for the worker thread that owns the store and the tokio runtime.
///
/// Store and load commands run on the worker thread in submission order, so
/// the last `store` for a key is also the last write. `ask` runs as a task on
/// the runtime and does not hold up storage. Dropping the handle stops the
/// worker; answers still in flight are discarded.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        client: Arc<dyn InferenceClient>,
        sink: Arc<dyn EventSink>,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("medialink-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    handle_command(&runtime, store.as_ref(), &client, &sink, command);
                }
                engine_debug!("engine worker stopped");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn load(&self, key: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::Load { key: key.into() })
    }

    pub fn store(&self, key: impl Into<String>, value: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::Store {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn ask(&self, prompt: impl Into<String>, model: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::Ask {
            prompt: prompt.into(),
            model: model.into(),
        })
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(command).map_err(|_| EngineError::Stopped)
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    store: &dyn KeyValueStore,
    client: &Arc<dyn InferenceClient>,
    sink: &Arc<dyn EventSink>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Load { key } => {
            let value = match store.get(&key) {
                Ok(value) => value,
                Err(err) => {
                    engine_warn!("Failed to read {}: {}; treating as absent", key, err);
                    None
                }
            };
            engine_debug!("Loaded {} present={}", key, value.is_some());
            sink.emit(EngineEvent::ValueLoaded { key, value });
        }
        EngineCommand::Store { key, value } => {
            let result = store.set(&key, &value).map_err(|err| {
                engine_error!("Failed to store {}: {}", key, err);
                err.to_string()
            });
            sink.emit(EngineEvent::ValueStored { key, result });
        }
        EngineCommand::Ask { prompt, model } => {
            engine_info!("Ask model={} prompt_len={}", model, prompt.len());
            let client = Arc::clone(client);
            let sink = Arc::clone(sink);
            runtime.spawn(async move {
                let result = client.ask(&prompt, &model).await;
                match &result {
                    Ok(answer) => engine_info!("Answer received len={}", answer.len()),
                    Err(err) => engine_warn!("Inference failed: {}", err),
                }
                sink.emit(EngineEvent::Answer(result));
            });
        }
    }
}
