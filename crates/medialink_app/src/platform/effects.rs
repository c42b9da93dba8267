use std::sync::mpsc;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use medialink_core::{Effect, Msg, Notification, ServiceFailure, StorageKey};
use medialink_engine::{Clipboard, EngineEvent, EngineHandle, EventSink, UrlOpener};

use super::ui::input::AppEvent;

/// What the loop still has to do after effects ran.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub notifications: Vec<Notification>,
    /// Messages to apply right away, e.g. when the engine cannot take a request.
    pub follow_ups: Vec<Msg>,
}

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn Clipboard>,
    opener: Box<dyn UrlOpener>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        clipboard: Box<dyn Clipboard>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self {
            engine,
            clipboard,
            opener,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> EffectOutcome {
        let mut outcome = EffectOutcome::default();
        for effect in effects {
            match effect {
                Effect::LoadValue { key } => {
                    if let Err(err) = self.engine.load(key.as_str()) {
                        // Same as an unreadable store: carry on without the value.
                        engine_error!("Load {} not sent: {}", key.as_str(), err);
                        outcome.follow_ups.push(loaded_msg(key, None));
                    }
                }
                Effect::StoreValue { key, value } => {
                    engine_debug!("StoreValue key={} value_len={}", key.as_str(), value.len());
                    if let Err(err) = self.engine.store(key.as_str(), value) {
                        engine_error!("Store {} not sent: {}", key.as_str(), err);
                    }
                }
                Effect::RequestLink { prompt, model } => {
                    engine_info!(
                        "RequestLink model={} prompt_len={}",
                        model.api_name(),
                        prompt.len()
                    );
                    if let Err(err) = self.engine.ask(prompt, model.api_name()) {
                        engine_error!("Request not sent: {}", err);
                        outcome
                            .follow_ups
                            .push(Msg::LinkResponse(Err(ServiceFailure::new(err.to_string()))));
                    }
                }
                Effect::CopyToClipboard { text } => {
                    if let Err(err) = self.clipboard.copy(&text) {
                        engine_warn!("{}", err);
                    }
                }
                Effect::OpenUrl { url } => {
                    engine_info!("OpenUrl url={}", url);
                    if let Err(err) = self.opener.open(&url) {
                        engine_warn!("{}", err);
                    }
                }
                Effect::Notify(notification) => outcome.notifications.push(notification),
            }
        }
        outcome
    }
}

/// Forwards engine results into the main loop's inbox.
pub struct InboxSink {
    tx: mpsc::Sender<AppEvent>,
}

impl InboxSink {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        if let Some(msg) = map_engine_event(event) {
            let _ = self.tx.send(AppEvent::Core(msg));
        }
    }
}

pub fn map_engine_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::ValueLoaded { key, value } => {
            if key == StorageKey::VerificationFlag.as_str() {
                Some(loaded_msg(StorageKey::VerificationFlag, value))
            } else if key == StorageKey::SavedPrompt.as_str() {
                Some(loaded_msg(StorageKey::SavedPrompt, value))
            } else {
                engine_warn!("Ignoring value for unknown key {}", key);
                None
            }
        }
        // Write results are already logged by the engine.
        EngineEvent::ValueStored { .. } => None,
        EngineEvent::Answer(Ok(text)) => Some(Msg::LinkResponse(Ok(text))),
        EngineEvent::Answer(Err(err)) => Some(Msg::LinkResponse(Err(ServiceFailure {
            message: err.message().map(ToOwned::to_owned),
        }))),
    }
}

fn loaded_msg(key: StorageKey, value: Option<String>) -> Msg {
    match key {
        StorageKey::VerificationFlag => Msg::VerificationLoaded(value),
        StorageKey::SavedPrompt => Msg::SavedPromptLoaded(value),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    use medialink_core::Model;
    use medialink_engine::{
        ChannelEventSink, DesktopError, InferenceClient, InferenceError, InferenceFailureKind,
        KeyValueStore, MemoryKeyValueStore,
    };

    use super::*;

    pub(crate) const WAIT: Duration = Duration::from_secs(5);

    #[derive(Clone, Default)]
    pub(crate) struct Recorder {
        pub(crate) copied: Rc<RefCell<Vec<String>>>,
        pub(crate) opened: Rc<RefCell<Vec<String>>>,
    }

    impl Clipboard for Recorder {
        fn copy(&mut self, text: &str) -> Result<(), DesktopError> {
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    impl UrlOpener for Recorder {
        fn open(&self, url: &str) -> Result<(), DesktopError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    /// Answers with a fixed script: `Ok(text)` or an error carrying `message`.
    struct ScriptedClient {
        answer: Result<String, Option<String>>,
    }

    #[async_trait::async_trait]
    impl InferenceClient for ScriptedClient {
        async fn ask(&self, _prompt: &str, _model: &str) -> Result<String, InferenceError> {
            self.answer.clone().map_err(|message| match message {
                Some(message) => {
                    InferenceError::new(InferenceFailureKind::HttpStatus(429), message)
                }
                None => InferenceError::without_message(InferenceFailureKind::Network),
            })
        }
    }

    /// Runner over a real engine whose results go to `sink`.
    pub(crate) fn scripted_runner(
        store: Arc<dyn KeyValueStore>,
        answer: Result<String, Option<String>>,
        sink: Arc<dyn EventSink>,
        recorder: &Recorder,
    ) -> EffectRunner {
        let engine = EngineHandle::new(store, Arc::new(ScriptedClient { answer }), sink)
            .expect("engine");
        EffectRunner::new(
            engine,
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        )
    }

    fn runner_with(
        store: Arc<dyn KeyValueStore>,
        recorder: &Recorder,
    ) -> (EffectRunner, mpsc::Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel();
        let runner = scripted_runner(
            store,
            Ok("https://example.com/x".to_string()),
            Arc::new(ChannelEventSink::new(tx)),
            recorder,
        );
        (runner, rx)
    }

    #[test]
    fn notifications_are_returned_in_order() {
        let recorder = Recorder::default();
        let (mut runner, _rx) = runner_with(Arc::new(MemoryKeyValueStore::new()), &recorder);

        let outcome = runner.run(vec![
            Effect::Notify(Notification::success("one")),
            Effect::Notify(Notification::failure("two").with_detail("why")),
        ]);

        assert_eq!(
            outcome.notifications,
            vec![
                Notification::success("one"),
                Notification::failure("two").with_detail("why"),
            ]
        );
        assert!(outcome.follow_ups.is_empty());
    }

    #[test]
    fn clipboard_and_browser_receive_url() {
        let recorder = Recorder::default();
        let (mut runner, _rx) = runner_with(Arc::new(MemoryKeyValueStore::new()), &recorder);

        runner.run(vec![
            Effect::CopyToClipboard {
                text: "https://example.com/x".to_string(),
            },
            Effect::OpenUrl {
                url: "https://example.com/x".to_string(),
            },
        ]);

        assert_eq!(*recorder.copied.borrow(), vec!["https://example.com/x"]);
        assert_eq!(*recorder.opened.borrow(), vec!["https://example.com/x"]);
    }

    #[test]
    fn store_then_load_round_trips_through_engine() {
        let recorder = Recorder::default();
        let store = Arc::new(MemoryKeyValueStore::new());
        let (mut runner, rx) = runner_with(store.clone(), &recorder);

        runner.run(vec![
            Effect::StoreValue {
                key: StorageKey::SavedPrompt,
                value: "coffee".to_string(),
            },
            Effect::LoadValue {
                key: StorageKey::SavedPrompt,
            },
        ]);

        let _stored = rx.recv_timeout(WAIT).unwrap();
        let loaded = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(
            map_engine_event(loaded),
            Some(Msg::SavedPromptLoaded(Some("coffee".to_string())))
        );
        assert_eq!(
            store.get("savedProductDescription").unwrap().as_deref(),
            Some("coffee")
        );
    }

    #[test]
    fn request_link_asks_engine_with_model_name() {
        let recorder = Recorder::default();
        let (mut runner, rx) = runner_with(Arc::new(MemoryKeyValueStore::new()), &recorder);

        let outcome = runner.run(vec![Effect::RequestLink {
            prompt: "p".to_string(),
            model: Model::Gpt4oMini,
        }]);

        assert_eq!(outcome, EffectOutcome::default());
        assert_eq!(
            map_engine_event(rx.recv_timeout(WAIT).unwrap()),
            Some(Msg::LinkResponse(Ok("https://example.com/x".to_string())))
        );
    }

    #[test]
    fn engine_events_map_to_messages() {
        assert_eq!(
            map_engine_event(EngineEvent::ValueLoaded {
                key: "hasVerifiedAccount".to_string(),
                value: Some("true".to_string()),
            }),
            Some(Msg::VerificationLoaded(Some("true".to_string())))
        );
        assert_eq!(
            map_engine_event(EngineEvent::ValueLoaded {
                key: "somethingElse".to_string(),
                value: None,
            }),
            None
        );
        assert_eq!(
            map_engine_event(EngineEvent::ValueStored {
                key: "hasVerifiedAccount".to_string(),
                result: Ok(()),
            }),
            None
        );
    }
}
