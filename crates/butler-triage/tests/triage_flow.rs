//! End-to-end pipeline tests with a scripted model and a recording notifier.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use butler_core::{ChannelError, InboundMessage, Notifier};
use butler_triage::{
    LlmProvider, MessageAnalyzer, ProviderError, TriageError, TriageOutcome, TriagePipeline,
};

const LONG_TEXT: &str = "Hey, quick heads up: the client moved the quarterly review to Thursday morning, so we need the final numbers and the deck ready by Wednesday night. Can you confirm you're on it?";

const VALID_JSON: &str = r#"{
    "priority": "high",
    "vibe": "stressed but polite",
    "tldr": "Client needs the quarterly numbers by Thursday.",
    "suggested_reply": "You'll have them Wednesday night.",
    "should_notify": true
}"#;

const SUPPRESS_JSON: &str = r#"{
    "priority": "low",
    "vibe": "promotional",
    "tldr": "Newsletter about a sale.",
    "suggested_reply": "No reply needed.",
    "should_notify": false
}"#;

/// Replays a queue of canned responses; unscripted calls get `VALID_JSON`.
struct ScriptedProvider {
    prompts: Mutex<Vec<String>>,
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
}

impl ScriptedProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
        })
    }

    fn push(&self, entry: Result<String, ProviderError>) {
        self.script.lock().unwrap().push_back(entry);
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(entry) => entry,
            None => Ok(VALID_JSON.to_string()),
        }
    }
}

struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), ChannelError> {
        if self.fail {
            return Err(ChannelError::SendFailed("scripted failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        Ok(())
    }
}

fn build_pipeline(
    provider: Arc<ScriptedProvider>,
    notifier: Arc<RecordingNotifier>,
    min_chars: usize,
) -> TriagePipeline {
    TriagePipeline::new(
        MessageAnalyzer::new(provider),
        notifier,
        "owner-chat",
        min_chars,
    )
}

fn message(text: &str) -> InboundMessage {
    InboundMessage {
        text: Some(text.to_string()),
        sender: "+15551234567".to_string(),
        sender_name: None,
    }
}

#[tokio::test]
async fn short_text_is_skipped_without_analysis() {
    let provider = ScriptedProvider::new();
    let notifier = RecordingNotifier::new();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    let outcome = pipeline.handle(message("ok see you then")).await.unwrap();

    assert_eq!(outcome, TriageOutcome::Skipped);
    assert!(provider.prompts().is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn qualifying_text_reaches_the_model_verbatim() {
    let provider = ScriptedProvider::new();
    let notifier = RecordingNotifier::new();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    pipeline.handle(message(LONG_TEXT)).await.unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(LONG_TEXT));
    assert!(prompts[0].contains("Sender: +15551234567"));
}

#[tokio::test]
async fn model_suppression_sends_nothing() {
    let provider = ScriptedProvider::new();
    provider.push(Ok(SUPPRESS_JSON.to_string()));
    let notifier = RecordingNotifier::new();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    let outcome = pipeline.handle(message(LONG_TEXT)).await.unwrap();

    assert_eq!(outcome, TriageOutcome::Suppressed);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn notification_is_formatted_and_delivered() {
    let provider = ScriptedProvider::new();
    let notifier = RecordingNotifier::new();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    let outcome = pipeline.handle(message(LONG_TEXT)).await.unwrap();

    assert_eq!(outcome, TriageOutcome::Notified);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    let (recipient, body) = &sent[0];
    assert_eq!(recipient, "owner-chat");
    assert!(body.contains("From: +15551234567"));
    assert!(body.contains("Vibe: stressed but polite"));
    assert!(body.contains("Priority: HIGH"));
    assert!(body.contains("TL;DR: Client needs the quarterly numbers by Thursday."));
    assert!(body.contains("Reply idea: \"You'll have them Wednesday night.\""));
}

#[tokio::test]
async fn provider_failure_is_isolated_per_message() {
    let provider = ScriptedProvider::new();
    provider.push(Err(ProviderError::Api {
        status: 503,
        message: "model overloaded".to_string(),
    }));
    let notifier = RecordingNotifier::new();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    let err = pipeline.handle(message(LONG_TEXT)).await.unwrap_err();
    assert!(matches!(err, TriageError::Analysis(_)));
    assert!(notifier.sent().is_empty());

    // The next message is unaffected.
    let outcome = pipeline.handle(message(LONG_TEXT)).await.unwrap();
    assert_eq!(outcome, TriageOutcome::Notified);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn message_without_text_is_skipped() {
    let provider = ScriptedProvider::new();
    let notifier = RecordingNotifier::new();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    let outcome = pipeline
        .handle(InboundMessage {
            text: None,
            sender: "+15551234567".to_string(),
            sender_name: None,
        })
        .await
        .unwrap();

    assert_eq!(outcome, TriageOutcome::Skipped);
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn notifier_failure_surfaces_as_error() {
    let provider = ScriptedProvider::new();
    let notifier = RecordingNotifier::failing();
    let pipeline = build_pipeline(provider.clone(), notifier.clone(), 100);

    let err = pipeline.handle(message(LONG_TEXT)).await.unwrap_err();
    assert!(matches!(err, TriageError::Notify(_)));
}
