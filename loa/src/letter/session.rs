//! Letter session state machine
//!
//! The session starts empty, becomes active on the first successful
//! generation, and stays active through any number of revisions. The
//! transcript is append-only and strictly interleaved request-then-response;
//! a failed service call leaves both the transcript and the current letter
//! untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::LetterParams;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message, Role};
use crate::prompts::{PromptError, PromptLoader, RequestContext};

/// Errors from letter session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Revision was requested before any letter was generated
    #[error("No letter has been generated yet. Generate a letter first.")]
    NoActiveLetter,

    /// The text-generation service call failed
    #[error(transparent)]
    Generation(#[from] LlmError),

    /// A prompt template could not be loaded or rendered
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// One request/response exchange unit in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    fn to_message(&self) -> Message {
        Message {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Conversational state machine for generating and revising one letter
///
/// Owns the transcript and the current letter exclusively; callers hold the
/// session by value (or `&mut`) and serialize access. The current letter is
/// always the verbatim text of the last successful completion.
pub struct LetterSession {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
    temperature: f32,
    transcript: Vec<Turn>,
    current_letter: Option<String>,
}

impl LetterSession {
    /// Create an empty session
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, max_tokens: u32, temperature: f32) -> Self {
        debug!(max_tokens, temperature, "LetterSession::new: called");
        Self {
            llm,
            prompts,
            max_tokens,
            temperature,
            transcript: Vec::new(),
            current_letter: None,
        }
    }

    /// Generate a fresh letter from operator parameters
    ///
    /// Valid from any state. Regenerating discards the previous conversation:
    /// the transcript is reset to the new (request, response) pair. The
    /// alternative - carrying old letter context into a new top-level request -
    /// makes the service silently blend two letters.
    pub async fn generate(&mut self, params: &LetterParams) -> Result<String, SessionError> {
        debug!("LetterSession::generate: called");
        let request_text = self.prompts.request_prompt(&RequestContext::from_params(params))?;
        let letter = self.complete(vec![Message::user(request_text.clone())]).await?;

        self.transcript.clear();
        self.push_exchange(request_text, letter.clone());
        self.current_letter = Some(letter.clone());
        info!(letter_len = letter.len(), "Letter generated");

        Ok(letter)
    }

    /// Revise the current letter with a natural-language edit instruction
    ///
    /// Fails with [`SessionError::NoActiveLetter`] before the first
    /// generation, without contacting the service. The full transcript is
    /// sent so the service sees the original request and every prior edit.
    pub async fn revise(&mut self, instruction: &str) -> Result<String, SessionError> {
        debug!(instruction_len = instruction.len(), "LetterSession::revise: called");
        if self.current_letter.is_none() {
            debug!("LetterSession::revise: no active letter");
            return Err(SessionError::NoActiveLetter);
        }

        let request_text = self.prompts.revise_prompt(instruction)?;

        let mut messages: Vec<Message> = self.transcript.iter().map(Turn::to_message).collect();
        messages.push(Message::user(request_text.clone()));

        let letter = self.complete(messages).await?;

        self.push_exchange(request_text, letter.clone());
        self.current_letter = Some(letter.clone());
        info!(letter_len = letter.len(), "Letter revised");

        Ok(letter)
    }

    /// The text of the most recent successful completion, if any
    pub fn current_letter(&self) -> Option<&str> {
        self.current_letter.as_deref()
    }

    /// The full conversation transcript, in call order
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Serialize the transcript as a JSON array of {role, content} records
    pub fn transcript_json(&self) -> Result<String, serde_json::Error> {
        debug!(turn_count = self.transcript.len(), "LetterSession::transcript_json: called");
        serde_json::to_string_pretty(&self.transcript)
    }

    /// Issue one completion call; the transcript is only touched on success
    async fn complete(&self, messages: Vec<Message>) -> Result<String, SessionError> {
        let response = self
            .llm
            .complete(CompletionRequest {
                system_prompt: self.prompts.system_prompt()?,
                messages,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            })
            .await?;

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "LetterSession::complete: completion received"
        );

        response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("Completion contained no letter text".to_string()).into())
    }

    fn push_exchange(&mut self, request: String, response: String) {
        self.transcript.push(Turn {
            role: Role::User,
            content: request,
        });
        self.transcript.push(Turn {
            role: Role::Assistant,
            content: response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;

    fn session_with(responses: Vec<&str>) -> (LetterSession, Arc<MockLlmClient>) {
        let client = Arc::new(MockLlmClient::new(responses.into_iter().map(String::from).collect()));
        let session = LetterSession::new(client.clone(), PromptLoader::embedded_only(), 2500, 0.2);
        (session, client)
    }

    #[tokio::test]
    async fn test_revise_before_generate_fails_without_service_call() {
        let (mut session, client) = session_with(vec!["unused"]);

        let result = session.revise("make it shorter").await;
        assert!(matches!(result, Err(SessionError::NoActiveLetter)));
        assert_eq!(client.call_count(), 0);
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_generate_sets_current_letter_and_transcript() {
        let (mut session, client) = session_with(vec!["Dear Sir,\nThis letter authorizes."]);

        let letter = session.generate(&LetterParams::default()).await.unwrap();
        assert_eq!(letter, "Dear Sir,\nThis letter authorizes.");
        assert_eq!(session.current_letter(), Some("Dear Sir,\nThis letter authorizes."));
        assert_eq!(client.call_count(), 1);

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert!(transcript[0].content.contains("Generate a Letter of Authorization"));
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[1].content, letter);
    }

    #[tokio::test]
    async fn test_generate_then_revise_interleaves_turns() {
        let (mut session, _client) = session_with(vec!["First draft", "Second draft"]);

        session.generate(&LetterParams::default()).await.unwrap();
        let revised = session.revise("change the payment amount to 350").await.unwrap();

        assert_eq!(revised, "Second draft");
        assert_eq!(session.current_letter(), Some("Second draft"));

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        let roles: Vec<Role> = transcript.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
        assert!(transcript[2].content.contains("change the payment amount to 350"));
        assert_eq!(transcript[3].content, "Second draft");
    }

    #[tokio::test]
    async fn test_regenerate_resets_transcript() {
        let (mut session, _client) = session_with(vec!["First letter", "Second letter"]);

        session.generate(&LetterParams::default()).await.unwrap();
        session.generate(&LetterParams::default()).await.unwrap();

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.current_letter(), Some("Second letter"));
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_session_untouched() {
        let (mut session, _client) = session_with(vec![]);

        let result = session.generate(&LetterParams::default()).await;
        assert!(matches!(result, Err(SessionError::Generation(_))));
        assert!(session.current_letter().is_none());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_failed_revision_keeps_previous_letter() {
        let (mut session, client) = session_with(vec!["Only draft"]);

        session.generate(&LetterParams::default()).await.unwrap();
        let result = session.revise("add a liability clause").await;

        assert!(matches!(result, Err(SessionError::Generation(_))));
        assert_eq!(client.call_count(), 2);
        // No dangling request turn, current letter unchanged
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.current_letter(), Some("Only draft"));
    }

    #[tokio::test]
    async fn test_transcript_json_shape() {
        let (mut session, _client) = session_with(vec!["Draft"]);
        session.generate(&LetterParams::default()).await.unwrap();

        let json = session.transcript_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let turns = parsed.as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["role"], "user");
        assert_eq!(turns[1]["role"], "assistant");
        assert_eq!(turns[1]["content"], "Draft");
    }
}
