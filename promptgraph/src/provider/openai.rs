//! OpenAI Chat Completions call for `ChatGateway` online mode.
//!
//! One system message pinning the assistant role, one user message carrying
//! the serialized context block and the prompt. Depends on `async_openai`
//! (feature `openai`).

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::ProviderError;

const SYSTEM_PROMPT: &str = "You are a helpful research assistant embedded in a node-based \
graph. Respond concisely and include lists when needed.";

/// Issues one chat completion and returns the trimmed assistant content.
pub(super) async fn ask_chat(
    api_key: &str,
    model: &str,
    temperature: f32,
    prompt: &str,
    context_block: &str,
) -> Result<String, ProviderError> {
    let config = OpenAIConfig::new().with_api_key(api_key);
    let client = Client::with_config(config);

    let user_content = format!("Context:\n{}\n\nPrompt:\n{}", context_block, prompt);
    let messages = vec![
        ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
            SYSTEM_PROMPT,
        )),
        ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
            user_content.as_str(),
        )),
    ];

    let mut args = CreateChatCompletionRequestArgs::default();
    args.model(model);
    args.messages(messages);
    args.temperature(temperature);
    let request = args
        .build()
        .map_err(|e| ProviderError::RequestFailed(format!("request build failed: {}", e)))?;

    let response = client
        .chat()
        .create(request)
        .await
        .map_err(|e| ProviderError::RequestFailed(format!("OpenAI request failed: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyContent)?;
    let content = choice.message.content.unwrap_or_default();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::EmptyContent);
    }
    Ok(trimmed.to_string())
}
