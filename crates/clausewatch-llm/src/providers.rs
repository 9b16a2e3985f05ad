//! Provider wire formats.
//!
//! Every provider streams Server-Sent Events. OpenAI and Groq share one
//! payload format, Anthropic has its own. Requests are built per provider;
//! decoding goes through one SSE loop with a per-provider event parser.

use std::pin::Pin;

use futures::Stream;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tokio_stream::StreamExt;
use tracing::{debug, error};

use crate::error::LlmFailure;
use crate::types::{ChatMessage, LLMProvider};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// A single streamed token, end marker or failure.
#[derive(Debug)]
pub enum StreamChunk {
    Token(String),
    Done { tokens_used: usize },
    Error(LlmFailure),
}

#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: usize,
}

/// What one `data:` payload means for the stream.
#[derive(Debug, PartialEq, Eq)]
enum SseEvent {
    Token(String),
    Done,
    Failed(String),
    Ignore,
}

type EventParser = fn(&str) -> SseEvent;

/// Start a streaming generation against `provider`.
pub fn stream_llm(
    client: &Client,
    provider: LLMProvider,
    messages: Vec<ChatMessage>,
    model: &str,
    api_key: &str,
    params: SamplingParams,
) -> BoxedStream {
    debug!("Streaming from {} with model {}", provider, model);
    match provider {
        LLMProvider::OpenAI => Box::pin(sse_stream(
            openai_compat_request(client, OPENAI_URL, &messages, model, api_key, params),
            parse_openai_event,
        )),
        LLMProvider::Groq => Box::pin(sse_stream(
            openai_compat_request(client, GROQ_URL, &messages, model, api_key, params),
            parse_openai_event,
        )),
        LLMProvider::Anthropic => Box::pin(sse_stream(
            anthropic_request(client, &messages, model, api_key, params),
            parse_anthropic_event,
        )),
    }
}

fn openai_compat_request(
    client: &Client,
    url: &str,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    params: SamplingParams,
) -> RequestBuilder {
    let msgs: Vec<Value> = messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    client
        .post(url)
        .bearer_auth(api_key)
        .json(&json!({
            "model": model,
            "messages": msgs,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
            "stream": true,
        }))
}

/// Anthropic takes the system prompt as a top-level field.
fn anthropic_request(
    client: &Client,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    params: SamplingParams,
) -> RequestBuilder {
    let conv_msgs: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": conv_msgs,
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
        "stream": true,
    });
    if let Some(system) = messages.iter().find(|m| m.role == "system") {
        body["system"] = json!(system.content);
    }

    client
        .post(ANTHROPIC_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
}

fn parse_openai_event(data: &str) -> SseEvent {
    if data.trim() == "[DONE]" {
        return SseEvent::Done;
    }
    match serde_json::from_str::<Value>(data) {
        Ok(parsed) => match parsed["choices"][0]["delta"]["content"].as_str() {
            Some(content) if !content.is_empty() => SseEvent::Token(content.to_string()),
            _ => SseEvent::Ignore,
        },
        Err(_) => SseEvent::Ignore,
    }
}

fn parse_anthropic_event(data: &str) -> SseEvent {
    let Ok(parsed) = serde_json::from_str::<Value>(data) else {
        return SseEvent::Ignore;
    };
    match parsed["type"].as_str() {
        Some("content_block_delta") => match parsed["delta"]["text"].as_str() {
            Some(text) if !text.is_empty() => SseEvent::Token(text.to_string()),
            _ => SseEvent::Ignore,
        },
        Some("message_stop") => SseEvent::Done,
        Some("error") => SseEvent::Failed(
            parsed["error"]["message"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string(),
        ),
        _ => SseEvent::Ignore,
    }
}

/// Pop the next complete line off an SSE byte buffer. Decoding waits for the
/// newline so a character split across network reads stays intact.
fn next_line(buffer: &mut Vec<u8>) -> Option<String> {
    let line_end = buffer.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = buffer.drain(..=line_end).collect();
    Some(String::from_utf8_lossy(&line).trim().to_string())
}

/// Send `request` and decode its SSE body with `parse`.
fn sse_stream(
    request: RequestBuilder,
    parse: EventParser,
) -> impl Stream<Item = StreamChunk> + Send + 'static {
    async_stream::stream! {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                yield StreamChunk::Error(LlmFailure::Network(e.to_string()));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            yield StreamChunk::Error(LlmFailure::Status { status, body });
            return;
        }

        let mut bytes_stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut tokens_used = 0usize;

        while let Some(chunk) = bytes_stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield StreamChunk::Error(LlmFailure::Network(format!("Stream read error: {}", e)));
                    return;
                }
            };
            buffer.extend_from_slice(&bytes);

            while let Some(line) = next_line(&mut buffer) {
                // Comments, blank separators and `event:` lines carry nothing we need.
                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };
                match parse(data) {
                    SseEvent::Token(text) => {
                        tokens_used += 1;
                        yield StreamChunk::Token(text);
                    }
                    SseEvent::Done => {
                        yield StreamChunk::Done { tokens_used };
                        return;
                    }
                    SseEvent::Failed(msg) => {
                        error!("Provider stream error: {}", msg);
                        yield StreamChunk::Error(LlmFailure::Provider(msg));
                        return;
                    }
                    SseEvent::Ignore => {}
                }
            }
        }

        yield StreamChunk::Done { tokens_used };
    }
}
