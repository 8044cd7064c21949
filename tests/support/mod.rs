#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow};
use campus_scout::{Fetch, Settings, constants::DEFAULT_SEARCH_ENDPOINT};
use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};

/// Serves canned pages and records every requested URL.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    search_page: Option<String>,
    requests: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Result page returned for every search engine request.
    pub fn with_search_page(mut self, html: &str) -> Self {
        self.search_page = Some(html.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn page_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|url| !url.starts_with(DEFAULT_SEARCH_ENDPOINT))
            .collect()
    }
}

impl Fetch for StubFetcher {
    async fn get_html(&self, url: &str, _timeout: Duration) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());

        if url.starts_with(DEFAULT_SEARCH_ENDPOINT) {
            return self
                .search_page
                .clone()
                .ok_or_else(|| anyhow!("{url} responded with 429 Too Many Requests"));
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("{url} responded with 404 Not Found"))
    }
}

/// Default settings without the pause between requests.
pub fn quick_settings() -> Settings {
    Settings {
        delay: Duration::ZERO,
        ..Settings::default()
    }
}

pub fn page_html(body: &str) -> String {
    format!("<html><head><title>Test</title></head><body>{body}</body></html>")
}

pub(crate) struct StubLlmProvider {
    response: Result<String, String>,
}

impl StubLlmProvider {
    pub fn new(response_content: String) -> Self {
        StubLlmProvider {
            response: Ok(response_content),
        }
    }

    pub fn failing(message: &str) -> Self {
        StubLlmProvider {
            response: Err(message.to_string()),
        }
    }
}

impl ChatProvider for StubLlmProvider {
    fn chat<'life0, 'life1, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let response = self.response.clone();
        Box::pin(async move {
            #[derive(Debug)]
            struct StringResponse(String);

            impl ChatResponse for StringResponse {
                fn text(&self) -> Option<String> {
                    Some(self.0.clone())
                }

                fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
                    panic!()
                }

                fn thinking(&self) -> Option<String> {
                    None
                }

                fn usage(&self) -> Option<llm::chat::Usage> {
                    None
                }
            }

            impl std::fmt::Display for StringResponse {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(formatter, "{}", self.0)
                }
            }

            match response {
                Ok(content) => Ok(Box::new(StringResponse(content)) as Box<dyn ChatResponse>),
                Err(message) => Err(LLMError::ProviderError(message)),
            }
        })
    }

    fn chat_with_tools<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
        _tools: Option<&'life2 [Tool]>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!()
    }
}
