/*!
 * Mock backend implementations for testing.
 *
 * The mock simulates different backend behaviors:
 * - `MockProvider::working()` - always succeeds with a tagged translation
 * - `MockProvider::failing()` - always fails with an API error
 * - `MockProvider::empty()` - succeeds but returns an empty completion
 * - `MockProvider::rate_limited(n)` - returns 429-style errors for the
 *   first `n` requests, then succeeds
 * - `MockProvider::failing_after(n)` - succeeds for the first `n` requests,
 *   then fails with an API error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::cost::TokenUsage;
use crate::errors::ProviderError;

use super::{CompletionRequest, CompletionResponse, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with `[target-tagged] <input>` text
    Working,
    /// Always fails with an API error
    Failing,
    /// Returns an empty completion
    Empty,
    /// Rate-limits the first `fail_first` requests, then works
    RateLimited {
        /// Number of initial requests refused with a rate-limit error
        fail_first: usize,
    },
    /// Works for the first `succeed_first` requests, then fails
    FailingAfter {
        /// Number of initial requests that succeed before errors begin
        succeed_first: usize,
    },
}

/// Mock backend for exercising engine and orchestrator behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests received so far
    request_count: Arc<AtomicUsize>,
    /// Every request received, for assertions
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that returns empty completions
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Mock that rate-limits the first `fail_first` requests
    pub fn rate_limited(fail_first: usize) -> Self {
        Self::new(MockBehavior::RateLimited { fail_first })
    }

    /// Mock that succeeds for the first `succeed_first` requests, then fails
    pub fn failing_after(succeed_first: usize) -> Self {
        Self::new(MockBehavior::FailingAfter { succeed_first })
    }

    /// Number of requests the mock has received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        match self.behavior {
            MockBehavior::Working => {}
            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: "mock backend failure".to_string(),
                });
            }
            MockBehavior::Empty => {
                return Ok(CompletionResponse {
                    text: String::new(),
                    usage: TokenUsage::default(),
                });
            }
            MockBehavior::RateLimited { fail_first } => {
                if count < fail_first {
                    return Err(ProviderError::RateLimitExceeded(
                        "mock backend backpressure".to_string(),
                    ));
                }
            }
            MockBehavior::FailingAfter { succeed_first } => {
                if count >= succeed_first {
                    return Err(ProviderError::ApiError {
                        status_code: 500,
                        message: "mock backend failure".to_string(),
                    });
                }
            }
        }

        let words = request.user_prompt.split_whitespace().count() as u64;
        Ok(CompletionResponse {
            text: format!("[translated] {}", request.user_prompt),
            usage: TokenUsage {
                prompt_tokens: words + 20,
                completion_tokens: words,
            },
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
