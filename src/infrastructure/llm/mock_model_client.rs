use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    ModelClient, ModelClientError, ModelReply, ModelRequest, ReplyBlock,
};

/// Scripted model backend for tests: replies are handed out in order and
/// every request is recorded for assertions. Running out of scripted replies
/// is reported as an API failure so tests fail loudly.
#[derive(Default)]
pub struct MockModelClient {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ModelRequest>>,
    repeat_last: bool,
}

impl MockModelClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
            repeat_last: false,
        }
    }

    /// Same scripted reply for every call, without exhausting.
    pub fn repeating(reply: &str) -> Self {
        let mut mock = Self::new([reply]);
        mock.repeat_last = true;
        mock
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("mock lock poisoned").len()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, ModelClientError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        let mut replies = self.replies.lock().expect("mock lock poisoned");
        let text = if self.repeat_last && replies.len() == 1 {
            replies[0].clone()
        } else {
            replies.pop_front().ok_or_else(|| {
                ModelClientError::ApiRequestFailed("no scripted reply left".to_string())
            })?
        };

        Ok(ModelReply {
            blocks: vec![ReplyBlock { text: Some(text) }],
        })
    }
}
