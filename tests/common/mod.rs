// In-memory transport shared by the integration tests

#![allow(dead_code)]

use stagetty::client::{ClientError, HttpResponse, Result, Transport};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse>>>,
    pub requests: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Network(message.to_string())));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next(&self) -> Result<HttpResponse> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted reply".to_string())))
    }
}

impl Transport for ScriptedTransport {
    fn post_form(&self, path: &str, body: String) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((format!("POST {}", path), Some(body)));
        self.next()
    }

    fn get(&self, path: &str) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((format!("GET {}", path), None));
        self.next()
    }
}
