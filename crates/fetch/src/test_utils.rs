//! In-memory fetcher for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use slides_core::{Error, Result};

use crate::http::Fetch;

/// Manifest with slides `a`, `b`, `c` at 0, 5000 and 12000 ms.
pub const MANIFEST_JSON: &str = r#"{"slides":[{"time":0,"image":{"name":"a"}},{"time":5000,"image":{"name":"b"}},{"time":12000,"image":{"name":"c"}}]}"#;

/// Serves canned bodies and records every requested URL.
/// Unknown URLs answer with status 404.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, body: impl AsRef<[u8]>) -> Self {
        self.responses.insert(url.to_string(), body.as_ref().to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::RemoteStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}
