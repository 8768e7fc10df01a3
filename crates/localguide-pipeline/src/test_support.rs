//! In-memory providers that record every call.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use localguide_core::{Coordinate, Place};
use localguide_kakao::{KakaoError, PlaceSearch, SearchQuery};
use localguide_llm::{LanguageModel, LlmError};

pub(crate) fn place(name: &str, address: &str, lon: f64, lat: f64) -> Place {
    Place {
        name: name.to_string(),
        address: address.to_string(),
        coordinate: Coordinate { lon, lat },
        phone: None,
        distance_m: None,
        url: None,
        category: None,
    }
}

/// Answers from a fixed query → places table; unknown queries get an empty
/// page, or an HTTP 500 when built with [`StubSearch::failing`].
#[derive(Clone, Default)]
pub(crate) struct StubSearch {
    replies: Arc<HashMap<String, Vec<Place>>>,
    failing: Arc<Vec<String>>,
    fail_everything: bool,
    calls: Arc<Mutex<Vec<SearchQuery>>>,
}

impl StubSearch {
    pub(crate) fn new(replies: Vec<(&str, Vec<Place>)>) -> Self {
        Self {
            replies: Arc::new(
                replies
                    .into_iter()
                    .map(|(q, places)| (q.to_string(), places))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_everything: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_on(mut self, queries: &[&str]) -> Self {
        self.failing = Arc::new(queries.iter().map(ToString::to_string).collect());
        self
    }

    pub(crate) fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|q| q.query).collect()
    }
}

impl PlaceSearch for StubSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Place>, KakaoError> {
        self.calls.lock().unwrap().push(query.clone());
        if self.fail_everything || self.failing.contains(&query.query) {
            return Err(KakaoError::UnexpectedStatus {
                status: 500,
                url: "/v2/local/search/keyword.json".to_string(),
            });
        }
        Ok(self.replies.get(&query.query).cloned().unwrap_or_default())
    }
}

/// Pops one scripted reply per call; `Err(())` scripts a provider failure and
/// an exhausted script answers with [`LlmError::EmptyChoices`].
#[derive(Clone, Default)]
pub(crate) struct StubModel {
    replies: Arc<Mutex<VecDeque<Result<String, ()>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubModel {
    pub(crate) fn scripted(replies: Vec<Result<&str, ()>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            )),
            ..Self::default()
        }
    }

    /// `(system, user)` pairs in call order.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl LanguageModel for StubModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(())) => Err(LlmError::UnexpectedStatus { status: 503 }),
            None => Err(LlmError::EmptyChoices),
        }
    }
}
