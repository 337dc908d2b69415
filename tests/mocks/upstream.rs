//! Scripted mock of the upstream voice-AI list-calls API
//!
//! Serves a fixed sequence of responses and records every request it
//! receives so tests can assert attempt counts, query parameters and
//! auth headers.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
	extract::{Query, State},
	http::{header, HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::get,
	Router,
};
use tokio::task::JoinHandle;

/// One scripted upstream response
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
	/// 200 with the given JSON body
	Page(serde_json::Value),
	/// Bare status code with an empty body
	Status(u16),
	/// 200 with a body that is not valid JSON
	MalformedJson,
}

/// A request as seen by the mock upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
	pub query: HashMap<String, String>,
	pub authorization: Option<String>,
}

struct UpstreamState {
	script: Mutex<VecDeque<ScriptedResponse>>,
	hits: AtomicU32,
	requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock upstream server bound to an ephemeral port
pub struct MockUpstream {
	pub base_url: String,
	handle: JoinHandle<()>,
	state: Arc<UpstreamState>,
}

impl MockUpstream {
	/// Spawn a mock upstream serving the scripted responses in order
	pub async fn spawn(script: Vec<ScriptedResponse>) -> Self {
		let state = Arc::new(UpstreamState {
			script: Mutex::new(script.into()),
			hits: AtomicU32::new(0),
			requests: Mutex::new(Vec::new()),
		});

		let app = Router::new()
			.route("/call", get(handle_list_calls))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind mock upstream port");
		let addr = listener.local_addr().unwrap();
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self {
			base_url,
			handle,
			state,
		}
	}

	/// Number of requests served so far
	pub fn hits(&self) -> u32 {
		self.state.hits.load(Ordering::SeqCst)
	}

	/// All requests seen so far, in order
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.requests.lock().unwrap().clone()
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}

async fn handle_list_calls(
	State(state): State<Arc<UpstreamState>>,
	Query(query): Query<HashMap<String, String>>,
	headers: HeaderMap,
) -> Response {
	state.hits.fetch_add(1, Ordering::SeqCst);
	state.requests.lock().unwrap().push(RecordedRequest {
		query,
		authorization: headers
			.get(header::AUTHORIZATION)
			.and_then(|v| v.to_str().ok())
			.map(|v| v.to_string()),
	});

	let next = state.script.lock().unwrap().pop_front();
	match next {
		Some(ScriptedResponse::Page(body)) => {
			(StatusCode::OK, axum::Json(body)).into_response()
		},
		Some(ScriptedResponse::Status(code)) => {
			StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR).into_response()
		},
		Some(ScriptedResponse::MalformedJson) => (
			StatusCode::OK,
			[(header::CONTENT_TYPE, "application/json")],
			"{ this is not json",
		)
			.into_response(),
		// Script exhausted: any further request is a test bug
		None => (StatusCode::GONE, "script exhausted").into_response(),
	}
}
