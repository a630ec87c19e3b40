use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use voxagent_client::{AgentBackend, BackendConfig, ClientError, HttpBackend};
use voxagent_types::{Catalog, DraftField, VoiceSample};

/// Requests the fake backend has received, in arrival order.
#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    fn push(&self, value: Value) {
        self.0.lock().unwrap().push(value);
    }

    fn all(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend(url: &str) -> HttpBackend {
    HttpBackend::new(&BackendConfig::new(url)).expect("valid backend config")
}

#[tokio::test]
async fn list_agents_accepts_bare_array() {
    let app = Router::new().route(
        "/api/agents",
        get(|| async {
            Json(json!([
                { "id": "a1", "name": "Bot", "role": "Agent", "language": "hi-IN", "llmModel": "groq-mixtral" },
                { "id": "a2", "name": "Helper", "role": "Support", "language": "ta-IN", "llmModel": "gpt-4" }
            ]))
        }),
    );
    let url = spawn(app).await;

    let agents = backend(&url).list_agents().await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].id, "a1");
    assert_eq!(agents[1].llm_model, "gpt-4");
}

#[tokio::test]
async fn list_agents_accepts_envelope() {
    let app = Router::new().route(
        "/api/agents",
        get(|| async {
            Json(json!({
                "success": true,
                "agents": [{ "id": "a1", "name": "Bot", "job_role": "Agent" }],
                "count": 1
            }))
        }),
    );
    let url = spawn(app).await;

    let agents = backend(&url).list_agents().await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].role, "Agent");
}

#[tokio::test]
async fn create_agent_posts_draft_with_voice_id_alias() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/api/agents",
            post(|State(recorded): State<Recorded>, Json(body): Json<Value>| async move {
                recorded.push(body.clone());
                let mut created = body;
                created["id"] = json!("new-agent");
                (StatusCode::CREATED, Json(created))
            }),
        )
        .with_state(recorded.clone());
    let url = spawn(app).await;

    let mut draft = Catalog::builtin().default_draft();
    draft.set(DraftField::Name, "Bot");
    draft.set(DraftField::Role, "Agent");
    draft.set(DraftField::SystemInstruction, "Be helpful");

    let agent = backend(&url).create_agent(&draft).await.unwrap();
    assert_eq!(agent.id, "new-agent");
    assert_eq!(agent.name, "Bot");

    let bodies = recorded.all();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["systemInstruction"], "Be helpful");
    assert_eq!(body["language"], "hi-IN");
    assert_eq!(body["ttsVoice"], "default-indian");
    assert_eq!(body["voiceId"], "default-indian");
    assert_eq!(body["ttsModel"], "google-tts");
    assert_eq!(body["sttModel"], "google-stt");
}

#[tokio::test]
async fn create_agent_failure_carries_backend_detail() {
    let app = Router::new().route(
        "/api/agents",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "detail": "quota exceeded" })),
            )
        }),
    );
    let url = spawn(app).await;

    let draft = Catalog::builtin().default_draft();
    let err = backend(&url).create_agent(&draft).await.unwrap_err();
    match &err {
        ClientError::Server { status, detail } => {
            assert_eq!(*status, 429);
            assert_eq!(detail, "quota exceeded");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "quota exceeded");
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn clone_voice_sends_multipart_fields() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/api/voices/clone",
            post(
                |State(recorded): State<Recorded>, mut multipart: Multipart| async move {
                    let mut voice_name = String::new();
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        let file_name = field.file_name().map(str::to_string);
                        let content_type = field.content_type().map(str::to_string);
                        let data = field.bytes().await.unwrap();
                        if name == "voice_name" {
                            voice_name = String::from_utf8_lossy(&data).into_owned();
                        }
                        recorded.push(json!({
                            "field": name,
                            "file_name": file_name,
                            "content_type": content_type,
                            "len": data.len(),
                        }));
                    }
                    Json(json!({
                        "success": true,
                        "voice_id": voice_name,
                        "provider": "replicate_xtts"
                    }))
                },
            ),
        )
        .with_state(recorded.clone());
    let url = spawn(app).await;

    let sample = VoiceSample::new("me.wav", vec![0u8; 64]);
    let voice = backend(&url)
        .clone_voice(&sample, "cloned-voice-1700000000000")
        .await
        .unwrap();
    assert_eq!(voice.id, "cloned-voice-1700000000000");

    let fields = recorded.all();
    let by_name: HashMap<String, Value> = fields
        .into_iter()
        .map(|f| (f["field"].as_str().unwrap().to_string(), f))
        .collect();
    let audio = &by_name["voice_sample"];
    assert_eq!(audio["file_name"], "me.wav");
    assert_eq!(audio["content_type"], "audio/wav");
    assert_eq!(audio["len"], 64);
    assert!(by_name.contains_key("voice_name"));
}

#[tokio::test]
async fn list_voices_accepts_envelope() {
    let app = Router::new().route(
        "/api/voices",
        get(|| async {
            Json(json!({
                "voices": [{ "id": "v1", "name": "Mine" }, { "voice_id": "v2" }],
                "count": 2
            }))
        }),
    );
    let url = spawn(app).await;

    let voices = backend(&url).list_voices().await.unwrap();
    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0].display_name(), "Mine");
    assert_eq!(voices[1].display_name(), "v2");
}

#[tokio::test]
async fn list_voices_accepts_library_entries_without_ids() {
    let app = Router::new().route(
        "/api/voices",
        get(|| async {
            Json(json!({
                "success": true,
                "voices": [
                    {
                        "name": "cloned-voice-1700000000123",
                        "provider": "replicate_xtts",
                        "embedding": "e",
                        "language": "hi-IN",
                        "samples_count": 1
                    },
                    { "id": "v2", "voice_id": "v2", "name": "Studio", "voice_name": "Studio" }
                ],
                "count": 2
            }))
        }),
    );
    let url = spawn(app).await;

    let voices = backend(&url).list_voices().await.unwrap();
    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0].id, "cloned-voice-1700000000123");
    assert_eq!(voices[1].id, "v2");
    assert_eq!(voices[1].display_name(), "Studio");
}

#[tokio::test]
async fn list_agents_accepts_records_with_both_spellings() {
    let app = Router::new().route(
        "/api/agents",
        get(|| async {
            Json(json!({
                "success": true,
                "agents": [{
                    "id": "a1",
                    "name": "Bot",
                    "role": "Support",
                    "job_role": "Support",
                    "llmModel": "groq-mixtral",
                    "llm_provider": "groq"
                }],
                "count": 1
            }))
        }),
    );
    let url = spawn(app).await;

    let agents = backend(&url).list_agents().await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].role, "Support");
    assert_eq!(agents[0].llm_model, "groq-mixtral");
}

#[tokio::test]
async fn language_filter_and_single_agent_lookup() {
    let app = Router::new()
        .route(
            "/api/agents",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let language = params.get("language").cloned().unwrap_or_default();
                Json(json!([{ "id": "a1", "name": "Bot", "language": language }]))
            }),
        )
        .route(
            "/api/agents/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "missing" {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "detail": "Agent not found" })),
                    )
                } else {
                    (
                        StatusCode::OK,
                        Json(json!({ "success": true, "agent": { "id": id, "name": "Bot" } })),
                    )
                }
            }),
        );
    let url = spawn(app).await;
    let backend = backend(&url);

    let agents = backend.list_agents_by_language("ta-IN").await.unwrap();
    assert_eq!(agents[0].language, "ta-IN");

    let agent = backend.get_agent("a1").await.unwrap();
    assert_eq!(agent.id, "a1");

    let err = backend.get_agent("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Agent not found");
}

#[tokio::test]
async fn health_reports_backend_status() {
    let app = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "healthy", "service": "Voice Agent Builder" })) }),
    );
    let url = spawn(app).await;

    let health = backend(&url).health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service.as_deref(), Some("Voice Agent Builder"));
}

#[tokio::test]
async fn slow_backend_times_out() {
    let app = Router::new().route(
        "/api/agents",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!([]))
        }),
    );
    let url = spawn(app).await;

    let config = BackendConfig::new(&url).with_timeout(Duration::from_millis(50));
    let backend = HttpBackend::new(&config).unwrap();
    let err = backend.list_agents().await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(_)), "got {:?}", err);
    assert_eq!(err.to_string(), "request timed out after 50ms");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("http://{}", addr))
        .list_voices()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn non_json_success_body_is_decode_error() {
    let app = Router::new().route("/api/voices", get(|| async { "<html>oops</html>" }));
    let url = spawn(app).await;

    let err = backend(&url).list_voices().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
}
