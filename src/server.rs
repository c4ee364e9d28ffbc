use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::chat::{HttpChatBackend, widget::run_exchange};
use crate::config::AppConfig;
use crate::fleet::demo_fleet;
use crate::ui::{
    self, chat as chat_ui,
    components::{AlertLevel, oob_alert},
    pages,
};
use crate::validate::{form, upload};

/// How often abandoned widgets are reaped.
const WIDGET_REAP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(
        Arc::new(HttpChatBackend::new(config.chat.endpoint.clone())),
        config.clone(),
    );

    info!(
        name: "chat.config.loaded",
        endpoint = %config.chat.endpoint,
        "Assistant endpoint configured"
    );

    // Reap widgets from abandoned page loads.
    let widgets = state.widgets.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(WIDGET_REAP_INTERVAL);
        loop {
            tick.tick().await;
            let reaped = widgets.cleanup_expired();
            if reaped > 0 {
                info!(name: "chat.widgets.reaped", count = reaped, "Reaped idle chat widgets");
            }
        }
    });

    let app = router(state, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router. Split out so tests can mount it on an
/// in-process server.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let timeout_duration = if config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60) // effectively off
    } else {
        Duration::from_secs(30)
    };

    Router::new()
        // HTML pages
        .route("/", get(ranklist_page))
        .route("/upload", get(upload_page))
        // Chat widget
        .route("/api/chat", post(api_chat))
        .route("/api/chat/open", post(api_chat_open))
        .route("/api/chat/close", post(api_chat_close))
        // Validation endpoints
        .route("/api/uploads/validate", post(api_validate_upload))
        .route("/api/induction", post(api_induction))
        // Static assets
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        // Body cap sits above MAX_UPLOAD_BYTES so oversize uploads reach the
        // validator and come back as an alert instead of a bare 413.
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| {
                let duration = timeout_duration;
                async move {
                    match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => {
                            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                        }
                    }
                }
            },
        ))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - the induction ranklist.
async fn ranklist_page(State(state): State<AppState>) -> Html<String> {
    let widget = state.widgets.create();
    let mount = chat_ui::widget_mount(&widget, &state.csrf_token);
    Html(ui::page_shell(
        "Ranklist",
        &pages::ranklist_page(&demo_fleet()),
        &mount,
    ))
}

/// GET /upload - fleet data upload and induction contact form.
async fn upload_page(State(state): State<AppState>) -> Html<String> {
    let widget = state.widgets.create();
    let mount = chat_ui::widget_mount(&widget, &state.csrf_token);
    Html(ui::page_shell(
        "Data Upload",
        &pages::upload_page(&state.csrf_token),
        &mount,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat Widget Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body for the chat endpoints.
#[derive(Debug, Deserialize)]
struct ChatForm {
    /// Widget id minted at page render.
    widget: String,
    /// Message text; absent for open/close.
    #[serde(default)]
    message: Option<String>,
    /// Embedded page token, echoed to the assistant endpoint. Reads as
    /// empty when the page carried none.
    #[serde(default)]
    csrfmiddlewaretoken: Option<String>,
}

/// POST /api/chat - run one exchange, return the reply bubble.
async fn api_chat(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<ChatForm>,
) -> Response {
    let text = form.message.unwrap_or_default();
    let csrf = form.csrfmiddlewaretoken.unwrap_or_default();
    let widget = state.widgets.get_or_create(&form.widget);

    match run_exchange(&widget, state.backend.as_ref(), &text, &csrf).await {
        // Rejected (empty or busy): nothing to swap in.
        None => StatusCode::NO_CONTENT.into_response(),
        Some(reply) => Html(chat_ui::message_bubble(&reply)).into_response(),
    }
}

/// POST /api/chat/open - reveal the panel.
async fn api_chat_open(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<ChatForm>,
) -> Html<String> {
    let widget = state.widgets.get_or_create(&form.widget);
    widget.open();
    Html(chat_ui::widget_mount(&widget, &state.csrf_token))
}

/// POST /api/chat/close - hide the panel; the transcript stays.
async fn api_chat_close(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<ChatForm>,
) -> Html<String> {
    let widget = state.widgets.get_or_create(&form.widget);
    widget.close();
    Html(chat_ui::widget_mount(&widget, &state.csrf_token))
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Query context for upload validation: which page field the file came
/// through (picker and drop zone both funnel into the same field).
#[derive(Debug, Deserialize)]
struct UploadQuery {
    field_id: String,
}

/// POST /api/uploads/validate - gatekeep one upload.
///
/// Returns the re-rendered field wrapper: emptied plus an out-of-band
/// warning alert on rejection, annotated with the accepted file name on
/// success.
async fn api_validate_upload(
    State(_state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, String)> {
    let Some((context, label)) = pages::upload_field_context(&query.field_id) else {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown upload field: {}", query.field_id),
        ));
    };

    let mut file: Option<(String, u64)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("upload").to_string();
            let size = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Malformed upload: {e}")))?
                .len() as u64;
            file = Some((name, size));
            break;
        }
    }

    let Some((file_name, size)) = file else {
        // Change event with no file (selection cleared): restore the field.
        return Ok(Html(pages::upload_field(&context, label, None)));
    };

    match upload::validate_upload(&file_name, size, context.category()) {
        Ok(()) => {
            info!(
                name: "upload.accepted",
                field = %context.id,
                file = %file_name,
                size = size,
                "Upload passed validation"
            );
            Ok(Html(pages::upload_field(&context, label, Some(&file_name))))
        }
        Err(err) => {
            let mut fragment = pages::upload_field(&context, label, None);
            fragment.push_str(&oob_alert(&err.to_string(), AlertLevel::Warning));
            Ok(Html(fragment))
        }
    }
}

/// POST /api/induction - validate and record the induction contact form.
async fn api_induction(
    State(state): State<AppState>,
    axum::Form(values): axum::Form<HashMap<String, String>>,
) -> Html<String> {
    let errors = form::validate_fields(pages::INDUCTION_FIELDS, &values);

    if errors.is_empty() {
        info!(
            name: "induction.contact.saved",
            operator = %values.get("operator_name").map(String::as_str).unwrap_or(""),
            "Induction contact recorded"
        );
        let mut fragment = pages::induction_form(&HashMap::new(), &[], &state.csrf_token);
        fragment.push_str(&oob_alert("Induction contact saved", AlertLevel::Success));
        Html(fragment)
    } else {
        Html(pages::induction_form(&values, &errors, &state.csrf_token))
    }
}
