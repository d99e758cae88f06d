use crate::analyzer::{Analyzer, Fetcher};
use crate::error::AnalysisError;
use crate::history::HistoryStore;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, error, web};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
}

impl ResponseError for AnalysisError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Input(_) => StatusCode::BAD_REQUEST,
            AnalysisError::Fetch { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AnalysisError::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AnalysisError::Validation(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

async fn analyze<F, H>(
    state: web::Data<Analyzer<F, H>>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, AnalysisError>
where
    F: Fetcher + 'static,
    H: HistoryStore + 'static,
{
    let url = body
        .into_inner()
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AnalysisError::Input("URL is required".to_string()))?;

    let record = state.analyze(&url).await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn recent<F, H>(state: web::Data<Analyzer<F, H>>) -> HttpResponse
where
    F: Fetcher + 'static,
    H: HistoryStore + 'static,
{
    HttpResponse::Ok().json(state.history().recent())
}

/// Registers the API routes and JSON body handling on an actix-web app.
pub fn configure<F, H>(cfg: &mut web::ServiceConfig)
where
    F: Fetcher + 'static,
    H: HistoryStore + 'static,
{
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {}", err);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "message": message })),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/api/analyze", web::post().to(analyze::<F, H>))
        .route("/api/recent", web::get().to(recent::<F, H>));
}

/// Binds the API on `host:port` and serves until shutdown.
pub async fn serve<F, H>(analyzer: Analyzer<F, H>, host: &str, port: u16) -> Result<()>
where
    F: Fetcher + Send + Sync + 'static,
    H: HistoryStore + Send + Sync + 'static,
{
    let state = web::Data::new(analyzer);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure::<F, H>)
    })
    .bind((host, port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    for addr in server.addrs() {
        tracing::info!(%addr, "Listening");
    }

    server.run().await.context("HTTP server error")?;
    Ok(())
}
