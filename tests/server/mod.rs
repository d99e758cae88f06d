use actix_web::{App, HttpResponse, HttpServer, web};
use seo_tag_inspector::analyzer::Fetcher;
use seo_tag_inspector::error::AnalysisError;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

#[allow(dead_code)]
async fn static_page(name: web::Path<String>) -> HttpResponse {
    let path = Path::new("tests/static").join(name.into_inner());
    match std::fs::read_to_string(&path) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(_) => HttpResponse::NotFound().body("Not Found"),
    }
}

/// Starts a site serving the fixture pages under `tests/static/` and
/// returns its base URL.
#[allow(dead_code)]
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route(
                "/server-error",
                web::get().to(|| async { HttpResponse::InternalServerError().body("Error") }),
            )
            .route("/{name}", web::get().to(static_page))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

#[allow(dead_code)]
pub enum StubResponse {
    Page(String),
    Status(u16),
    Unreachable,
}

/// In-process [`Fetcher`] that answers every URL the same way and counts calls.
#[allow(dead_code)]
pub struct StubFetcher {
    response: StubResponse,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubFetcher {
    pub fn new(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn page(html: &str) -> Self {
        Self::new(StubResponse::Page(html.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for StubFetcher {
    async fn fetch(&self, _url: &Url) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Page(html) => Ok(html.clone()),
            StubResponse::Status(code) => Err(AnalysisError::Fetch {
                status: Some(*code),
                message: format!("Failed to fetch website: status {}", code),
            }),
            StubResponse::Unreachable => Err(AnalysisError::Fetch {
                status: None,
                message: "Failed to fetch website: connection refused".to_string(),
            }),
        }
    }
}
