//! Fallback handler for requests the embedded bundle cannot satisfy.
//!
//! Requests under `/unpkg.com` are proxied to the public CDN; everything else is
//! answered with a 400. The outcome is computed in full before anything is
//! written, so each request gets exactly one status and one body.

use std::future::Future;

use crate::{CDN_PROXY_PREFIX, CDN_UPSTREAM_SCHEME};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub(crate) struct IncomingRequest {
    pub(crate) path: String,
    pub(crate) request_uri: String,
}

impl IncomingRequest {
    pub(crate) fn new(path: &str, query: Option<&str>) -> Self {
        let request_uri = match query {
            Some(query) if !query.is_empty() => format!("{path}?{query}"),
            _ => path.to_string(),
        };
        Self {
            path: path.to_string(),
            request_uri,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpstreamResponse {
    pub(crate) status: u16,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProxyError {
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("upstream responded with status {0}")]
    UpstreamStatus(u16),
    #[error("failed to read upstream body: {0}")]
    BodyRead(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoaderResponse {
    pub(crate) status: u16,
    pub(crate) content_type: String,
    pub(crate) body: Vec<u8>,
}

impl LoaderResponse {
    fn text(status: u16, message: String) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            body: message.into_bytes(),
        }
    }

    fn not_loadable(requested_filename: &str) -> Self {
        Self::text(400, format!("Could not load file {requested_filename}"))
    }
}

/// Fetches a fully-buffered upstream response. Implementations must report any
/// non-200 status as [`ProxyError::UpstreamStatus`].
pub(crate) trait UpstreamFetcher {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<UpstreamResponse, ProxyError>> + Send;
}

pub(crate) fn requested_filename(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

pub(crate) fn is_cdn_request(request_uri: &str) -> bool {
    request_uri.starts_with(CDN_PROXY_PREFIX)
}

/// `/unpkg.com/x` becomes `https://unpkg.com/x`: the scheme is glued onto the URI.
pub(crate) fn upstream_url(request_uri: &str) -> String {
    format!("{CDN_UPSTREAM_SCHEME}:/{request_uri}")
}

fn failure_response(requested_filename: &str, error: &ProxyError) -> LoaderResponse {
    match error {
        ProxyError::Transport(_) => {
            LoaderResponse::text(500, format!("Could not load file {requested_filename}"))
        }
        ProxyError::UpstreamStatus(_) | ProxyError::BodyRead(_) => {
            LoaderResponse::text(500, format!("read failed, file {requested_filename}"))
        }
    }
}

pub(crate) async fn load<U, F>(request: &IncomingRequest, fetcher: &U, log: F) -> LoaderResponse
where
    U: UpstreamFetcher,
    F: Fn(&str),
{
    let requested_filename = requested_filename(&request.path);
    log(&format!("Requesting file: {requested_filename}"));

    if !is_cdn_request(&request.request_uri) {
        return LoaderResponse::not_loadable(requested_filename);
    }

    let url = upstream_url(&request.request_uri);
    match fetcher.fetch(&url).await {
        Ok(upstream) if upstream.status == 200 => LoaderResponse {
            status: 200,
            content_type: upstream
                .content_type
                .unwrap_or_else(|| OCTET_STREAM.to_string()),
            body: upstream.body,
        },
        Ok(upstream) => {
            let error = ProxyError::UpstreamStatus(upstream.status);
            log(&format!("cdn proxy for {url} failed: {error}"));
            failure_response(requested_filename, &error)
        }
        Err(error) => {
            log(&format!("cdn proxy for {url} failed: {error}"));
            failure_response(requested_filename, &error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FakeFetcher {
        result: Mutex<Option<Result<UpstreamResponse, ProxyError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn new(result: Result<UpstreamResponse, ProxyError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn ok(status: u16, body: &[u8]) -> Self {
            Self::new(Ok(UpstreamResponse {
                status,
                content_type: Some("application/javascript".to_string()),
                body: body.to_vec(),
            }))
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().expect("requested lock").clone()
        }
    }

    impl UpstreamFetcher for FakeFetcher {
        fn fetch(
            &self,
            url: &str,
        ) -> impl Future<Output = Result<UpstreamResponse, ProxyError>> + Send {
            self.requested
                .lock()
                .expect("requested lock")
                .push(url.to_string());
            let result = self
                .result
                .lock()
                .expect("result lock")
                .take()
                .expect("fetch called more than once");
            async move { result }
        }
    }

    fn run_load(request: &IncomingRequest, fetcher: &FakeFetcher) -> LoaderResponse {
        tauri::async_runtime::block_on(load(request, fetcher, |_| {}))
    }

    #[test]
    fn requested_filename_strips_single_leading_slash() {
        assert_eq!(requested_filename("/assets/app.js"), "assets/app.js");
        assert_eq!(requested_filename("//unpkg.com"), "/unpkg.com");
        assert_eq!(requested_filename("plain"), "plain");
    }

    #[test]
    fn upstream_url_glues_scheme_onto_request_uri() {
        assert_eq!(
            upstream_url("/unpkg.com/pkg@1.0.0/file.js?module"),
            "https://unpkg.com/pkg@1.0.0/file.js?module"
        );
    }

    #[test]
    fn incoming_request_keeps_query_in_request_uri() {
        let request = IncomingRequest::new("/unpkg.com/pkg", Some("module"));
        assert_eq!(request.request_uri, "/unpkg.com/pkg?module");

        let request = IncomingRequest::new("/unpkg.com/pkg", Some(""));
        assert_eq!(request.request_uri, "/unpkg.com/pkg");
    }

    #[test]
    fn load_rejects_non_cdn_request_with_400() {
        let fetcher = FakeFetcher::ok(200, b"unused");
        let request = IncomingRequest::new("/missing/page.js", None);

        let response = run_load(&request, &fetcher);

        assert_eq!(response.status, 400);
        assert_eq!(response.body, b"Could not load file missing/page.js");
        assert!(fetcher.requested().is_empty());
    }

    #[test]
    fn load_is_idempotent_for_non_cdn_requests() {
        let fetcher = FakeFetcher::ok(200, b"unused");
        let request = IncomingRequest::new("/nope.css", None);

        assert_eq!(run_load(&request, &fetcher), run_load(&request, &fetcher));
    }

    #[test]
    fn load_proxies_cdn_request_once_and_returns_upstream_body() {
        let fetcher = FakeFetcher::ok(200, b"export default 42;");
        let request = IncomingRequest::new("/unpkg.com/pkg@1.0.0/file.js", None);

        let response = run_load(&request, &fetcher);

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "application/javascript");
        assert_eq!(response.body, b"export default 42;");
        assert_eq!(
            fetcher.requested(),
            vec!["https://unpkg.com/pkg@1.0.0/file.js".to_string()]
        );
    }

    #[test]
    fn load_defaults_content_type_when_upstream_omits_it() {
        let fetcher = FakeFetcher::new(Ok(UpstreamResponse {
            status: 200,
            content_type: None,
            body: vec![1, 2, 3],
        }));
        let request = IncomingRequest::new("/unpkg.com/pkg/blob.bin", None);

        let response = run_load(&request, &fetcher);

        assert_eq!(response.content_type, OCTET_STREAM);
        assert_eq!(response.body, vec![1, 2, 3]);
    }

    #[test]
    fn load_maps_upstream_404_to_500_without_upstream_body() {
        let fetcher = FakeFetcher::ok(404, b"Not found: pkg");
        let request = IncomingRequest::new("/unpkg.com/pkg@9.9.9/missing.js", None);

        let response = run_load(&request, &fetcher);

        assert_eq!(response.status, 500);
        assert_eq!(
            response.body,
            b"read failed, file unpkg.com/pkg@9.9.9/missing.js"
        );
    }

    #[test]
    fn load_maps_transport_failure_to_500() {
        let fetcher = FakeFetcher::new(Err(ProxyError::Transport("connection refused".into())));
        let request = IncomingRequest::new("/unpkg.com/pkg/index.js", None);

        let response = run_load(&request, &fetcher);

        assert_eq!(response.status, 500);
        assert_eq!(response.body, b"Could not load file unpkg.com/pkg/index.js");
    }

    #[test]
    fn load_maps_body_read_failure_to_500() {
        let fetcher = FakeFetcher::new(Err(ProxyError::BodyRead("reset".into())));
        let request = IncomingRequest::new("/unpkg.com/pkg/index.js", None);

        let response = run_load(&request, &fetcher);

        assert_eq!(response.status, 500);
        assert_eq!(response.body, b"read failed, file unpkg.com/pkg/index.js");
    }

    #[test]
    fn load_logs_requested_file_for_every_invocation() {
        let fetcher = FakeFetcher::ok(200, b"");
        let request = IncomingRequest::new("/favicon.ico", None);
        let lines = Mutex::new(Vec::new());

        tauri::async_runtime::block_on(load(&request, &fetcher, |line| {
            lines.lock().expect("lines lock").push(line.to_string());
        }));

        assert_eq!(
            lines.into_inner().expect("lines lock"),
            vec!["Requesting file: favicon.ico".to_string()]
        );
    }
}
