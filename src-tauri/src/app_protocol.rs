use std::borrow::Cow;

use tauri::{
    http::{header, Request, Response, StatusCode},
    AppHandle, Manager, Runtime, UriSchemeContext, UriSchemeResponder,
};
use url::Url;

use crate::{
    append_desktop_log,
    asset_loader::{self, IncomingRequest, LoaderResponse},
    cdn_client::CdnClient,
    APP_PROTOCOL_SCHEME,
};

type ProtocolResponse = Response<Cow<'static, [u8]>>;

/// URL the main window loads. Windows and Android webviews only accept custom
/// schemes through the `http://<scheme>.localhost` form.
pub(crate) fn app_url() -> Result<Url, String> {
    let raw = if cfg!(any(windows, target_os = "android")) {
        format!("http://{APP_PROTOCOL_SCHEME}.localhost/")
    } else {
        format!("{APP_PROTOCOL_SCHEME}://localhost/")
    };
    Url::parse(&raw).map_err(|error| format!("Invalid app protocol url {raw}: {error}"))
}

fn embedded_asset_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        "index.html".to_string()
    } else {
        path.trim_start_matches('/').to_string()
    }
}

fn build_response(
    status: u16,
    content_type: &str,
    csp: Option<&str>,
    body: Vec<u8>,
) -> ProtocolResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(csp) = csp {
        builder = builder.header("Content-Security-Policy", csp);
    }

    match builder.body(Cow::Owned(body)) {
        Ok(response) => response,
        Err(error) => {
            append_desktop_log(&format!("failed to build protocol response: {error}"));
            let mut fallback = Response::new(Cow::Borrowed(&b"internal error"[..]));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        }
    }
}

fn loader_response(response: LoaderResponse) -> ProtocolResponse {
    build_response(response.status, &response.content_type, None, response.body)
}

fn resolve_embedded<R: Runtime>(app_handle: &AppHandle<R>, path: &str) -> Option<ProtocolResponse> {
    let asset = app_handle
        .asset_resolver()
        .get(embedded_asset_path(path))?;
    Some(build_response(
        200,
        asset.mime_type(),
        asset.csp_header(),
        asset.bytes().to_vec(),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    CdnProxy,
    Embedded,
}

/// CDN paths must bypass the embedded bundle: Tauri's resolver falls back to
/// `index.html` for any miss, so they would never reach the loader otherwise.
pub(crate) fn route_request(request_uri: &str) -> Route {
    if asset_loader::is_cdn_request(request_uri) {
        Route::CdnProxy
    } else {
        Route::Embedded
    }
}

/// Each request is answered exactly once through `responder`.
pub(crate) fn handle_request<R: Runtime>(
    ctx: UriSchemeContext<'_, R>,
    request: Request<Vec<u8>>,
    responder: UriSchemeResponder,
) {
    let app_handle = ctx.app_handle().clone();
    let uri = request.uri();
    let incoming = IncomingRequest::new(uri.path(), uri.query());

    if route_request(&incoming.request_uri) == Route::Embedded {
        if let Some(response) = resolve_embedded(&app_handle, &incoming.path) {
            responder.respond(response);
            return;
        }
    }

    let Some(cdn_client) = app_handle.try_state::<CdnClient>().map(|state| state.inner().clone())
    else {
        append_desktop_log("cdn client is not managed; rejecting request");
        responder.respond(build_response(
            500,
            "text/plain; charset=utf-8",
            None,
            format!(
                "Could not load file {}",
                asset_loader::requested_filename(&incoming.path)
            )
            .into_bytes(),
        ));
        return;
    };

    tauri::async_runtime::spawn(async move {
        let response = asset_loader::load(&incoming, &cdn_client, append_desktop_log).await;
        responder.respond(loader_response(response));
    });
}
