use tauri::Webview;
use url::Url;

use crate::{append_desktop_log, app_protocol, bootstrap_script::BootstrapScript};

/// Only pages served by the app protocol get the bridge; external pages never do.
pub(crate) fn should_inject_bridge(page_url: &Url) -> bool {
    let Ok(app_url) = app_protocol::app_url() else {
        return false;
    };
    page_url.scheme() == app_url.scheme() && page_url.host_str() == app_url.host_str()
}

pub(crate) fn inject_bridge(webview: &Webview) {
    let script = match BootstrapScript::default().render() {
        Ok(script) => script,
        Err(error) => {
            append_desktop_log(&format!("failed to render desktop bridge: {error}"));
            return;
        }
    };

    if let Err(error) = webview.eval(&script) {
        append_desktop_log(&format!("failed to inject desktop bridge: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_inject_bridge_accepts_app_protocol_pages() {
        let mut page = app_protocol::app_url().expect("app url");
        page.set_path("/base64-string-converter");
        assert!(should_inject_bridge(&page));
    }

    #[test]
    fn should_inject_bridge_rejects_external_pages() {
        let page = Url::parse("https://github.com/CorentinTh/it-tools").expect("parse url");
        assert!(!should_inject_bridge(&page));
    }

    #[test]
    fn should_inject_bridge_rejects_other_local_hosts() {
        let page = Url::parse("http://localhost:1420/").expect("parse url");
        assert!(!should_inject_bridge(&page));
    }
}
