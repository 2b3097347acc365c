use serde::Serialize;

pub(crate) const OPEN_EXTERNAL_URL_COMMAND: &str = "open_external_url";
const BRIDGE_GLOBAL: &str = "__ITTOOLS_BRIDGE__";

/// Rewrites relative fetch inputs that start with `prefix`. Only string inputs
/// that cannot be parsed as an absolute URL are considered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FetchRewriteRule {
    pub(crate) prefix: String,
    pub(crate) replacement: String,
}

impl FetchRewriteRule {
    /// SPA bundling turns `/unpkg.com/...` imports into protocol-relative
    /// `//unpkg.com/...`, which would resolve against the wrong host.
    pub(crate) fn cdn_leading_slash() -> Self {
        Self {
            prefix: "//unpkg.com".to_string(),
            replacement: "/unpkg.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BootstrapScript {
    pub(crate) open_external_command: &'static str,
    pub(crate) fetch_rewrites: Vec<FetchRewriteRule>,
}

impl Default for BootstrapScript {
    fn default() -> Self {
        Self {
            open_external_command: OPEN_EXTERNAL_URL_COMMAND,
            fetch_rewrites: vec![FetchRewriteRule::cdn_leading_slash()],
        }
    }
}

impl BootstrapScript {
    pub(crate) fn render(&self) -> Result<String, String> {
        let rules = serde_json::to_string(&self.fetch_rewrites)
            .map_err(|error| format!("Failed to serialize fetch rewrite rules: {error}"))?;
        let command = serde_json::to_string(self.open_external_command)
            .map_err(|error| format!("Failed to serialize bridge command name: {error}"))?;
        let global = serde_json::to_string(BRIDGE_GLOBAL)
            .map_err(|error| format!("Failed to serialize bridge global name: {error}"))?;

        Ok(SCRIPT_TEMPLATE
            .replace("__BRIDGE_GLOBAL__", &global)
            .replace("__OPEN_EXTERNAL_COMMAND__", &command)
            .replace("__FETCH_REWRITE_RULES__", &rules))
    }
}

const SCRIPT_TEMPLATE: &str = r#"(function () {
  var bridgeGlobal = __BRIDGE_GLOBAL__;
  if (window[bridgeGlobal]) {
    return;
  }

  var openExternalCommand = __OPEN_EXTERNAL_COMMAND__;
  var rewriteRules = __FETCH_REWRITE_RULES__;
  var absoluteHref = /^https?:\/\//i;

  function invokeHost(command, args) {
    var internals = window.__TAURI_INTERNALS__;
    if (!internals || typeof internals.invoke !== "function") {
      return Promise.reject(new Error("desktop bridge unavailable"));
    }
    return internals.invoke(command, args);
  }

  function openExternal(url) {
    return invokeHost(openExternalCommand, { url: url }).then(function (result) {
      if (result && !result.ok) {
        console.warn("open external url rejected:", result.reason);
      }
      return result;
    });
  }

  document.addEventListener(
    "click",
    function (event) {
      var target = event.target;
      var anchor = target && typeof target.closest === "function" ? target.closest("a") : null;
      if (!anchor) {
        return;
      }
      var rawHref = anchor.getAttribute("href");
      if (!rawHref || !absoluteHref.test(rawHref)) {
        return;
      }
      event.preventDefault();
      console.debug("Intercepted link:", anchor.href);
      openExternal(anchor.href).catch(function (error) {
        console.error("failed to open external url:", error);
      });
    },
    true
  );

  function rewriteByRules(input) {
    if (typeof input !== "string") {
      return input;
    }
    try {
      console.debug("Request Host:", new URL(input).hostname);
      return input;
    } catch (_) {
      for (var i = 0; i < rewriteRules.length; i++) {
        var rule = rewriteRules[i];
        if (input.indexOf(rule.prefix) === 0) {
          return rule.replacement + input.slice(rule.prefix.length);
        }
      }
      return input;
    }
  }

  var fetchInterceptors = [rewriteByRules];
  var originalFetch = window.fetch.bind(window);

  window.fetch = function (input, init) {
    var next = input;
    for (var i = 0; i < fetchInterceptors.length; i++) {
      next = fetchInterceptors[i](next, init);
    }
    return originalFetch(next, init);
  };

  Object.defineProperty(window, bridgeGlobal, {
    value: Object.freeze({
      openExternal: openExternal,
      addFetchInterceptor: function (interceptor) {
        if (typeof interceptor === "function") {
          fetchInterceptors.push(interceptor);
        }
      },
    }),
    writable: false,
    configurable: false,
  });
})();
"#;
