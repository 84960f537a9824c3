//! Connect form: GET renders the empty form, POST attempts a connection
//! with the submitted token and renders a success or failure banner.
//!
//! A fresh `AccountAgent` is constructed per submission and discarded
//! afterwards; no session state survives between requests, so no session
//! signing secret exists either. Banners render inline in the response.

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use secrecy::SecretString;
use serde::Deserialize;

use postwarden_core::AccountAgent;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ConnectForm {
    #[serde(default)]
    pub access_token: String,
}

/// GET / - Render the empty connect form.
pub async fn show_form() -> Html<String> {
    Html(render_page(None))
}

/// POST / - Attempt a connection with the submitted access token.
pub async fn connect(
    State(state): State<AppState>,
    Form(form): Form<ConnectForm>,
) -> Html<String> {
    let token = form.access_token.trim().to_string();
    if token.is_empty() {
        return Html(render_page(Some(Banner::error(
            "Please enter an access token!",
        ))));
    }

    let agent = AccountAgent::new(state.graph_client(), SecretString::from(token));
    let banner = match agent.profile_info().await {
        Some(profile) => Banner::success(format!("Connected as: {}", profile.name)),
        None => Banner::error("Failed to connect!"),
    };
    Html(render_page(Some(banner)))
}

struct Banner {
    class: &'static str,
    text: String,
}

impl Banner {
    fn success(text: impl Into<String>) -> Self {
        Self {
            class: "success",
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            class: "error",
            text: text.into(),
        }
    }
}

fn render_page(banner: Option<Banner>) -> String {
    let banner_html = banner
        .map(|b| format!(r#"<p class="banner {}">{}</p>"#, b.class, escape(&b.text)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Postwarden</title>
<style>
body {{ font-family: sans-serif; max-width: 28rem; margin: 4rem auto; }}
.banner {{ padding: .6rem 1rem; border-radius: 4px; }}
.banner.success {{ background: #e6f4ea; color: #1e6b33; }}
.banner.error {{ background: #fdecea; color: #a4282d; }}
input[type=password] {{ width: 100%; padding: .4rem; }}
</style>
</head>
<body>
<h1>Postwarden</h1>
{banner_html}
<form method="post" action="/">
<label for="access_token">Access token</label>
<input type="password" id="access_token" name="access_token" autocomplete="off">
<button type="submit">Connect</button>
</form>
</body>
</html>
"#
    )
}

/// Minimal HTML escaping for text interpolated into the page (the profile
/// name comes from the external API).
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_has_no_banner() {
        let page = render_page(None);
        assert!(!page.contains("class=\"banner"));
        assert!(page.contains(r#"name="access_token""#));
    }

    #[test]
    fn test_success_banner_rendered() {
        let page = render_page(Some(Banner::success("Connected as: Jane Doe")));
        assert!(page.contains(r#"<p class="banner success">Connected as: Jane Doe</p>"#));
    }

    #[test]
    fn test_banner_text_is_escaped() {
        let page = render_page(Some(Banner::success("Connected as: <b>x</b>")));
        assert!(page.contains("Connected as: &lt;b&gt;x&lt;/b&gt;"));
        assert!(!page.contains("<b>x</b>"));
    }

    #[test]
    fn test_escape_covers_quotes() {
        assert_eq!(escape(r#"a"b'c"#), "a&quot;b&#39;c");
    }
}
