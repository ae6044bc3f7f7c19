use crate::startup::AppState;
use axum::{extract::State, response::Html};
use tokio::fs;

// Shown when the static directory ships no finish.html of its own.
const INLINE_FINISH_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Session complete</title>
</head>
<body>
  <h1>Thank you!</h1>
  <p>Your responses have been recorded. You may close this window.</p>
</body>
</html>
"#;

/// Confirmation page: the static file when the experiment ships one, the
/// inline fallback otherwise.
pub async fn finish_page(State(state): State<AppState>) -> Html<String> {
    let path = state.config.server.static_dir.join("finish.html");
    match fs::read_to_string(&path).await {
        Ok(page) => Html(page),
        Err(_) => {
            tracing::debug!(path = %path.display(), "No finish.html, serving the inline page");
            Html(INLINE_FINISH_PAGE.to_string())
        }
    }
}
