//! Server-rendered admin pages. The old deployment shipped a DOM script that
//! fetched `/players`, built a table with view/delete buttons per row, and
//! re-fetched after a delete; here the table comes back as HTML and the
//! delete form redirects to the table, which re-reads the store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde_json::Value;

use crate::handlers::AppState;
use crate::models::PlayerRecord;
use crate::store::friendly_key;

/// Admin table: one row per record, a view link and a delete form per row.
pub async fn admin_page(State(state): State<AppState>) -> Html<String> {
    let store = state.store.read().await;
    Html(render_table(state.prefix, store.keys()))
}

/// Expanded JSON view of one record.
pub async fn view_player(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let store = state.store.read().await;
    match store.get(&key) {
        Some(payload) => Ok(Html(render_json_page(state.prefix, &key, payload))),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("no player record for key '{key}'"),
        )),
    }
}

/// Form-driven delete. On success redirect back to the table so the page the
/// admin lands on reflects a fresh read; on failure surface the reason.
pub async fn delete_player_form(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Redirect, Html<String>> {
    let mut store = state.store.write().await;
    match store.delete(&key) {
        Ok(()) => {
            log::info!("Deleted player record for '{key}' via admin page");
            Ok(Redirect::to(&format!("{}/", state.prefix)))
        }
        Err(e) => {
            log::warn!("Admin delete failed for '{key}': {e}");
            Err(Html(render_error_page(state.prefix, &e.to_string())))
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn render_table<'a>(prefix: &str, keys: impl Iterator<Item = &'a String>) -> String {
    let mut rows = String::new();
    for storage in keys {
        let friendly = escape_html(friendly_key(storage));
        rows.push_str(&format!(
            "<tr>\
<td><a href=\"{prefix}/players/{friendly}/view\">View {friendly}</a></td>\
<td><form method=\"post\" action=\"{prefix}/players/{friendly}/delete\">\
<input type=\"submit\" value=\"Delete {friendly}\"></form></td>\
</tr>\n"
        ));
    }
    let body = format!(
        "<table id=\"players\">\n\
<thead><tr><th>Players</th><th>Delete</th></tr></thead>\n\
<tbody>\n{rows}</tbody>\n\
</table>"
    );
    page("Players", &body)
}

fn render_json_page(prefix: &str, friendly: &str, payload: &Value) -> String {
    // Best effort typed summary; payloads are opaque so a parse failure just
    // means no summary line.
    let summary = match PlayerRecord::from_value(payload) {
        Ok(record) if !record.scripts.is_empty() => {
            let scripts: Vec<String> = record
                .scripts
                .iter()
                .map(|(name, info)| {
                    format!(
                        "{} [{}] ({} scenes)",
                        escape_html(name),
                        escape_html(&info.state),
                        info.scene_states.len()
                    )
                })
                .collect();
            format!("<p>Scripts: {}</p>\n", scripts.join(", "))
        }
        _ => String::new(),
    };

    let pretty = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|_| payload.to_string());
    let body = format!(
        "<h1>Player {}</h1>\n{}<pre id=\"json\">{}</pre>\n<p><a href=\"{}/\">Back</a></p>",
        escape_html(friendly),
        summary,
        escape_html(&pretty),
        prefix
    );
    page(&format!("Player {friendly}"), &body)
}

fn render_error_page(prefix: &str, reason: &str) -> String {
    let body = format!(
        "<h1>Delete Failed</h1>\n<p>{}</p>\n<p><a href=\"{}/\">Back</a></p>",
        escape_html(reason),
        prefix
    );
    page("Delete Failed", &body)
}
