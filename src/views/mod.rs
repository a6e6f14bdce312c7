//! Server-side HTML rendering.
//!
//! Pages are built from plain strings; every value that did not originate in
//! this module goes through [`escape`].

pub mod auth;
pub mod dashboard;

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::Html;
use serde_json::Value;

use crate::middleware::csrf::CSRF_FIELD;
use crate::middleware::session::Flash;

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 20px; background: #f4f6f8; color: #212529; }
        .container { max-width: 960px; margin: 0 auto; }
        nav { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
        .card { background: #fff; border-radius: 8px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.08); }
        .flash { padding: 10px 14px; border-radius: 6px; margin-bottom: 10px; }
        .flash-danger { background: #f8d7da; }
        .flash-warning { background: #fff3cd; }
        .flash-success { background: #d1e7dd; }
        .flash-info { background: #cff4fc; }
        table { border-collapse: collapse; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #dee2e6; vertical-align: top; }
        label { display: block; margin: 8px 0 4px; }
"#;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Hidden form input carrying the session's CSRF token.
pub fn csrf_input(token: &str) -> String {
    format!(
        r#"<input type="hidden" name="{CSRF_FIELD}" value="{}">"#,
        escape(token)
    )
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash flash-{}" role="alert">{}</div>"#,
                flash.level.as_str(),
                escape(&flash.message)
            )
        })
        .collect()
}

/// Wrap page content in the shared layout.
pub fn layout(title: &str, signed_in_as: Option<&str>, flashes: &[Flash], body: &str) -> Html<String> {
    let nav_links = match signed_in_as {
        Some(email) => format!(
            r#"<span>Signed in as {}</span> <a href="/dashboard">Dashboard</a> <a href="/logout">Log out</a>"#,
            escape(email)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | IPL Stats</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <nav><strong>IPL Stats</strong><div>{nav_links}</div></nav>
        {flashes}
        {body}
    </div>
</body>
</html>"#,
        title = escape(title),
        flashes = render_flashes(flashes),
    ))
}

/// Standalone page for errors that escape a handler.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<div class="card"><h1>{} {}</h1><p>{}</p><p><a href="/">Back to start</a></p></div>"#,
        status.as_u16(),
        escape(reason),
        escape(message)
    );
    layout(reason, None, &[], &body)
}

/// Render an arbitrary JSON document as nested HTML.
pub fn render_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push('-'),
        Value::Bool(b) => out.push_str(if *b { "yes" } else { "no" }),
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => out.push_str(&escape(s)),
        Value::Array(items) if items.is_empty() => out.push('-'),
        Value::Array(items) => {
            out.push_str("<ol>");
            for item in items {
                out.push_str("<li>");
                write_value(out, item);
                out.push_str("</li>");
            }
            out.push_str("</ol>");
        }
        Value::Object(fields) => {
            out.push_str("<table>");
            for (key, field) in fields {
                let _ = write!(out, "<tr><th>{}</th><td>", escape(key));
                write_value(out, field);
                out.push_str("</td></tr>");
            }
            out.push_str("</table>");
        }
    }
}
