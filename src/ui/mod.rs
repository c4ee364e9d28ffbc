//! HTML rendering: page shell, page content, and HTMX fragments.
//!
//! Everything is server-rendered. Pages are raw HTML assembled with
//! [`page_shell`]; fragment endpoints return snippets the page swaps in via
//! HTMX attributes. All user-controlled text passes through [`escape_html`]
//! on its way into markup.

pub mod chat;
pub mod components;
pub mod pages;

/// Escape text for HTML interpolation.
///
/// Maps exactly `& < > " '` to their entities and passes every other
/// character through unchanged.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Generate the HTML shell for a page.
///
/// The shell carries the vendor scripts (HTMX, Alpine, Bootstrap — local
/// assets only), the fixed alert stack, and the chat widget mount so the
/// assistant is reachable from every page.
#[must_use]
pub fn page_shell(title: &str, content: &str, chat_widget: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Metro Induction System">
    <title>{title} - Metro Induction</title>

    <!-- Vendor assets (local) -->
    <link rel="stylesheet" href="/static/vendor/bootstrap.min.css">
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <script defer src="/static/vendor/alpine.min.js"></script>
    <script defer src="/static/vendor/bootstrap.bundle.min.js"></script>

    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-vh-100 bg-light">
    <div id="app-shell" class="d-flex flex-column min-vh-100">
        <header class="navbar navbar-expand navbar-dark bg-primary sticky-top shadow-sm">
            <div class="container">
                <a href="/" class="navbar-brand fw-semibold">Metro Induction</a>
                <nav class="navbar-nav" hx-boost="true">
                    <a href="/" class="nav-link">Ranklist</a>
                    <a href="/upload" class="nav-link">Data Upload</a>
                </nav>
            </div>
        </header>

        <main id="app" class="container flex-grow-1 py-4">
            {content}
        </main>

        <footer class="py-3 border-top bg-white">
            <div class="container">
                <p class="text-muted small text-center mb-0">Kochi Metro Rail - Train Induction Ranklist</p>
            </div>
        </footer>
    </div>

    <!-- Transient banners stack here, each on its own dismiss timer -->
    <div id="alert-stack" class="alert-stack"></div>

    {chat_widget}
</body>
</html>"#
    )
}
