//! Server-rendered HTML pages.
//!
//! The slideshow and info pages are static assets; only the 401 page depends
//! on the request, because it echoes the path back so the visitor can build
//! the one-time setup URL.

/// Escape HTML special characters to prevent XSS attacks.
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Generate the page shown to visitors without a valid token.
///
/// No inline styles or scripts: the content security policy forbids them and
/// the bundled stylesheet sits behind the same auth gate.
pub fn unauthorized_html(path: &str) -> String {
    let escaped_path = html_escape(path);

    format!(
        r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <meta name="color-scheme" content="dark light">
  <title>Frameserve - Unauthorized</title>
</head>
<body>
  <h1>Unauthorized</h1>
  <p>This Frameserve instance requires a shared access token.</p>
  <p><strong>One-time setup on this device:</strong></p>
  <p>Open this URL once (replace <code>YOURTOKEN</code>):</p>
  <p><code>{escaped_path}?token=YOURTOKEN</code></p>
  <p>After that, the device stays logged in through a long-lived cookie.</p>
  <p>If you cleared cookies or switched browsers, repeat the one-time setup.</p>
</body>
</html>
"##
    )
}
