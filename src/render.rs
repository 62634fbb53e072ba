// SPDX-License-Identifier: MIT

//! BIOS-terminal page rendering.
//!
//! Pure functions from a flow outcome to an HTML document. The only
//! non-determinism is the wall-clock timestamp on error pages, which
//! `render_error_at` factors out for tests. Nothing here does I/O.

use chrono::{DateTime, Utc};

use crate::services::CallbackOutcome;

const PAGE_TITLE: &str = "POOL BIOS - Discord OAuth";

const BANNER_DESKTOP: &str = r"██████   ██████   ██████  ██
██   ██ ██    ██ ██    ██ ██
██████  ██    ██ ██    ██ ██
██      ██    ██ ██    ██ ██
██       ██████   ██████  ███████";

const BANNER_MOBILE: &str = r"█▀█ █▀█ █▀█ █
█▀  █▄█ █▄█ █▄▄";

const STYLE: &str = r#"
    body {
        background: #0a0a0a;
        color: #e8c88a;
        font-family: "Courier New", monospace;
        font-size: 15px;
        margin: 0;
        padding: 0;
    }
    .bios-header {
        display: flex;
        justify-content: space-between;
        background: #e8c88a;
        color: #0a0a0a;
        padding: 4px 12px;
        font-weight: bold;
    }
    .terminal { padding: 24px 16px; white-space: pre-wrap; }
    .banner { color: #ffd75f; line-height: 1.1; }
    .ok { color: #5fd787; }
    .fail { color: #ff5f5f; }
    .dim { color: #8a8a8a; }
    .bright { color: #ffffff; }
    .connect-btn {
        display: inline-block;
        margin-top: 24px;
        padding: 12px 28px;
        border: 1px solid #e8c88a;
        color: #e8c88a;
        text-decoration: none;
        letter-spacing: 2px;
    }
    .connect-btn:hover { background: #e8c88a; color: #0a0a0a; }
"#;

/// Escape text for interpolation into HTML content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Cosmetic 4-digit hex code derived from the error code string.
///
/// FNV-1a masked to 16 bits: stable across runs and processes, used
/// only for the "ERR 0x____" display line.
fn error_hex(code: &str) -> String {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    let mut hash = FNV_OFFSET;
    for byte in code.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("{:04X}", hash & 0xFFFF)
}

/// Wrap terminal content in the shared document shell.
fn page(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="bios-header"><span>POOL BIOS SETUP UTILITY</span><span>v2.1</span></div>
<div class="terminal">{content}</div>
</body>
</html>"#
    )
}

/// Landing page with the connect link.
pub fn render_home(oauth_url: &str, mobile: bool) -> String {
    let banner = if mobile { BANNER_MOBILE } else { BANNER_DESKTOP };
    let content = format!(
        r#"<pre class="banner">{banner}</pre>
<pre>
<span class="bright">OAUTH AUTHENTICATION SYSTEM</span>

<span class="dim">OAuth Module..........</span> Version 2.1      [  <span class="ok">OK</span>  ]
<span class="dim">Discord API...........</span> v10              [  <span class="ok">OK</span>  ]
<span class="dim">Connection Status.....</span> STANDBY

Press <span class="bright">CONNECT</span> to authorize your Discord account.
</pre>
<a class="connect-btn" href="{}">[ CONNECT WITH DISCORD ]</a>"#,
        escape(oauth_url)
    );
    page(&content)
}

/// Success page for a completed link.
pub fn render_success(user_id: &str, display_name: &str) -> String {
    let content = format!(
        r#"<pre class="banner">{BANNER_DESKTOP}</pre>
<pre>
<span class="dim">Exchanging Token..................</span> [<span class="ok">████████████████████</span>] OK
<span class="dim">Fetching User Data................</span> [<span class="ok">████████████████████</span>] OK
<span class="dim">Saving to Global Pool.............</span> [<span class="ok">████████████████████</span>] OK

<span class="ok">█ AUTHENTICATION SUCCESSFUL █</span>

  <span class="dim">Discord ID..........</span> {id}
  <span class="dim">Username............</span> <span class="bright">{name}</span>
  <span class="dim">Pool Status.........</span> LINKED

Account successfully linked to the global user pool.
<span class="dim">You may now close this window.</span>
</pre>"#,
        id = escape(user_id),
        name = escape(display_name),
    );
    page(&content)
}

/// Error page with the classified code, description and timestamp.
pub fn render_error(code: &str, message: &str) -> String {
    render_error_at(code, message, Utc::now())
}

/// Deterministic error render with an explicit timestamp.
pub fn render_error_at(code: &str, message: &str, timestamp: DateTime<Utc>) -> String {
    let content = format!(
        r#"<pre class="banner">{BANNER_DESKTOP}</pre>
<pre>
<span class="dim">Processing Authorization...........</span> [<span class="fail">████████</span><span class="dim">░░░░░░░░░░░░</span>] <span class="fail">FAILED</span>

<span class="fail">█ AUTHENTICATION FAILED █</span>

  <span class="dim">Error Code..........</span> <span class="fail">ERR 0x{hex}: {code}</span>
  <span class="dim">Description.........</span> {message}
  <span class="dim">Timestamp...........</span> {ts}

Authorization failed. Please try again.
</pre>"#,
        hex = error_hex(code),
        code = escape(code),
        message = escape(message),
        ts = timestamp.format("%Y-%m-%d %H:%M:%S"),
    );
    page(&content)
}

/// Render a flow outcome to a document.
pub fn render_outcome(outcome: &CallbackOutcome) -> String {
    match outcome {
        CallbackOutcome::Success {
            user_id,
            display_name,
        } => render_success(user_id, display_name),
        CallbackOutcome::Failure { code, message } => render_error(code, message),
    }
}
