//! Inline HTML rendering for the dispatcher pages.
//!
//! Pages are built with plain string formatting. Every value that came from
//! a request or from the store goes through [`escape`] first.

use axum::http::StatusCode;

use domain::User;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Profile of a single user.
pub fn profile_page(user: &User) -> String {
    let body = format!(
        "<h1>User profile</h1>\n<p>Name: {}</p>\n<p>Email: {}</p>",
        escape(&user.name),
        escape(&user.email)
    );
    layout(&user.name, &body)
}

/// Every user, each linking to its profile.
pub fn list_page(users: &[User]) -> String {
    let body = if users.is_empty() {
        "<h1>Users</h1>\n<p>No users yet.</p>".to_string()
    } else {
        let items: String = users
            .iter()
            .map(|user| {
                format!(
                    "<li><a href=\"/?action=profile&amp;id={}\">{}</a> ({})</li>\n",
                    user.id,
                    escape(&user.name),
                    escape(&user.email)
                )
            })
            .collect();
        format!("<h1>Users</h1>\n<ul>\n{}</ul>", items)
    };
    layout("Users", &body)
}

/// Error page carrying the user-facing message.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!("<h1>{}</h1>\n<p>{}</p>", escape(title), escape(message));
    layout(title, &body)
}
