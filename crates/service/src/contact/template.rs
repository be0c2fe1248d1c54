use serde_json::Value;

use super::notifier::Notification;

fn field<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Render the owner notification for a stored contact record.
pub fn contact_notification(record: &Value, to: &str) -> Notification {
    let name = field(record, "name");
    let rows = [
        ("Name", name),
        ("Email", field(record, "email")),
        ("Phone", field(record, "phone")),
        ("Company", field(record, "company")),
        ("Received", field(record, "created_at")),
    ];
    let message = field(record, "message");

    let mut text = String::new();
    for (label, value) in rows {
        text.push_str(&format!("{label}: {value}\n"));
    }
    text.push_str(&format!("\n{message}\n"));

    let mut html = String::from("<h2>New contact inquiry</h2>\n<table>\n");
    for (label, value) in rows {
        html.push_str(&format!("<tr><th align=\"left\">{label}</th><td>{}</td></tr>\n", escape_html(value)));
    }
    html.push_str("</table>\n");
    html.push_str(&format!("<p>{}</p>\n", escape_html(message).replace('\n', "<br>")));

    Notification {
        to: to.to_string(),
        subject: format!("New contact inquiry from {name}"),
        text,
        html,
    }
}
