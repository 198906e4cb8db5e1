//! Subject and bodies of the inquiry mail.

use maud::{PreEscaped, html};
use optimus_model::ContactRequest;

pub const SUBJECT_PREFIX: &str = "[Optimus Website]";

pub fn subject_line(request: &ContactRequest) -> String {
    format!("{SUBJECT_PREFIX} {}", request.subject)
}

pub fn text_body(request: &ContactRequest) -> String {
    format!(
        "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
        request.name, request.email, request.subject, request.message
    )
}

/// HTML alternative. Submitted values are escaped by `html!` and message
/// line breaks become `<br />`.
pub fn html_body(request: &ContactRequest) -> String {
    html! {
        h2 { "New Inquiry from Optimus Website" }
        p { strong { "Name:" } " " (request.name) }
        p { strong { "Email:" } " " (request.email) }
        p { strong { "Subject:" } " " (request.subject) }
        p { strong { "Message:" } }
        p {
            @for (i, line) in request.message.lines().enumerate() {
                @if i > 0 { (PreEscaped("<br />")) }
                (line)
            }
        }
    }
    .into_string()
}
