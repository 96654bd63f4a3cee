use crate::webhook::payload::PullRequestEvent;

/// Release note line for a merged pull request: `* {title}. ({url})`.
pub fn format_note(event: &PullRequestEvent) -> String {
    format!("* {}. ({})", event.title, event.html_url)
}

/// Appends `note` to existing release notes on a new line.
pub fn append_note(body: &str, note: &str) -> String {
    format!("{body}\n{note}")
}
