//! Share page for a poll, carrying the frame metadata for its prompt.

use askama::Template;

use super::{format_deadline, site_link, FrameView};
use crate::models::Poll;

/// The prompt frame for a poll: its card, one button per option, post URL.
pub fn poll_prompt(site_url: &str, poll: &Poll) -> FrameView {
    let image = site_link(
        site_url,
        "/frame-image",
        &[("title", poll.title.as_str()), ("deadline", poll.deadline.as_str())],
    );
    let buttons = if poll.options.is_empty() {
        vec!["No options available".to_string()]
    } else {
        poll.options.clone()
    };

    FrameView::image(image)
        .with_buttons(&buttons)
        .with_post_url(site_link(site_url, &format!("/api/advanced/{}", poll.id), &[]))
}

#[derive(Template)]
#[template(path = "poll.html")]
struct PollPage<'a> {
    poll: &'a Poll,
    frame: FrameView,
    deadline: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundPage;

/// Full HTML page for `/advanced/{voteId}`.
pub fn poll_page(site_url: &str, poll: &Poll) -> Result<String, askama::Error> {
    PollPage {
        poll,
        frame: poll_prompt(site_url, poll),
        deadline: format_deadline(&poll.deadline),
    }
    .render()
}

/// Page served when the poll id is unknown.
pub fn not_found_page() -> Result<String, askama::Error> {
    NotFoundPage.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll() -> Poll {
        Poll {
            id: "abc".into(),
            title: "Cats or dogs?".into(),
            deadline: "2030-01-01T00:00:00.000Z".into(),
            options: vec!["Cats".into(), "Dogs".into()],
        }
    }

    #[test]
    fn test_prompt_points_at_submission_endpoint() {
        let view = poll_prompt("https://x", &poll());
        assert_eq!(view.buttons, vec!["Cats", "Dogs"]);
        assert_eq!(view.post_url.as_deref(), Some("https://x/api/advanced/abc"));
        assert!(view.image.starts_with("https://x/frame-image?title=Cats+or+dogs%3F"));
    }

    #[test]
    fn test_page_lists_options() {
        let html = poll_page("https://x", &poll()).unwrap();
        assert!(html.contains("<h1>Cats or dogs?</h1>"));
        assert!(html.contains("<li>Cats</li>"));
        assert!(html.contains("Deadline: 2030-01-01 00:00 UTC"));
        assert!(html.contains(r#"property="fc:frame:button:2" content="Dogs""#));
    }

    #[test]
    fn test_page_escapes_poll_text() {
        let mut p = poll();
        p.title = "<b>Tom & Jerry</b>".into();
        p.options = vec!["<i>a</i>".into(), "b".into()];
        let html = poll_page("https://x", &p).unwrap();

        assert!(html.contains("<h1>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</h1>"));
        assert!(html.contains("<li>&lt;i&gt;a&lt;/i&gt;</li>"));
        assert!(!html.contains("<b>Tom"));
    }

    #[test]
    fn test_not_found_page() {
        assert!(not_found_page().unwrap().contains("Vote not found"));
    }

    #[test]
    fn test_prompt_without_options() {
        let mut p = poll();
        p.options.clear();
        assert_eq!(poll_prompt("https://x", &p).buttons, vec!["No options available"]);
    }
}
