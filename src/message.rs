use crate::context::{RequestInfo, Session};
use crate::document::Document;
use crate::error::PageResult;
use crate::header::{compose_header, HeaderOptions, PageEnv};
use crate::node::Node;

/// The body of a message page.
pub enum Message<'a> {
    /// Literal text, escaped and rendered as a sub-heading.
    Text(String),
    /// Trusted markup, inserted verbatim.
    Html(String),
    /// Builder callback invoked with the message container.
    Build(Box<dyn FnOnce(&mut Node) + 'a>),
}

/// A review to link back to from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewLink {
    pub id: i64,
}

/// Build a complete message/notice page: the standard header (with a
/// "Back to Review" link when a review is given) and a titled message block.
///
/// The returned document has not been serialized yet; the caller renders it.
pub fn message_page<'a>(
    env: &PageEnv,
    session: &dyn Session,
    request: Option<&'a RequestInfo>,
    title: &str,
    review: Option<ReviewLink>,
    message: Option<Message<'a>>,
    page_title: Option<&str>,
    generate_right: Option<Box<dyn FnOnce(&mut Node) + 'a>>,
) -> PageResult<Document> {
    let mut document = Document::new();
    if let Some(prefix) = &env.config.static_prefix {
        document.set_static_prefix(prefix.clone());
    }
    if let Some(page_title) = page_title {
        document.set_title(page_title)?;
    }
    document.add_external_stylesheet("resource/message.css")?;

    let mut options = HeaderOptions {
        generate_right,
        request,
        ..HeaderOptions::default()
    };
    if let Some(review) = review {
        options
            .extra_links
            .push((format!("r/{}", review.id), "Back to Review".to_string()));
    }
    compose_header(env, &mut document, session, options)?;

    let body = document.body_mut()?;
    let target = body.div();
    target.class("message");

    match message {
        Some(message) => {
            target.h1().class("title").text(title);
            match message {
                Message::Text(text) => {
                    target.h3().text(text);
                }
                Message::Html(html) => {
                    target.raw_html(html);
                }
                Message::Build(build) => build(target),
            }
        }
        None => {
            target.h1().class("center").text(title);
        }
    }

    Ok(document)
}
