use log::debug;

use crate::context::{
    AuthMode, Config, Extensions, Injected, Query, RequestInfo, Session, SessionType,
};
use crate::document::{Document, LinkRel};
use crate::error::PageResult;
use crate::node::Node;

/// The collaborators every page-rendering routine needs, grouped so they can
/// be threaded through composer and widget calls as one value.
pub struct PageEnv<'a> {
    pub config: &'a Config,
    pub query: &'a dyn Query,
    pub extensions: Option<&'a dyn Extensions>,
}

/// One navigation link in the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub url: String,
    pub label: String,
    /// Inline style, e.g. the red highlight on unread-count badges.
    pub style: Option<String>,
    /// Tooltip text.
    pub title: Option<String>,
}

impl NavLink {
    pub fn plain(url: impl Into<String>, label: impl Into<String>) -> Self {
        NavLink {
            url: url.into(),
            label: label.into(),
            style: None,
            title: None,
        }
    }
}

/// Optional inputs to [`compose_header`].
#[derive(Default)]
pub struct HeaderOptions<'a> {
    /// Builder for the right-hand header region; the default renders the
    /// global button scope.
    pub generate_right: Option<Box<dyn FnOnce(&mut Node) + 'a>>,
    pub current_page: Option<&'a str>,
    /// Appended verbatim after the standard link sequence.
    pub extra_links: Vec<(String, String)>,
    pub request: Option<&'a RequestInfo>,
}

const FIXED_STYLESHEETS: [&str; 3] = [
    "resource/jquery-ui.css",
    "resource/jquery-tooltip.css",
    "resource/basic.css",
];

const FIXED_SCRIPTS: [&str; 5] = [
    "resource/jquery.js",
    "resource/jquery-ui.js",
    "resource/jquery-tooltip.js",
    "resource/jquery-ui-autocomplete-html.js",
    "resource/basic.js",
];

/// Compose the standard page header into `document`: fixed resources, the
/// no-script warning, the brand row, the navigation link list, and the
/// caller's right-hand region.
///
/// Returns whatever the extension injection hook contributed, unchanged, or
/// `None` when the hook was not invoked.
pub fn compose_header(
    env: &PageEnv,
    document: &mut Document,
    session: &dyn Session,
    options: HeaderOptions,
) -> PageResult<Option<Injected>> {
    debug!("composing header for user '{}'", session.name());

    for url in FIXED_STYLESHEETS {
        document.add_external_stylesheet(url)?;
    }
    let default_font = session.preference("style.defaultFont").unwrap_or_default();
    document.add_internal_stylesheet(format!(".defaultfont, body {{ {} }}", default_font))?;
    let source_font = session.preference("style.sourceFont").unwrap_or_default();
    document.add_internal_stylesheet(format!(".sourcefont {{ {} }}", source_font))?;
    for url in FIXED_SCRIPTS {
        document.add_external_script(url)?;
    }

    let table_index;
    {
        let body = document.body_mut()?;
        body.noscript()
            .h1()
            .class("noscript")
            .blink()
            .text("Please enable scripting support!");

        table_index = body.element_count();
        let table = body.table();
        table.class("pageheader").attr("width", "100%");
        let left = table.tr().td();
        left.class("left").attr("valign", "bottom").attr("align", "left");

        let brand = left.b();
        let mut wordmark_class = String::from("sable");
        if env.config.is_development {
            wordmark_class.push_str(" development");
        }
        brand
            .b()
            .class(wordmark_class)
            .attr("onclick", "location.href='/';")
            .text("Sable");
        brand
            .b()
            .class("review")
            .attr("onclick", "location.href='/';")
            .text("Review");
    }

    let mut links: Vec<NavLink> = Vec::new();

    if !session.is_anonymous() {
        links.push(NavLink::plain("home", "Home"));
    }
    links.push(NavLink::plain("dashboard", "Dashboard"));
    links.push(NavLink::plain("branches", "Branches"));
    links.push(NavLink::plain("search", "Search"));

    if session.has_role("administrator") {
        links.push(NavLink::plain("services", "Services"));
    }
    if session.has_role("repositories") {
        links.push(NavLink::plain("repositories", "Repositories"));
    }

    if env.config.extensions_enabled {
        if let Some(extensions) = env.extensions {
            let updated = extensions.updated_extensions(session);
            if updated.is_empty() {
                links.push(NavLink::plain("manageextensions", "Extensions"));
            } else {
                let title = updated
                    .iter()
                    .map(|extension| {
                        format!("{} by {} can be updated!", extension.name, extension.author)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                links.push(NavLink {
                    url: "manageextensions".to_string(),
                    label: format!("Extensions ({})", updated.len()),
                    style: Some("color: red".to_string()),
                    title: Some(title),
                });
            }
        }
    }

    links.push(NavLink::plain("config", "Config"));
    links.push(NavLink::plain("tutorial", "Tutorial"));

    let unread = env.query.unread_news_count(session.id());
    if unread > 0 {
        links.push(NavLink {
            url: "news".to_string(),
            label: format!("News ({})", unread),
            style: Some("color: red".to_string()),
            title: Some(format!("There are {} unread news items!", unread)),
        });
    } else {
        links.push(NavLink::plain("news", "News"));
    }

    if env.config.auth_mode == AuthMode::Builtin && env.config.session_type == SessionType::Cookie {
        if session.is_anonymous() {
            links.push(NavLink::plain("login", "Sign in"));
        } else if options
            .request
            .map_or(true, |request| {
                request.acting_user.as_deref() == Some(session.name())
            })
        {
            links.push(NavLink::plain("javascript:signOut();", "Sign out"));
        }
    }

    for (url, label) in &options.extra_links {
        links.push(NavLink::plain(url.clone(), label.clone()));
    }

    let injected = match (env.config.extensions_enabled, env.extensions, options.request) {
        (true, Some(extensions), Some(request)) => {
            let mut injected = Injected::default();
            let path = preference_path(request, Some(session));
            extensions.inject(
                &path,
                &request.query,
                session,
                document,
                &mut links,
                &mut injected,
            )?;
            for url in &injected.stylesheets {
                document.add_external_stylesheet_with(url.clone(), 1, false)?;
            }
            for url in &injected.scripts {
                document.add_external_script_with(url.clone(), 1, false)?;
            }
            Some(injected)
        }
        _ => None,
    };

    for link in &links {
        if let Some(rel) = LinkRel::for_label(&link.label) {
            document.set_link(rel, link.url.clone())?;
        }
    }

    let body = document.body_mut()?;
    // Built above; the injection hook can only have appended siblings after it.
    let row = body
        .element_at_mut(table_index)
        .and_then(Node::first_element_mut)
        .unwrap();
    let left = row.first_element_mut().unwrap();

    let list = left.ul();
    for link in &links {
        let anchor = list.li().a();
        anchor.attr("href", link.url.as_str());
        anchor.attr_opt("style", link.style.as_deref());
        anchor.attr_opt("title", link.title.as_deref());
        anchor.text(link.label.as_str());
    }

    let right = row.td();
    right
        .class("right")
        .attr("valign", "bottom")
        .attr("align", "right");
    match options.generate_right {
        Some(generate) => generate(right),
        None => {
            right
                .div()
                .class("buttons")
                .span()
                .class("buttonscope buttonscope-global");
        }
    }

    Ok(injected)
}

/// No-op right-region builder.
pub fn generate_empty(_target: &mut Node) {}

/// The page key(s) used to look up per-page user preferences.
///
/// An empty path resolves to the user's `defaultPage` preference. When the
/// requested path was rewritten on the way in, both the original and the
/// current path are returned, in that order.
pub fn preference_path(request: &RequestInfo, session: Option<&dyn Session>) -> Vec<String> {
    if request.path.is_empty() {
        if let Some(session) = session {
            return vec![session.preference("defaultPage").unwrap_or_default()];
        }
    }
    if request.original_path != request.path {
        vec![request.original_path.clone(), request.path.clone()]
    } else {
        vec![request.path.clone()]
    }
}
