//! # Sable Review page builder
//!
//! Server-side HTML rendering for the Sable Review code-review application.
//!
//! ## Features
//! - Typed element tree built through chained tag factories
//! - Escaped text by default, with an explicit trusted-HTML escape hatch
//! - Ordered stylesheet/script declarations with late-insertion support
//! - The standard page header (branding, navigation, badges, extensions)
//! - Reusable widgets: section tables and grouped repository selects
//!
//! ## Example
//! ```ignore
//! use sable_page::{compose_header, Document, HeaderOptions, PageEnv};
//!
//! let mut document = Document::new();
//! document.set_title("Dashboard")?;
//! compose_header(&env, &mut document, &session, HeaderOptions::default())?;
//! document.body_mut()?.div().class("dashboard").text("...");
//! let html = document.render()?;
//! ```
//!
//! Every `Document` is request-scoped: created at request entry, threaded
//! explicitly through composer and widget calls, serialized once, discarded.

pub mod context;
pub mod document;
pub mod error;
pub mod header;
pub mod message;
pub mod node;
pub mod request;
pub mod select;
pub mod shortcuts;
pub mod table;

// --- Core types ---
pub use document::{Document, LinkRel, ResourceRef};
pub use error::{PageError, PageResult};
pub use node::{escape, AttrValue, Child, Node};

// --- Collaborator contracts ---
pub use context::{
    AuthMode, Config, Extensions, Injected, Query, Repository, RepositoryId, RequestInfo,
    Session, SessionType, UpdatedExtension, UserId,
};

// --- Page composition ---
pub use header::{
    compose_header, generate_empty, preference_path, HeaderOptions, NavLink, PageEnv,
};
pub use message::{message_page, Message, ReviewLink};
pub use shortcuts::{render_shortcuts, ShortcutPage};

// --- Widgets ---
pub use select::{repository_select, SelectedRepo};
pub use table::{Content, SectionTable, DEFAULT_COLUMNS};

// --- Request helpers ---
pub use request::{get_parameter, get_parameter_or, get_parameter_with, yes_or_no};
