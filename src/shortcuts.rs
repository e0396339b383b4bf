use crate::node::Node;

/// Which page the shortcut legend is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutPage {
    ShowCommit {
        merge_parents: usize,
        squashed_diff: bool,
    },
    ShowComments,
    ShowComment,
    FilterChanges,
}

const ORDINALS: [&str; 9] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
];

fn shortcut(target: &mut Node, key: u32, ch: &str, what: &str, is_last: bool) {
    let anchor = target.a();
    anchor.class("shortcut").attr(
        "href",
        format!("javascript:void(handleKeyboardShortcut({}));", key),
    );
    anchor.b().text(format!("({})", ch));
    anchor.text(format!(" {}", what));
    if !is_last {
        target.text(", ");
    }
}

/// Render the keyboard-shortcut legend for `page`.
pub fn render_shortcuts(target: &mut Node, page: ShortcutPage) {
    let shortcuts = target.div();
    shortcuts.class("shortcuts").attr(
        "style",
        "margin-top: 10px; border-top: 3px solid black; text-align: right; \
         padding-top: 10px; padding-right: 1em",
    );
    shortcuts.text("Shortcuts: ");

    match page {
        ShortcutPage::ShowCommit {
            merge_parents,
            squashed_diff,
        } => {
            if merge_parents > 1 {
                for index in 0..merge_parents.min(9) {
                    shortcuts.b().text(format!("({})", index + 1));
                    shortcuts.text(format!(
                        " changes relative to {} parent, ",
                        ORDINALS[index]
                    ));
                }
            }
            shortcut(shortcuts, 'e' as u32, "e", "expand all files", false);
            shortcut(shortcuts, 'c' as u32, "c", "collapse all files", false);
            shortcut(shortcuts, 's' as u32, "s", "show all files", false);
            shortcut(shortcuts, 'h' as u32, "h", "hide all files", false);
            shortcut(shortcuts, 'm' as u32, "m", "detect moved code", false);
            if squashed_diff {
                shortcut(shortcuts, 'b' as u32, "b", "blame", false);
            }
            shortcut(shortcuts, 32, "SPACE", "scroll or show/expand next file", true);
        }
        ShortcutPage::ShowComments => {
            shortcut(shortcuts, 'e' as u32, "e", "expand all comments", false);
            shortcut(shortcuts, 'c' as u32, "c", "collapse all comments", false);
            shortcut(shortcuts, 's' as u32, "s", "show all comments", false);
            shortcut(shortcuts, 'h' as u32, "h", "hide all comments", true);
        }
        ShortcutPage::ShowComment => {
            shortcut(shortcuts, 'm' as u32, "m", "show more context", false);
            shortcut(shortcuts, 'l' as u32, "l", "show less context", true);
        }
        ShortcutPage::FilterChanges => {
            shortcut(shortcuts, 'g' as u32, "g", "go / display diff", true);
        }
    }
}
