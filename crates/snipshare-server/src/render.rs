//! HTML rendering collaborator for the page handlers.
//!
//! Templates are plain HTML files embedded at compile time, with
//! `{{name}}` placeholders filled in at render time. A page template is
//! always composed first and then substituted into the shared layout along
//! with the footer partial — the layout never sees an unrendered page.
//!
//! No template engine: a single-pass placeholder scan is all the service
//! needs, and the pass never re-reads substituted values, so snippet text
//! containing `{{...}}` markers renders literally.

use snipshare_store::Snippet;
use thiserror::Error;

const BASE_LAYOUT: &str = include_str!("../ui/html/base.layout.html");
const FOOTER_PARTIAL: &str = include_str!("../ui/html/footer.partial.html");
const HOME_PAGE: &str = include_str!("../ui/html/home.page.html");
const SHOW_PAGE: &str = include_str!("../ui/html/show.page.html");

/// Errors that can occur while rendering a page.
///
/// Both variants mean a template and the code filling it disagree; the
/// handlers treat them like any other internal failure (500).
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template references a placeholder no value was supplied for.
    #[error("template '{template}' references unknown placeholder '{placeholder}'")]
    UnknownPlaceholder {
        template: &'static str,
        placeholder: String,
    },

    /// A supplied value's placeholder never appears in the template.
    #[error("template '{template}' never uses placeholder '{placeholder}'")]
    UnusedValue {
        template: &'static str,
        placeholder: &'static str,
    },
}

/// Renders named views over the embedded template set.
#[derive(Debug, Clone)]
pub struct Renderer {
    layout: &'static str,
    footer: &'static str,
    home: &'static str,
    show: &'static str,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer over the templates compiled into the binary.
    pub fn new() -> Self {
        Self {
            layout: BASE_LAYOUT,
            footer: FOOTER_PARTIAL,
            home: HOME_PAGE,
            show: SHOW_PAGE,
        }
    }

    /// Renders the snippet list view.
    pub fn home_page(&self, snippets: &[Snippet]) -> Result<String, RenderError> {
        let items = if snippets.is_empty() {
            "            <p>There's nothing to see here... yet!</p>\n".to_string()
        } else {
            let mut out = String::new();
            for snippet in snippets {
                out.push_str(&format!(
                    "            <article class=\"snippet\">\n                \
                     <h3><a href=\"/snippet?id={id}\">{title}</a></h3>\n                \
                     <time>{created}</time>\n            </article>\n",
                    id = snippet.id,
                    title = escape_html(&snippet.title),
                    created = escape_html(&snippet.created),
                ));
            }
            out
        };

        let page = fill(self.home, "home.page", &[("items", &items)])?;
        self.compose("Latest snippets", &page)
    }

    /// Renders the single-snippet detail view.
    pub fn show_page(&self, snippet: &Snippet) -> Result<String, RenderError> {
        let page = fill(
            self.show,
            "show.page",
            &[
                ("id", &snippet.id.to_string()),
                ("title", &escape_html(&snippet.title)),
                ("content", &escape_html(&snippet.content)),
                ("created", &escape_html(&snippet.created)),
                ("expires", &escape_html(&snippet.expires)),
            ],
        )?;
        self.compose(&snippet.title, &page)
    }

    /// Wraps an already-rendered page body in the shared layout.
    fn compose(&self, title: &str, page: &str) -> Result<String, RenderError> {
        fill(
            self.layout,
            "base.layout",
            &[
                ("title", &escape_html(title)),
                ("content", page),
                ("footer", self.footer),
            ],
        )
    }
}

/// Fills `{{name}}` placeholders in a single left-to-right pass.
///
/// Substituted values are never re-scanned. Every supplied value must be
/// used and every placeholder must have a value, so a template/code
/// mismatch surfaces as an error instead of a silently broken page.
fn fill(
    template: &str,
    name: &'static str,
    values: &[(&'static str, &str)],
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; values.len()];
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().position(|(k, _)| *k == key) {
                    Some(idx) => {
                        used[idx] = true;
                        out.push_str(values[idx].1);
                    }
                    None => {
                        return Err(RenderError::UnknownPlaceholder {
                            template: name,
                            placeholder: key.to_string(),
                        })
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated marker: not a placeholder, emit literally.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    for (idx, (key, _)) in values.iter().enumerate() {
        if !used[idx] {
            return Err(RenderError::UnusedValue {
                template: name,
                placeholder: key,
            });
        }
    }

    Ok(out)
}

/// Escapes the five HTML-significant characters.
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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
