//! # Pagekit - HTML Template Rendering
//!
//! A small layer over [minijinja](https://docs.rs/minijinja) for rendering HTML pages whose
//! controls carry keyboard access keys.
//!
//! ## The Problem
//!
//! Server-rendered pages need:
//! - Escaping of every interpolated value, including inside attributes
//! - Labels that show which letter triggers a control (`<u>M</u>anual`)
//! - Inline JSON payloads that cannot break out of a `<script>` element
//!
//! ## The Solution
//!
//! Pagekit configures a minijinja environment so that:
//! - **Every template is HTML auto-escaped**, regardless of its name
//! - **`accel`** marks the access-key letter in a label: `{{ "Manual" | accel("m") }}`
//! - **`tojson`** (minijinja builtin) is available for inline payloads, keeping struct field order
//!
//! ## Quick Example
//!
//! ```rust
//! use pagekit::render;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     label: String,
//! }
//!
//! let html = render(
//!     r#"<label accesskey="m">{{ label | accel("m") }}</label>"#,
//!     &Data { label: "Manual".into() },
//! )
//! .unwrap();
//! assert_eq!(html, r#"<label accesskey="m"><span class="accel">M</span>anual</label>"#);
//! ```
//!
//! ## Renderer for Multiple Templates
//!
//! Pages composed of several templates (a layout plus partials) use [`Renderer`], which
//! compiles each template once:
//!
//! ```rust
//! use pagekit::Renderer;
//! # use serde::Serialize;
//! # #[derive(Serialize)]
//! # struct Row { name: String }
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template("row", "<tr><td>{{ name }}</td></tr>").unwrap();
//! let html = renderer.render("row", &Row { name: "a<b".into() }).unwrap();
//! assert_eq!(html, "<tr><td>a&lt;b</td></tr>");
//! ```

use minijinja::{AutoEscape, Environment, HtmlEscape, Value};
use serde::Serialize;

pub use minijinja::Error;

/// CSS class wrapped around the access-key letter by [`accel`].
pub const ACCEL_CLASS: &str = "accel";

/// Escapes text for use in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    HtmlEscape(text).to_string()
}

/// Escapes `label` and wraps the first occurrence of `key` (case-insensitive) in a
/// `<span class="accel">` element.
///
/// When the letter does not occur in the label, the escaped label is returned unchanged.
///
/// ```rust
/// assert_eq!(
///     pagekit::accel("Source code", 'u'),
///     r#"So<span class="accel">u</span>rce code"#
/// );
/// assert_eq!(pagekit::accel("A & B", 'x'), "A &amp; B");
/// ```
pub fn accel(label: &str, key: char) -> String {
    let wanted = key.to_lowercase().collect::<String>();
    let position = label
        .char_indices()
        .find(|(_, c)| c.to_lowercase().collect::<String>() == wanted);

    match position {
        Some((idx, c)) => {
            let after = idx + c.len_utf8();
            format!(
                "{}<span class=\"{}\">{}</span>{}",
                escape(&label[..idx]),
                ACCEL_CLASS,
                escape(&label[idx..after]),
                escape(&label[after..])
            )
        }
        None => escape(label),
    }
}

/// Renders a single template string with HTML auto-escaping.
///
/// # Example
///
/// ```rust
/// use pagekit::render;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Data { name: String }
///
/// let html = render("<b>{{ name }}</b>", &Data { name: "<i>".into() }).unwrap();
/// assert_eq!(html, "<b>&lt;i&gt;</b>");
/// ```
pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String, Error> {
    let mut env = Environment::new();
    configure(&mut env);

    env.add_template_owned("_inline".to_string(), template.to_string())?;
    let tmpl = env.get_template("_inline")?;
    tmpl.render(data)
}

/// A renderer with pre-registered templates.
///
/// Templates may include or extend each other by name.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        configure(&mut env);
        Self { env }
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Renders a registered template with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(data)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn configure(env: &mut Environment<'static>) {
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_filter("accel", accel_filter);
}

/// `{{ label | accel(key) }}`: only the first character of `key` is used.
fn accel_filter(label: String, key: String) -> Value {
    let html = match key.chars().next() {
        Some(k) => accel(&label, k),
        None => escape(&label),
    };
    Value::from_safe_string(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct SimpleData {
        message: String,
    }

    #[derive(Serialize)]
    struct ListData {
        items: Vec<String>,
        count: usize,
    }

    #[test]
    fn test_accel_marks_first_match_case_insensitive() {
        assert_eq!(
            accel("Steam Workshop", 'W'),
            r#"Steam <span class="accel">W</span>orkshop"#
        );
        assert_eq!(
            accel("Twitch Plays only", 'p'),
            r#"Twitch <span class="accel">P</span>lays only"#
        );
    }

    #[test]
    fn test_accel_escapes_around_marker() {
        assert_eq!(
            accel("<Mods>", 'o'),
            r#"&lt;M<span class="accel">o</span>ds&gt;"#
        );
    }

    #[test]
    fn test_accel_missing_letter_returns_escaped_label() {
        assert_eq!(accel("Name", 'z'), "Name");
    }

    #[test]
    fn test_accel_non_ascii_label() {
        assert_eq!(
            accel("\u{a0}Sort by name", 'n'),
            "\u{a0}Sort by <span class=\"accel\">n</span>ame"
        );
    }

    #[test]
    fn test_render_escapes_values() {
        let data = SimpleData {
            message: r#"<script>"x"</script>"#.into(),
        };
        let output = render("{{ message }}", &data).unwrap();
        assert!(!output.contains("<script>"));
        assert!(output.contains("&lt;script&gt;"));
        assert!(output.contains("&quot;x&quot;"));
    }

    #[test]
    fn test_render_escapes_attribute_values() {
        let data = SimpleData {
            message: r#"a" onclick="b"#.into(),
        };
        let output = render(r#"<tr data-mod="{{ message }}">"#, &data).unwrap();
        assert_eq!(output, r#"<tr data-mod="a&quot; onclick=&quot;b">"#);
    }

    #[test]
    fn test_accel_filter_output_is_not_double_escaped() {
        let data = SimpleData {
            message: "Manual".into(),
        };
        let output = render(r#"{{ message | accel("M") }}"#, &data).unwrap();
        assert_eq!(output, r#"<span class="accel">M</span>anual"#);
    }

    #[test]
    fn test_accel_filter_empty_key() {
        let data = SimpleData {
            message: "A&B".into(),
        };
        let output = render(r#"{{ message | accel("") }}"#, &data).unwrap();
        assert_eq!(output, "A&amp;B");
    }

    #[test]
    fn test_tojson_keeps_script_context_closed() {
        #[derive(Serialize)]
        struct Payload {
            config: serde_json::Value,
        }
        let data = Payload {
            config: serde_json::json!({ "label": "</script><b>" }),
        };
        let output = render("<script>x = {{ config | tojson }};</script>", &data).unwrap();
        assert_eq!(output.matches("</script>").count(), 1);
    }

    #[test]
    fn test_tojson_keeps_field_order() {
        #[derive(Serialize)]
        struct Filter {
            key: &'static str,
            label: &'static str,
            kind: &'static str,
        }
        #[derive(Serialize)]
        struct Payload {
            filter: Filter,
        }
        let data = Payload {
            filter: Filter {
                key: "type",
                label: "Type",
                kind: "checkbox-set",
            },
        };
        let output = render("{{ filter | tojson }}", &data).unwrap();
        assert_eq!(output, r#"{"key":"type","label":"Type","kind":"checkbox-set"}"#);
    }

    #[test]
    fn test_render_template_with_loop() {
        let data = ListData {
            items: vec!["one".into(), "two".into()],
            count: 2,
        };

        let template = r#"{% for item in items %}<li>{{ item }}</li>{% endfor %}"#;

        let output = render(template, &data).unwrap();
        assert_eq!(output, "<li>one</li><li>two</li>");
    }

    #[test]
    fn test_renderer_add_and_render() {
        let mut renderer = Renderer::new();

        renderer.add_template("test", "<p>{{ message }}</p>").unwrap();

        let output = renderer
            .render(
                "test",
                &SimpleData {
                    message: "hi".into(),
                },
            )
            .unwrap();
        assert_eq!(output, "<p>hi</p>");
    }

    #[test]
    fn test_renderer_unknown_template_error() {
        let renderer = Renderer::new();

        let result = renderer.render(
            "nonexistent",
            &SimpleData {
                message: "x".into(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_renderer_include_between_templates() {
        let mut renderer = Renderer::new();
        renderer
            .add_template("row", "<td>{{ item }}</td>")
            .unwrap();
        renderer
            .add_template(
                "table",
                "<tr>{% for item in items %}{% include \"row\" %}{% endfor %}</tr>",
            )
            .unwrap();

        let data = ListData {
            items: vec!["a".into(), "b".into()],
            count: 2,
        };
        assert_eq!(
            renderer.render("table", &data).unwrap(),
            "<tr><td>a</td><td>b</td></tr>"
        );
    }

    #[test]
    fn test_empty_template() {
        #[derive(Serialize)]
        struct Empty {}

        let output = render("", &Empty {}).unwrap();
        assert_eq!(output, "");
    }

    #[test]
    fn test_template_syntax_error() {
        #[derive(Serialize)]
        struct Empty {}

        let result = render("{{ unclosed", &Empty {});
        assert!(result.is_err());
    }
}
