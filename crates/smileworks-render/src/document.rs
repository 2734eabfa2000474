//! Full HTML document wrapper around a rendered page body.

use crate::Result;
use crate::template::{Template, TemplateContext};

const BASE: Template = Template::new(
    r#"<!DOCTYPE html>
<html lang="th">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  {{ description? }}
  <link rel="stylesheet" href="/static/site.css">
</head>
<body>
<main class="page">
{{ body }}
</main>
</body>
</html>"#,
);

/// Wrap a page body in the base document.
pub fn render_document(title: &str, description: Option<&str>, body: &str) -> Result<String> {
    let mut ctx = TemplateContext::new()
        .with_var("title", title)
        .with_raw("body", body);
    if let Some(description) = description {
        ctx.insert_raw(
            "description",
            format!(
                r#"<meta name="description" content="{}">"#,
                html_escape::encode_double_quoted_attribute(description)
            ),
        );
    }
    Ok(BASE.render(&ctx)?)
}
