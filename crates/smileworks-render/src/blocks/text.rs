//! Free-form rich text section.

use smileworks_core::block::BlockContent;

use crate::Result;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const TEXT: Template = Template::new(
    r#"<section class="text-section" style="text-align: {{ alignment }}">
  {{ title? }}
  {{ subtitle? }}
  {{ body? }}
</section>"#,
);

pub struct TextHandler;

impl BlockHandler for TextHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Text(text) = content else {
            return Ok(String::new());
        };
        if text.title.is_none() && text.content.is_none() {
            return Ok(String::new());
        }

        let mut ctx =
            TemplateContext::new().with_var("alignment", text.alignment.as_deref().unwrap_or("left"));
        if let Some(title) = &text.title {
            ctx.insert_raw(
                "title",
                format!("<h2>{}</h2>", html_escape::encode_text(title)),
            );
        }
        if let Some(subtitle) = &text.subtitle {
            ctx.insert_raw(
                "subtitle",
                format!("<h3>{}</h3>", html_escape::encode_text(subtitle)),
            );
        }
        // Body is CMS-authored rich text, passed through as markup.
        if let Some(body) = &text.content {
            ctx.insert_raw("body", format!(r#"<div class="text-body">{body}</div>"#));
        }

        Ok(TEXT.render(&ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use smileworks_core::block::BlockType;
    use smileworks_core::page::Auxiliary;

    use super::*;

    #[test]
    fn test_text_renders_title_and_rich_body() {
        let content = BlockContent::from_value(
            BlockType::Text,
            serde_json::json!({
                "id": 1,
                "title": "ทำไมต้องเลือกเรา",
                "content": "<p>ทีมแพทย์เฉพาะทาง</p>",
                "alignment": "center",
            }),
        )
        .expect("decode");
        let aux = Auxiliary::default();
        let html = TextHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");

        assert!(html.contains("ทำไมต้องเลือกเรา"));
        assert!(html.contains("<p>ทีมแพทย์เฉพาะทาง</p>"));
        assert!(html.contains("text-align: center"));
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let content =
            BlockContent::from_value(BlockType::Text, serde_json::json!({"id": 1})).expect("decode");
        let aux = Auxiliary::default();
        let html = TextHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");
        assert!(html.is_empty());
    }
}
