//! Hero and page-header sections.

use smileworks_core::block::BlockContent;

use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};
use crate::Result;

const HERO: Template = Template::new(
    r#"<section class="hero">
  <div class="hero-copy">
    {{ badge? }}
    <h1>{{ headline_line1? }}<br>{{ headline_line2? }}</h1>
    {{ description? }}
    <div class="hero-cta">{{ primary_cta? }}{{ secondary_cta? }}</div>
  </div>
  {{ image? }}
</section>"#,
);

/// Full-width hero with headline and calls to action.
pub struct HeroHandler;

impl BlockHandler for HeroHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Hero(hero) = content else {
            return Ok(String::new());
        };
        if hero.headline_line1.is_none() && hero.headline_line2.is_none() {
            return Ok(String::new());
        }

        let mut ctx = TemplateContext::new()
            .with_opt("headline_line1", hero.headline_line1.as_deref())
            .with_opt("headline_line2", hero.headline_line2.as_deref());

        if let Some(badge) = &hero.badge_text {
            ctx.insert_raw("badge", span("hero-badge", badge));
        }
        if let Some(description) = &hero.description {
            ctx.insert_raw("description", paragraph("hero-description", description));
        }
        if let Some(text) = &hero.primary_cta_text {
            let href = hero.primary_cta_link.as_deref().unwrap_or("/contact");
            ctx.insert_raw("primary_cta", anchor("btn btn-primary", href, text));
        }
        if let Some(text) = &hero.secondary_cta_text {
            let href = hero.secondary_cta_link.as_deref().unwrap_or("/services");
            ctx.insert_raw("secondary_cta", anchor("btn btn-secondary", href, text));
        }
        if let Some(image) = &hero.background_image {
            ctx.insert_raw(
                "image",
                format!(
                    r#"<div class="hero-visual"><img src="{}" alt=""></div>"#,
                    html_escape::encode_double_quoted_attribute(image)
                ),
            );
        }

        Ok(HERO.render(&ctx)?)
    }
}

const PAGE_HEADER: Template = Template::new(
    r#"<header class="page-header">
  {{ badge? }}
  <h1>{{ title }}</h1>
  {{ subtitle? }}
  {{ description? }}
</header>"#,
);

/// Lightweight header for inner pages.
pub struct PageHeaderHandler;

impl BlockHandler for PageHeaderHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::PageHeader(header) = content else {
            return Ok(String::new());
        };
        let Some(title) = &header.title else {
            return Ok(String::new());
        };

        let mut ctx = TemplateContext::new().with_var("title", title);
        if let Some(badge) = &header.badge_text {
            ctx.insert_raw("badge", span("page-header-badge", badge));
        }
        if let Some(subtitle) = &header.subtitle {
            ctx.insert_raw("subtitle", paragraph("page-header-subtitle", subtitle));
        }
        if let Some(description) = &header.description {
            ctx.insert_raw("description", paragraph("page-header-description", description));
        }

        Ok(PAGE_HEADER.render(&ctx)?)
    }
}

pub(crate) fn span(class: &str, text: &str) -> String {
    format!(
        r#"<span class="{class}">{}</span>"#,
        html_escape::encode_text(text)
    )
}

pub(crate) fn paragraph(class: &str, text: &str) -> String {
    format!(
        r#"<p class="{class}">{}</p>"#,
        html_escape::encode_text(text)
    )
}

pub(crate) fn anchor(class: &str, href: &str, text: &str) -> String {
    format!(
        r#"<a class="{class}" href="{}">{}</a>"#,
        html_escape::encode_double_quoted_attribute(href),
        html_escape::encode_text(text)
    )
}

#[cfg(test)]
mod tests {
    use smileworks_core::block::BlockType;
    use smileworks_core::page::Auxiliary;

    use super::*;

    fn render(handler: &dyn BlockHandler, value: serde_json::Value, tag: BlockType) -> String {
        let content = BlockContent::from_value(tag, value).expect("decode");
        let aux = Auxiliary::default();
        handler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render")
    }

    #[test]
    fn test_hero_renders_headline_and_ctas() {
        let html = render(
            &HeroHandler,
            serde_json::json!({
                "id": 1,
                "headline_line1": "เบามือ",
                "headline_line2": "อย่างโปร",
                "primary_cta_text": "จองคิวออนไลน์",
                "primary_cta_link": "/contact",
            }),
            BlockType::Hero,
        );
        assert!(html.contains("เบามือ"));
        assert!(html.contains(r#"href="/contact""#));
    }

    #[test]
    fn test_hero_without_headline_renders_nothing() {
        let html = render(
            &HeroHandler,
            serde_json::json!({"id": 1, "badge_text": "orphan badge"}),
            BlockType::Hero,
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_page_header_requires_title() {
        let html = render(
            &PageHeaderHandler,
            serde_json::json!({"id": 1, "subtitle": "no title"}),
            BlockType::PageHeader,
        );
        assert!(html.is_empty());
    }
}
