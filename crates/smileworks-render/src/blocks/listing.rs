//! Listing shells: promotions, portfolio, blog, and testimonials.
//!
//! These sections render their heading copy and a mount point; the card
//! grids below them are populated from the catalog collections by the
//! dedicated routes.

use smileworks_core::block::BlockContent;

use crate::Result;
use crate::blocks::hero::paragraph;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const LISTING: Template = Template::new(
    r#"<section class="{{ class }}">
  <h2>{{ headline }}</h2>
  {{ subtitle? }}
  {{ description? }}
  {{ extras? }}
  <div class="{{ class }}-grid"></div>
</section>"#,
);

fn render_listing(
    class: &str,
    headline: Option<&str>,
    subtitle: Option<&str>,
    description: Option<&str>,
    extras: Option<String>,
) -> Result<String> {
    let Some(headline) = headline else {
        return Ok(String::new());
    };

    let mut ctx = TemplateContext::new()
        .with_var("class", class)
        .with_var("headline", headline);
    if let Some(subtitle) = subtitle {
        ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
    }
    if let Some(description) = description {
        ctx.insert_raw("description", paragraph("section-description", description));
    }
    if let Some(extras) = extras {
        ctx.insert_raw("extras", extras);
    }

    Ok(LISTING.render(&ctx)?)
}

pub struct PromotionsHandler;

impl BlockHandler for PromotionsHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Promotions(promotions) = content else {
            return Ok(String::new());
        };

        let countdown = match (promotions.show_countdown, &promotions.countdown_date) {
            (true, Some(date)) => Some(format!(
                r#"<div class="countdown" data-until="{}">{}</div>"#,
                html_escape::encode_double_quoted_attribute(date),
                html_escape::encode_text(
                    promotions.countdown_label.as_deref().unwrap_or("สิ้นสุดใน")
                ),
            )),
            _ => None,
        };

        render_listing(
            "promotions",
            promotions.headline.as_deref(),
            promotions.subtitle.as_deref(),
            None,
            countdown,
        )
    }
}

pub struct PortfolioHandler;

impl BlockHandler for PortfolioHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Portfolio(portfolio) = content else {
            return Ok(String::new());
        };
        render_listing(
            "portfolio",
            portfolio.headline.as_deref(),
            portfolio.subtitle.as_deref(),
            portfolio.description.as_deref(),
            None,
        )
    }
}

pub struct BlogListingHandler;

impl BlockHandler for BlogListingHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::BlogListing(blog) = content else {
            return Ok(String::new());
        };

        let search = blog.show_search.then(|| {
            r#"<form class="blog-search" method="get"><input type="search" name="q"></form>"#
                .to_string()
        });

        render_listing(
            "blog-listing",
            blog.headline.as_deref(),
            blog.subtitle.as_deref(),
            blog.description.as_deref(),
            search,
        )
    }
}

pub struct TestimonialsHandler;

impl BlockHandler for TestimonialsHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Testimonials(testimonials) = content else {
            return Ok(String::new());
        };
        let headline = testimonials
            .title
            .as_deref()
            .or(testimonials.section_title.as_deref());

        let quotes: String = testimonials
            .testimonials
            .iter()
            .filter_map(|entry| {
                let quote = entry.get("quote")?.as_str()?;
                let author = entry
                    .get("author_name")
                    .and_then(|a| a.as_str())
                    .unwrap_or("");
                Some(format!(
                    r#"<blockquote><p>{}</p><cite>{}</cite></blockquote>"#,
                    html_escape::encode_text(quote),
                    html_escape::encode_text(author),
                ))
            })
            .collect();

        render_listing(
            "testimonials",
            headline,
            testimonials
                .subtitle
                .as_deref()
                .or(testimonials.section_description.as_deref()),
            None,
            (!quotes.is_empty()).then_some(quotes),
        )
    }
}

/// Promotion cards for the dedicated promotions route.
#[must_use]
pub fn promotion_cards(promotions: &[smileworks_core::catalog::Promotion]) -> String {
    promotions
        .iter()
        .map(|promotion| {
            let price = match (&promotion.original_price, &promotion.discounted_price) {
                (Some(original), Some(discounted)) => format!(
                    r#"<p class="price"><s>{}</s> {}</p>"#,
                    html_escape::encode_text(original),
                    html_escape::encode_text(discounted),
                ),
                (_, Some(discounted)) => format!(
                    r#"<p class="price">{}</p>"#,
                    html_escape::encode_text(discounted)
                ),
                _ => String::new(),
            };
            let description = promotion
                .short_description
                .as_deref()
                .map(|d| paragraph("promo-description", d))
                .unwrap_or_default();
            format!(
                r#"<div class="promo-card"><h3>{}</h3>{description}{price}</div>"#,
                html_escape::encode_text(&promotion.title),
            )
        })
        .collect()
}

/// Blog post cards for the dedicated blog route.
#[must_use]
pub fn blog_post_cards(posts: &[smileworks_core::catalog::BlogPost]) -> String {
    posts
        .iter()
        .map(|post| {
            let excerpt = post
                .excerpt
                .as_deref()
                .map(|e| paragraph("post-excerpt", e))
                .unwrap_or_default();
            let date = post
                .published_date
                .as_deref()
                .map(|d| format!(r#"<time>{}</time>"#, html_escape::encode_text(d)))
                .unwrap_or_default();
            format!(
                r#"<article class="post-card"><h3><a href="/blog/{}">{}</a></h3>{date}{excerpt}</article>"#,
                html_escape::encode_double_quoted_attribute(&post.slug),
                html_escape::encode_text(&post.title),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use smileworks_core::block::BlockType;
    use smileworks_core::page::Auxiliary;

    use super::*;

    fn render(handler: &dyn BlockHandler, tag: BlockType, value: serde_json::Value) -> String {
        let content = BlockContent::from_value(tag, value).expect("decode");
        let aux = Auxiliary::default();
        handler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render")
    }

    #[test]
    fn test_promotions_renders_countdown_when_enabled() {
        let html = render(
            &PromotionsHandler,
            BlockType::Promotions,
            serde_json::json!({
                "id": 1,
                "headline": "โปรโมชั่นประจำเดือน",
                "show_countdown": true,
                "countdown_date": "2026-09-01",
            }),
        );
        assert!(html.contains(r#"data-until="2026-09-01""#));
    }

    #[test]
    fn test_blog_listing_search_toggle() {
        let with_search = render(
            &BlogListingHandler,
            BlockType::BlogListing,
            serde_json::json!({"id": 1, "headline": "บทความ", "show_search": true}),
        );
        assert!(with_search.contains("blog-search"));

        let without = render(
            &BlogListingHandler,
            BlockType::BlogListing,
            serde_json::json!({"id": 1, "headline": "บทความ"}),
        );
        assert!(!without.contains("blog-search"));
    }

    #[test]
    fn test_testimonials_render_quotes() {
        let html = render(
            &TestimonialsHandler,
            BlockType::Testimonials,
            serde_json::json!({
                "id": 1,
                "title": "รีวิวจากคนไข้",
                "testimonials": [
                    {"quote": "หมอเบามือมาก", "author_name": "คุณนก"},
                ],
            }),
        );
        assert!(html.contains("หมอเบามือมาก"));
        assert!(html.contains("คุณนก"));
    }
}
