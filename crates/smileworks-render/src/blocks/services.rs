//! Services teaser grid and the embedded service-detail section.

use smileworks_core::block::BlockContent;

use crate::Result;
use crate::blocks::hero::{anchor, paragraph};
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const SERVICES: Template = Template::new(
    r#"<section class="services">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <div class="services-grid">{{ items }}</div>
</section>"#,
);

pub struct ServicesHandler;

impl BlockHandler for ServicesHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Services(services) = content else {
            return Ok(String::new());
        };
        let Some(title) = &services.title else {
            return Ok(String::new());
        };
        if services.services.is_empty() {
            return Ok(String::new());
        }

        let items: String = services
            .services
            .iter()
            .map(|item| {
                let icon = item
                    .icon_name
                    .as_deref()
                    .map(|icon| {
                        format!(
                            r#"<span class="service-icon" data-icon="{}"></span>"#,
                            html_escape::encode_double_quoted_attribute(icon)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    r#"<div class="service-card">{icon}<h3>{}</h3></div>"#,
                    html_escape::encode_text(&item.label)
                )
            })
            .collect();

        let mut ctx = TemplateContext::new()
            .with_var("title", title)
            .with_raw("items", items);
        if let Some(subtitle) = &services.subtitle {
            ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }

        Ok(SERVICES.render(&ctx)?)
    }
}

const SERVICE_DETAIL: Template = Template::new(
    r#"<section class="service-detail">
  {{ hero? }}
  {{ description? }}
  {{ highlights? }}
  {{ pricing? }}
  {{ booking? }}
</section>"#,
);

/// Renders the service embedded in a `block_service_detail`, honoring its
/// per-section visibility toggles.
pub struct ServiceDetailHandler;

impl BlockHandler for ServiceDetailHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::ServiceDetail(detail) = content else {
            return Ok(String::new());
        };
        let Some(service) = &detail.service else {
            return Ok(String::new());
        };

        let mut ctx = TemplateContext::new();

        if detail.show_hero.unwrap_or(true) {
            let price = service
                .price_starting_from
                .as_deref()
                .or(service.price_from.as_deref())
                .map(|price| {
                    format!(
                        r#"<span class="price-from">{}</span>"#,
                        html_escape::encode_text(price)
                    )
                })
                .unwrap_or_default();
            ctx.insert_raw(
                "hero",
                format!(
                    r#"<header class="service-hero"><h1>{}</h1>{price}</header>"#,
                    html_escape::encode_text(&service.name)
                ),
            );
        }

        if let Some(description) = &service.long_description {
            // CMS-authored rich text.
            ctx.insert_raw(
                "description",
                format!(r#"<div class="service-description">{description}</div>"#),
            );
        } else if let Some(short) = &service.short_description {
            ctx.insert_raw("description", paragraph("service-description", short));
        }

        if detail.show_features.unwrap_or(true) && !service.highlights.is_empty() {
            let highlights: String = service
                .highlights
                .iter()
                .map(|highlight| {
                    format!(
                        "<li><strong>{}</strong>{}</li>",
                        html_escape::encode_text(&highlight.title),
                        highlight
                            .description
                            .as_deref()
                            .map(|d| paragraph("highlight-text", d))
                            .unwrap_or_default()
                    )
                })
                .collect();
            ctx.insert_raw(
                "highlights",
                format!(r#"<ul class="service-highlights">{highlights}</ul>"#),
            );
        }

        if detail.show_pricing.unwrap_or(true) {
            if let Some(duration) = &service.duration_label {
                ctx.insert_raw("pricing", paragraph("service-duration", duration));
            }
        }

        if detail.show_booking.unwrap_or(true) {
            let text = service.cta_booking_text.as_deref().unwrap_or("จองคิวออนไลน์");
            let href = service.cta_booking_link.as_deref().unwrap_or("/contact");
            ctx.insert_raw("booking", anchor("btn btn-primary", href, text));
        }

        Ok(SERVICE_DETAIL.render(&ctx)?)
    }
}

/// Service catalog cards for the dedicated services route.
#[must_use]
pub fn service_cards(services: &[smileworks_core::catalog::Service]) -> String {
    services
        .iter()
        .map(|service| {
            let description = service
                .short_description
                .as_deref()
                .map(|d| paragraph("service-description", d))
                .unwrap_or_default();
            let price = service
                .price_from
                .as_deref()
                .map(|p| {
                    format!(
                        r#"<span class="price-from">{}</span>"#,
                        html_escape::encode_text(p)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="service-card"><h3><a href="/services/{}">{}</a></h3>{description}{price}</div>"#,
                html_escape::encode_double_quoted_attribute(&service.slug),
                html_escape::encode_text(&service.name),
            )
        })
        .collect()
}
