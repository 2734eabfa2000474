//! Contact, booking, and locations sections.
//!
//! The contact handler is one of the two auxiliary-data consumers: it folds
//! the page's shared locations payload into its own card layout.

use smileworks_core::block::BlockContent;
use smileworks_core::content::LocationsContent;

use crate::Result;
use crate::blocks::hero::paragraph;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const LOCATIONS: Template = Template::new(
    r#"<section class="locations">
  {{ heading? }}
  <div class="branch-card">
    <h3>{{ branch_name }}{{ branch_tag? }}</h3>
    {{ address? }}
    {{ hours? }}
    {{ phone? }}
    {{ map? }}
  </div>
</section>"#,
);

fn branch_card_context(locations: &LocationsContent) -> Option<TemplateContext> {
    let branch_name = locations.branch_name.as_deref()?;
    let mut ctx = TemplateContext::new().with_var("branch_name", branch_name);

    if let Some(tag) = &locations.branch_tag {
        ctx.insert_raw(
            "branch_tag",
            format!(
                r#" <span class="branch-tag">{}</span>"#,
                html_escape::encode_text(tag)
            ),
        );
    }
    if let Some(address) = &locations.branch_address {
        ctx.insert_raw("address", paragraph("branch-address", address));
    }
    if let Some(hours) = &locations.branch_hours {
        ctx.insert_raw("hours", paragraph("branch-hours", hours));
    }
    if let Some(phone) = &locations.branch_phone {
        ctx.insert_raw("phone", paragraph("branch-phone", phone));
    }
    if let Some(map) = &locations.map_embed_url {
        ctx.insert_raw(
            "map",
            format!(
                r#"<iframe class="branch-map" src="{}" loading="lazy"></iframe>"#,
                html_escape::encode_double_quoted_attribute(map)
            ),
        );
    }
    Some(ctx)
}

pub struct LocationsHandler;

impl BlockHandler for LocationsHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Locations(locations) = content else {
            return Ok(String::new());
        };
        let Some(mut ctx) = branch_card_context(locations) else {
            return Ok(String::new());
        };

        if let Some(title) = &locations.section_title {
            let subtitle = locations
                .section_subtitle
                .as_deref()
                .map(|s| paragraph("section-subtitle", s))
                .unwrap_or_default();
            ctx.insert_raw(
                "heading",
                format!("<h2>{}</h2>{subtitle}", html_escape::encode_text(title)),
            );
        }

        Ok(LOCATIONS.render(&ctx)?)
    }
}

const BOOKING: Template = Template::new(
    r#"<section class="booking">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <div class="booking-channels">
    {{ phone? }}
    {{ line? }}
    {{ hours? }}
  </div>
</section>"#,
);

pub struct BookingHandler;

impl BlockHandler for BookingHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Booking(booking) = content else {
            return Ok(String::new());
        };
        let Some(title) = &booking.title else {
            return Ok(String::new());
        };

        let mut ctx = TemplateContext::new().with_var("title", title);
        if let Some(subtitle) = &booking.subtitle {
            ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }
        if let Some(number) = &booking.phone_number {
            ctx.insert_raw(
                "phone",
                channel(booking.phone_label.as_deref().unwrap_or("Call Center"), number),
            );
        }
        if let Some(handle) = &booking.line_handle {
            ctx.insert_raw(
                "line",
                channel(booking.line_label.as_deref().unwrap_or("LINE Official"), handle),
            );
        }
        if let Some(value) = &booking.hours_value {
            ctx.insert_raw(
                "hours",
                channel(booking.hours_label.as_deref().unwrap_or("เวลาทำการ"), value),
            );
        }

        Ok(BOOKING.render(&ctx)?)
    }
}

const CONTACT: Template = Template::new(
    r#"<section class="contact">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <div class="contact-channels">
    {{ phone? }}
    {{ line? }}
    {{ facebook? }}
    {{ email? }}
  </div>
  {{ map? }}
  {{ branch? }}
</section>"#,
);

pub struct ContactHandler;

impl BlockHandler for ContactHandler {
    fn render(&self, content: &BlockContent, ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Contact(contact) = content else {
            return Ok(String::new());
        };

        let title = contact.title.as_deref().unwrap_or("ติดต่อ & นัดหมาย");
        let mut tctx = TemplateContext::new().with_var("title", title);

        if let Some(subtitle) = &contact.subtitle {
            tctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }
        if let Some(number) = &contact.phone_number {
            tctx.insert_raw("phone", channel_with_note("โทร", number, &contact.phone_hours));
        }
        if let Some(handle) = &contact.line_handle {
            tctx.insert_raw(
                "line",
                channel_with_note("LINE", handle, &contact.line_response_time),
            );
        }
        if let Some(page) = &contact.facebook_page {
            tctx.insert_raw(
                "facebook",
                channel_with_note("Facebook", page, &contact.facebook_description),
            );
        }
        if let Some(address) = &contact.email_address {
            tctx.insert_raw(
                "email",
                channel_with_note("Email", address, &contact.email_response_time),
            );
        }
        if let Some(map) = &contact.map_embed_url {
            tctx.insert_raw(
                "map",
                format!(
                    r#"<iframe class="contact-map" src="{}" loading="lazy"></iframe>"#,
                    html_escape::encode_double_quoted_attribute(map)
                ),
            );
        }

        // Shared locations payload from the page, when present.
        if let Some(locations) = &ctx.aux.locations {
            if let Some(branch_ctx) = branch_card_context(locations) {
                tctx.insert_raw("branch", LOCATIONS.render(&branch_ctx)?);
            }
        }

        Ok(CONTACT.render(&tctx)?)
    }
}

fn channel(label: &str, value: &str) -> String {
    format!(
        r#"<div class="channel"><span class="channel-label">{}</span><span class="channel-value">{}</span></div>"#,
        html_escape::encode_text(label),
        html_escape::encode_text(value),
    )
}

fn channel_with_note(label: &str, value: &str, note: &Option<String>) -> String {
    let note = note
        .as_deref()
        .map(|n| format!(r#"<span class="channel-note">{}</span>"#, html_escape::encode_text(n)))
        .unwrap_or_default();
    format!(
        r#"<div class="channel"><span class="channel-label">{}</span><span class="channel-value">{}</span>{note}</div>"#,
        html_escape::encode_text(label),
        html_escape::encode_text(value),
    )
}

#[cfg(test)]
mod tests {
    use smileworks_core::block::BlockType;
    use smileworks_core::page::Auxiliary;

    use super::*;

    #[test]
    fn test_locations_requires_branch_name() {
        let content = BlockContent::from_value(
            BlockType::Locations,
            serde_json::json!({"id": 1, "section_title": "สาขาของเรา"}),
        )
        .expect("decode");
        let aux = Auxiliary::default();
        let html = LocationsHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");
        assert!(html.is_empty());
    }

    #[test]
    fn test_booking_channels() {
        let content = BlockContent::from_value(
            BlockType::Booking,
            serde_json::json!({
                "id": 1,
                "title": "จองคิว",
                "phone_number": "096 915 9391",
                "line_handle": "@BAOMUE",
            }),
        )
        .expect("decode");
        let aux = Auxiliary::default();
        let html = BookingHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");
        assert!(html.contains("096 915 9391"));
        assert!(html.contains("@BAOMUE"));
    }

    #[test]
    fn test_contact_renders_without_locations() {
        let content = BlockContent::from_value(
            BlockType::Contact,
            serde_json::json!({"id": 1, "phone_number": "02 000 0000"}),
        )
        .expect("decode");
        let aux = Auxiliary::default();
        let html = ContactHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");
        assert!(html.contains("02 000 0000"));
        assert!(!html.contains("branch-card"));
    }
}
