//! Footer plus the placeholder sections.

use smileworks_core::block::BlockContent;
use smileworks_core::content::LinkItem;

use crate::Result;
use crate::blocks::hero::paragraph;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const FOOTER: Template = Template::new(
    r#"<footer class="site-footer">
  <div class="footer-brand">
    <h3>{{ site_name }}</h3>
    {{ description? }}
  </div>
  {{ link_columns? }}
  {{ social? }}
  {{ copyright? }}
</footer>"#,
);

pub struct FooterHandler;

impl FooterHandler {
    fn link_column(title: &str, links: &[LinkItem]) -> String {
        if links.is_empty() {
            return String::new();
        }
        let items: String = links
            .iter()
            .map(|link| {
                format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    html_escape::encode_double_quoted_attribute(&link.href),
                    html_escape::encode_text(&link.text),
                )
            })
            .collect();
        format!(r#"<nav class="footer-links"><h4>{title}</h4><ul>{items}</ul></nav>"#)
    }
}

impl BlockHandler for FooterHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Footer(footer) = content else {
            return Ok(String::new());
        };
        let Some(data) = &footer.content else {
            return Ok(String::new());
        };
        let Some(site_name) = &data.site_name else {
            return Ok(String::new());
        };

        let mut ctx = TemplateContext::new().with_var("site_name", site_name);
        if let Some(description) = &data.description {
            ctx.insert_raw("description", paragraph("footer-description", description));
        }

        let columns = [
            Self::link_column("Services", &data.product_links),
            Self::link_column("Clinic", &data.company_links),
            Self::link_column("Legal", &data.legal_links),
        ]
        .concat();
        if !columns.is_empty() {
            ctx.insert_raw("link_columns", columns);
        }

        if !data.social_links.is_empty() {
            let social: String = data
                .social_links
                .iter()
                .map(|link| {
                    format!(
                        r#"<a class="social" data-platform="{}" href="{}"></a>"#,
                        html_escape::encode_double_quoted_attribute(&link.platform),
                        html_escape::encode_double_quoted_attribute(&link.href),
                    )
                })
                .collect();
            ctx.insert_raw("social", format!(r#"<div class="footer-social">{social}</div>"#));
        }

        if let Some(copyright) = &data.copyright {
            ctx.insert_raw("copyright", paragraph("footer-copyright", copyright));
        }

        Ok(FOOTER.render(&ctx)?)
    }
}

/// The features grid has no layout yet; rows exist in the backend but
/// render nothing.
pub struct FeaturesHandler;

impl BlockHandler for FeaturesHandler {
    fn render(&self, _content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        Ok(String::new())
    }
}

/// Same as [`FeaturesHandler`]: registered so the tag is not "unknown",
/// rendering nothing.
pub struct PricingHandler;

impl BlockHandler for PricingHandler {
    fn render(&self, _content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        Ok(String::new())
    }
}
