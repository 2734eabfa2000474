//! Clinic story sections: about, why-choose-us, safety banner, signature
//! treatment, and the stats strip.

use smileworks_core::block::BlockContent;
use smileworks_core::content::{SignatureTreatmentContent, WhyChooseUsContent};

use crate::Result;
use crate::blocks::hero::paragraph;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const ABOUT_US: Template = Template::new(
    r#"<section class="about-us">
  <div class="about-copy">
    <h2>{{ headline }}</h2>
    {{ subtitle? }}
    {{ paragraphs? }}
  </div>
  {{ image? }}
</section>"#,
);

pub struct AboutUsHandler;

impl BlockHandler for AboutUsHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::AboutUs(about) = content else {
            return Ok(String::new());
        };
        let Some(headline) = &about.headline else {
            return Ok(String::new());
        };

        let paragraphs: String = [&about.paragraph_1, &about.paragraph_2, &about.paragraph_3]
            .into_iter()
            .flatten()
            .map(|text| paragraph("about-paragraph", text))
            .collect();

        let mut ctx = TemplateContext::new().with_var("headline", headline);
        if let Some(subtitle) = &about.subtitle {
            ctx.insert_raw("subtitle", paragraph("about-subtitle", subtitle));
        }
        if !paragraphs.is_empty() {
            ctx.insert_raw("paragraphs", paragraphs);
        }
        if let Some(image) = &about.image_url {
            ctx.insert_raw(
                "image",
                format!(
                    r#"<img class="about-image" src="{}" alt="">"#,
                    html_escape::encode_double_quoted_attribute(image)
                ),
            );
        }

        Ok(ABOUT_US.render(&ctx)?)
    }
}

const WHY_CHOOSE_US: Template = Template::new(
    r#"<section class="why-choose-us">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <div class="points">{{ points }}</div>
</section>"#,
);

pub struct WhyChooseUsHandler;

impl WhyChooseUsHandler {
    fn points(content: &WhyChooseUsContent) -> String {
        let pairs = [
            (&content.point_1_title, &content.point_1_text),
            (&content.point_2_title, &content.point_2_text),
            (&content.point_3_title, &content.point_3_text),
            (&content.point_4_title, &content.point_4_text),
        ];
        pairs
            .into_iter()
            .filter_map(|(title, text)| {
                let title = title.as_deref()?;
                Some(format!(
                    r#"<div class="point"><h3>{}</h3>{}</div>"#,
                    html_escape::encode_text(title),
                    text.as_deref()
                        .map(|t| paragraph("point-text", t))
                        .unwrap_or_default()
                ))
            })
            .collect()
    }
}

impl BlockHandler for WhyChooseUsHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::WhyChooseUs(why) = content else {
            return Ok(String::new());
        };
        let Some(title) = &why.title else {
            return Ok(String::new());
        };
        let points = Self::points(why);
        if points.is_empty() {
            return Ok(String::new());
        }

        let mut ctx = TemplateContext::new()
            .with_var("title", title)
            .with_raw("points", points);
        if let Some(subtitle) = &why.subtitle {
            ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }

        Ok(WHY_CHOOSE_US.render(&ctx)?)
    }
}

const SAFETY_BANNER: Template = Template::new(
    r#"<section class="safety-banner">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <ul class="safety-points">{{ points? }}</ul>
</section>"#,
);

pub struct SafetyBannerHandler;

impl BlockHandler for SafetyBannerHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::SafetyBanner(banner) = content else {
            return Ok(String::new());
        };
        let Some(title) = &banner.title else {
            return Ok(String::new());
        };

        let points: String = banner
            .points
            .iter()
            .map(|point| format!("<li>{}</li>", html_escape::encode_text(&point.label)))
            .collect();

        let mut ctx = TemplateContext::new().with_var("title", title);
        if let Some(subtitle) = &banner.subtitle {
            ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }
        if !points.is_empty() {
            ctx.insert_raw("points", points);
        }

        Ok(SAFETY_BANNER.render(&ctx)?)
    }
}

const SIGNATURE_TREATMENT: Template = Template::new(
    r#"<section class="signature-treatment">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <ol class="treatment-steps">{{ steps? }}</ol>
  <div class="treatment-stats">{{ stats? }}</div>
  {{ price? }}
  <div class="treatment-progress">{{ progress? }}</div>
</section>"#,
);

pub struct SignatureTreatmentHandler;

impl SignatureTreatmentHandler {
    fn progress_images(content: &SignatureTreatmentContent) -> String {
        [
            ("Before", &content.before_image_url),
            ("3 months", &content.month3_image_url),
            ("6 months", &content.month6_image_url),
            ("After", &content.after_image_url),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            let url = url.as_deref()?;
            Some(format!(
                r#"<figure><img src="{}" alt="{label}"><figcaption>{label}</figcaption></figure>"#,
                html_escape::encode_double_quoted_attribute(url)
            ))
        })
        .collect()
    }
}

impl BlockHandler for SignatureTreatmentHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::SignatureTreatment(treatment) = content else {
            return Ok(String::new());
        };
        let Some(title) = &treatment.title else {
            return Ok(String::new());
        };

        let steps: String = treatment
            .steps
            .iter()
            .map(|step| {
                format!(
                    "<li><strong>{}</strong>{}</li>",
                    html_escape::encode_text(&step.title),
                    step.description
                        .as_deref()
                        .map(|d| paragraph("step-description", d))
                        .unwrap_or_default()
                )
            })
            .collect();

        let stats: String = [
            (&treatment.stat_1_label, &treatment.stat_1_value),
            (&treatment.stat_2_label, &treatment.stat_2_value),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            Some(format!(
                r#"<div class="stat"><span class="stat-value">{}</span><span class="stat-label">{}</span></div>"#,
                html_escape::encode_text(value.as_deref()?),
                html_escape::encode_text(label.as_deref()?),
            ))
        })
        .collect();

        let mut ctx = TemplateContext::new().with_var("title", title);
        if let Some(subtitle) = &treatment.subtitle {
            ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }
        if !steps.is_empty() {
            ctx.insert_raw("steps", steps);
        }
        if !stats.is_empty() {
            ctx.insert_raw("stats", stats);
        }
        if let Some(price) = &treatment.price_text {
            ctx.insert_raw("price", paragraph("treatment-price", price));
        }
        let progress = Self::progress_images(treatment);
        if !progress.is_empty() {
            ctx.insert_raw("progress", progress);
        }

        Ok(SIGNATURE_TREATMENT.render(&ctx)?)
    }
}

const STATS: Template = Template::new(
    r#"<section class="stats-strip" data-columns="{{ columns }}">{{ items }}</section>"#,
);

pub struct StatsHandler;

impl BlockHandler for StatsHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Stats(stats) = content else {
            return Ok(String::new());
        };
        if stats.stats.is_empty() {
            return Ok(String::new());
        }

        let show_icons = stats.show_icons.unwrap_or(true);
        let items: String = stats
            .stats
            .iter()
            .map(|item| {
                let icon = match (&item.icon, show_icons) {
                    (Some(icon), true) => format!(
                        r#"<span class="stat-icon" data-icon="{}"></span>"#,
                        html_escape::encode_double_quoted_attribute(icon)
                    ),
                    _ => String::new(),
                };
                format!(
                    r#"<div class="stat">{icon}<span class="stat-value">{}</span><span class="stat-label">{}</span></div>"#,
                    html_escape::encode_text(&item.value),
                    html_escape::encode_text(&item.label),
                )
            })
            .collect();

        let columns = stats.columns.unwrap_or(4).to_string();
        let ctx = TemplateContext::new()
            .with_var("columns", &columns)
            .with_raw("items", items);

        Ok(STATS.render(&ctx)?)
    }
}
