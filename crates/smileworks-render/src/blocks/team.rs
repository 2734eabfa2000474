//! Dentist team roster.

use smileworks_core::block::BlockContent;
use smileworks_core::content::Dentist;

use crate::Result;
use crate::blocks::hero::paragraph;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const TEAM: Template = Template::new(
    r#"<section class="team">
  <h2>{{ title }}</h2>
  {{ subtitle? }}
  <div class="team-grid">{{ members }}</div>
  {{ note? }}
</section>"#,
);

pub struct TeamHandler;

impl TeamHandler {
    fn member_card(dentist: &Dentist) -> String {
        let photo = dentist
            .photo_url
            .as_deref()
            .map(|url| {
                format!(
                    r#"<img src="{}" alt="{}">"#,
                    html_escape::encode_double_quoted_attribute(url),
                    html_escape::encode_double_quoted_attribute(&dentist.name),
                )
            })
            .unwrap_or_default();
        let nickname = dentist
            .nickname
            .as_deref()
            .map(|n| format!(r#"<span class="nickname">{}</span>"#, html_escape::encode_text(n)))
            .unwrap_or_default();
        let specialty = dentist
            .specialty
            .as_deref()
            .map(|s| paragraph("specialty", s))
            .unwrap_or_default();
        format!(
            r#"<div class="dentist-card">{photo}<h3>{}{nickname}</h3>{specialty}</div>"#,
            html_escape::encode_text(&dentist.name),
        )
    }
}

impl BlockHandler for TeamHandler {
    fn render(&self, content: &BlockContent, _ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Team(team) = content else {
            return Ok(String::new());
        };
        let Some(title) = &team.title else {
            return Ok(String::new());
        };

        // Unpublished roster entries stay in the CMS but never render.
        let members: String = team
            .dentists
            .iter()
            .filter(|dentist| dentist.status.as_deref() != Some("draft"))
            .map(Self::member_card)
            .collect();
        if members.is_empty() {
            return Ok(String::new());
        }

        let mut ctx = TemplateContext::new()
            .with_var("title", title)
            .with_raw("members", members);
        if let Some(subtitle) = &team.subtitle {
            ctx.insert_raw("subtitle", paragraph("section-subtitle", subtitle));
        }
        if let Some(note) = &team.note {
            ctx.insert_raw("note", paragraph("team-note", note));
        }

        Ok(TEAM.render(&ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use smileworks_core::block::BlockType;
    use smileworks_core::page::Auxiliary;

    use super::*;

    #[test]
    fn test_team_renders_members_in_junction_sort_order() {
        let content = BlockContent::from_value(
            BlockType::Team,
            serde_json::json!({
                "id": 1,
                "title": "ทีมทันตแพทย์",
                "dentists": [
                    {"sort": 2, "dentist_id": {"id": "b", "name": "Dr. Beam", "specialty": "Orthodontics"}},
                    {"sort": 1, "dentist_id": {"id": "a", "name": "Dr. Aim", "nickname": "หมอเอม"}},
                ],
            }),
        )
        .expect("decode");

        let aux = Auxiliary::default();
        let html = TeamHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");

        let aim = html.find("Dr. Aim").expect("Dr. Aim rendered");
        let beam = html.find("Dr. Beam").expect("Dr. Beam rendered");
        assert!(aim < beam);
        assert!(html.contains("หมอเอม"));
    }

    #[test]
    fn test_team_skips_draft_members() {
        let content = BlockContent::from_value(
            BlockType::Team,
            serde_json::json!({
                "id": 1,
                "title": "ทีมทันตแพทย์",
                "dentists": [
                    {"dentist_id": {"id": "a", "name": "Dr. Active", "status": "published"}},
                    {"dentist_id": {"id": "b", "name": "Dr. Hidden", "status": "draft"}},
                ],
            }),
        )
        .expect("decode");

        let aux = Auxiliary::default();
        let html = TeamHandler
            .render(&content, &RenderContext { block_id: 1, aux: &aux })
            .expect("render");

        assert!(html.contains("Dr. Active"));
        assert!(!html.contains("Dr. Hidden"));
    }
}
