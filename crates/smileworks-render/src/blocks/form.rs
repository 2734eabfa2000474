//! Form section, the second auxiliary-data consumer: the field list comes
//! from the form definition keyed by this block's id, not from the block's
//! own content record.

use smileworks_core::block::BlockContent;
use smileworks_core::form::{FieldType, Form, FormField};

use crate::Result;
use crate::blocks::hero::paragraph;
use crate::registry::{BlockHandler, RenderContext};
use crate::template::{Template, TemplateContext};

const FORM: Template = Template::new(
    r#"<section class="form-section" data-style="{{ style }}">
  {{ title? }}
  {{ description? }}
  <form method="post" action="/api/forms/submit" data-form-id="{{ form_id }}">
    {{ fields }}
    <button type="submit">{{ submit_text }}</button>
  </form>
</section>"#,
);

pub struct FormHandler;

impl FormHandler {
    fn field_html(field: &FormField) -> String {
        let label = html_escape::encode_text(&field.label);
        let required = if field.required { " required" } else { "" };
        let placeholder = field
            .placeholder
            .as_deref()
            .map(|p| {
                format!(
                    r#" placeholder="{}""#,
                    html_escape::encode_double_quoted_attribute(p)
                )
            })
            .unwrap_or_default();
        let name = format!("field_{}", field.id);

        let control = match field.field_type {
            FieldType::Textarea => {
                format!(r#"<textarea name="{name}"{placeholder}{required}></textarea>"#)
            }
            FieldType::Select => {
                let options: String = field
                    .options
                    .iter()
                    .map(|option| {
                        format!(
                            r#"<option value="{}">{}</option>"#,
                            html_escape::encode_double_quoted_attribute(&option.value),
                            html_escape::encode_text(&option.label),
                        )
                    })
                    .collect();
                format!(r#"<select name="{name}"{required}>{options}</select>"#)
            }
            FieldType::Checkbox => {
                format!(r#"<input type="checkbox" name="{name}"{required}>"#)
            }
            FieldType::Radio => {
                let options: String = field
                    .options
                    .iter()
                    .map(|option| {
                        format!(
                            r#"<label><input type="radio" name="{name}" value="{}">{}</label>"#,
                            html_escape::encode_double_quoted_attribute(&option.value),
                            html_escape::encode_text(&option.label),
                        )
                    })
                    .collect();
                format!(r#"<div class="radio-group">{options}</div>"#)
            }
            FieldType::File => format!(r#"<input type="file" name="{name}"{required}>"#),
            FieldType::Email => {
                format!(r#"<input type="email" name="{name}"{placeholder}{required}>"#)
            }
            FieldType::Text => {
                format!(r#"<input type="text" name="{name}"{placeholder}{required}>"#)
            }
        };

        format!(r#"<div class="form-field"><label>{label}</label>{control}</div>"#)
    }

    fn fields_html(form: &Form) -> String {
        let mut fields: Vec<&FormField> = form.fields.iter().collect();
        fields.sort_by_key(|field| field.sort.unwrap_or(i64::MAX));
        fields.iter().map(|field| Self::field_html(field)).collect()
    }
}

impl BlockHandler for FormHandler {
    fn render(&self, content: &BlockContent, ctx: &RenderContext<'_>) -> Result<String> {
        let BlockContent::Form(block) = content else {
            return Ok(String::new());
        };

        // No definition in the auxiliary map (lookup failed or the block
        // has no form reference): render nothing.
        let Some(form) = ctx.aux.forms.get(&ctx.block_id) else {
            return Ok(String::new());
        };

        let submit_text = form.submit_button_text.as_deref().unwrap_or("ส่งข้อมูล");
        let form_id = form.id.to_string();
        let mut tctx = TemplateContext::new()
            .with_var("style", block.background_style.as_deref().unwrap_or("white"))
            .with_var("form_id", &form_id)
            .with_var("submit_text", submit_text)
            .with_raw("fields", Self::fields_html(form));

        if let Some(title) = &block.title {
            tctx.insert_raw("title", format!("<h2>{}</h2>", html_escape::encode_text(title)));
        }
        if let Some(description) = &block.description {
            tctx.insert_raw("description", paragraph("form-description", description));
        }

        Ok(FORM.render(&tctx)?)
    }
}

#[cfg(test)]
mod tests {
    use smileworks_core::block::BlockType;
    use smileworks_core::page::Auxiliary;

    use super::*;

    fn booking_form() -> Form {
        serde_json::from_value(serde_json::json!({
            "id": 71,
            "name": "Booking",
            "slug": "booking",
            "submit_button_text": "จองเลย",
            "fields": [
                {"id": 2, "label": "Email", "field_type": "email", "sort": 2},
                {"id": 1, "label": "Name", "field_type": "text", "required": true, "sort": 1},
                {"id": 3, "label": "Details", "field_type": "textarea"},
            ],
        }))
        .expect("decode form")
    }

    #[test]
    fn test_form_fields_render_in_sort_order() {
        let mut aux = Auxiliary::default();
        aux.forms.insert(10, booking_form());

        let content = BlockContent::from_value(
            BlockType::Form,
            serde_json::json!({"id": 5, "form": 71, "title": "นัดหมายออนไลน์"}),
        )
        .expect("decode");

        let html = FormHandler
            .render(&content, &RenderContext { block_id: 10, aux: &aux })
            .expect("render");

        assert!(html.contains("จองเลย"));
        assert!(html.contains(r#"data-form-id="71""#));
        let name = html.find("Name").unwrap();
        let email = html.find("Email").unwrap();
        let details = html.find("Details").unwrap();
        assert!(name < email && email < details);
        assert!(html.contains("required"));
    }

    #[test]
    fn test_form_without_definition_renders_nothing() {
        let content = BlockContent::from_value(
            BlockType::Form,
            serde_json::json!({"id": 5, "form": 71}),
        )
        .expect("decode");
        let aux = Auxiliary::default();
        let html = FormHandler
            .render(&content, &RenderContext { block_id: 10, aux: &aux })
            .expect("render");
        assert!(html.is_empty());
    }
}
