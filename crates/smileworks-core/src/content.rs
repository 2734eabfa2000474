//! Content record shapes, one per block collection.
//!
//! Every record is a flat struct of optional display fields as stored in the
//! CMS. Two collections carry nested data: `block_team` expands a
//! many-to-many dentist relation, and `block_service_detail` embeds a full
//! service record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::Service;

/// Reference to a CMS-managed file: either a bare id or an expanded object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRef {
    Id(String),
    Object { id: String },
}

impl FileRef {
    /// The file id regardless of representation.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Object { id } => id,
        }
    }
}

/// Accept an expanded relation object, mapping bare ids and nulls to `None`.
///
/// The CMS returns either a nested object (when the query expanded the
/// relation) or the raw foreign key; only the expanded form is useful here.
pub(crate) fn de_expanded<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(v @ serde_json::Value::Object(_)) => {
            serde_json::from_value(v).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Accept a JSON array column, mapping explicit `null` to an empty list.
pub(crate) fn de_null_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a relation as either a raw numeric key or an object with `id`.
pub(crate) fn de_ref_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::Object(map)) => map.get("id").and_then(|id| id.as_i64()),
        _ => None,
    })
}

/// Hero section copy and calls to action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroContent {
    pub id: i64,
    pub badge_text: Option<String>,
    pub headline_line1: Option<String>,
    pub headline_line2: Option<String>,
    pub description: Option<String>,
    pub primary_cta_text: Option<String>,
    pub primary_cta_link: Option<String>,
    pub secondary_cta_text: Option<String>,
    pub secondary_cta_link: Option<String>,
    pub background_image: Option<String>,
}

/// Free-form rich text section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub alignment: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AboutUsContent {
    pub id: i64,
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub paragraph_1: Option<String>,
    pub paragraph_2: Option<String>,
    pub paragraph_3: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhyChooseUsContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub point_1_title: Option<String>,
    pub point_1_text: Option<String>,
    pub point_2_title: Option<String>,
    pub point_2_text: Option<String>,
    pub point_3_title: Option<String>,
    pub point_3_text: Option<String>,
    pub point_4_title: Option<String>,
    pub point_4_text: Option<String>,
}

/// One dentist from the team roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dentist {
    pub id: String,
    pub name: String,
    pub nickname: Option<String>,
    pub specialty: Option<String>,
    pub photo: Option<FileRef>,
    pub photo_url: Option<String>,
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Flatten the M2M junction rows into an ordered dentist roster.
fn de_dentists<'de, D>(deserializer: D) -> Result<Vec<Dentist>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Junction {
        dentist_id: Option<Dentist>,
        #[serde(default)]
        sort: Option<i64>,
    }

    let rows = Option::<Vec<Junction>>::deserialize(deserializer)?;
    let mut rows = rows.unwrap_or_default();
    rows.sort_by_key(|row| row.sort.unwrap_or(i64::MAX));
    Ok(rows.into_iter().filter_map(|row| row.dentist_id).collect())
}

/// Team roster with the dentist relation flattened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub note: Option<String>,
    #[serde(default, deserialize_with = "de_dentists")]
    pub dentists: Vec<Dentist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentStep {
    pub number: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureTreatmentContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub steps: Vec<TreatmentStep>,
    pub stat_1_label: Option<String>,
    pub stat_1_value: Option<String>,
    pub stat_2_label: Option<String>,
    pub stat_2_value: Option<String>,
    pub price_text: Option<String>,
    pub before_image_url: Option<String>,
    pub month3_image_url: Option<String>,
    pub month6_image_url: Option<String>,
    pub after_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelPoint {
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SafetyBannerContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub points: Vec<LabelPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub label: String,
    pub icon_name: Option<String>,
}

/// Services teaser grid (labels only; the full catalog lives elsewhere).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub services: Vec<ServiceItem>,
}

/// Clinic branch details; shared with the contact section when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationsContent {
    pub id: i64,
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    pub branch_name: Option<String>,
    pub branch_tag: Option<String>,
    pub branch_address: Option<String>,
    pub branch_hours: Option<String>,
    pub branch_phone: Option<String>,
    pub branch_image_url: Option<String>,
    pub map_embed_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub phone_label: Option<String>,
    pub phone_number: Option<String>,
    pub line_label: Option<String>,
    pub line_handle: Option<String>,
    pub hours_label: Option<String>,
    pub hours_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactContent {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub phone_number: Option<String>,
    pub phone_hours: Option<String>,
    pub line_handle: Option<String>,
    pub line_response_time: Option<String>,
    pub facebook_page: Option<String>,
    pub facebook_description: Option<String>,
    pub email_address: Option<String>,
    pub email_response_time: Option<String>,
    pub map_embed_url: Option<String>,
    pub map_address: Option<String>,
    pub map_link_text: Option<String>,
}

/// Form section pointing at a form definition by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormContent {
    pub id: i64,
    #[serde(default, deserialize_with = "de_ref_id")]
    pub form: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub background_style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkItem {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterData {
    pub site_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub product_links: Vec<LinkItem>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub company_links: Vec<LinkItem>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub legal_links: Vec<LinkItem>,
    pub copyright: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterContent {
    pub id: i64,
    pub content: Option<FooterData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesContent {
    pub id: i64,
    pub section_title: Option<String>,
    pub section_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestimonialsContent {
    pub id: i64,
    pub section_title: Option<String>,
    pub section_description: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub testimonials: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingContent {
    pub id: i64,
    pub section_title: Option<String>,
    pub section_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionsContent {
    pub id: i64,
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub show_countdown: bool,
    pub countdown_date: Option<String>,
    pub countdown_label: Option<String>,
    #[serde(default)]
    pub show_category_filter: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioContent {
    pub id: i64,
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub show_category_filter: bool,
    pub cases_per_page: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListingContent {
    pub id: i64,
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub show_search: bool,
    #[serde(default)]
    pub show_category_filter: bool,
    #[serde(default)]
    pub show_featured_article: bool,
    pub articles_per_page: Option<i64>,
}

/// Embeds a full service record plus per-section visibility toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDetailContent {
    pub id: i64,
    #[serde(default, deserialize_with = "de_expanded")]
    pub service: Option<Service>,
    pub show_hero: Option<bool>,
    pub show_features: Option<bool>,
    pub show_process: Option<bool>,
    pub show_results_care: Option<bool>,
    pub show_pricing: Option<bool>,
    pub show_faq: Option<bool>,
    pub show_portfolio: Option<bool>,
    pub show_booking: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatItem {
    pub value: String,
    pub label: String,
    pub icon: Option<String>,
    pub icon_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsContent {
    pub id: i64,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub stats: Vec<StatItem>,
    pub columns: Option<u8>,
    pub show_icons: Option<bool>,
}

/// Simple header for inner pages, lighter than a hero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageHeaderContent {
    pub id: i64,
    pub badge_text: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ref_id_from_both_shapes() {
        let bare: FileRef = serde_json::from_str(r#""abc-123""#).expect("bare id");
        let object: FileRef = serde_json::from_str(r#"{"id": "abc-123"}"#).expect("object");
        assert_eq!(bare.id(), "abc-123");
        assert_eq!(object.id(), "abc-123");
    }

    #[test]
    fn test_team_content_flattens_junction() {
        let json = r#"{
            "id": 4,
            "title": "Our Dentists",
            "dentists": [
                {"sort": 2, "dentist_id": {"id": "b", "name": "Dr. B"}},
                {"sort": 1, "dentist_id": {"id": "a", "name": "Dr. A"}},
                {"sort": 3, "dentist_id": null}
            ]
        }"#;
        let team: TeamContent = serde_json::from_str(json).expect("decode team");
        let names: Vec<&str> = team.dentists.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. A", "Dr. B"]);
    }

    #[test]
    fn test_form_content_accepts_raw_and_expanded_reference() {
        let raw: FormContent =
            serde_json::from_str(r#"{"id": 1, "form": 9}"#).expect("raw ref");
        assert_eq!(raw.form, Some(9));

        let expanded: FormContent =
            serde_json::from_str(r#"{"id": 1, "form": {"id": 9, "name": "Contact"}}"#)
                .expect("expanded ref");
        assert_eq!(expanded.form, Some(9));

        let absent: FormContent = serde_json::from_str(r#"{"id": 1}"#).expect("absent ref");
        assert_eq!(absent.form, None);
    }

    #[test]
    fn test_service_detail_tolerates_unexpanded_relation() {
        let detail: ServiceDetailContent =
            serde_json::from_str(r#"{"id": 2, "service": 14}"#).expect("decode");
        assert!(detail.service.is_none());
    }
}
