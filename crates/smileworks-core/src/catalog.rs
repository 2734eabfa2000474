//! Catalog records backing the dedicated routes: services, promotions,
//! blog posts, portfolio cases, navigation, and global settings.

use serde::{Deserialize, Serialize};

use crate::content::{de_expanded, de_null_vec, de_ref_id};
use crate::page::PublishStatus;

/// Site-wide settings singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub id: i64,
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub logo: Option<String>,
    pub favicon: Option<String>,
}

/// Page reference carried by a navigation item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavPageRef {
    pub id: i64,
    pub slug: String,
}

/// One navigation entry; top-level items may carry children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default, deserialize_with = "de_expanded")]
    pub page: Option<NavPageRef>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// The href this item should link to.
    ///
    /// External URLs win over page links; the `home` slug maps to the site
    /// root; items with neither fall back to `#`.
    #[must_use]
    pub fn href(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        if let Some(page) = &self.page {
            if page.slug == "home" {
                return "/".to_string();
            }
            return format!("/{}", page.slug);
        }
        "#".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon_name: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHighlight {
    pub title: String,
    pub description: Option<String>,
}

/// A clinic service; the structured detail sections are stored as JSON
/// fields in the CMS and kept opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "de_expanded")]
    pub category: Option<ServiceCategory>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub duration_label: Option<String>,
    pub price_from: Option<String>,
    pub price_starting_from: Option<String>,
    pub hero_image: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub highlights: Vec<ServiceHighlight>,
    #[serde(default)]
    pub features: Option<serde_json::Value>,
    #[serde(default)]
    pub process_steps: Option<serde_json::Value>,
    #[serde(default)]
    pub results: Option<serde_json::Value>,
    #[serde(default)]
    pub care_instructions: Option<serde_json::Value>,
    #[serde(default)]
    pub pricing_plans: Option<serde_json::Value>,
    #[serde(default)]
    pub faqs: Option<serde_json::Value>,
    pub stats_cases: Option<String>,
    pub stats_rating: Option<f64>,
    pub cta_booking_text: Option<String>,
    pub cta_booking_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "de_expanded")]
    pub category: Option<PromotionCategory>,
    pub featured_image: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub discount_percentage: Option<i64>,
    pub original_price: Option<String>,
    pub discounted_price: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    #[serde(default)]
    pub countdown_enabled: bool,
    pub countdown_date: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "de_ref_id")]
    pub category: Option<i64>,
    pub featured_image: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub author_avatar: Option<String>,
    pub published_date: Option<String>,
    pub reading_time: Option<i64>,
    pub views: Option<i64>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub tags: Vec<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioCase {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "de_expanded")]
    pub category: Option<PortfolioCategory>,
    pub image_before: Option<String>,
    pub image_after: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub duration: Option<String>,
    pub treatment_type: Option<String>,
    pub client_name: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_href_prefers_external_url() {
        let item: NavigationItem = serde_json::from_str(
            r#"{"id": 1, "title": "Blog", "url": "https://blog.example.com",
                "page": {"id": 2, "slug": "blog"}}"#,
        )
        .expect("decode");
        assert_eq!(item.href(), "https://blog.example.com");
    }

    #[test]
    fn test_navigation_href_maps_home_to_root() {
        let item: NavigationItem = serde_json::from_str(
            r#"{"id": 1, "title": "Home", "page": {"id": 2, "slug": "home"}}"#,
        )
        .expect("decode");
        assert_eq!(item.href(), "/");
    }

    #[test]
    fn test_navigation_href_falls_back_to_hash() {
        let item: NavigationItem =
            serde_json::from_str(r#"{"id": 1, "title": "Dangling"}"#).expect("decode");
        assert_eq!(item.href(), "#");
    }

    #[test]
    fn test_blog_post_category_accepts_raw_key() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id": 1, "title": "Whitening 101", "slug": "whitening-101", "category": 5}"#,
        )
        .expect("decode");
        assert_eq!(post.category, Some(5));
    }

    #[test]
    fn test_service_decodes_with_expanded_category() {
        let service: Service = serde_json::from_str(
            r#"{"id": 3, "name": "Veneers", "slug": "veneers", "status": "published",
                "category": {"id": 1, "name": "Cosmetic", "slug": "cosmetic"}}"#,
        )
        .expect("decode");
        assert_eq!(
            service.category.as_ref().map(|c| c.slug.as_str()),
            Some("cosmetic")
        );
    }
}
