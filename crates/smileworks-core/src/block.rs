//! Block type tags and the content sum type.
//!
//! The set of valid tags is fixed and compiled in; adding a block type means
//! adding a tag here, a content shape in [`crate::content`], and a handler in
//! the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{
    AboutUsContent, BlogListingContent, BookingContent, ContactContent, FeaturesContent,
    FooterContent, FormContent, HeroContent, LocationsContent, PageHeaderContent,
    PortfolioContent, PricingContent, PromotionsContent, SafetyBannerContent,
    ServiceDetailContent, ServicesContent, SignatureTreatmentContent, StatsContent,
    TeamContent, TestimonialsContent, TextContent, WhyChooseUsContent,
};
use crate::error::{CoreError, Result};

macro_rules! block_types {
    ($(($variant:ident, $tag:literal, $content:ident)),+ $(,)?) => {
        /// Collection tag for a page block. Closed set of known variants.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum BlockType {
            $(
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl BlockType {
            /// All known block types, in declaration order.
            pub const ALL: &'static [BlockType] = &[$(BlockType::$variant),+];

            /// The CMS collection name for this tag.
            #[must_use]
            pub fn tag(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            /// Parse a CMS collection name, `None` for unknown tags.
            #[must_use]
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        /// Typed content for one block, tagged by collection.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub enum BlockContent {
            $($variant($content),)+
        }

        impl BlockContent {
            /// Decode a raw content record for the given collection tag.
            pub fn from_value(tag: BlockType, value: serde_json::Value) -> Result<Self> {
                match tag {
                    $(
                        BlockType::$variant => serde_json::from_value(value)
                            .map(Self::$variant)
                            .map_err(|e| CoreError::decode(tag.tag(), e)),
                    )+
                }
            }

            /// The collection tag of this content.
            #[must_use]
            pub fn tag(&self) -> BlockType {
                match self {
                    $(Self::$variant(_) => BlockType::$variant,)+
                }
            }
        }
    };
}

block_types! {
    (Hero, "block_hero", HeroContent),
    (Text, "block_text", TextContent),
    (AboutUs, "block_about_us", AboutUsContent),
    (WhyChooseUs, "block_why_choose_us", WhyChooseUsContent),
    (Team, "block_team", TeamContent),
    (SignatureTreatment, "block_signature_treatment", SignatureTreatmentContent),
    (SafetyBanner, "block_safety_banner", SafetyBannerContent),
    (Services, "block_services", ServicesContent),
    (Locations, "block_locations", LocationsContent),
    (Booking, "block_booking", BookingContent),
    (Contact, "block_contact", ContactContent),
    (Form, "block_form", FormContent),
    (Footer, "block_footer", FooterContent),
    (Features, "block_features", FeaturesContent),
    (Testimonials, "block_testimonials", TestimonialsContent),
    (Pricing, "block_pricing", PricingContent),
    (Promotions, "block_promotions", PromotionsContent),
    (Portfolio, "block_portfolio", PortfolioContent),
    (BlogListing, "block_blog_listing", BlogListingContent),
    (ServiceDetail, "block_service_detail", ServiceDetailContent),
    (Stats, "block_stats", StatsContent),
    (PageHeader, "block_page_header", PageHeaderContent),
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl BlockContent {
    /// Text content, if this is a `block_text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextContent> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Locations content, if this is a `block_locations`.
    #[must_use]
    pub fn as_locations(&self) -> Option<&LocationsContent> {
        match self {
            Self::Locations(locations) => Some(locations),
            _ => None,
        }
    }

    /// Form content, if this is a `block_form`.
    #[must_use]
    pub fn as_form(&self) -> Option<&FormContent> {
        match self {
            Self::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Contact content, if this is a `block_contact`.
    #[must_use]
    pub fn as_contact(&self) -> Option<&ContactContent> {
        match self {
            Self::Contact(contact) => Some(contact),
            _ => None,
        }
    }

    /// Promotions content, if this is a `block_promotions`.
    #[must_use]
    pub fn as_promotions(&self) -> Option<&PromotionsContent> {
        match self {
            Self::Promotions(promotions) => Some(promotions),
            _ => None,
        }
    }
}
