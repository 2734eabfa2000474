//! Built-in block handlers, one per collection tag.

use smileworks_core::block::BlockType;

use crate::registry::HandlerRegistry;

pub mod clinic;
pub mod contact;
pub mod footer;
pub mod form;
pub mod hero;
pub mod listing;
pub mod services;
pub mod team;
pub mod text;

/// Register every built-in handler.
pub fn register_defaults(registry: &mut HandlerRegistry) {
    registry.register(BlockType::Hero, Box::new(hero::HeroHandler));
    registry.register(BlockType::PageHeader, Box::new(hero::PageHeaderHandler));
    registry.register(BlockType::Text, Box::new(text::TextHandler));
    registry.register(BlockType::AboutUs, Box::new(clinic::AboutUsHandler));
    registry.register(BlockType::WhyChooseUs, Box::new(clinic::WhyChooseUsHandler));
    registry.register(BlockType::SafetyBanner, Box::new(clinic::SafetyBannerHandler));
    registry.register(
        BlockType::SignatureTreatment,
        Box::new(clinic::SignatureTreatmentHandler),
    );
    registry.register(BlockType::Stats, Box::new(clinic::StatsHandler));
    registry.register(BlockType::Team, Box::new(team::TeamHandler));
    registry.register(BlockType::Services, Box::new(services::ServicesHandler));
    registry.register(
        BlockType::ServiceDetail,
        Box::new(services::ServiceDetailHandler),
    );
    registry.register(BlockType::Locations, Box::new(contact::LocationsHandler));
    registry.register(BlockType::Booking, Box::new(contact::BookingHandler));
    registry.register(BlockType::Contact, Box::new(contact::ContactHandler));
    registry.register(BlockType::Form, Box::new(form::FormHandler));
    registry.register(BlockType::Promotions, Box::new(listing::PromotionsHandler));
    registry.register(BlockType::Portfolio, Box::new(listing::PortfolioHandler));
    registry.register(
        BlockType::BlogListing,
        Box::new(listing::BlogListingHandler),
    );
    registry.register(
        BlockType::Testimonials,
        Box::new(listing::TestimonialsHandler),
    );
    registry.register(BlockType::Footer, Box::new(footer::FooterHandler));
    registry.register(BlockType::Features, Box::new(footer::FeaturesHandler));
    registry.register(BlockType::Pricing, Box::new(footer::PricingHandler));
}
