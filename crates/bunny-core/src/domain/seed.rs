//! Seed records written when a website type is installed.
//!
//! Every type seeds its default pages. The content per type is one function
//! selected through [`SeedProfile`]; custom types use the generic set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::website_type::normalize_type_id;

/// One entity instance to persist: an entity name plus attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub entity: String,
    pub attributes: Map<String, Value>,
}

impl SeedRecord {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            attributes: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

fn page(title: &str, slug: &str, content: &str) -> SeedRecord {
    SeedRecord::new("page")
        .with("title", title)
        .with("slug", slug)
        .with("content", content)
}

/// Which default content a type seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedProfile {
    Ecommerce,
    Portfolio,
    Educational,
    Healthcare,
    Hospitality,
    RealEstate,
    Restaurant,
    Fitness,
    Generic,
}

impl SeedProfile {
    pub fn for_type(type_id: &str) -> Self {
        match normalize_type_id(type_id).as_str() {
            "ecommerce" => Self::Ecommerce,
            "portfolio" => Self::Portfolio,
            "educational" => Self::Educational,
            "healthcare" => Self::Healthcare,
            "hospitality" => Self::Hospitality,
            "real-estate" => Self::RealEstate,
            "restaurant" => Self::Restaurant,
            "fitness" => Self::Fitness,
            _ => Self::Generic,
        }
    }

    pub fn records(self) -> Vec<SeedRecord> {
        match self {
            Self::Ecommerce => ecommerce_pages(),
            Self::Portfolio => portfolio_pages(),
            Self::Educational => educational_pages(),
            Self::Healthcare => healthcare_pages(),
            Self::Hospitality => hospitality_pages(),
            Self::RealEstate => real_estate_pages(),
            Self::Restaurant => restaurant_pages(),
            Self::Fitness => fitness_pages(),
            Self::Generic => generic_pages(),
        }
    }
}

/// Default seed records for a type id.
pub fn default_records(type_id: &str) -> Vec<SeedRecord> {
    SeedProfile::for_type(type_id).records()
}

fn ecommerce_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our store..."),
        page("Shop", "shop", "Browse our products..."),
        page("Shipping & Returns", "shipping-returns", "How we ship and handle returns..."),
        page("FAQ", "faq", "Frequently asked questions..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn portfolio_pages() -> Vec<SeedRecord> {
    vec![
        page("About Me", "about-me", "Welcome to my portfolio..."),
        page("Projects", "projects", "Check out my work..."),
        page("Skills", "skills", "My expertise..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn educational_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our learning platform..."),
        page("Courses", "courses", "Browse our courses..."),
        page("Instructors", "instructors", "Meet our instructors..."),
        page("Admissions", "admissions", "How to enrol..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn healthcare_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our practice..."),
        page("Services", "services", "Our medical services..."),
        page("Doctors", "doctors", "Meet our doctors..."),
        page("Appointments", "appointments", "Book an appointment..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn hospitality_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our hotel..."),
        page("Rooms", "rooms", "Browse our rooms..."),
        page("Events", "events", "Host your events with us..."),
        page("Dining", "dining", "Experience our cuisine..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn real_estate_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our real estate platform..."),
        page("Properties", "properties", "Browse our property listings..."),
        page("Agents", "agents", "Meet our real estate agents..."),
        page("Market Analysis", "market-analysis", "Real estate market insights..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn restaurant_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our restaurant..."),
        page("Menu", "menu", "Explore our delicious menu..."),
        page("Reservations", "reservations", "Book your table..."),
        page("About Us", "about-us", "Our story and values..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn fitness_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome to our fitness center..."),
        page("Classes", "classes", "Browse our fitness classes..."),
        page("Trainers", "trainers", "Meet our expert trainers..."),
        page("Memberships", "memberships", "Choose your membership plan..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

fn generic_pages() -> Vec<SeedRecord> {
    vec![
        page("Home", "home", "Welcome..."),
        page("About", "about", "About us..."),
        page("Contact", "contact", "Get in touch..."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::website_type::BUILTIN_TYPES;

    #[test]
    fn every_builtin_has_its_own_profile() {
        for t in BUILTIN_TYPES {
            assert_ne!(SeedProfile::for_type(t.id), SeedProfile::Generic, "{}", t.id);
        }
        assert_eq!(SeedProfile::for_type("real_estate"), SeedProfile::RealEstate);
        assert_eq!(SeedProfile::for_type("pet-shop"), SeedProfile::Generic);
    }

    #[test]
    fn pages_have_title_slug_content() {
        for t in BUILTIN_TYPES {
            let records = default_records(t.id);
            assert!(!records.is_empty());
            for r in records {
                assert_eq!(r.entity, "page");
                for key in ["title", "slug", "content"] {
                    assert!(r.get(key).and_then(Value::as_str).is_some(), "{} {key}", t.id);
                }
            }
        }
    }

    #[test]
    fn portfolio_pages_match_expected_slugs() {
        let slugs: Vec<_> = default_records("portfolio")
            .into_iter()
            .filter_map(|r| r.get("slug").and_then(Value::as_str).map(str::to_owned))
            .collect();
        assert_eq!(slugs, vec!["about-me", "projects", "skills", "contact"]);
    }
}
