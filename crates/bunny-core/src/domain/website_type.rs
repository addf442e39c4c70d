//! Website-type descriptors and the registry that serves them.
//!
//! Built-in types live in a single static table, [`BUILTIN_TYPES`]. Adding a
//! type means adding one entry there and one seed function in
//! [`crate::domain::seed`]; nothing else matches on type ids.
//!
//! The registry is assembled once at startup (built-ins, then custom types
//! from configuration, then the enabled-types filter) and is read-only
//! afterwards.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::naming;

/// Fallback description for ids with no descriptor.
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Fallback icon for ids with no descriptor.
pub const FALLBACK_ICON: &str = "globe";

/// Fallback colour for ids with no descriptor.
pub const FALLBACK_COLOR: &str = "#607D8B";

/// Features a freshly generated custom type starts with.
pub const DEFAULT_FEATURES: &[&str] = &["auth", "media", "notifications", "seo"];

/// Dependencies a freshly generated custom type starts with.
pub const DEFAULT_DEPENDENCIES: &[&str] = &["auth", "media", "notifications"];

/// Settings written into a freshly generated per-type config.
pub const DEFAULT_SETTINGS: &[(&str, bool)] = &[
    ("enable_registration", true),
    ("enable_social_login", true),
    ("enable_analytics", true),
    ("enable_seo", true),
    ("enable_cache", true),
    ("enable_logging", true),
];

/// Static description of one built-in type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub features: &'static [&'static str],
    pub dependencies: &'static [&'static str],
}

const FULL_STACK_DEPENDENCIES: &[&str] = &[
    "auth",
    "roles",
    "media",
    "notifications",
    "payment",
    "calendar",
    "chat",
    "analytics",
];

/// Built-in website types, in display order.
pub static BUILTIN_TYPES: &[BuiltinType] = &[
    BuiltinType {
        id: "ecommerce",
        name: "E-commerce",
        description: "Online store with product management and payment processing",
        icon: "shopping-cart",
        color: "#4CAF50",
        features: &[
            "smart_cart",
            "product_management",
            "order_processing",
            "inventory_tracking",
            "customer_management",
            "marketing_tools",
            "analytics_dashboard",
            "payment_processing",
        ],
        dependencies: &[
            "auth",
            "roles",
            "media",
            "notifications",
            "payment",
            "shipping",
            "tax",
            "inventory",
        ],
    },
    BuiltinType {
        id: "portfolio",
        name: "Portfolio",
        description: "Personal or professional portfolio website",
        icon: "briefcase",
        color: "#2196F3",
        features: &[
            "project_showcase",
            "client_testimonials",
            "blog_integration",
            "contact_forms",
            "gallery_management",
            "resume_builder",
            "skills_showcase",
            "achievement_timeline",
        ],
        dependencies: &["auth", "media", "notifications", "seo"],
    },
    BuiltinType {
        id: "educational",
        name: "Educational",
        description: "Educational platform with courses and learning management",
        icon: "graduation-cap",
        color: "#9C27B0",
        features: &[
            "course_management",
            "student_portal",
            "assignment_system",
            "progress_tracking",
            "quiz_system",
            "resource_library",
            "discussion_forums",
            "certificate_generation",
        ],
        dependencies: FULL_STACK_DEPENDENCIES,
    },
    BuiltinType {
        id: "healthcare",
        name: "Healthcare",
        description: "Healthcare website with patient portal and appointment scheduling",
        icon: "heartbeat",
        color: "#F44336",
        features: &[
            "patient_portal",
            "appointment_scheduling",
            "medical_records",
            "prescription_management",
            "telemedicine_integration",
            "health_blog",
            "insurance_verification",
            "emergency_contact",
        ],
        dependencies: &[
            "auth",
            "roles",
            "media",
            "notifications",
            "calendar",
            "chat",
            "payment",
            "analytics",
        ],
    },
    BuiltinType {
        id: "hospitality",
        name: "Hospitality",
        description: "Hotel and hospitality management system",
        icon: "bed",
        color: "#FF9800",
        features: &[
            "room_booking",
            "event_management",
            "menu_system",
            "guest_feedback",
            "loyalty_program",
            "special_offers",
            "virtual_tours",
            "online_checkin",
        ],
        dependencies: FULL_STACK_DEPENDENCIES,
    },
    BuiltinType {
        id: "real-estate",
        name: "Real Estate",
        description: "Real estate website with property listings and agent profiles",
        icon: "home",
        color: "#795548",
        features: &[
            "property_listings",
            "virtual_tours",
            "agent_profiles",
            "mortgage_calculator",
            "property_search",
            "saved_searches",
            "contact_forms",
            "market_analysis",
        ],
        dependencies: FULL_STACK_DEPENDENCIES,
    },
    BuiltinType {
        id: "restaurant",
        name: "Restaurant",
        description: "Restaurant website with menu management and reservations",
        icon: "utensils",
        color: "#E91E63",
        features: &[
            "menu_management",
            "table_reservation",
            "online_ordering",
            "delivery_tracking",
            "loyalty_program",
            "special_offers",
            "gallery_management",
            "customer_reviews",
        ],
        dependencies: FULL_STACK_DEPENDENCIES,
    },
    BuiltinType {
        id: "fitness",
        name: "Fitness",
        description: "Fitness center website with class scheduling and member portal",
        icon: "dumbbell",
        color: "#00BCD4",
        features: &[
            "class_scheduling",
            "member_portal",
            "workout_tracking",
            "nutrition_planning",
            "trainer_profiles",
            "online_booking",
            "progress_tracking",
            "virtual_classes",
        ],
        dependencies: FULL_STACK_DEPENDENCIES,
    },
];

/// Normalise a type id for lookup: trimmed, lowercase, `_` read as `-`.
pub fn normalize_type_id(id: &str) -> String {
    id.trim().to_ascii_lowercase().replace('_', "-")
}

/// Validate a type id: non-empty lowercase kebab case.
pub fn validate_type_id(id: &str) -> Result<(), DomainError> {
    let ok = !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && !id.contains("--")
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(DomainError::InvalidTypeId {
            id: id.to_owned(),
            reason: "type ids are lowercase kebab-case (a-z, 0-9, '-')".into(),
        })
    }
}

/// Full description of a website type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteTypeDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub features: Vec<String>,
    pub dependencies: Vec<String>,
    /// `true` for entries from [`BUILTIN_TYPES`].
    #[serde(default)]
    pub builtin: bool,
}

impl WebsiteTypeDescriptor {
    /// Descriptor for a new custom type, filled from the defaults.
    pub fn custom(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: naming::ucwords(&id),
            description: format!("Configuration for {id} website type"),
            icon: FALLBACK_ICON.into(),
            color: FALLBACK_COLOR.into(),
            features: DEFAULT_FEATURES.iter().map(|s| (*s).to_owned()).collect(),
            dependencies: DEFAULT_DEPENDENCIES.iter().map(|s| (*s).to_owned()).collect(),
            builtin: false,
            id,
        }
    }
}

impl From<&BuiltinType> for WebsiteTypeDescriptor {
    fn from(b: &BuiltinType) -> Self {
        Self {
            id: b.id.to_owned(),
            name: b.name.to_owned(),
            description: b.description.to_owned(),
            icon: b.icon.to_owned(),
            color: b.color.to_owned(),
            features: b.features.iter().map(|s| (*s).to_owned()).collect(),
            dependencies: b.dependencies.iter().map(|s| (*s).to_owned()).collect(),
            builtin: true,
        }
    }
}

/// `{ type, features, dependencies }` summary of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    #[serde(rename = "type")]
    pub type_id: String,
    pub features: Vec<String>,
    pub dependencies: Vec<String>,
}

/// Read-only lookup table of website types.
#[derive(Debug, Clone)]
pub struct WebsiteTypeRegistry {
    types: Vec<WebsiteTypeDescriptor>,
    disabled: HashSet<String>,
}

impl Default for WebsiteTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WebsiteTypeRegistry {
    /// Registry holding the built-in types only.
    pub fn builtin() -> Self {
        Self {
            types: BUILTIN_TYPES.iter().map(WebsiteTypeDescriptor::from).collect(),
            disabled: HashSet::new(),
        }
    }

    /// Registry with no types at all.
    pub fn empty() -> Self {
        Self {
            types: Vec::new(),
            disabled: HashSet::new(),
        }
    }

    /// Append a custom type. Rejects invalid ids and ids already present.
    pub fn with_custom(
        mut self,
        mut descriptor: WebsiteTypeDescriptor,
    ) -> Result<Self, DomainError> {
        descriptor.id = normalize_type_id(&descriptor.id);
        validate_type_id(&descriptor.id)?;
        if self.types.iter().any(|t| t.id == descriptor.id) {
            return Err(DomainError::DuplicateCustomType { id: descriptor.id });
        }
        descriptor.builtin = false;
        self.types.push(descriptor);
        Ok(self)
    }

    /// Apply an enabled-types map (`id -> bool`). Ids not in the map stay
    /// enabled; `real_estate` and `real-estate` name the same type.
    pub fn with_enabled(mut self, enabled: &BTreeMap<String, bool>) -> Self {
        self.disabled = enabled
            .iter()
            .filter(|(_, on)| !**on)
            .map(|(id, _)| normalize_type_id(id))
            .collect();
        self
    }

    fn find(&self, id: &str) -> Option<&WebsiteTypeDescriptor> {
        let id = normalize_type_id(id);
        self.types.iter().find(|t| t.id == id)
    }

    /// Whether `id` names a known type (enabled or not).
    pub fn has_type(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.has_type(id) && !self.disabled.contains(&normalize_type_id(id))
    }

    /// Descriptor for an enabled type.
    pub fn get(&self, id: &str) -> Option<&WebsiteTypeDescriptor> {
        self.find(id).filter(|t| !self.disabled.contains(&t.id))
    }

    /// Descriptor regardless of the enabled filter.
    pub fn get_any(&self, id: &str) -> Option<&WebsiteTypeDescriptor> {
        self.find(id)
    }

    /// Enabled descriptors in registration order.
    pub fn list(&self) -> Vec<&WebsiteTypeDescriptor> {
        self.types
            .iter()
            .filter(|t| !self.disabled.contains(&t.id))
            .collect()
    }

    /// Every descriptor, enabled or not.
    pub fn list_all(&self) -> &[WebsiteTypeDescriptor] {
        &self.types
    }

    pub fn ids(&self) -> Vec<&str> {
        self.list().into_iter().map(|t| t.id.as_str()).collect()
    }

    /// Human-readable name; unknown ids are title-cased from the id.
    pub fn display_name(&self, id: &str) -> String {
        self.get(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| naming::ucwords(id))
    }

    pub fn description(&self, id: &str) -> &str {
        self.get(id)
            .map_or(FALLBACK_DESCRIPTION, |t| t.description.as_str())
    }

    pub fn icon(&self, id: &str) -> &str {
        self.get(id).map_or(FALLBACK_ICON, |t| t.icon.as_str())
    }

    pub fn color(&self, id: &str) -> &str {
        self.get(id).map_or(FALLBACK_COLOR, |t| t.color.as_str())
    }

    /// Features of a type; empty for unknown ids.
    pub fn features(&self, id: &str) -> &[String] {
        self.get(id).map_or(&[][..], |t| t.features.as_slice())
    }

    /// Dependencies of a type; empty for unknown ids.
    pub fn dependencies(&self, id: &str) -> &[String] {
        self.get(id).map_or(&[][..], |t| t.dependencies.as_slice())
    }

    /// `(id, features)` for every enabled type, in registry order.
    pub fn all_features(&self) -> Vec<(&str, &[String])> {
        self.list()
            .into_iter()
            .map(|t| (t.id.as_str(), t.features.as_slice()))
            .collect()
    }

    /// `(id, dependencies)` for every enabled type, in registry order.
    pub fn all_dependencies(&self) -> Vec<(&str, &[String])> {
        self.list()
            .into_iter()
            .map(|t| (t.id.as_str(), t.dependencies.as_slice()))
            .collect()
    }

    pub fn type_info(&self, id: &str) -> Option<TypeInfo> {
        self.get(id).map(|t| TypeInfo {
            type_id: t.id.clone(),
            features: t.features.clone(),
            dependencies: t.dependencies.clone(),
        })
    }

    pub fn all_type_info(&self) -> Vec<TypeInfo> {
        self.list()
            .into_iter()
            .filter_map(|t| self.type_info(&t.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_and_shape() {
        let reg = WebsiteTypeRegistry::builtin();
        assert_eq!(
            reg.ids(),
            vec![
                "ecommerce",
                "portfolio",
                "educational",
                "healthcare",
                "hospitality",
                "real-estate",
                "restaurant",
                "fitness"
            ]
        );
        for t in reg.list() {
            assert_eq!(t.features.len(), 8, "{} features", t.id);
            assert!(!t.dependencies.is_empty());
            assert!(t.builtin);
        }
    }

    #[test]
    fn lookups_for_known_type() {
        let reg = WebsiteTypeRegistry::builtin();
        assert!(reg.has_type("portfolio"));
        assert_eq!(reg.display_name("real-estate"), "Real Estate");
        assert_eq!(reg.icon("fitness"), "dumbbell");
        assert_eq!(reg.color("ecommerce"), "#4CAF50");
        assert_eq!(reg.dependencies("portfolio"), ["auth", "media", "notifications", "seo"]);
    }

    #[test]
    fn fallbacks_for_unknown_type() {
        let reg = WebsiteTypeRegistry::builtin();
        assert!(!reg.has_type("blog"));
        assert_eq!(reg.display_name("pet-shop"), "Pet Shop");
        assert_eq!(reg.description("pet-shop"), FALLBACK_DESCRIPTION);
        assert_eq!(reg.icon("pet-shop"), FALLBACK_ICON);
        assert_eq!(reg.color("pet-shop"), FALLBACK_COLOR);
        assert!(reg.features("pet-shop").is_empty());
        assert!(reg.dependencies("pet-shop").is_empty());
        assert_eq!(reg.type_info("pet-shop"), None);
    }

    #[test]
    fn underscore_alias_matches() {
        let reg = WebsiteTypeRegistry::builtin();
        assert!(reg.has_type("real_estate"));
        assert_eq!(reg.get("REAL_ESTATE").map(|t| t.id.as_str()), Some("real-estate"));
    }

    #[test]
    fn enabled_filter_hides_types() {
        let enabled = BTreeMap::from([
            ("real_estate".to_string(), false),
            ("portfolio".to_string(), true),
        ]);
        let reg = WebsiteTypeRegistry::builtin().with_enabled(&enabled);
        assert!(reg.has_type("real-estate"));
        assert!(!reg.is_enabled("real-estate"));
        assert!(reg.get("real-estate").is_none());
        assert!(reg.get_any("real-estate").is_some());
        assert!(reg.is_enabled("fitness"));
        assert_eq!(reg.list().len(), 7);
        assert_eq!(reg.all_features().len(), 7);
    }

    #[test]
    fn custom_types_append_and_collide() {
        let reg = WebsiteTypeRegistry::builtin()
            .with_custom(WebsiteTypeDescriptor::custom("pet-shop"))
            .unwrap();
        assert_eq!(reg.ids().last(), Some(&"pet-shop"));
        assert_eq!(reg.features("pet-shop"), DEFAULT_FEATURES);
        assert!(!reg.get("pet-shop").unwrap().builtin);

        let dup = reg.clone().with_custom(WebsiteTypeDescriptor::custom("portfolio"));
        assert!(matches!(dup, Err(DomainError::DuplicateCustomType { .. })));

        let bad = reg.with_custom(WebsiteTypeDescriptor::custom("Pet Shop!"));
        assert!(matches!(bad, Err(DomainError::InvalidTypeId { .. })));
    }

    #[test]
    fn type_info_serializes_with_type_key() {
        let reg = WebsiteTypeRegistry::builtin();
        let info = reg.type_info("fitness").unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "fitness");
        assert_eq!(json["features"][0], "class_scheduling");
    }

    #[test]
    fn type_id_validation() {
        assert!(validate_type_id("pet-shop").is_ok());
        assert!(validate_type_id("shop2").is_ok());
        assert!(validate_type_id("").is_err());
        assert!(validate_type_id("-shop").is_err());
        assert!(validate_type_id("pet--shop").is_err());
        assert!(validate_type_id("Pet").is_err());
    }
}
