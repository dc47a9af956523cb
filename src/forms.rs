//! Form payloads and validation for the management screens.
//!
//! Validation mirrors the screens: required fields only. List fields arrive
//! as comma-separated text and are split with trimming, dropping empty
//! segments.

use crate::storage::repository::{
    DayDefinition, ProgramDefinition, ServiceDefinition, TourDefinition,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("الحقل مطلوب: {0}")]
    Required(&'static str),
    #[error("قيمة غير صالحة: {0}")]
    Invalid(&'static str),
}

/// Splits a comma-separated field into trimmed entries, dropping empties.
/// `"بانكوك, بوكيت ,"` becomes `["بانكوك", "بوكيت"]`.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    if value.trim().is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value)
    }
}

/// Closed service-type set from the services screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    AirportTransfer,
    Meal,
    Ticket,
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AirportTransfer => "airport_transfer",
            Self::Meal => "meal",
            Self::Ticket => "ticket",
            Self::Other => "other",
        }
    }

    /// Unknown stored values collapse to `Other`, like the screen's
    /// fallback icon path.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "airport_transfer" => Self::AirportTransfer,
            "meal" => Self::Meal,
            "ticket" => Self::Ticket,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AirportTransfer => "نقل المطار",
            Self::Meal => "وجبات",
            Self::Ticket => "تذاكر",
            Self::Other => "خدمات أخرى",
        }
    }
}

/// Closed difficulty set. Stored as the Arabic labels the screens stored,
/// so existing rows round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "سهل",
            Self::Medium => "متوسط",
            Self::Hard => "صعب",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "سهل" | "easy" => Self::Easy,
            "صعب" | "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

/// The program form as submitted: list fields still comma-separated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramForm {
    pub name: String,
    pub country: String,
    pub duration: String,
    pub price: String,
    pub cities: String,
    pub hotels: String,
    pub activities: String,
    pub includes: String,
    pub description: String,
    pub is_available: bool,
    pub category_id: String,
    pub min_participants: i32,
    pub max_participants: i32,
    pub difficulty_level: DifficultyLevel,
    pub season: String,
    pub featured_image: String,
    pub gallery: Vec<String>,
}

impl Default for ProgramForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            country: String::new(),
            duration: String::new(),
            price: String::new(),
            cities: String::new(),
            hotels: String::new(),
            activities: String::new(),
            includes: String::new(),
            description: String::new(),
            is_available: true,
            category_id: String::new(),
            min_participants: 1,
            max_participants: 50,
            difficulty_level: DifficultyLevel::Medium,
            season: String::new(),
            featured_image: String::new(),
            gallery: Vec::new(),
        }
    }
}

impl ProgramForm {
    pub fn into_definition(self) -> Result<ProgramDefinition, FormError> {
        require(&self.name, "name")?;
        require(&self.country, "country")?;
        require(&self.duration, "duration")?;
        require(&self.price, "price")?;
        require(&self.cities, "cities")?;
        require(&self.hotels, "hotels")?;
        require(&self.activities, "activities")?;
        require(&self.includes, "includes")?;

        Ok(ProgramDefinition {
            name: self.name,
            country: self.country,
            duration: self.duration,
            price: self.price,
            cities: split_list(&self.cities),
            hotels: split_list(&self.hotels),
            activities: split_list(&self.activities),
            includes: split_list(&self.includes),
            description: self.description,
            is_available: self.is_available,
            category_id: if self.category_id.is_empty() {
                None
            } else {
                Some(self.category_id)
            },
            min_participants: self.min_participants,
            max_participants: self.max_participants,
            difficulty_level: self.difficulty_level.as_str().to_string(),
            season: self.season,
            featured_image: self.featured_image,
            gallery: self.gallery,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayForm {
    pub day_number: i32,
    pub title: String,
    pub description: String,
    pub city_id: String,
}

impl DayForm {
    pub fn into_definition(self) -> Result<DayDefinition, FormError> {
        require(&self.title, "title")?;
        if self.day_number < 1 {
            return Err(FormError::Invalid("day_number"));
        }
        Ok(DayDefinition {
            day_number: self.day_number,
            title: self.title,
            description: self.description,
            city_id: if self.city_id.is_empty() {
                None
            } else {
                Some(self.city_id)
            },
            // 两个字段取同一个用户输入的整数
            sort_order: self.day_number,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourForm {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    /// Open string: the screens disagree on whether this is a fixed set.
    pub activity_type: String,
    pub images: Vec<String>,
    pub notes: String,
    pub sort_order: Option<i32>,
}

impl TourForm {
    pub fn into_definition(self) -> Result<TourDefinition, FormError> {
        require(&self.title, "title")?;
        Ok(TourDefinition {
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            activity_type: self.activity_type,
            images: self.images,
            notes: self.notes,
            sort_order: self.sort_order,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub service_type: ServiceType,
    pub is_optional: bool,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            service_type: ServiceType::Other,
            is_optional: true,
        }
    }
}

impl ServiceForm {
    pub fn into_definition(self) -> Result<ServiceDefinition, FormError> {
        require(&self.name, "name")?;
        if self.price < 0.0 {
            return Err(FormError::Invalid("price"));
        }
        Ok(ServiceDefinition {
            name: self.name,
            description: self.description,
            price: self.price,
            service_type: self.service_type,
            is_optional: self.is_optional,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list("بانكوك, بوكيت ,"), vec!["بانكوك", "بوكيت"]);
        assert_eq!(split_list("A, B"), vec!["A", "B"]);
        assert_eq!(split_list("  "), Vec::<String>::new());
        assert_eq!(split_list(",,,"), Vec::<String>::new());
    }

    #[test]
    fn program_form_requires_all_list_fields() {
        let form = ProgramForm {
            name: "برنامج تايلاند".to_string(),
            country: "تايلاند".to_string(),
            duration: "7 أيام".to_string(),
            price: "3,500 ر.س".to_string(),
            cities: "بانكوك".to_string(),
            hotels: "فندق".to_string(),
            activities: "جولة".to_string(),
            includes: String::new(),
            ..Default::default()
        };
        assert_eq!(
            form.into_definition().unwrap_err(),
            FormError::Required("includes")
        );
    }

    #[test]
    fn day_form_sets_sort_order_from_day_number() {
        let def = DayForm {
            day_number: 3,
            title: "اليوم الثالث".to_string(),
            ..Default::default()
        }
        .into_definition()
        .unwrap();
        assert_eq!(def.sort_order, 3);
    }

    #[test]
    fn service_type_round_trips_and_collapses_unknowns() {
        assert_eq!(ServiceType::parse("meal"), ServiceType::Meal);
        assert_eq!(ServiceType::parse("meal").as_str(), "meal");
        assert_eq!(ServiceType::parse("banana"), ServiceType::Other);
    }

    #[test]
    fn difficulty_accepts_both_stored_spellings() {
        assert_eq!(DifficultyLevel::parse("سهل"), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::parse("easy"), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::parse("unknown"), DifficultyLevel::Medium);
    }
}
