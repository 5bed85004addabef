use serde::{Deserialize, Serialize};

use crate::domain::types::{Money, ServiceId, TypeConstraintError, non_blank};

/// A priced, timed offering such as a haircut.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub price: Money,
    /// Duration in minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewService {
    pub name: String,
    pub price: Money,
    pub duration: u32,
    pub description: Option<String>,
}

impl NewService {
    pub fn new(
        name: String,
        price: Money,
        duration: u32,
        description: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        if duration == 0 {
            return Err(TypeConstraintError::NonPositiveDuration);
        }
        Ok(Self {
            name,
            price,
            duration,
            description: non_blank(description),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateService {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub duration: Option<u32>,
    pub description: Option<Option<String>>,
}

impl Service {
    pub fn create(new_service: NewService) -> Self {
        Self {
            id: ServiceId::new(),
            name: new_service.name,
            price: new_service.price,
            duration: new_service.duration,
            description: new_service.description,
        }
    }

    pub fn apply(&mut self, updates: &UpdateService) {
        if let Some(name) = &updates.name {
            self.name = name.clone();
        }
        if let Some(price) = updates.price {
            self.price = price;
        }
        if let Some(duration) = updates.duration.filter(|d| *d > 0) {
            self.duration = duration;
        }
        if let Some(description) = &updates.description {
            self.description = description.clone();
        }
    }
}

/// Catalog written on first start when no services are stored.
pub fn default_services() -> Vec<Service> {
    [
        ("Corte Masculino", 2500, 30),
        ("Barba", 1500, 20),
        ("Corte + Barba", 3500, 45),
        ("Sobrancelha", 1000, 15),
    ]
    .into_iter()
    .map(|(name, cents, duration)| Service {
        id: ServiceId::new(),
        name: name.to_string(),
        price: Money::from_cents(cents).unwrap_or_default(),
        duration,
        description: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_rejected() {
        let result = NewService::new("Corte".into(), Money::ZERO, 0, None);
        assert_eq!(result, Err(TypeConstraintError::NonPositiveDuration));
    }

    #[test]
    fn default_catalog_has_four_priced_entries() {
        let services = default_services();
        let summary: Vec<(&str, i64, u32)> = services
            .iter()
            .map(|s| (s.name.as_str(), s.price.cents(), s.duration))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Corte Masculino", 2500, 30),
                ("Barba", 1500, 20),
                ("Corte + Barba", 3500, 45),
                ("Sobrancelha", 1000, 15),
            ]
        );
    }

    #[test]
    fn apply_ignores_zero_duration() {
        let mut service = default_services().remove(0);
        service.apply(&UpdateService {
            duration: Some(0),
            price: Some(Money::from_units(30).unwrap()),
            ..UpdateService::default()
        });
        assert_eq!(service.duration, 30);
        assert_eq!(service.price.cents(), 3000);
    }
}
