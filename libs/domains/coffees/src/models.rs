use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::entity::{coffee, flavor};

/// Rejects blank flavor names.
#[allow(clippy::ptr_arg)]
fn validate_flavor_names(flavors: &Vec<String>) -> Result<(), ValidationError> {
    if flavors.iter().any(|name| name.trim().is_empty()) {
        return Err(ValidationError::new("blank_flavor_name"));
    }
    Ok(())
}

/// Coffee with its flavors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Coffee {
    /// Generated identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Shipwreck Roast")]
    pub name: String,
    #[schema(example = "Buddy Brew")]
    pub brand: String,
    /// Linked flavors. Writes return them in request order, reads by flavor id.
    pub flavors: Vec<Flavor>,
}

/// Flavor tag shared between coffees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flavor {
    #[schema(example = 1)]
    pub id: i32,
    /// Unique flavor name
    #[schema(example = "chocolate")]
    pub name: String,
}

/// DTO for creating a coffee
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCoffee {
    #[schema(example = "Shipwreck Roast")]
    pub name: String,
    #[schema(example = "Buddy Brew")]
    pub brand: String,
    /// Flavor names; unknown names are created, known ones reused
    #[validate(custom(function = "validate_flavor_names"))]
    pub flavors: Vec<String>,
}

/// DTO for partially updating a coffee
///
/// Absent fields are left untouched. A present `flavors` list replaces the
/// coffee's flavors entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCoffee {
    pub name: Option<String>,
    pub brand: Option<String>,
    #[validate(custom(function = "validate_flavor_names"))]
    pub flavors: Option<Vec<String>>,
}

/// Query parameters for listing coffees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Maximum number of coffees to return
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    /// Number of coffees to skip
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub offset: Option<u64>,
}

impl PaginationQuery {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self { limit, offset }
    }
}

impl Coffee {
    /// Builds a coffee from its row and linked flavor rows, keeping the flavor order given.
    pub fn from_models(model: coffee::Model, flavors: Vec<flavor::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            brand: model.brand,
            flavors: flavors.into_iter().map(Flavor::from).collect(),
        }
    }

    pub fn flavor_names(&self) -> Vec<&str> {
        self.flavors.iter().map(|f| f.name.as_str()).collect()
    }
}

impl From<flavor::Model> for Flavor {
    fn from(model: flavor::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Drops repeated flavor names, keeping first-seen order.
pub(crate) fn distinct_flavor_names(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
