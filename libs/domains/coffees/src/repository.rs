use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoffeeError, CoffeeResult};
use crate::models::{
    Coffee, CreateCoffee, Flavor, PaginationQuery, UpdateCoffee, distinct_flavor_names,
};

/// Repository trait for Coffee persistence
///
/// Flavors are addressed by name: writes resolve each name to an existing
/// flavor or create it, so flavor names stay unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoffeeRepository: Send + Sync {
    /// Page of coffees ordered by id
    async fn find_all(&self, pagination: PaginationQuery) -> CoffeeResult<Vec<Coffee>>;

    async fn find_by_id(&self, id: i32) -> CoffeeResult<Option<Coffee>>;

    /// Create a coffee, resolving or creating its flavors
    async fn create(&self, input: CreateCoffee) -> CoffeeResult<Coffee>;

    /// Merge `input` into an existing coffee. Fails with `NotFound` before any write.
    async fn update(&self, id: i32, input: UpdateCoffee) -> CoffeeResult<Coffee>;

    /// Delete a coffee by id. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> CoffeeResult<bool>;
}

#[derive(Debug, Clone)]
struct StoredCoffee {
    name: String,
    brand: String,
    flavor_ids: Vec<i32>,
}

#[derive(Debug, Default)]
struct Store {
    coffees: BTreeMap<i32, StoredCoffee>,
    flavors: BTreeMap<i32, String>,
    last_coffee_id: i32,
    last_flavor_id: i32,
}

impl Store {
    /// Ids for `names`, creating flavors that do not exist yet.
    fn resolve_flavors(&mut self, names: Vec<String>) -> Vec<i32> {
        distinct_flavor_names(names)
            .into_iter()
            .map(|name| {
                if let Some((id, _)) = self.flavors.iter().find(|(_, existing)| **existing == name) {
                    return *id;
                }
                self.last_flavor_id += 1;
                tracing::debug!(flavor_id = self.last_flavor_id, name = %name, "Created flavor");
                self.flavors.insert(self.last_flavor_id, name);
                self.last_flavor_id
            })
            .collect()
    }

    /// Coffee with its flavors in link order, as last written.
    fn materialize(&self, id: i32, stored: &StoredCoffee) -> Coffee {
        let flavors = stored
            .flavor_ids
            .iter()
            .filter_map(|flavor_id| {
                self.flavors.get(flavor_id).map(|name| Flavor {
                    id: *flavor_id,
                    name: name.clone(),
                })
            })
            .collect();

        Coffee {
            id,
            name: stored.name.clone(),
            brand: stored.brand.clone(),
            flavors,
        }
    }

    /// Coffee as reads return it: flavors ordered by id.
    fn read(&self, id: i32, stored: &StoredCoffee) -> Coffee {
        let mut coffee = self.materialize(id, stored);
        coffee.flavors.sort_by_key(|f| f.id);
        coffee
    }
}

/// In-memory implementation of CoffeeRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCoffeeRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCoffeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoffeeRepository for InMemoryCoffeeRepository {
    async fn find_all(&self, pagination: PaginationQuery) -> CoffeeResult<Vec<Coffee>> {
        let store = self.store.read().await;

        let offset = pagination.offset.unwrap_or(0) as usize;
        let limit = pagination.limit.map_or(usize::MAX, |l| l as usize);

        Ok(store
            .coffees
            .iter()
            .skip(offset)
            .take(limit)
            .map(|(id, stored)| store.read(*id, stored))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> CoffeeResult<Option<Coffee>> {
        let store = self.store.read().await;
        Ok(store
            .coffees
            .get(&id)
            .map(|stored| store.read(id, stored)))
    }

    async fn create(&self, input: CreateCoffee) -> CoffeeResult<Coffee> {
        let mut store = self.store.write().await;

        let flavor_ids = store.resolve_flavors(input.flavors);
        store.last_coffee_id += 1;
        let id = store.last_coffee_id;

        let stored = StoredCoffee {
            name: input.name,
            brand: input.brand,
            flavor_ids,
        };
        let coffee = store.materialize(id, &stored);
        store.coffees.insert(id, stored);

        tracing::info!(coffee_id = id, "Created coffee");
        Ok(coffee)
    }

    async fn update(&self, id: i32, input: UpdateCoffee) -> CoffeeResult<Coffee> {
        let mut store = self.store.write().await;

        let mut stored = store
            .coffees
            .get(&id)
            .cloned()
            .ok_or(CoffeeError::NotFound(id))?;

        if let Some(name) = input.name {
            stored.name = name;
        }
        if let Some(brand) = input.brand {
            stored.brand = brand;
        }
        let coffee = match input.flavors {
            Some(flavors) => {
                stored.flavor_ids = store.resolve_flavors(flavors);
                store.materialize(id, &stored)
            }
            None => store.read(id, &stored),
        };
        store.coffees.insert(id, stored);

        tracing::info!(coffee_id = id, "Updated coffee");
        Ok(coffee)
    }

    async fn delete(&self, id: i32) -> CoffeeResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.coffees.remove(&id).is_some())
    }
}
