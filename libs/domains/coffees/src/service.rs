use std::sync::Arc;
use validator::Validate;

use crate::error::{CoffeeError, CoffeeResult};
use crate::models::{Coffee, CreateCoffee, PaginationQuery, UpdateCoffee};
use crate::repository::CoffeeRepository;

/// Service layer for Coffee business logic
#[derive(Clone)]
pub struct CoffeeService<R: CoffeeRepository> {
    repository: Arc<R>,
}

impl<R: CoffeeRepository> CoffeeService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List coffees page by page, ordered by id
    ///
    /// Any offset is accepted here; the positive-integer rule applies to query strings only.
    pub async fn find_all(&self, pagination: PaginationQuery) -> CoffeeResult<Vec<Coffee>> {
        self.repository.find_all(pagination).await
    }

    /// Get a coffee by ID
    pub async fn find_one(&self, id: i32) -> CoffeeResult<Coffee> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CoffeeError::NotFound(id))
    }

    /// Create a coffee, reusing flavors that already exist by name
    pub async fn create(&self, input: CreateCoffee) -> CoffeeResult<Coffee> {
        input
            .validate()
            .map_err(|e| CoffeeError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Partially update a coffee
    pub async fn update(&self, id: i32, input: UpdateCoffee) -> CoffeeResult<Coffee> {
        input
            .validate()
            .map_err(|e| CoffeeError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a coffee. Removing an absent id is not an error.
    pub async fn remove(&self, id: i32) -> CoffeeResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(coffee_id = id, "No coffee to remove");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flavor;
    use crate::repository::{InMemoryCoffeeRepository, MockCoffeeRepository};
    use mockall::predicate;
    use sea_orm::DbErr;

    fn sample_coffee(id: i32) -> Coffee {
        Coffee {
            id,
            name: "Shipwreck Roast".to_string(),
            brand: "Buddy Brew".to_string(),
            flavors: vec![Flavor {
                id: 1,
                name: "chocolate".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_find_one_returns_coffee() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(predicate::eq(7))
            .returning(|id| Ok(Some(sample_coffee(id))));

        let service = CoffeeService::new(mock_repo);
        let coffee = service.find_one(7).await.unwrap();

        assert_eq!(coffee.id, 7);
    }

    #[tokio::test]
    async fn test_find_one_missing_is_not_found() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CoffeeService::new(mock_repo);
        let err = service.find_one(404).await.unwrap_err();

        assert!(matches!(err, CoffeeError::NotFound(404)));
        assert_eq!(err.to_string(), "Coffee #404 not found");
    }

    #[tokio::test]
    async fn test_find_all_passes_pagination_through() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo
            .expect_find_all()
            .with(predicate::eq(PaginationQuery::new(Some(1), None)))
            .returning(|_| Ok(vec![sample_coffee(1)]));

        let service = CoffeeService::new(mock_repo);
        let coffees = service
            .find_all(PaginationQuery::new(Some(1), None))
            .await
            .unwrap();

        assert_eq!(coffees.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_with_zero_offset_returns_first_coffee() {
        let service = CoffeeService::new(InMemoryCoffeeRepository::new());
        for name in ["first", "second"] {
            service
                .create(CreateCoffee {
                    name: name.to_string(),
                    brand: "Buddy Brew".to_string(),
                    flavors: vec![],
                })
                .await
                .unwrap();
        }

        let page = service
            .find_all(PaginationQuery::new(Some(1), Some(0)))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "first");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_flavor_without_touching_repository() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo.expect_create().never();

        let service = CoffeeService::new(mock_repo);
        let result = service
            .create(CreateCoffee {
                name: "Roast".to_string(),
                brand: "Brew".to_string(),
                flavors: vec!["".to_string()],
            })
            .await;

        assert!(matches!(result, Err(CoffeeError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_propagates_not_found() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, _| *id == 12)
            .returning(|id, _| Err(CoffeeError::NotFound(id)));

        let service = CoffeeService::new(mock_repo);
        let result = service.update(12, UpdateCoffee::default()).await;

        assert!(matches!(result, Err(CoffeeError::NotFound(12))));
    }

    #[tokio::test]
    async fn test_remove_missing_coffee_succeeds() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo
            .expect_delete()
            .with(predicate::eq(5))
            .times(1)
            .returning(|_| Ok(false));

        let service = CoffeeService::new(mock_repo);
        assert!(service.remove(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_surfaces_database_errors() {
        let mut mock_repo = MockCoffeeRepository::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(DbErr::Custom("connection reset".to_string()).into()));

        let service = CoffeeService::new(mock_repo);
        assert!(matches!(
            service.remove(1).await,
            Err(CoffeeError::Database(_))
        ));
    }
}
