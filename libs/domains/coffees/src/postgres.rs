use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;

use crate::{
    entity::{coffee, coffee_flavor, flavor},
    error::{CoffeeError, CoffeeResult},
    models::{Coffee, CreateCoffee, PaginationQuery, UpdateCoffee, distinct_flavor_names},
    repository::CoffeeRepository,
};

/// PostgreSQL-backed CoffeeRepository
///
/// Every write runs in a single transaction: flavor resolution, the coffee row
/// and the join rows commit or roll back together.
#[derive(Clone)]
pub struct PgCoffeeRepository {
    db: DatabaseConnection,
}

impl PgCoffeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Finds each flavor by name, inserting the missing ones.
///
/// Inserts use `ON CONFLICT (name) DO NOTHING` so a concurrent writer creating
/// the same flavor does not fail this transaction.
async fn resolve_flavors<C: ConnectionTrait>(
    conn: &C,
    names: Vec<String>,
) -> Result<Vec<flavor::Model>, DbErr> {
    let mut resolved = Vec::new();

    for name in distinct_flavor_names(names) {
        if let Some(existing) = find_flavor(conn, &name).await? {
            resolved.push(existing);
            continue;
        }

        let inserted = flavor::Entity::insert(flavor::ActiveModel {
            id: NotSet,
            name: Set(name.clone()),
        })
        .on_conflict(
            OnConflict::column(flavor::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

        if inserted > 0 {
            tracing::debug!(name = %name, "Created flavor");
        }

        let model = find_flavor(conn, &name)
            .await?
            .ok_or_else(|| DbErr::Custom(format!("flavor '{}' missing after upsert", name)))?;
        resolved.push(model);
    }

    Ok(resolved)
}

async fn find_flavor<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<flavor::Model>, DbErr> {
    flavor::Entity::find()
        .filter(flavor::Column::Name.eq(name))
        .one(conn)
        .await
}

async fn link_flavors<C: ConnectionTrait>(
    conn: &C,
    coffee_id: i32,
    flavors: &[flavor::Model],
) -> Result<(), DbErr> {
    if flavors.is_empty() {
        return Ok(());
    }

    let links = flavors.iter().map(|f| coffee_flavor::ActiveModel {
        coffee_id: Set(coffee_id),
        flavor_id: Set(f.id),
    });

    coffee_flavor::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Flavors of every coffee in `coffee_ids`, ordered by flavor id, loaded with two queries.
async fn flavors_by_coffee<C: ConnectionTrait>(
    conn: &C,
    coffee_ids: &[i32],
) -> Result<HashMap<i32, Vec<flavor::Model>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<flavor::Model>> = HashMap::new();
    if coffee_ids.is_empty() {
        return Ok(grouped);
    }

    let links = coffee_flavor::Entity::find()
        .filter(coffee_flavor::Column::CoffeeId.is_in(coffee_ids.iter().copied()))
        .all(conn)
        .await?;
    if links.is_empty() {
        return Ok(grouped);
    }

    let flavors: HashMap<i32, flavor::Model> = flavor::Entity::find()
        .filter(flavor::Column::Id.is_in(links.iter().map(|l| l.flavor_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    for link in links {
        if let Some(flavor) = flavors.get(&link.flavor_id) {
            grouped
                .entry(link.coffee_id)
                .or_default()
                .push(flavor.clone());
        }
    }
    for flavors in grouped.values_mut() {
        flavors.sort_by_key(|f| f.id);
    }

    Ok(grouped)
}

#[async_trait]
impl CoffeeRepository for PgCoffeeRepository {
    async fn find_all(&self, pagination: PaginationQuery) -> CoffeeResult<Vec<Coffee>> {
        let coffees = coffee::Entity::find()
            .order_by_asc(coffee::Column::Id)
            .offset(pagination.offset)
            .limit(pagination.limit)
            .all(&self.db)
            .await?;

        let ids: Vec<i32> = coffees.iter().map(|c| c.id).collect();
        let mut flavors = flavors_by_coffee(&self.db, &ids).await?;

        Ok(coffees
            .into_iter()
            .map(|model| {
                let linked = flavors.remove(&model.id).unwrap_or_default();
                Coffee::from_models(model, linked)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> CoffeeResult<Option<Coffee>> {
        let Some(model) = coffee::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let flavors = model
            .find_related(flavor::Entity)
            .order_by_asc(flavor::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(Coffee::from_models(model, flavors)))
    }

    async fn create(&self, input: CreateCoffee) -> CoffeeResult<Coffee> {
        let txn = self.db.begin().await?;

        let flavors = resolve_flavors(&txn, input.flavors).await?;
        let model = coffee::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            brand: Set(input.brand),
        }
        .insert(&txn)
        .await?;
        link_flavors(&txn, model.id, &flavors).await?;

        txn.commit().await?;

        tracing::info!(coffee_id = model.id, flavors = flavors.len(), "Created coffee");
        Ok(Coffee::from_models(model, flavors))
    }

    async fn update(&self, id: i32, input: UpdateCoffee) -> CoffeeResult<Coffee> {
        let txn = self.db.begin().await?;

        let existing = coffee::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(CoffeeError::NotFound(id))?;

        let mut active: coffee::ActiveModel = existing.clone().into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(brand) = input.brand {
            active.brand = Set(brand);
        }
        let model = if active.is_changed() {
            active.update(&txn).await?
        } else {
            existing
        };

        let flavors = match input.flavors {
            Some(names) => {
                let flavors = resolve_flavors(&txn, names).await?;
                coffee_flavor::Entity::delete_many()
                    .filter(coffee_flavor::Column::CoffeeId.eq(id))
                    .exec(&txn)
                    .await?;
                link_flavors(&txn, id, &flavors).await?;
                flavors
            }
            None => {
                model
                    .find_related(flavor::Entity)
                    .order_by_asc(flavor::Column::Id)
                    .all(&txn)
                    .await?
            }
        };

        txn.commit().await?;

        tracing::info!(coffee_id = id, "Updated coffee");
        Ok(Coffee::from_models(model, flavors))
    }

    async fn delete(&self, id: i32) -> CoffeeResult<bool> {
        let result = coffee::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
