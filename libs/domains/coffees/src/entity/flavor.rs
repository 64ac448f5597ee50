use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "flavor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coffee_flavor::Entity")]
    CoffeeFlavor,
}

impl Related<super::coffee_flavor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoffeeFlavor.def()
    }
}

/// Coffees that carry this flavor.
impl Related<super::coffee::Entity> for Entity {
    fn to() -> RelationDef {
        super::coffee_flavor::Relation::Coffee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coffee_flavor::Relation::Flavor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
