//! Fee collection (billing period) business logic.
//!
//! Deleting a collection detaches its fees instead of deleting them; the
//! detach and the delete happen in one transaction so a half-applied cascade
//! is never observable.

use crate::{
    entities::{Fee, FeeCollection, fee, fee_collection},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Creates a new fee collection.
pub async fn create_collection(
    db: &DatabaseConnection,
    name: String,
    due_date: Date,
) -> Result<fee_collection::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Collection name cannot be empty".to_string(),
        });
    }

    let model = fee_collection::ActiveModel {
        name: Set(name.trim().to_string()),
        created_date: Set(Utc::now()),
        due_date: Set(due_date),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Finds a collection by its unique ID.
pub async fn get_collection_by_id(
    db: &DatabaseConnection,
    collection_id: i64,
) -> Result<Option<fee_collection::Model>> {
    FeeCollection::find_by_id(collection_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all collections, newest first.
pub async fn list_collections(db: &DatabaseConnection) -> Result<Vec<fee_collection::Model>> {
    FeeCollection::find()
        .order_by_desc(fee_collection::Column::CreatedDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a collection's name or due date.
pub async fn update_collection(
    db: &DatabaseConnection,
    collection_id: i64,
    name: Option<String>,
    due_date: Option<Date>,
) -> Result<fee_collection::Model> {
    let collection = FeeCollection::find_by_id(collection_id)
        .one(db)
        .await?
        .ok_or(Error::CollectionNotFound { id: collection_id })?;

    let mut active: fee_collection::ActiveModel = collection.into();

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Collection name cannot be empty".to_string(),
            });
        }
        active.name = Set(name.trim().to_string());
    }

    if let Some(due_date) = due_date {
        active.due_date = Set(due_date);
    }

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a collection, detaching its fees first.
pub async fn delete_collection(db: &DatabaseConnection, collection_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let collection = FeeCollection::find_by_id(collection_id)
        .one(&txn)
        .await?
        .ok_or(Error::CollectionNotFound { id: collection_id })?;

    Fee::update_many()
        .col_expr(fee::Column::CollectionId, Expr::value(Option::<i64>::None))
        .filter(fee::Column::CollectionId.eq(collection_id))
        .exec(&txn)
        .await?;

    collection.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
