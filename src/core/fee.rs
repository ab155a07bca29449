//! Fee definition business logic.
//!
//! A fee may be attached to one fee collection (billing period). Deletion is
//! refused while the fee is attached to a collection or has payment records;
//! both rules surface as conflicts rather than cascading destructively.

use crate::{
    entities::{Fee, FeeCategory, FeeCollection, Payment, fee, payment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new fee definition.
pub async fn create_fee(
    db: &DatabaseConnection,
    name: String,
    description: String,
    category: FeeCategory,
    collection_id: Option<i64>,
) -> Result<fee::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Fee name cannot be empty".to_string(),
        });
    }

    if let Some(collection_id) = collection_id {
        FeeCollection::find_by_id(collection_id)
            .one(db)
            .await?
            .ok_or(Error::CollectionNotFound { id: collection_id })?;
    }

    let model = fee::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        category: Set(category),
        collection_id: Set(collection_id),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Finds a fee by its unique ID.
pub async fn get_fee_by_id(db: &DatabaseConnection, fee_id: i64) -> Result<Option<fee::Model>> {
    Fee::find_by_id(fee_id).one(db).await.map_err(Into::into)
}

/// Lists fees, optionally restricted to one collection, ordered by name.
pub async fn list_fees(
    db: &DatabaseConnection,
    collection_id: Option<i64>,
) -> Result<Vec<fee::Model>> {
    let mut query = Fee::find();
    if let Some(collection_id) = collection_id {
        query = query.filter(fee::Column::CollectionId.eq(collection_id));
    }

    query
        .order_by_asc(fee::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a fee's name, description, or collection attachment.
///
/// The category is deliberately immutable after creation: payments may
/// already have been disbursed under the category's calculator.
/// `collection_id` uses double-`Option` semantics: `None` leaves the
/// attachment unchanged, `Some(None)` detaches, `Some(Some(id))` attaches.
pub async fn update_fee(
    db: &DatabaseConnection,
    fee_id: i64,
    name: Option<String>,
    description: Option<String>,
    collection_id: Option<Option<i64>>,
) -> Result<fee::Model> {
    let fee = Fee::find_by_id(fee_id)
        .one(db)
        .await?
        .ok_or(Error::FeeNotFound { id: fee_id })?;

    let mut active: fee::ActiveModel = fee.into();

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Fee name cannot be empty".to_string(),
            });
        }
        active.name = Set(name.trim().to_string());
    }

    if let Some(description) = description {
        active.description = Set(description);
    }

    if let Some(new_collection) = collection_id {
        if let Some(collection_id) = new_collection {
            FeeCollection::find_by_id(collection_id)
                .one(db)
                .await?
                .ok_or(Error::CollectionNotFound { id: collection_id })?;
        }
        active.collection_id = Set(new_collection);
    }

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a fee definition.
///
/// Refused while the fee is attached to a collection or has payments.
pub async fn delete_fee(db: &DatabaseConnection, fee_id: i64) -> Result<()> {
    let fee = Fee::find_by_id(fee_id)
        .one(db)
        .await?
        .ok_or(Error::FeeNotFound { id: fee_id })?;

    if let Some(collection_id) = fee.collection_id {
        return Err(Error::FeeStillReferenced {
            id: fee_id,
            collection_id,
        });
    }

    let payment_count = Payment::find()
        .filter(payment::Column::FeeId.eq(fee_id))
        .count(db)
        .await?;
    if payment_count > 0 {
        return Err(Error::FeeHasPayments { id: fee_id });
    }

    fee.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_fee_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_fee(
            &db,
            "  ".to_string(),
            String::new(),
            FeeCategory::Management,
            None,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = create_fee(
            &db,
            "Dues".to_string(),
            String::new(),
            FeeCategory::Management,
            Some(999),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CollectionNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_fees_by_collection() -> Result<()> {
        let db = setup_test_db().await?;

        let collection = create_test_collection(&db, "2026-Q1").await?;
        create_fee(
            &db,
            "Management dues".to_string(),
            String::new(),
            FeeCategory::Management,
            Some(collection.id),
        )
        .await?;
        create_fee(
            &db,
            "Parking".to_string(),
            String::new(),
            FeeCategory::Vehicle,
            None,
        )
        .await?;

        assert_eq!(list_fees(&db, None).await?.len(), 2);
        let in_collection = list_fees(&db, Some(collection.id)).await?;
        assert_eq!(in_collection.len(), 1);
        assert_eq!(in_collection[0].name, "Management dues");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_fee_refused_while_attached() -> Result<()> {
        let db = setup_test_db().await?;

        let collection = create_test_collection(&db, "2026-Q1").await?;
        let fee = create_fee(
            &db,
            "Dues".to_string(),
            String::new(),
            FeeCategory::Management,
            Some(collection.id),
        )
        .await?;

        let result = delete_fee(&db, fee.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::FeeStillReferenced { .. }
        ));

        // Detach, then deletion succeeds
        update_fee(&db, fee.id, None, None, Some(None)).await?;
        delete_fee(&db, fee.id).await?;
        assert!(get_fee_by_id(&db, fee.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_fee_refused_with_payments() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;
        create_test_payment(&db, fee.id, household.id, 350_000).await?;

        let result = delete_fee(&db, fee.id).await;
        assert!(matches!(result.unwrap_err(), Error::FeeHasPayments { .. }));

        Ok(())
    }
}
