use contracts::domain::a001_bookmark::aggregate::Bookmark;
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::data::db::is_unique_violation;
use crate::shared::error::{ApiError, ApiResult};

/// Outcome of a bookmark request; an existing bookmark is not an error
#[derive(Debug, PartialEq, Eq)]
pub enum BookmarkOutcome {
    Created(Bookmark),
    AlreadyExists,
}

fn required_node(node: &str) -> ApiResult<&str> {
    let node = node.trim();
    if node.is_empty() {
        return Err(ApiError::bad_request("Field 'node' is required"));
    }
    Ok(node)
}

pub async fn bookmark_node(
    db: &DatabaseConnection,
    user_id: &str,
    node: &str,
) -> ApiResult<BookmarkOutcome> {
    let node = required_node(node)?;

    // UNIQUE (user_id, node) settles concurrent requests
    match repository::insert(db, user_id, node).await {
        Ok(bookmark) => {
            tracing::info!("Bookmarked node {} for user {}", node, user_id);
            Ok(BookmarkOutcome::Created(bookmark))
        }
        Err(e) if is_unique_violation(&e) => Ok(BookmarkOutcome::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}

pub async fn list(db: &DatabaseConnection, user_id: &str) -> ApiResult<Vec<Bookmark>> {
    Ok(repository::list_by_user(db, user_id).await?)
}

pub async fn delete(db: &DatabaseConnection, user_id: &str, node: &str) -> ApiResult<()> {
    let node = required_node(node)?;
    if !repository::delete(db, user_id, node).await? {
        return Err(ApiError::not_found("Bookmark not found"));
    }
    Ok(())
}

pub async fn update_description(
    db: &DatabaseConnection,
    user_id: &str,
    node: &str,
    description: &str,
) -> ApiResult<()> {
    let node = required_node(node)?;
    if !repository::update_description(db, user_id, node, description.trim()).await? {
        return Err(ApiError::not_found("Bookmark not found"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_duplicate_bookmark_is_reported() {
        let db = connect_in_memory().await.unwrap();

        let first = bookmark_node(&db, "u1", "10.0.0.1:32049").await.unwrap();
        assert!(matches!(first, BookmarkOutcome::Created(_)));

        let second = bookmark_node(&db, "u1", " 10.0.0.1:32049 ").await.unwrap();
        assert_eq!(second, BookmarkOutcome::AlreadyExists);

        // same node, other user
        let other = bookmark_node(&db, "u2", "10.0.0.1:32049").await.unwrap();
        assert!(matches!(other, BookmarkOutcome::Created(_)));

        assert_eq!(list(&db, "u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_bookmarks_of_one_node() {
        let db = connect_in_memory().await.unwrap();

        let (a, b) = tokio::join!(
            bookmark_node(&db, "u1", "10.0.0.1:32049"),
            bookmark_node(&db, "u1", "10.0.0.1:32049"),
        );
        let outcomes = [a.unwrap(), b.unwrap()];
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, BookmarkOutcome::Created(_)))
                .count(),
            1
        );
        assert!(outcomes.contains(&BookmarkOutcome::AlreadyExists));
        assert_eq!(list(&db, "u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = connect_in_memory().await.unwrap();
        bookmark_node(&db, "u1", "node-a").await.unwrap();

        update_description(&db, "u1", "node-a", "query node").await.unwrap();
        let items = list(&db, "u1").await.unwrap();
        assert_eq!(items[0].description, "query node");

        delete(&db, "u1", "node-a").await.unwrap();
        assert!(list(&db, "u1").await.unwrap().is_empty());

        let err = delete(&db, "u1", "node-a").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        let err = update_description(&db, "u1", "node-a", "x").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_node_rejected() {
        let db = connect_in_memory().await.unwrap();
        let err = bookmark_node(&db, "u1", "  ").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
