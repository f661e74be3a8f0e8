#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use blogly_core::domain::PostWithTags;
    use blogly_core::error::RepoError;
    use blogly_core::ports::{PostRepository, UserRepository};

    use crate::database::entity::{post, tag, user};
    use crate::database::seaorm_repo::{SeaOrmPostRepository, SeaOrmUserRepository};

    #[tokio::test]
    async fn find_post_with_tags_resolves_relations() {
        let now = chrono::Utc::now();

        // One result set per query: the post lookup, then the tag join.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                user_id: 1,
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
                created_at: now.into(),
            }]])
            .append_query_results(vec![vec![
                tag::Model {
                    id: 1,
                    name: "rust".to_owned(),
                },
                tag::Model {
                    id: 2,
                    name: "web".to_owned(),
                },
            ]])
            .into_connection();

        let repo = SeaOrmPostRepository::new(db);

        let found: PostWithTags = repo.find_with_tags(7).await.unwrap().unwrap();
        assert_eq!(found.post.title, "Test Post");
        let tag_ids: BTreeSet<i32> = found.tags.iter().map(|t| t.id).collect();
        assert_eq!(tag_ids, BTreeSet::from([1, 2]));
    }

    #[tokio::test]
    async fn missing_post_maps_to_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = SeaOrmPostRepository::new(db);
        assert!(repo.find_with_tags(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_rows_map_to_domain_users() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                user::Model {
                    id: 1,
                    first_name: "Jane".to_owned(),
                    last_name: "Doe".to_owned(),
                    image_url: "https://example.com/a.png".to_owned(),
                },
                user::Model {
                    id: 2,
                    first_name: "John".to_owned(),
                    last_name: "Doe".to_owned(),
                    image_url: "https://example.com/b.png".to_owned(),
                },
            ]])
            .into_connection();

        let repo = SeaOrmUserRepository::new(db);

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].full_name(), "Jane Doe");
    }

    #[tokio::test]
    async fn deleting_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = SeaOrmUserRepository::new(db);

        assert!(matches!(
            repo.delete(999).await.unwrap_err(),
            RepoError::NotFound
        ));
    }
}
