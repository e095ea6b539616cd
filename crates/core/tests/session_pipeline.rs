//! Session pipeline integration tests.
//!
//! These tests drive the session controller over a mock index backend:
//! - query broadening and the request envelope
//! - client-side re-filtering of fetched pages
//! - sort changes staying client-side
//! - pagination transitions and the full-page heuristic
//! - stale responses losing to newer searches

use std::sync::Arc;
use std::time::Duration;

use maglens_core::testing::{fixtures, MockSearchBackend};
use maglens_core::{
    BackendError, Category, ContentType, SearchError, SessionController, SortKey, PAGE_SIZE,
};

fn controller_with(backend: &Arc<MockSearchBackend>) -> SessionController {
    SessionController::new(Arc::clone(backend) as Arc<dyn maglens_core::SearchBackend>)
}

/// A corpus where every title matches the query token "ubuntu".
fn ubuntu_corpus(count: usize) -> Vec<maglens_core::SearchHit> {
    (0..count)
        .map(|i| fixtures::hit(&format!("Ubuntu ISO {}", i), &format!("hash{:03}", i)))
        .collect()
}

#[tokio::test]
async fn test_submit_builds_broadened_request() {
    let backend = Arc::new(MockSearchBackend::new());
    let controller = controller_with(&backend);

    controller.submit_query("the matrix", None).await.unwrap();

    let requests = backend.recorded_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query_string, "the* matrix*");
    assert_eq!(requests[0].limit, PAGE_SIZE);
    assert_eq!(requests[0].offset, 0);
}

#[tokio::test]
async fn test_empty_query_is_rejected_without_fetch() {
    let backend = Arc::new(MockSearchBackend::new());
    let controller = controller_with(&backend);

    let result = controller.submit_query("   ", None).await;
    assert!(matches!(result, Err(SearchError::EmptyQuery)));
    assert_eq!(backend.search_count().await, 0);
}

#[tokio::test]
async fn test_term_filter_narrows_broadened_page() {
    let backend = Arc::new(MockSearchBackend::new());
    backend
        .set_hits(vec![
            fixtures::hit("The Matrix (1999)", "hash1"),
            fixtures::hit("Matrimonial Drama", "hash2"),
            fixtures::hit("Completely Unrelated", "hash3"),
        ])
        .await;
    let controller = controller_with(&backend);

    let view = controller.submit_query("matrix", None).await.unwrap();

    // "Matrimonial" is a prefix match the wildcard would return but the
    // literal token "matrix" does not appear in it.
    let titles: Vec<_> = view.results.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix (1999)"]);
    assert_eq!(view.result_count, 1);
}

#[tokio::test]
async fn test_category_filter_applies_after_terms() {
    let backend = Arc::new(MockSearchBackend::new());
    backend
        .set_hits(vec![
            fixtures::typed_hit("Dune Part Two", "hash1", ContentType::Movie),
            fixtures::typed_hit("Dune Audiobook", "hash2", ContentType::Audiobook),
            fixtures::hit("Dune Untyped", "hash3"),
        ])
        .await;
    let controller = controller_with(&backend);

    let view = controller
        .submit_query("dune", Some(Category::Movie))
        .await
        .unwrap();

    let titles: Vec<_> = view.results.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Part Two"]);
}

#[tokio::test]
async fn test_sort_change_never_refetches() {
    let backend = Arc::new(MockSearchBackend::new());
    backend
        .set_hits(vec![
            fixtures::movie_hit("The Matrix (1999)", "hash1", 120),
            fixtures::movie_hit("The Matrix Reloaded", "hash2", 80),
        ])
        .await;
    let controller = controller_with(&backend);

    controller.submit_query("matrix", None).await.unwrap();
    assert_eq!(backend.search_count().await, 1);

    let view = controller.set_sort(SortKey::SeedersAsc).await;
    assert_eq!(backend.search_count().await, 1);
    assert_eq!(view.results[0].seeders, 80);
    assert_eq!(view.page, 1);
}

#[tokio::test]
async fn test_next_page_requests_next_offset() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(120)).await;
    let controller = controller_with(&backend);

    let view = controller.submit_query("ubuntu", None).await.unwrap();
    assert_eq!(view.page, 1);
    assert!(view.has_next);
    assert!(!view.has_prev);

    let view = controller.next_page().await.unwrap();
    assert_eq!(view.page, 2);
    assert!(view.has_prev);

    let requests = backend.recorded_requests().await;
    assert_eq!(requests[1].offset, 50);
}

#[tokio::test]
async fn test_next_unavailable_after_short_page() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(120)).await;
    let controller = controller_with(&backend);

    controller.submit_query("ubuntu", None).await.unwrap();
    controller.next_page().await.unwrap();
    let view = controller.next_page().await.unwrap();

    // Page 3 holds the remaining 20 items, so no further page is offered.
    assert_eq!(view.page, 3);
    assert_eq!(view.result_count, 20);
    assert!(!view.has_next);

    let result = controller.next_page().await;
    assert!(matches!(result, Err(SearchError::NoNextPage)));
}

#[tokio::test]
async fn test_prev_unavailable_on_first_page() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(10)).await;
    let controller = controller_with(&backend);

    controller.submit_query("ubuntu", None).await.unwrap();
    let result = controller.prev_page().await;
    assert!(matches!(result, Err(SearchError::NoPreviousPage)));
}

#[tokio::test]
async fn test_prev_page_goes_back() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(120)).await;
    let controller = controller_with(&backend);

    controller.submit_query("ubuntu", None).await.unwrap();
    controller.next_page().await.unwrap();
    let view = controller.prev_page().await.unwrap();

    assert_eq!(view.page, 1);
    let requests = backend.recorded_requests().await;
    assert_eq!(requests.last().unwrap().offset, 0);
}

#[tokio::test]
async fn test_new_query_resets_page() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(120)).await;
    let controller = controller_with(&backend);

    controller.submit_query("ubuntu", None).await.unwrap();
    controller.next_page().await.unwrap();

    let view = controller.submit_query("ubuntu iso", None).await.unwrap();
    assert_eq!(view.page, 1);
    assert_eq!(backend.recorded_requests().await.last().unwrap().offset, 0);
}

#[tokio::test]
async fn test_category_change_resets_page_and_refetches() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(120)).await;
    let controller = controller_with(&backend);

    controller.submit_query("ubuntu", None).await.unwrap();
    controller.next_page().await.unwrap();
    assert_eq!(backend.search_count().await, 2);

    let view = controller.set_category(Category::All).await.unwrap();
    assert_eq!(view.page, 1);
    assert_eq!(backend.search_count().await, 3);
    assert_eq!(backend.recorded_requests().await.last().unwrap().offset, 0);
}

#[tokio::test]
async fn test_category_change_without_query_does_not_fetch() {
    let backend = Arc::new(MockSearchBackend::new());
    let controller = controller_with(&backend);

    let view = controller.set_category(Category::Music).await.unwrap();
    assert_eq!(view.category, Category::Music);
    assert_eq!(backend.search_count().await, 0);
}

#[tokio::test]
async fn test_backend_failure_is_terminal() {
    let backend = Arc::new(MockSearchBackend::new());
    backend
        .set_next_error(BackendError::ConnectionFailed("index down".into()))
        .await;
    let controller = controller_with(&backend);

    let result = controller.submit_query("anything", None).await;
    assert!(matches!(result, Err(SearchError::Backend(_))));
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.set_hits(ubuntu_corpus(5)).await;
    backend.set_next_delay(Duration::from_millis(200)).await;
    let controller = Arc::new(controller_with(&backend));

    let slow = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_query("ubuntu", None).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // This search finishes first and must win.
    let fast = controller.submit_query("ubuntu iso", None).await.unwrap();
    assert_eq!(fast.query, "ubuntu iso");

    let slow_result = slow.await.unwrap();
    assert!(matches!(slow_result, Err(SearchError::Superseded)));

    // The committed state is still the fast search's.
    let view = controller.current_view().await;
    assert_eq!(view.query, "ubuntu iso");
}

#[tokio::test]
async fn test_matrix_end_to_end() {
    let backend = Arc::new(MockSearchBackend::new());
    backend
        .set_hits(vec![
            fixtures::movie_hit("The Matrix Reloaded", "hash2", 80),
            fixtures::movie_hit("The Matrix (1999)", "hash1", 120),
        ])
        .await;
    let controller = controller_with(&backend);

    controller
        .submit_query("The.Matrix.1999", None)
        .await
        .unwrap();
    let view = controller.set_sort(SortKey::SeedersDesc).await;

    assert_eq!(view.result_count, 2);
    assert_eq!(view.results[0].title, "The Matrix (1999)");
    assert_eq!(view.results[1].title, "The Matrix Reloaded");
}
