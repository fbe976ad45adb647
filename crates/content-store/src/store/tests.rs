//! ContentStore Integration Tests
//!
//! Drive the store against the in-memory fake API.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::ChecklistItemPatch;
    use crate::error::{ApiError, ClipboardError, PasteError};
    use crate::models::{Content, ContentKey, ContentType};
    use crate::store::{run_with_sync, ContentStore, SESSION_EXPIRED_MESSAGE};
    use crate::testing::{checklist, clipboard_note, item, note, MockApi, MockClipboard};
    use crate::LockState;

    fn forbidden() -> ApiError {
        ApiError::Http { status: 403, message: Some("Unauthorized".into()) }
    }

    fn setup(content: Vec<Content>) -> (Arc<MockApi>, ContentStore) {
        let api = Arc::new(MockApi::with_content(content));
        let store = ContentStore::new(api.clone());
        (api, store)
    }

    async fn unlocked(api: &MockApi, store: &ContentStore, hidden: Vec<Content>) {
        api.set_hidden(hidden);
        store.submit_pin_api("1234").await.expect("pin");
        store.fetch_hidden_content_api().await.expect("hidden");
    }

    #[tokio::test]
    async fn test_fetch_partitions_clipboard_note() {
        let (_, store) = setup(vec![
            note(1, "A").into(),
            clipboard_note(2, "pasted").into(),
            checklist(1, "B").into(),
        ]);

        store.fetch_content_api().await.expect("fetch");

        assert_eq!(store.content().len(), 2);
        assert_eq!(store.clipboard_note().map(|n| n.id), Some(2));
        assert!(!store.loading());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_raw_error() {
        let (api, store) = setup(vec![]);
        api.fail_next(ApiError::Http { status: 500, message: None });

        assert!(store.fetch_content_api().await.is_err());
        assert_eq!(store.error().as_deref(), Some("HTTP error! status: 500"));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_create_note() {
        let (_, store) = setup(vec![clipboard_note(1, "clip").into()]);
        store.fetch_content_api().await.unwrap();
        let clipboard_before = store.clipboard_note();

        store.add_note_api("A", "x").await.expect("create");

        let content = store.content();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].title(), "A");
        assert!(content[0].id() > 0);
        assert_eq!(store.clipboard_note(), clipboard_before);
    }

    #[tokio::test]
    async fn test_create_failure_is_labelled() {
        let (api, store) = setup(vec![]);
        api.fail_next(ApiError::Http { status: 400, message: Some("Title is required".into()) });

        let err = store.add_checklist_api("").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(store.error().as_deref(), Some("Failed to add checklist: Title is required"));
        assert!(store.content().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_is_generic() {
        let (api, store) = setup(vec![]);
        api.fail_next(ApiError::Network("connection reset".into()));

        let _ = store.add_note_api("A", "x").await;
        assert_eq!(
            store.error().as_deref(),
            Some("Failed to add note: Unexpected error during API request.")
        );
    }

    #[tokio::test]
    async fn test_hide_while_locked_drops_from_cache() {
        let (_, store) = setup(vec![note(1, "secret").into()]);
        store.fetch_content_api().await.unwrap();

        let mut hidden = note(1, "secret");
        hidden.hidden = true;
        store.update_note_api(&hidden).await.expect("update");

        assert!(store.content().is_empty());
        assert!(store.hidden_content().is_empty());
    }

    #[tokio::test]
    async fn test_hide_and_unhide_while_unlocked() {
        let (api, store) = setup(vec![checklist(1, "trip").into()]);
        store.fetch_content_api().await.unwrap();
        unlocked(&api, &store, vec![]).await;
        assert_eq!(store.lock_state(), LockState::Unlocked);

        let mut list = checklist(1, "trip");
        list.hidden = true;
        store.update_checklist_api(&list).await.unwrap();
        assert!(store.content().is_empty());
        assert_eq!(store.hidden_content()[0].key(), ContentKey::checklist(1));

        list.hidden = false;
        store.update_checklist_api(&list).await.unwrap();
        assert_eq!(store.content()[0].key(), ContentKey::checklist(1));
        assert!(store.hidden_content().is_empty());
    }

    #[tokio::test]
    async fn test_update_forbidden_expires_session() {
        let (api, store) = setup(vec![note(1, "A").into()]);
        store.fetch_content_api().await.unwrap();
        unlocked(&api, &store, vec![note(2, "secret").into()]).await;

        api.fail_next(forbidden());
        let mut edited = note(2, "secret");
        edited.content = "new".into();
        assert!(store.update_note_api(&edited).await.is_err());

        assert!(store.hidden_content().is_empty());
        assert_eq!(store.lock_state(), LockState::Locked);
        assert_eq!(store.error().as_deref(), Some(SESSION_EXPIRED_MESSAGE));
        assert_eq!(store.content().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_type() {
        let (_, store) = setup(vec![note(1, "note").into(), checklist(1, "list").into()]);
        store.fetch_content_api().await.unwrap();
        store.toggle_select_content(1, ContentType::Checklist);

        store.delete_checklist_api(1).await.unwrap();

        let content = store.content();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].key(), ContentKey::note(1));
        assert!(store.selected_content_keys().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_item() {
        let (api, store) = setup(vec![note(1, "note").into()]);
        store.fetch_content_api().await.unwrap();
        api.fail_next(ApiError::Http { status: 404, message: Some("Note not found".into()) });

        assert!(store.delete_note_api(1).await.is_err());
        assert_eq!(store.content().len(), 1);
        assert_eq!(store.error().as_deref(), Some("Failed to delete note: Note not found"));
    }

    #[tokio::test]
    async fn test_batch_delete_empty_selection_is_noop() {
        let (api, store) = setup(vec![note(1, "A").into()]);
        store.fetch_content_api().await.unwrap();
        let revision = store.revision();

        store.delete_selected_content_api().await.unwrap();

        assert_eq!(api.calls(), vec!["list_content"]);
        assert_eq!(store.revision(), revision);
    }

    #[tokio::test]
    async fn test_batch_delete_across_collections() {
        let (api, store) = setup(vec![note(1, "A").into(), note(2, "B").into()]);
        store.fetch_content_api().await.unwrap();
        unlocked(&api, &store, vec![checklist(7, "secret").into()]).await;

        store.toggle_select_content(1, ContentType::Note);
        store.toggle_select_content(7, ContentType::Checklist);
        store.delete_selected_content_api().await.unwrap();

        assert_eq!(
            api.batches(),
            vec![vec![ContentKey::note(1), ContentKey::checklist(7)]]
        );
        assert_eq!(store.content().len(), 1);
        assert!(store.hidden_content().is_empty());
        assert!(store.selected_content_keys().is_empty());
    }

    #[tokio::test]
    async fn test_batch_delete_forbidden() {
        let (api, store) = setup(vec![note(1, "A").into(), note(2, "B").into()]);
        store.fetch_content_api().await.unwrap();
        unlocked(&api, &store, vec![note(3, "secret").into()]).await;
        store.toggle_select_content(1, ContentType::Note);
        store.toggle_select_content(2, ContentType::Note);
        let content_before = store.content();
        let selected_before = store.selected_content_keys();

        api.fail_next(forbidden());
        assert!(store.delete_selected_content_api().await.is_err());

        assert!(store.hidden_content().is_empty());
        assert_eq!(store.error().as_deref(), Some(SESSION_EXPIRED_MESSAGE));
        assert_eq!(store.content(), content_before);
        assert_eq!(store.selected_content_keys(), selected_before);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_batch_delete_other_failure() {
        let (api, store) = setup(vec![note(1, "A").into()]);
        store.fetch_content_api().await.unwrap();
        store.toggle_select_content(1, ContentType::Note);

        api.fail_next(ApiError::Http { status: 500, message: None });
        assert!(store.delete_selected_content_api().await.is_err());

        assert_eq!(
            store.error().as_deref(),
            Some("Failed to delete items: HTTP error! status: 500")
        );
        assert_eq!(store.selected_content_keys().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_pin() {
        let (api, store) = setup(vec![]);
        api.fail_next(ApiError::Http { status: 401, message: Some("Invalid PIN".into()) });

        assert!(store.submit_pin_api("0000").await.is_err());
        assert_eq!(store.lock_state(), LockState::Locked);
        assert_eq!(store.error().as_deref(), Some("Login failed: Invalid PIN"));
        assert_eq!(api.calls(), vec!["authenticate"]);
    }

    #[tokio::test]
    async fn test_pin_does_not_fetch_hidden() {
        let (api, store) = setup(vec![]);
        api.set_hidden(vec![note(5, "secret").into()]);

        store.submit_pin_api("1234").await.unwrap();
        assert_eq!(store.lock_state(), LockState::Unlocking);
        assert!(store.hidden_content().is_empty());

        store.fetch_hidden_content_api().await.unwrap();
        assert_eq!(store.lock_state(), LockState::Unlocked);
        assert_eq!(store.hidden_content().len(), 1);
    }

    #[tokio::test]
    async fn test_auth_status() {
        let (api, store) = setup(vec![]);
        assert!(!store.check_auth_status_api().await.unwrap());

        api.set_logged_in(true);
        assert!(store.check_auth_status_api().await.unwrap());
    }

    #[tokio::test]
    async fn test_lapsed_session_relocks() {
        let (api, store) = setup(vec![]);
        unlocked(&api, &store, vec![note(5, "secret").into()]).await;

        api.set_logged_in(false);
        assert!(!store.check_auth_status_api().await.unwrap());
        assert_eq!(store.lock_state(), LockState::Locked);
        assert!(store.hidden_content().is_empty());
    }

    #[tokio::test]
    async fn test_hide_hidden_content_swallows_logout_failure() {
        let (api, store) = setup(vec![]);
        unlocked(&api, &store, vec![note(5, "secret").into()]).await;

        api.fail_next(ApiError::Network("offline".into()));
        store.hide_hidden_content().await;

        assert!(store.hidden_content().is_empty());
        assert_eq!(store.lock_state(), LockState::Locked);
        assert_eq!(store.error(), None);
        assert_eq!(api.calls().last(), Some(&"logout"));
    }

    #[tokio::test]
    async fn test_logout_failure_is_reported() {
        let (api, store) = setup(vec![]);
        api.fail_next(ApiError::Http { status: 500, message: None });

        assert!(store.logout_api().await.is_err());
        assert_eq!(store.error().as_deref(), Some("Logout failed: HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn test_checklist_items_lifecycle() {
        let (api, store) = setup(vec![checklist(1, "groceries").into()]);
        store.fetch_content_api().await.unwrap();

        store.add_checklist_item_api(1, "milk").await.unwrap();
        let added = match &store.content()[0] {
            Content::Checklist(list) => list.items[0].clone(),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(added.content, "milk");

        store
            .update_checklist_item_api(1, added.id, &ChecklistItemPatch::checked(true))
            .await
            .unwrap();
        match &store.content()[0] {
            Content::Checklist(list) => assert!(list.items[0].checked),
            other => panic!("unexpected {:?}", other),
        }

        store.delete_checklist_item_api(1, added.id).await.unwrap();
        match &store.content()[0] {
            Content::Checklist(list) => assert!(list.items.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            api.calls(),
            vec!["list_content", "add_checklist_item", "update_checklist_item", "delete_checklist_item"]
        );
    }

    #[tokio::test]
    async fn test_item_of_hidden_checklist_is_not_reconciled() {
        let mut secret = checklist(4, "secret");
        secret.hidden = true;
        secret.items.push(item(40, 4, "old"));
        let (api, store) = setup(vec![]);
        api.seed_item(item(40, 4, "old"));
        unlocked(&api, &store, vec![secret.into()]).await;

        store
            .update_checklist_item_api(4, 40, &ChecklistItemPatch::content("new"))
            .await
            .unwrap();

        match &store.hidden_content()[0] {
            Content::Checklist(list) => assert_eq!(list.items[0].content, "old"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_item_failure_leaves_loading_alone() {
        let (api, store) = setup(vec![checklist(1, "groceries").into()]);
        store.fetch_content_api().await.unwrap();

        assert!(store
            .update_checklist_item_api(1, 999, &ChecklistItemPatch::position(2))
            .await
            .is_err());
        assert_eq!(store.error().as_deref(), Some("Failed to update item: Checklist item not found"));
        assert!(!store.loading());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_paste_updates_clipboard_note() {
        let api = Arc::new(MockApi::with_content(vec![clipboard_note(3, "old").into()]));
        let store = ContentStore::new(api.clone())
            .with_clipboard(Arc::new(MockClipboard(Ok("fresh text".into()))));
        store.fetch_content_api().await.unwrap();

        store.paste_to_clipboard_note_api().await.unwrap();

        assert_eq!(store.clipboard_note().map(|n| n.content), Some("fresh text".into()));
        assert!(store.content().is_empty());
        assert_eq!(api.calls().last(), Some(&"update_note"));
    }

    #[tokio::test]
    async fn test_paste_without_permission() {
        let api = Arc::new(MockApi::with_content(vec![clipboard_note(3, "old").into()]));
        let store = ContentStore::new(api.clone()).with_clipboard(Arc::new(MockClipboard(Err(
            ClipboardError::Read("NotAllowedError: Read permission denied".into()),
        ))));
        store.fetch_content_api().await.unwrap();

        let err = store.paste_to_clipboard_note_api().await.unwrap_err();

        assert!(matches!(err, PasteError::Clipboard(_)));
        let message = store.error().unwrap();
        assert!(message.contains("Ensure you have granted permission"));
        assert_eq!(store.clipboard_note().map(|n| n.content), Some("old".into()));
        assert_eq!(api.calls(), vec!["list_content"]);
    }

    #[tokio::test]
    async fn test_paste_unsupported_by_default() {
        let (_, store) = setup(vec![clipboard_note(3, "old").into()]);
        store.fetch_content_api().await.unwrap();

        assert!(store.paste_to_clipboard_note_api().await.is_err());
        assert_eq!(
            store.error().as_deref(),
            Some("Clipboard API not supported or permission denied.")
        );
    }

    #[tokio::test]
    async fn test_paste_blank_clipboard_is_rejected() {
        let api = Arc::new(MockApi::with_content(vec![clipboard_note(3, "old").into()]));
        let store = ContentStore::new(api.clone())
            .with_clipboard(Arc::new(MockClipboard(Ok("  \n".into()))));
        store.fetch_content_api().await.unwrap();

        let err = store.paste_to_clipboard_note_api().await.unwrap_err();

        assert_eq!(err, PasteError::EmptyClipboard);
        assert_eq!(store.clipboard_note().map(|n| n.content), Some("old".into()));
        assert_eq!(api.calls(), vec!["list_content"]);
    }

    #[tokio::test]
    async fn test_paste_without_clipboard_note() {
        let (_, store) = setup(vec![]);
        let err = store.paste_to_clipboard_note_api().await.unwrap_err();
        assert_eq!(err, PasteError::MissingClipboardNote);
        assert_eq!(
            store.error().as_deref(),
            Some("Clipboard note not found. Please refresh the page.")
        );
    }

    #[tokio::test]
    async fn test_partition_holds_across_fetches() {
        let mut secret = note(2, "B");
        secret.hidden = true;
        let (api, store) = setup(vec![note(1, "A").into(), secret.clone().into()]);
        unlocked(&api, &store, vec![secret.into()]).await;
        store.fetch_content_api().await.unwrap();

        let visible: Vec<_> = store.content().iter().map(Content::key).collect();
        let hidden: Vec<_> = store.hidden_content().iter().map(Content::key).collect();
        assert_eq!(visible, vec![ContentKey::note(1)]);
        assert_eq!(hidden, vec![ContentKey::note(2)]);
    }

    #[tokio::test]
    async fn test_fetch_shows_item_unhidden_by_another_client() {
        let mut secret = note(2, "B");
        secret.hidden = true;
        let (api, store) = setup(vec![note(1, "A").into()]);
        unlocked(&api, &store, vec![secret.into()]).await;

        // Another session unhides note 2 on the server
        let api_content = vec![note(1, "A").into(), note(2, "B").into()];
        api.set_content(api_content);
        store.fetch_content_api().await.unwrap();

        let visible: Vec<_> = store.content().iter().map(Content::key).collect();
        assert_eq!(visible, vec![ContentKey::note(1), ContentKey::note(2)]);
        assert!(store.hidden_content().is_empty());
        assert!(store.lock_state().is_unlocked());
    }

    #[tokio::test]
    async fn test_revision_tracks_commits() {
        let (_, store) = setup(vec![note(1, "A").into()]);
        let start = store.revision();
        store.fetch_content_api().await.unwrap();
        assert!(store.revision() > start);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.revision, store.revision());
        assert_eq!(snapshot.content, store.content());
    }

    #[tokio::test]
    async fn test_sync_observes_loading_while_fetch_is_in_flight() {
        let (api, store) = setup(vec![note(1, "A").into()]);
        api.set_slow_fetch();

        let mut observed = Vec::new();
        run_with_sync(store.fetch_content_api(), || {
            observed.push((store.loading(), store.content().len()))
        })
        .await
        .unwrap();

        assert_eq!(observed, vec![(true, 0), (false, 1)]);
    }

    #[tokio::test]
    async fn test_sync_runs_once_for_operation_that_never_suspends() {
        let (_api, store) = setup(vec![note(1, "A").into()]);

        let mut syncs = 0;
        run_with_sync(store.fetch_content_api(), || syncs += 1)
            .await
            .unwrap();

        assert_eq!(syncs, 1);
        assert!(!store.loading());
        assert_eq!(store.content().len(), 1);
    }
}
