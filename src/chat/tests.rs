#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, TimeZone};

    use crate::chat::grouping::{date_bucket, group_conversations, DateBucket};
    use crate::chat::store::{ChatStore, SENTINEL_TITLE, WELCOME_TEXT};
    use crate::models::{Conversation, Message, Role};
    use crate::storage::{MemoryStorage, StorageBackend, CONVERSATIONS_KEY};

    fn test_store() -> ChatStore {
        ChatStore::load(Box::new(MemoryStorage::new()))
    }

    fn conversation_at(id: &str, updated_at: i64) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: id.to_string(),
            messages: vec![Message::assistant(WELCOME_TEXT)],
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn fresh_store_seeds_one_default_conversation() {
        let store = test_store();

        assert_eq!(store.conversations().len(), 1);
        let conv = store.current().unwrap();
        assert_eq!(conv.title, SENTINEL_TITLE);
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].role, Role::Assistant);
        assert_eq!(conv.messages[0].content, WELCOME_TEXT);
        assert_eq!(conv.created_at, conv.updated_at);
    }

    #[test]
    fn store_never_becomes_empty_under_deletes() {
        let mut store = test_store();
        store.create_conversation();
        store.create_conversation();

        for _ in 0..10 {
            let id = store.conversations()[0].id.clone();
            store.delete_conversation(&id);

            assert!(!store.conversations().is_empty());
            let current = store.current_id().to_string();
            assert!(
                store.conversations().iter().any(|c| c.id == current),
                "current id must refer to an existing conversation"
            );
        }
    }

    #[test]
    fn deleting_the_last_conversation_creates_a_fresh_one() {
        let mut store = test_store();
        let old_id = store.current_id().to_string();

        store.delete_conversation(&old_id);

        assert_eq!(store.conversations().len(), 1);
        let conv = store.current().unwrap();
        assert_ne!(conv.id, old_id);
        assert_eq!(conv.title, SENTINEL_TITLE);
        assert_eq!(conv.messages, vec![Message::assistant(WELCOME_TEXT)]);
    }

    #[test]
    fn append_preserves_order() {
        let mut store = test_store();

        store.add_message(Message::user("m1"));
        store.add_message(Message::assistant("m2"));
        store.add_message(Message::user("m3"));

        let messages = store.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].content, WELCOME_TEXT);
        assert_eq!(messages[1].content, "m1");
        assert_eq!(messages[2].content, "m2");
        assert_eq!(messages[3].content, "m3");
    }

    #[test]
    fn append_refreshes_updated_at_only_for_current() {
        let mut store = test_store();
        let other_id = store.current_id().to_string();
        store.create_conversation();

        let before = store
            .conversations()
            .iter()
            .find(|c| c.id == other_id)
            .unwrap()
            .clone();

        store.add_message(Message::user("hello"));

        let current = store.current().unwrap();
        assert!(current.updated_at >= current.created_at);

        let other = store
            .conversations()
            .iter()
            .find(|c| c.id == other_id)
            .unwrap();
        assert_eq!(other, &before, "other conversations are untouched");
    }

    #[test]
    fn short_first_user_message_becomes_title_verbatim() {
        let mut store = test_store();
        store.add_message(Message::user("Explain photosynthesis"));

        assert_eq!(store.current().unwrap().title, "Explain photosynthesis");
    }

    #[test]
    fn long_first_user_message_is_truncated_with_ellipsis() {
        let mut store = test_store();
        let content = "a".repeat(45);
        store.add_message(Message::user(content.clone()));

        let expected = format!("{}...", &content[..30]);
        assert_eq!(store.current().unwrap().title, expected);
    }

    #[test]
    fn assistant_messages_do_not_derive_a_title() {
        let mut store = test_store();
        store.add_message(Message::assistant("Anything else?"));

        assert_eq!(store.current().unwrap().title, SENTINEL_TITLE);
    }

    #[test]
    fn manual_rename_is_never_overwritten_by_derivation() {
        let mut store = test_store();
        let id = store.current_id().to_string();

        store.rename_conversation(&id, "  Physics homework  ");
        assert_eq!(store.current().unwrap().title, "Physics homework");

        store.add_message(Message::user("Explain quantum entanglement"));
        assert_eq!(store.current().unwrap().title, "Physics homework");
    }

    #[test]
    fn rename_with_blank_title_is_a_noop() {
        let mut store = test_store();
        let id = store.current_id().to_string();
        store.add_message(Message::user("Tides"));
        let before = store.current().unwrap().clone();

        store.rename_conversation(&id, "   ");

        assert_eq!(store.current().unwrap(), &before);
    }

    #[test]
    fn create_prepends_and_selects_without_touching_others() {
        let mut store = test_store();
        store.add_message(Message::user("first topic"));
        let old = store.current().unwrap().clone();

        let new_id = store.create_conversation().id.clone();

        assert_eq!(store.conversations().len(), 2);
        assert_eq!(store.conversations()[0].id, new_id);
        assert_eq!(store.current_id(), new_id);
        assert_eq!(store.conversations()[1], old);
    }

    #[test]
    fn deleting_current_selects_new_head() {
        let mut store = test_store();
        // Head-first after two creates: [c, b, a], current = c.
        store.create_conversation();
        store.create_conversation();
        let head = store.conversations()[0].id.clone();
        let next = store.conversations()[1].id.clone();
        assert_eq!(store.current_id(), head);

        store.delete_conversation(&head);

        assert_eq!(store.current_id(), next);
    }

    #[test]
    fn deleting_non_current_keeps_selection() {
        let mut store = test_store();
        store.create_conversation();
        store.create_conversation();
        let current = store.current_id().to_string();
        let tail = store.conversations()[2].id.clone();

        store.delete_conversation(&tail);

        assert_eq!(store.current_id(), current);
        assert_eq!(store.conversations().len(), 2);
    }

    #[test]
    fn switch_to_unknown_id_leaves_selection_unchanged() {
        let mut store = test_store();
        let current = store.current_id().to_string();

        assert!(!store.switch_conversation("conv_0_missing"));
        assert_eq!(store.current_id(), current);
    }

    #[test]
    fn switch_to_existing_id_moves_selection() {
        let mut store = test_store();
        let old = store.current_id().to_string();
        store.create_conversation();

        assert!(store.switch_conversation(&old));
        assert_eq!(store.current_id(), old);
    }

    #[test]
    fn round_trip_persistence_preserves_list_and_selects_head() {
        let storage = MemoryStorage::new();

        let mut store = ChatStore::load(Box::new(storage.clone()));
        store.add_message(Message::user("What is entropy?"));
        store.add_message(Message::assistant("A measure of disorder."));
        store.create_conversation();
        let id = store.current_id().to_string();
        store.rename_conversation(&id, "Thermo");
        let saved: Vec<Conversation> = store.conversations().to_vec();
        drop(store);

        let reloaded = ChatStore::load(Box::new(storage));
        assert_eq!(reloaded.conversations(), saved.as_slice());
        assert_eq!(reloaded.current_id(), saved[0].id);
    }

    #[test]
    fn corrupt_payload_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set(CONVERSATIONS_KEY, "{not json").unwrap();

        let store = ChatStore::load(Box::new(storage));

        assert_eq!(store.conversations().len(), 1);
        assert_eq!(store.current().unwrap().title, SENTINEL_TITLE);
    }

    #[test]
    fn malformed_entries_are_ignored_individually() {
        let good = serde_json::to_value(conversation_at("conv_1_good", 1000)).unwrap();
        let snapshot = serde_json::json!({
            "version": 1,
            "conversations": [good, {"id": 42}, "garbage"],
        });
        let storage = MemoryStorage::new();
        storage
            .set(CONVERSATIONS_KEY, &snapshot.to_string())
            .unwrap();

        let store = ChatStore::load(Box::new(storage));

        assert_eq!(store.conversations().len(), 1);
        assert_eq!(store.current_id(), "conv_1_good");
    }

    #[test]
    fn legacy_bare_array_payload_is_accepted() {
        let legacy = serde_json::json!([
            serde_json::to_value(conversation_at("conv_1_aaa", 1000)).unwrap(),
            serde_json::to_value(conversation_at("conv_2_bbb", 2000)).unwrap(),
        ]);
        let storage = MemoryStorage::new();
        storage.set(CONVERSATIONS_KEY, &legacy.to_string()).unwrap();

        let store = ChatStore::load(Box::new(storage));

        assert_eq!(store.conversations().len(), 2);
        assert_eq!(store.current_id(), "conv_1_aaa");
    }

    #[test]
    fn unknown_snapshot_version_falls_back_to_default() {
        let snapshot = serde_json::json!({
            "version": 99,
            "conversations": [serde_json::to_value(conversation_at("conv_1_zzz", 1000)).unwrap()],
        });
        let storage = MemoryStorage::new();
        storage
            .set(CONVERSATIONS_KEY, &snapshot.to_string())
            .unwrap();

        let store = ChatStore::load(Box::new(storage));

        assert_eq!(store.conversations().len(), 1);
        assert_ne!(store.current_id(), "conv_1_zzz");
    }

    #[test]
    fn buckets_use_calendar_days_not_elapsed_hours() {
        let now = Local.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();

        let today = now.timestamp_millis();
        let yesterday = (now - Duration::hours(26)).timestamp_millis();
        let four_days = (now - Duration::hours(100)).timestamp_millis();

        assert_eq!(date_bucket(today, now), DateBucket::Today);
        assert_eq!(date_bucket(yesterday, now), DateBucket::Yesterday);
        assert_eq!(date_bucket(four_days, now), DateBucket::DaysAgo(4));
    }

    #[test]
    fn same_calendar_day_is_today_even_near_midnight() {
        // 23h59m59s elapsed, but still the same local date.
        let now = Local.with_ymd_and_hms(2026, 8, 26, 23, 59, 59).unwrap();
        let this_morning = Local.with_ymd_and_hms(2026, 8, 26, 0, 0, 0).unwrap();

        assert_eq!(
            date_bucket(this_morning.timestamp_millis(), now),
            DateBucket::Today
        );
    }

    #[test]
    fn exactly_24_hours_across_midnight_is_yesterday() {
        let now = Local.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let a_day_ago = now - Duration::hours(24);

        assert_eq!(
            date_bucket(a_day_ago.timestamp_millis(), now),
            DateBucket::Yesterday
        );
    }

    #[test]
    fn week_old_conversations_show_the_calendar_date() {
        let now = Local.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let last_week = now - Duration::days(8);

        assert_eq!(
            date_bucket(last_week.timestamp_millis(), now),
            DateBucket::Date("8/18/2026".to_string())
        );
    }

    #[test]
    fn grouping_preserves_order_and_never_mutates() {
        let now = Local.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let conversations = vec![
            conversation_at("a", now.timestamp_millis()),
            conversation_at("b", (now - Duration::hours(26)).timestamp_millis()),
            conversation_at("c", now.timestamp_millis()),
        ];

        let groups = group_conversations(&conversations, now);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, DateBucket::Today);
        let today_ids: Vec<&str> = groups[0].1.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(today_ids, vec!["a", "c"]);
        assert_eq!(groups[1].0, DateBucket::Yesterday);
        assert_eq!(groups[1].1[0].id, "b");
    }
}
