//! Property-based tests for transcript de-duplication

use std::collections::HashSet;

use marketchat::client::ChatSession;
use proptest::prelude::*;

use crate::common::builders::chat_message;

proptest! {
    #[test]
    fn test_each_message_appears_once(
        history_ids in proptest::collection::vec(1i64..50, 0..20),
        pushed_ids in proptest::collection::vec(1i64..50, 0..40),
    ) {
        let mut session = ChatSession::new(3, 7);

        let mut unique_history: Vec<i64> = history_ids.clone();
        unique_history.sort_unstable();
        unique_history.dedup();
        session.load_history(unique_history.iter().map(|id| chat_message(*id, 3, 7)).collect());

        for id in &pushed_ids {
            session.apply_push(chat_message(*id, 7, 3));
        }

        let shown: Vec<i64> = session.transcript().iter().map(|m| m.id).collect();
        let distinct: HashSet<i64> = shown.iter().copied().collect();
        prop_assert_eq!(shown.len(), distinct.len());

        let expected: HashSet<i64> = unique_history.iter().chain(pushed_ids.iter()).copied().collect();
        prop_assert_eq!(distinct, expected);
    }

    #[test]
    fn test_pushes_for_other_pairs_are_dropped(ids in proptest::collection::vec(1i64..50, 0..20)) {
        let mut session = ChatSession::new(3, 7);
        for id in ids {
            prop_assert!(!session.apply_push(chat_message(id, 3, 9)));
        }
        prop_assert!(session.transcript().is_empty());
    }
}
