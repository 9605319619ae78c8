//! Property-based tests for send request validation

use marketchat::shared::messaging::SendMessageRequest;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_blank_bodies_are_rejected(sender in 1i64..1000, receiver in 1i64..1000, body in "[ \t\r\n]*") {
        let request = SendMessageRequest::new(receiver, body, None);
        prop_assert!(request.validate(sender).is_err());
    }

    #[test]
    fn test_body_is_kept_verbatim(
        sender in 1i64..1000,
        offset in 1i64..1000,
        body in "[ ]{0,3}[a-z]{1,20}[ ]{0,3}",
    ) {
        let receiver = sender + offset;
        let new_message = SendMessageRequest::new(receiver, body.clone(), None).validate(sender).unwrap();
        prop_assert_eq!(new_message.body, body);
        prop_assert_eq!(new_message.receiver_id, receiver);
    }

    #[test]
    fn test_self_messages_are_rejected(user in 1i64..1000, body in "[a-z]{1,20}") {
        prop_assert!(SendMessageRequest::new(user, body, None).validate(user).is_err());
    }
}
