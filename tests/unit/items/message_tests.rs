use fast_ews_rs::{Item, Message};

#[test]
fn creation_stores_a_draft_instead_of_sending() {
    assert_eq!(
        <Message as Item>::CREATE_ATTRIBUTES,
        r#" MessageDisposition="SaveOnly""#
    );
    assert_eq!(<Message as Item>::ELEMENT_NAME, "Message");
    // Messages use the plain delete wrapper.
    assert_eq!(<Message as Item>::DELETE_ATTRIBUTES, "");
}

#[test]
fn read_flag_defaults_to_unread_and_round_trips() {
    let mut message = Message::new();
    assert!(!message.is_read());

    message.set_is_read(true);
    assert!(message.is_read());
    assert!(
        message
            .to_create_request_body()
            .contains("<t:IsRead>true</t:IsRead>")
    );

    message.set_is_read(false);
    assert!(!message.is_read());
}

#[test]
fn subject_and_body_use_the_shared_item_accessors() {
    let mut message = Message::new();
    message.set_subject("Hi from the tests");
    message.set_body("Nothing to see here.");

    assert_eq!(message.get_subject(), "Hi from the tests");
    assert_eq!(message.get_body(), "Nothing to see here.");
    assert!(
        message
            .to_create_request_body()
            .starts_with("<t:Message><t:Subject>")
    );
}
