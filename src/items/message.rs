use crate::items::ews_item;

ews_item! {
    /// An e-mail message.
    ///
    /// Creation uses `MessageDisposition="SaveOnly"`: the message is stored
    /// as a draft and nothing is sent.
    Message {
        element: "Message",
        create_attributes: r#" MessageDisposition="SaveOnly""#,
    }
}

impl Message {
    pub fn is_read(&self) -> bool {
        self.properties.get_value("IsRead") == "true"
    }

    pub fn set_is_read(&mut self, read: bool) {
        self.properties
            .set_or_update("IsRead", if read { "true" } else { "false" });
    }

    pub fn get_internet_message_id(&self) -> String {
        self.properties.get_value("InternetMessageId")
    }

    pub fn get_conversation_topic(&self) -> String {
        self.properties.get_value("ConversationTopic")
    }

    pub fn get_references(&self) -> String {
        self.properties.get_value("References")
    }

    pub fn set_references(&mut self, references: &str) {
        self.properties.set_or_update("References", references);
    }
}
