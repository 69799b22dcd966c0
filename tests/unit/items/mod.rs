mod item_id_tests;
mod message_tests;
