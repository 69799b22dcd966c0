//! Asynchronous Exchange Web Services (EWS) client library for Rust.
//!
//! This library talks the SOAP-over-HTTP dialect Exchange servers expose for
//! mailbox access, built on modern Rust ecosystem components including
//! hyper 1.x, rustls, tokio, and quick-xml.
//!
//! # Features
//!
//! - Typed item model for tasks, contacts, and e-mail messages
//! - CreateItem / GetItem / UpdateItem / DeleteItem operations
//! - Namespace-aware XML handling independent of server prefix choices
//! - Detached property fragments: items outlive the responses they came from
//! - SOAP fault and per-operation response-code decoding
//! - Automatic response decompression (br/zstd/gzip)
//! - HTTP/2-capable connection pooling over rustls
//!
//! # Examples
//!
//! ## Creating and Fetching a Task
//!
//! ```no_run
//! use fast_ews_rs::{Credentials, ExchangeService, Task};
//!
//! #[tokio::main]
//! async fn main() -> fast_ews_rs::Result<()> {
//!     let service = ExchangeService::new(
//!         "https://outlook.example.com/EWS/Exchange.asmx",
//!         &Credentials::basic("username", "password"),
//!     )?;
//!
//!     let mut task = Task::new();
//!     task.set_subject("Write poem");
//!     task.set_due_date("2026-09-01T09:00:00Z");
//!
//!     let id = service.create_item(&task).await?;
//!     let stored = service.get_task(&id).await?;
//!     println!("Created task: {}", stored.get_subject());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Updating and Deleting
//!
//! ```no_run
//! use fast_ews_rs::{Credentials, ExchangeService, PropertyPath, Task};
//!
//! #[tokio::main]
//! async fn main() -> fast_ews_rs::Result<()> {
//!     let service = ExchangeService::new(
//!         "https://outlook.example.com/EWS/Exchange.asmx",
//!         &Credentials::basic("username", "password"),
//!     )?;
//!
//!     # let id = fast_ews_rs::ItemId::new("abc", "def");
//!     let task = service.get_task(&id).await?;
//!
//!     // Each update returns the item's new id (the change key moves).
//!     let new_id = service
//!         .update_item(&task, PropertyPath::TaskDueDate, "2026-09-15T09:00:00Z")
//!         .await?;
//!
//!     let mut task = service.get_task(&new_id).await?;
//!     service.delete_item(&mut task).await?;
//!     assert!(!task.item_id().is_valid());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Handling Server-Reported Errors
//!
//! ```no_run
//! use fast_ews_rs::{Credentials, Error, ExchangeService, ItemId, ResponseCode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = ExchangeService::new(
//!         "https://outlook.example.com/EWS/Exchange.asmx",
//!         &Credentials::basic("username", "password"),
//!     )?;
//!
//!     let id = ItemId::new("no-such-item", "");
//!     match service.get_task(&id).await {
//!         Ok(task) => println!("found: {}", task.get_subject()),
//!         Err(Error::Response(ResponseCode::ErrorItemNotFound)) => {
//!             println!("item is gone");
//!         }
//!         Err(other) => return Err(other.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod codes;
pub mod common;
pub mod items;
pub mod ns;
pub mod service;
pub mod soap;
pub mod xml;

pub use codes::ResponseCode;
pub use common::error::{Error, Result};
pub use items::{AttachmentId, Contact, Item, ItemId, Message, Task};
pub use service::{Credentials, ExchangeService, HyperTransport, PropertyPath, Transport};
pub use soap::{ResponseClass, ServerVersion, SoapResponse};
pub use xml::{XmlDocument, XmlFragment};
