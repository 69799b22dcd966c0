//! The operation surface: credentials, the transport seam, and
//! [`ExchangeService`] with one method per server operation.
//!
//! Every operation follows the same arc: build the operation body as a
//! string, wrap it in the envelope, hand it to the transport (the single
//! suspension point), classify the HTTP status, then parse the response
//! message. Transport and server-reported failures surface as [`Error`]
//! values; responses that break the protocol's own guarantees panic.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{self, HeaderValue};
use hyper::{Request, Uri};
use tracing::{debug, warn};

use crate::common::compression::{add_accept_encoding, decompress_body, detect_encodings};
use crate::common::error::{Error, Result};
use crate::common::http::{HyperClient, build_hyper_client};
use crate::items::{Contact, Item, ItemId, Message, Task};
use crate::soap::envelope::{ServerVersion, build_envelope};
use crate::soap::response::SoapResponse;
use crate::soap::response_message::{
    FromXmlElement, ResponseClass, parse_response_class_and_code, parse_response_message,
};
use crate::xml::document::escape_xml;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Authentication material for the endpoint.
///
/// A closed set: callers pick a variant instead of supplying header-writing
/// callbacks, and the transport renders it when each request is built.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// HTTP Basic. With a domain the username is sent as `domain\user`.
    Basic {
        domain: Option<String>,
        username: String,
        password: String,
    },
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            domain: None,
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn ntlm_style(
        domain: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Credentials::Basic {
            domain: Some(domain.into()),
            username: username.into(),
            password: password.into(),
        }
    }

    fn authorization_header(&self) -> HeaderValue {
        match self {
            Credentials::Basic {
                domain,
                username,
                password,
            } => {
                let user = match domain {
                    Some(domain) => format!("{domain}\\{username}"),
                    None => username.clone(),
                };
                let token = BASE64.encode(format!("{user}:{password}"));
                let mut value = HeaderValue::from_str(&format!("Basic {token}"))
                    .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
                value.set_sensitive(true);
                value
            }
        }
    }
}

/// The seam between operation logic and the network. Implementations return
/// the HTTP status and the fully aggregated, decoded body.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, body: String) -> Result<(u16, Bytes)>;
}

/// Default transport: Hyper over rustls with compressed-response support and
/// a per-request deadline.
#[derive(Debug)]
pub struct HyperTransport {
    endpoint: Uri,
    client: HyperClient,
    authorization: HeaderValue,
    timeout: Duration,
}

impl HyperTransport {
    pub fn new(url: &str, credentials: &Credentials) -> Result<Self> {
        let endpoint: Uri = url
            .parse()
            .map_err(|err| Error::Transport(anyhow::Error::new(err)))?;
        let client = build_hyper_client().map_err(Error::Transport)?;
        Ok(Self {
            endpoint,
            client,
            authorization: credentials.authorization_header(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}

impl Transport for HyperTransport {
    async fn post(&self, body: String) -> Result<(u16, Bytes)> {
        let mut request = Request::post(self.endpoint.clone())
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/xml; charset=utf-8"),
            )
            .header(header::AUTHORIZATION, self.authorization.clone())
            .body(Full::new(Bytes::from(body)))
            .map_err(|err| Error::Transport(anyhow::Error::new(err)))?;
        add_accept_encoding(request.headers_mut());

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| Error::Transport(anyhow::anyhow!("request timed out")))?
            .map_err(|err| Error::Transport(anyhow::Error::new(err)))?;

        let status = response.status().as_u16();
        let encodings = detect_encodings(response.headers());
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| Error::Transport(anyhow::Error::new(err)))?
            .to_bytes();
        let body = decompress_body(body, &encodings)
            .await
            .map_err(Error::Transport)?;
        Ok((status, body))
    }
}

/// Addressable item properties for field updates.
///
/// Each entry pairs the server's field URI with the property element the new
/// value is written into. The set is closed; an unsupported property is a
/// compile error at the call site, never a malformed request on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyPath {
    ItemSubject,
    ItemBody,
    ItemSensitivity,
    ItemImportance,
    TaskStartDate,
    TaskDueDate,
    TaskStatus,
    TaskPercentComplete,
    TaskActualWork,
    TaskTotalWork,
    ContactGivenName,
    ContactSurname,
    ContactJobTitle,
    ContactCompanyName,
    ContactDepartment,
    ContactSpouseName,
    MessageIsRead,
}

impl PropertyPath {
    pub fn field_uri(&self) -> &'static str {
        match self {
            PropertyPath::ItemSubject => "item:Subject",
            PropertyPath::ItemBody => "item:Body",
            PropertyPath::ItemSensitivity => "item:Sensitivity",
            PropertyPath::ItemImportance => "item:Importance",
            PropertyPath::TaskStartDate => "task:StartDate",
            PropertyPath::TaskDueDate => "task:DueDate",
            PropertyPath::TaskStatus => "task:Status",
            PropertyPath::TaskPercentComplete => "task:PercentComplete",
            PropertyPath::TaskActualWork => "task:ActualWork",
            PropertyPath::TaskTotalWork => "task:TotalWork",
            PropertyPath::ContactGivenName => "contact:GivenName",
            PropertyPath::ContactSurname => "contact:Surname",
            PropertyPath::ContactJobTitle => "contact:JobTitle",
            PropertyPath::ContactCompanyName => "contact:CompanyName",
            PropertyPath::ContactDepartment => "contact:Department",
            PropertyPath::ContactSpouseName => "contact:SpouseName",
            PropertyPath::MessageIsRead => "message:IsRead",
        }
    }

    /// Local name of the property element carrying the replacement value.
    pub fn element_name(&self) -> &'static str {
        match self {
            PropertyPath::ItemSubject => "Subject",
            PropertyPath::ItemBody => "Body",
            PropertyPath::ItemSensitivity => "Sensitivity",
            PropertyPath::ItemImportance => "Importance",
            PropertyPath::TaskStartDate => "StartDate",
            PropertyPath::TaskDueDate => "DueDate",
            PropertyPath::TaskStatus => "Status",
            PropertyPath::TaskPercentComplete => "PercentComplete",
            PropertyPath::TaskActualWork => "ActualWork",
            PropertyPath::TaskTotalWork => "TotalWork",
            PropertyPath::ContactGivenName => "GivenName",
            PropertyPath::ContactSurname => "Surname",
            PropertyPath::ContactJobTitle => "JobTitle",
            PropertyPath::ContactCompanyName => "CompanyName",
            PropertyPath::ContactDepartment => "Department",
            PropertyPath::ContactSpouseName => "SpouseName",
            PropertyPath::MessageIsRead => "IsRead",
        }
    }
}

/// Client handle for one endpoint. Generic over the transport so tests can
/// substitute a canned one.
#[derive(Debug)]
pub struct ExchangeService<T = HyperTransport> {
    transport: T,
    server_version: Option<ServerVersion>,
}

impl ExchangeService<HyperTransport> {
    pub fn new(url: &str, credentials: &Credentials) -> Result<Self> {
        Ok(Self::with_transport(HyperTransport::new(url, credentials)?))
    }
}

impl<T: Transport> ExchangeService<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            server_version: Some(ServerVersion::Exchange2013Sp1),
        }
    }

    /// Version advertised in the request header; `None` omits the header.
    pub fn set_server_version(&mut self, version: Option<ServerVersion>) {
        self.server_version = version;
    }

    async fn request(&self, operation_body: String) -> Result<SoapResponse> {
        let envelope = build_envelope(&operation_body, self.server_version);
        debug!(bytes = envelope.len(), "sending request");
        let (status, body) = self.transport.post(envelope).await?;
        debug!(status, bytes = body.len(), "received response");
        if status != 200 && status != 500 {
            warn!(status, "unexpected HTTP status");
            return Err(Error::UnexpectedHttpStatus(status));
        }
        Ok(SoapResponse::new(status, body))
    }

    /// Store a new item and bind it to the returned id. The passed item is
    /// not mutated; callers that want the stored form back fetch it by id.
    pub async fn create_item<I: Item>(&self, item: &I) -> Result<ItemId> {
        let body = format!(
            "<m:CreateItem{attrs}><m:Items>{item}</m:Items></m:CreateItem>",
            attrs = I::CREATE_ATTRIBUTES,
            item = item.to_create_request_body()
        );
        let response = self.request(body).await?;
        let message =
            parse_response_message::<ItemId>(&response, "CreateItemResponseMessage")?
                .into_result()?;
        let id = message
            .items
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("CreateItem succeeded without an item id"));
        Ok(id)
    }

    pub async fn get_task(&self, id: &ItemId) -> Result<Task> {
        self.get_item(id).await
    }

    pub async fn get_contact(&self, id: &ItemId) -> Result<Contact> {
        self.get_item(id).await
    }

    pub async fn get_message(&self, id: &ItemId) -> Result<Message> {
        self.get_item(id).await
    }

    async fn get_item<I: Item + FromXmlElement>(&self, id: &ItemId) -> Result<I> {
        let body = format!(
            "<m:GetItem>\
             <m:ItemShape><t:BaseShape>AllProperties</t:BaseShape></m:ItemShape>\
             <m:ItemIds>{id}</m:ItemIds>\
             </m:GetItem>",
            id = id.to_xml()
        );
        let response = self.request(body).await?;
        let message =
            parse_response_message::<I>(&response, "GetItemResponseMessage")?.into_result()?;
        let item = message
            .items
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("GetItem succeeded without an item"));
        Ok(item)
    }

    pub async fn delete_task(&self, task: &mut Task) -> Result<()> {
        self.delete_item(task).await
    }

    pub async fn delete_contact(&self, contact: &mut Contact) -> Result<()> {
        self.delete_item(contact).await
    }

    pub async fn delete_message(&self, message: &mut Message) -> Result<()> {
        self.delete_item(message).await
    }

    /// Hard-delete the item behind `item`'s id. On success the local id is
    /// reset so the item can no longer address the deleted object.
    pub async fn delete_item<I: Item>(&self, item: &mut I) -> Result<()> {
        let body = format!(
            "<m:DeleteItem DeleteType=\"HardDelete\"{attrs}>\
             <m:ItemIds>{id}</m:ItemIds>\
             </m:DeleteItem>",
            attrs = I::DELETE_ATTRIBUTES,
            id = item.item_id().to_xml()
        );
        let response = self.request(body).await?;
        let (class, code) =
            parse_response_class_and_code(&response, "DeleteItemResponseMessage")?;
        if class != ResponseClass::Success {
            return Err(Error::Response(code));
        }
        item.set_item_id(ItemId::default());
        Ok(())
    }

    /// Replace one property server-side and return the item's new id. The
    /// passed item keeps its old id and property values; re-fetch to observe
    /// the update.
    pub async fn update_item<I: Item>(
        &self,
        item: &I,
        path: PropertyPath,
        value: &str,
    ) -> Result<ItemId> {
        let body = format!(
            "<m:UpdateItem ConflictResolution=\"AutoResolve\"{attrs}>\
             <m:ItemChanges><t:ItemChange>{id}<t:Updates>\
             <t:SetItemField><t:FieldURI FieldURI=\"{uri}\"/>\
             <t:{item_el}><t:{field_el}>{value}</t:{field_el}></t:{item_el}>\
             </t:SetItemField>\
             </t:Updates></t:ItemChange></m:ItemChanges>\
             </m:UpdateItem>",
            attrs = I::CREATE_ATTRIBUTES,
            id = item.item_id().to_xml(),
            uri = path.field_uri(),
            item_el = I::ELEMENT_NAME,
            field_el = path.element_name(),
            value = escape_xml(value)
        );
        let response = self.request(body).await?;
        let message =
            parse_response_message::<ItemId>(&response, "UpdateItemResponseMessage")?
                .into_result()?;
        let id = message
            .items
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("UpdateItem succeeded without an item id"));
        Ok(id)
    }
}
