pub mod envelope;
pub mod response;
pub mod response_message;

pub use envelope::{ServerVersion, build_envelope};
pub use response::SoapResponse;
pub use response_message::{
    FromXmlElement, ResponseClass, ResponseMessage, for_each_item, parse_response_class_and_code,
    parse_response_message, response_class_and_code,
};
