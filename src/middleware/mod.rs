pub mod logger;
pub mod request_tracking;

pub use request_tracking::{REQUEST_ID_HEADER, RequestId, extract_request_id, request_tracking_middleware};
