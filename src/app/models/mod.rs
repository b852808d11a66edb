pub mod api_error;
pub mod form_from_request;
pub mod json_from_request;
