pub mod errors;
pub mod html;
pub mod redirect;

pub use errors::ResultResp;

pub use html::{html_response, html_response_with_status, text_response};
pub use redirect::redirect_response;
