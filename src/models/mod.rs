pub mod request;
pub mod suite;
pub mod template;
pub mod test_case;
pub mod test_result;
pub mod test_status;

pub use request::*;
pub use suite::*;
pub use template::*;
pub use test_case::*;
pub use test_result::*;
pub use test_status::*;
