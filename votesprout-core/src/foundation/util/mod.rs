pub mod result_ext;
pub mod time;

pub use result_ext::ResultExt;
pub use time::now;
