mod add;
mod clear;
mod list;
mod pause;
mod remove;
mod retry_failed;
mod status;
mod worker;

pub use add::run_add;
pub use clear::run_clear;
pub use list::run_list;
pub use pause::{run_pause, run_resume};
pub use remove::run_remove;
pub use retry_failed::run_retry_failed;
pub use status::run_status;
pub use worker::run_worker;
