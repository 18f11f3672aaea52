pub mod course;
pub mod enrollment;
pub mod paging;
pub mod user;
