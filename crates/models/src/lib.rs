pub mod errors;
pub mod db;
pub mod role;
pub mod employee;
pub mod employee_phone;

pub use role::Role;
