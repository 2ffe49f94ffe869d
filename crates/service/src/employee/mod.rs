//! Employee roster: domain types, authorization policy, persistence seam and
//! the service orchestrating them.

pub mod domain;
pub mod policy;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Actor, Employee, EmployeeProfile, EmployeeUpdate, NewEmployee};
pub use repository::EmployeeRepository;
pub use service::EmployeeService;
