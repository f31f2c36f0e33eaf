//! Backend Contract Client: typed, credentialed access to the Task API.

pub mod client;
pub mod types;

pub use client::TaskApiClient;
pub use types::{
    CallCreate, CallStatus, Health, ScheduledCall, Task, TaskCreate, TaskStatus, User, UserCreate,
    UserType,
};
