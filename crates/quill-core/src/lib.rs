//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post lifecycle, the access policy and the ports infrastructure implements.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::{DomainError, FieldError, RepoError};
pub use policy::AccessPolicy;
