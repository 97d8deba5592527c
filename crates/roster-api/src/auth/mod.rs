//! Authentication and session module
//!
//! This module provides stateless JWT authentication with the following
//! components:
//! - Token issuance and verification
//! - Password hashing with Argon2
//! - Middleware gating protected routes
//! - Authentication service orchestrating registration and login
//! - Credential store over PostgreSQL

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;

pub use jwt::{issue_access_token, verify_access_token, Claims, JwtConfig};
pub use middleware::{auth_middleware, AuthError, AuthenticatedUser};
pub use models::{LoginRequest, RegisterRequest, User, UserPublic};
pub use password::{hash_password, verify_password, PasswordConfig};
pub use repository::{RepositoryError, UserRepository};
pub use service::AuthService;
