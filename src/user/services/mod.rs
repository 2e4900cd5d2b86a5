//! Application services for user account management.

mod account;

pub use account::{
    RegisterUserRequest, UpdateUserRequest, UserAccountService, UserService, UserServiceError,
    UserServiceResult,
};

#[cfg(test)]
pub use account::MockUserService;
