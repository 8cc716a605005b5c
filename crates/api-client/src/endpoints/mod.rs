//! Endpoint-specific API implementations
//!
//! | Module | Backend routes |
//! |--------|----------------|
//! | `users` | `POST /users`, `GET /users/{id}`, `GET /users/{id}/discards` |
//! | `discards` | `POST /discards`, `GET /community_discards` |

pub mod discards;
pub mod users;

pub use discards::{CreatedDiscard, DiscardRecord, DiscardsApi, NewDiscard, POINTS_PER_DISCARD};
pub use users::{CreatedUser, NewUser, User, UsersApi};
