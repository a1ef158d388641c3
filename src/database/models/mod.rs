pub mod court;
pub mod review;
pub mod user;

pub use court::{Court, CourtChanges, CourtDetail, NewCourt};
pub use review::{NewReview, Review, ReviewChanges};
pub use user::{CredentialChanges, NewUser, User, UserRecord};
