pub mod store;


pub use store::{LocalStore, Preferences, SESSION_KEY, SIDEBAR_COLLAPSED_KEY, SessionStore};
