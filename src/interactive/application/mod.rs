pub mod query_state;

#[cfg(test)]
mod query_state_test;

pub use query_state::QueryState;
