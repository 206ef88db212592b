pub mod search_result;
pub mod session;


pub use search_result::{
    GlobalSearchFilters, GlobalSearchResponse, ResultDetails, SearchResult, SearchResultKind,
};
pub use session::{
    AuthApiResponse, LoginCredentials, MessageResponse, Role, Session, SignupCredentials, User,
    Workspace,
};
