use crate::api::{ApiError, ApiResult, AuthApi};
use crate::schemas::{AuthApiResponse, LoginCredentials, Session, SignupCredentials, Workspace};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SESSION_KEY: &str = "atlas-auth-session";
pub const SIDEBAR_COLLAPSED_KEY: &str = "atlas-sidebar-collapsed";

/// Key/value JSON files in one directory. Every failure is swallowed:
/// a value that cannot be read is simply absent, and a write that fails
/// leaves the previous state in place.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(key, error = %e, "no stored value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable stored value");
                None
            }
        }
    }

    /// Stores `value`, or removes the key when `value` is `None`.
    pub fn write<T: Serialize>(&self, key: &str, value: Option<&T>) {
        let path = self.path(key);
        let result = match value {
            Some(value) => fs::create_dir_all(&self.dir)
                .and_then(|_| {
                    serde_json::to_vec_pretty(value)
                        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })
                .and_then(|bytes| fs::write(&path, bytes)),
            None => match fs::remove_file(&path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!(key, error = %e, "failed to persist value");
        }
    }
}

/// The signed-in session, mirrored to the local store on every change.
pub struct SessionStore {
    store: LocalStore,
    session: Option<Session>,
}

impl SessionStore {
    /// Loads the persisted session. Stored data that does not parse as a
    /// session with a user is ignored.
    pub fn load(store: LocalStore) -> Self {
        let session = store.read::<Session>(SESSION_KEY);
        Self { store, session }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.session.as_ref().and_then(|s| s.workspace.as_ref())
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.access_token.clone())
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.store.write(SESSION_KEY, session.as_ref());
        self.session = session;
    }

    pub fn set_session_from_response(&mut self, res: AuthApiResponse) -> &Session {
        let session = Session::from_response(res);
        self.store.write(SESSION_KEY, Some(&session));
        self.session.insert(session)
    }

    pub fn login(
        &mut self,
        api: &AuthApi<'_>,
        credentials: &LoginCredentials,
    ) -> ApiResult<Session> {
        let response = api.login(credentials)?;
        Ok(self.set_session_from_response(response).clone())
    }

    pub fn signup(
        &mut self,
        api: &AuthApi<'_>,
        credentials: &SignupCredentials,
    ) -> ApiResult<Session> {
        let response = api.signup(credentials)?;
        Ok(self.set_session_from_response(response).clone())
    }

    /// Drops a stored session the server no longer accepts. Returns true
    /// when one was cleared.
    pub fn clear_if_unauthorized(&mut self, error: &ApiError) -> bool {
        if !error.is_unauthorized() || !self.is_authenticated() {
            return false;
        }
        info!("server rejected the stored session");
        self.set_session(None);
        true
    }

    /// Clears the local session. The server call is best effort and its
    /// failure does not keep the user signed in.
    pub fn logout(&mut self, api: Option<&AuthApi<'_>>) {
        if let Some(api) = api {
            if let Err(e) = api.logout() {
                warn!(error = %e, "server logout failed");
            }
        }
        self.set_session(None);
    }

    /// Switches the active workspace. Returns false when signed out.
    pub fn select_workspace(&mut self, workspace: Workspace) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.workspace = Some(workspace);
        self.store.write(SESSION_KEY, Some(&*session));
        true
    }
}

/// UI preferences persisted next to the session.
pub struct Preferences {
    store: LocalStore,
    sidebar_collapsed: bool,
}

impl Preferences {
    pub fn load(store: LocalStore) -> Self {
        let sidebar_collapsed = store.read::<bool>(SIDEBAR_COLLAPSED_KEY).unwrap_or(false);
        Self {
            store,
            sidebar_collapsed,
        }
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
        self.store.write(SIDEBAR_COLLAPSED_KEY, Some(&collapsed));
    }
}
