use git2::{Cred, RemoteCallbacks};

/// Credentials for the remote transport. Absent credentials are modelled as
/// `Option<Credentials>` at the service boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    UsernamePassword { username: String, password: String },
    Token { token: String },
}

impl Credentials {
    /// The basic-auth pair handed to the transport. Tokens go in the
    /// username field with an empty password, the usual convention for
    /// token-based HTTPS auth.
    pub fn as_userpass(&self) -> (&str, &str) {
        match self {
            Credentials::UsernamePassword { username, password } => (username, password),
            Credentials::Token { token } => (token, ""),
        }
    }
}

/// Installs a credentials callback when credentials were supplied. With no
/// credentials, no callback is installed and the transport attempts the
/// clone unauthenticated.
pub fn configure_credentials(
    credentials: Option<&Credentials>,
    callbacks: &mut RemoteCallbacks<'_>,
) {
    if let Some(credentials) = credentials {
        let credentials = credentials.clone();
        callbacks.credentials(move |_url, _username_from_url, _allowed_types| {
            let (username, password) = credentials.as_userpass();
            Cred::userpass_plaintext(username, password)
        });
    }
}
