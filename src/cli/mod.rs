pub mod args;
pub mod command_handlers;

use crate::auth::Credentials;

/// Resolves the CLI credential flags into transport credentials. A token
/// wins over a username/password pair when both are given; a username
/// without a password (or vice versa) yields no credentials.
pub fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
) -> Option<Credentials> {
    match (token, username, password) {
        (Some(token), _, _) => Some(Credentials::Token { token }),
        (None, Some(username), Some(password)) => {
            Some(Credentials::UsernamePassword { username, password })
        }
        _ => None,
    }
}
