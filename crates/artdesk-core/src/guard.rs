//! Navigation guard for the articles screen.

use crate::session::SessionStore;
use crate::state::Route;

/// Resolves a navigation request.
///
/// `/articles` requires a token; without one the request lands on the
/// login screen. Evaluated on every navigation, never in the background.
pub fn guard(requested: Route, session: &dyn SessionStore) -> Route {
    match requested {
        Route::Articles if !session.has_token() => {
            tracing::debug!("no session token, redirecting {} to /", requested);
            Route::Login
        }
        route => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn test_articles_without_token_redirects() {
        let session = MemorySessionStore::new();
        assert_eq!(guard(Route::Articles, &session), Route::Login);
    }

    #[test]
    fn test_articles_with_token_passes() {
        let session = MemorySessionStore::with_token("abc");
        assert_eq!(guard(Route::Articles, &session), Route::Articles);
    }

    #[test]
    fn test_login_is_never_guarded() {
        assert_eq!(guard(Route::Login, &MemorySessionStore::new()), Route::Login);
        assert_eq!(
            guard(Route::Login, &MemorySessionStore::with_token("abc")),
            Route::Login
        );
    }

    #[test]
    fn test_reevaluated_after_logout() {
        let session = MemorySessionStore::with_token("abc");
        assert_eq!(guard(Route::Articles, &session), Route::Articles);
        session.clear_token().unwrap();
        assert_eq!(guard(Route::Articles, &session), Route::Login);
    }
}
