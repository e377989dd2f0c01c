//! Profile URL → username.

use crate::errors::ResolutionError;
use crate::model::UserIdentifier;

/// Path markers that precede a username (`/user/<name>`, `/u/<name>`).
const USER_MARKERS: [&str; 2] = ["user", "u"];

/// Extract the username from a Reddit profile URL.
///
/// Accepts full URLs (`https://www.reddit.com/user/alice/`), bare paths
/// (`/u/alice`), and plain names (`alice`). Query strings and fragments are
/// dropped; surrounding slashes are stripped and the final path segment is
/// taken. A final `user`/`u` segment names nobody unless it follows a
/// marker itself (`/user/user` is the account called `user`).
///
/// # Errors
///
/// Returns [`ResolutionError::Empty`] when no name remains and
/// [`ResolutionError::InvalidName`] when the remaining segment is not a
/// valid Reddit username.
pub fn resolve_profile(url: &str) -> Result<UserIdentifier, ResolutionError> {
    let trimmed = url.trim();
    let path = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/');

    let mut segments = path.rsplit('/');
    let segment = segments.next().unwrap_or_default();
    let follows_marker = segments
        .next()
        .is_some_and(|previous| USER_MARKERS.contains(&previous));
    if segment.is_empty() || (USER_MARKERS.contains(&segment) && !follows_marker) {
        return Err(ResolutionError::Empty {
            url: trimmed.to_string(),
        });
    }

    let identifier = UserIdentifier::new(segment)?;
    tracing::debug!(url = trimmed, user = %identifier, "resolved profile url");
    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://www.reddit.com/user/alice/", "alice")]
    #[case("https://reddit.com/user/alice", "alice")]
    #[case("https://old.reddit.com/u/Bob_99/", "Bob_99")]
    #[case("/user/carol-x", "carol-x")]
    #[case("u/dave", "dave")]
    #[case("erin", "erin")]
    #[case("  https://www.reddit.com/user/frank//  ", "frank")]
    #[case("https://www.reddit.com/user/grace/?utm_source=share", "grace")]
    #[case("https://www.reddit.com/user/heidi#top", "heidi")]
    #[case("https://www.reddit.com/user/user/", "user")]
    #[case("/u/user", "user")]
    #[case("https://reddit.com/user/u", "u")]
    fn resolves_name(#[case] url: &str, #[case] expected: &str) {
        let id = resolve_profile(url).expect("url should resolve");
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("///")]
    #[case("https://www.reddit.com/user/")]
    #[case("https://www.reddit.com/u")]
    #[case("/user/")]
    #[case("user")]
    fn empty_name_is_rejected(#[case] url: &str) {
        assert!(matches!(
            resolve_profile(url),
            Err(ResolutionError::Empty { .. })
        ));
    }

    #[test]
    fn invalid_characters_are_rejected() {
        let err = resolve_profile("https://www.reddit.com/user/bad.name").unwrap_err();
        assert_eq!(
            err,
            ResolutionError::InvalidName {
                name: "bad.name".to_string()
            }
        );
    }
}
