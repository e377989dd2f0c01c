//! Prompt assembly: content blocks, truncation, template rendering.

use persona_config::{CONTENT_PLACEHOLDER, USERNAME_PLACEHOLDER};
use persona_core::{ContentBundle, ContentItem, UserIdentifier};

/// Separator placed between content blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// One labeled block per item: title and body for posts, body for comments.
#[must_use]
pub fn content_block(item: ContentItem<'_>) -> String {
    let header = format!("{} in r/{}", item.kind(), item.subreddit());
    match item {
        ContentItem::Post(post) => format!("{header}: {}\n{}", post.title, post.text),
        ContentItem::Comment(comment) => format!("{header}: {}", comment.text),
    }
}

/// The first `max_items` blocks of `bundle`, posts before comments.
///
/// Items past the cap are dropped.
#[must_use]
pub fn content_blocks(bundle: &ContentBundle, max_items: usize) -> Vec<String> {
    bundle.items().take(max_items).map(content_block).collect()
}

/// User-role prompt template with `{username}` and `{content}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute the placeholders.
    ///
    /// `{username}` is filled first so a username can never inject a
    /// `{content}` marker; content text is inserted verbatim.
    #[must_use]
    pub fn render(&self, user: &UserIdentifier, content: &str) -> String {
        self.template
            .replace(USERNAME_PLACEHOLDER, user.as_str())
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// Join the capped blocks and render the template around them.
#[must_use]
pub fn build_prompt(
    template: &PromptTemplate,
    user: &UserIdentifier,
    bundle: &ContentBundle,
    max_items: usize,
) -> String {
    let content = content_blocks(bundle, max_items).join(BLOCK_SEPARATOR);
    template.render(user, &content)
}
