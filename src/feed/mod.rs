use serde::Serialize;
use uuid::Uuid;

use crate::posts::PostResponse;

pub mod handler;

/// How many posts an anonymous visitor sees on the landing page.
pub const ANONYMOUS_FEED_LIMIT: i64 = 6;
/// How many follow suggestions accompany an authenticated feed.
pub const SUGGESTED_USERS_LIMIT: i64 = 4;

/// Everything the landing page renders in one payload.
#[derive(Debug, Serialize)]
pub struct HomePageResponse {
    pub posts: Vec<PostResponse>,
    /// Present only for authenticated viewers; never merged into `posts`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_users: Option<Vec<SuggestedUser>>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SuggestedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub followers_count: i32,
}

/// Concatenates the followed-author block ahead of everything else.
/// The two blocks partition all posts by author, so there is nothing to
/// de-duplicate; each block arrives already sorted newest first.
pub fn merge_feed(following: Vec<PostResponse>, remaining: Vec<PostResponse>) -> Vec<PostResponse> {
    let mut posts = following;
    posts.extend(remaining);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::{PostAuthor, PostCounts};
    use chrono::{Duration, Utc};

    fn post(title: &str, age_hours: i64) -> PostResponse {
        PostResponse {
            title: title.to_string(),
            description: String::new(),
            image: None,
            category: "tech".to_string(),
            slug: title.to_string(),
            created_at: Utc::now() - Duration::hours(age_hours),
            author: PostAuthor {
                name: "author".to_string(),
                email: "author@example.com".to_string(),
                image: None,
            },
            counts: PostCounts {
                comments: 0,
                likes: 0,
            },
        }
    }

    #[test]
    fn followed_block_precedes_remaining_block() {
        let following = vec![post("f1", 1), post("f2", 5)];
        let remaining = vec![post("r1", 0), post("r2", 3)];

        let feed = merge_feed(following, remaining);

        let titles: Vec<&str> = feed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["f1", "f2", "r1", "r2"]);
    }

    #[test]
    fn each_block_keeps_its_internal_order() {
        let following = vec![post("f1", 1), post("f2", 2), post("f3", 3)];
        let remaining = vec![post("r1", 1), post("r2", 4)];

        let feed = merge_feed(following, remaining);

        assert!(feed[0].created_at >= feed[1].created_at);
        assert!(feed[1].created_at >= feed[2].created_at);
        assert!(feed[3].created_at >= feed[4].created_at);
    }

    #[test]
    fn empty_blocks_merge_cleanly() {
        assert!(merge_feed(vec![], vec![]).is_empty());
        assert_eq!(merge_feed(vec![post("a", 0)], vec![]).len(), 1);
        assert_eq!(merge_feed(vec![], vec![post("b", 0)]).len(), 1);
    }
}
