use serde::Serialize;
use sqlx::FromRow;

pub mod handler;

/// Shared select list for post projections: the rendered fields, the author
/// (password column excluded), and the comment/like counts. Handlers append
/// their own WHERE / ORDER BY / LIMIT clauses.
pub const POST_SELECT: &str = r#"
    SELECT
        p.title, p.description, p.image, p.category, p.slug, p.created_at,
        u.name AS author_name, u.email AS author_email, u.image AS author_image,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count,
        (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count
    FROM posts p
    JOIN users u ON p.author_id = u.id
"#;

/// Flat row shape produced by `POST_SELECT`.
#[derive(FromRow)]
pub struct PostFromDb {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub slug: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author_name: String,
    pub author_email: String,
    pub author_image: Option<String>,
    pub comments_count: i64,
    pub likes_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub slug: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: PostAuthor,
    pub counts: PostCounts,
}

#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostCounts {
    pub comments: i64,
    pub likes: i64,
}

impl From<PostFromDb> for PostResponse {
    fn from(p: PostFromDb) -> Self {
        PostResponse {
            title: p.title,
            description: p.description,
            image: p.image,
            category: p.category,
            slug: p.slug,
            created_at: p.created_at,
            author: PostAuthor {
                name: p.author_name,
                email: p.author_email,
                image: p.author_image,
            },
            counts: PostCounts {
                comments: p.comments_count,
                likes: p.likes_count,
            },
        }
    }
}
