use super::NewPost;

/// Posts inserted when the store is empty at startup.
pub fn sample_posts() -> Vec<NewPost> {
    vec![
        NewPost::published(
            "Welcome to InBrief - Railway Deployment!",
            "Your news application is now running on Railway with a completely fresh setup and enhanced admin dashboard.",
            "System",
        ),
        NewPost::published(
            "Enhanced Admin Dashboard",
            "The new admin panel includes post management, publish/unpublish toggles, and better mobile app integration.",
            "Admin",
        ),
        NewPost::published(
            "Mobile App Ready",
            "All API endpoints are optimized for your Flutter mobile application with proper CORS and error handling.",
            "DevOps",
        ),
        NewPost::published(
            "Database Persistence",
            "Your news posts are now permanently stored in PostgreSQL database with automatic backups.",
            "System",
        ),
    ]
}
