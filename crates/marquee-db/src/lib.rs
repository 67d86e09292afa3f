pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use pool::{create_pool, run_migrations, DEFAULT_QUERY_TIMEOUT};
pub use repos::genre::GenreRepo;
pub use repos::movie::{MovieRepo, MovieRow};
pub use repos::ranking::{RankingRepo, RankingRow};
pub use repos::user::{NewUser, UserRepo, UserRow};
