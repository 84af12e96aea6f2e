pub mod dashboard_repo;
pub use dashboard_repo::{DashboardRepository, PgDashboardRepository};
pub mod memory_repo;
pub use memory_repo::InMemoryDashboardRepository;
