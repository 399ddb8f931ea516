//! Crawler components and business logic services

pub mod catalog;
pub mod problem_ingest;
pub mod problem_service;
pub mod ranking_service;
pub mod stats;
pub mod submission_ingest;
pub mod user_service;

pub use catalog::ContestCatalog;
pub use problem_ingest::ProblemSetIngester;
pub use problem_service::ProblemService;
pub use ranking_service::RankingService;
pub use stats::StatsMaintainer;
pub use submission_ingest::SubmissionIngester;
pub use user_service::UserService;
