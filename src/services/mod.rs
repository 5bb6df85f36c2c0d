pub mod error;
pub mod portfolio_service;

pub use error::PortfolioError;
pub use portfolio_service::PortfolioService;
