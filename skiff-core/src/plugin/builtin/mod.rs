pub mod request_logging;
pub mod spa_fallback;
