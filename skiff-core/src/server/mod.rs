mod gateway;
mod setup;

pub use gateway::SkiffGateway;
pub use setup::run;
