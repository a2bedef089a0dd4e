mod autoscroll;
mod backdrop;
mod draw;
mod engine;
mod links;

pub use engine::PortfolioEngine;
