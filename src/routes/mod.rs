pub mod default_route;
pub mod review_route;
