// In-memory list engine shared by every board.
// Predicate Builder -> View Engine -> Aggregate Calculator; mutations go through
// `board::Desk`, which owns the collection and the view state together.

pub mod aggregate;
pub mod board;
pub mod flight;
pub mod predicate;
pub mod selection;
pub mod view;
