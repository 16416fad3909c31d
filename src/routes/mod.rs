pub mod health;
pub mod itinerary;
pub mod travel_wallet;
pub mod trip;
