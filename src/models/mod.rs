pub mod itinerary;
pub mod preferences;
pub mod travel_document;
pub mod trip;
pub mod weather;
