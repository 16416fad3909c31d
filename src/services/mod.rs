pub mod crowd_service;
pub mod gemini_service;
pub mod itinerary_generation_service;
pub mod itinerary_parser;
pub mod prompt_service;
pub mod token_service;
pub mod weather_service;
