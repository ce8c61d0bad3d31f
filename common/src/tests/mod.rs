mod error_location;
mod owner;
