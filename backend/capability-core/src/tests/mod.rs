// Unit tests for individual modules.
// End-to-end client behavior is covered in integration_tests/.

mod config;
mod gateway;
mod state;
