mod error;
mod ws_tests;
