mod backend;
mod client;
